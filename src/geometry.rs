//! # Clock Dial Geometry
//!
//! Pure conversion math between wall-clock time, tick indices, and needle
//! angles. Everything here is computed once from [`GeometryParams`] and is
//! read-only afterwards: no I/O, no failure modes, no state.
//!
//! ## Tick model
//!
//! The dial spans the full 360° and is divided twice, at different grains:
//!
//! - the **fine** scale places the needle: `fine_interval_minutes` minutes per
//!   tick, `24 * (60 / fine_interval)` ticks around the dial
//! - the **coarse** scale places the hour labels: same formula with
//!   `coarse_interval_minutes`
//!
//! A fixed `rotation_degrees` aligns tick 0 with the desired visual start
//! (-90° puts it at the top of the dial). Rather than rotating at render time
//! only, the rotation is folded into the tick indices as a signed tick offset,
//! so both scales shift together:
//!
//! ```text
//! fine_tick_offset = round(-rotation / angle_per_fine_tick)
//! fine_tick_for(h, m) = (h * ticks_per_hour + m / interval + offset) mod total
//! ```
//!
//! The modulo is *floored* (`rem_euclid`): the offset is negative whenever the
//! rotation is positive, and a truncating `%` would hand the renderer an index
//! outside `[0, total)`.
//!
//! ## Angle convention
//!
//! 0° points at the 3-o'clock direction and angles increase clockwise (screen
//! coordinates, y axis down). With the default -90° rotation, tick 0 renders
//! at the top.
//!
//! ## Tolerance
//!
//! `angle_per_fine_tick` is a real-valued ratio and does not evenly divide
//! 360° for every tick count. The fine and coarse scales therefore agree only
//! to within one coarse tick's angular width; callers that compare the two
//! scales must use that tolerance, not exact equality.

/// First hour on the dial.
pub const HOUR_BEGIN: i32 = 0;
/// Last hour on the dial (24-hour face).
pub const HOUR_END: i32 = 23;
/// First minute of an hour.
pub const MINUTE_BEGIN: i32 = 0;
/// Last minute of an hour.
pub const MINUTE_END: i32 = 59;

/// Hours represented on the dial.
pub const TOTAL_HOURS: i32 = HOUR_END - HOUR_BEGIN + 1;
/// Minutes in one hour.
pub const TOTAL_MINUTES: i32 = MINUTE_END - MINUTE_BEGIN + 1;
/// Full angular sweep of the dial in degrees.
pub const TOTAL_ANGLE: i32 = 360;

/// Tunable inputs to [`ClockGeometry`].
///
/// Defaults match the reference dial: one-minute fine ticks, ten-minute
/// coarse ticks, and a -90° rotation that puts tick 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryParams {
    /// Minutes per fine tick (needle resolution)
    pub fine_interval_minutes: i32,
    /// Minutes per coarse tick (hour-label resolution)
    pub coarse_interval_minutes: i32,
    /// Fixed rotation aligning tick 0 with the visual start, in degrees
    pub rotation_degrees: i32,
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams {
            fine_interval_minutes: 1,
            coarse_interval_minutes: 10,
            rotation_degrees: -90,
        }
    }
}

/// Immutable dial geometry: tick counts, per-tick angles, and rotation
/// offsets for both scales.
///
/// Construct once at startup with [`ClockGeometry::new`] and share by
/// reference; all methods are pure and infallible.
#[derive(Clone, Copy, Debug)]
pub struct ClockGeometry {
    fine_interval: i32,
    coarse_interval: i32,
    rotation_degrees: i32,
    fine_ticks_per_hour: i32,
    coarse_ticks_per_hour: i32,
    total_fine_ticks: i32,
    total_coarse_ticks: i32,
    angle_per_fine_tick: f32,
    angle_per_coarse_tick: f32,
    fine_tick_offset: i32,
    coarse_tick_offset: i32,
}

impl ClockGeometry {
    /// Compute the full geometry from its parameters.
    ///
    /// Intervals are clamped to at least one minute. Intervals that do not
    /// divide 60 truncate (`60 / interval` in integer math), shrinking the
    /// dial's resolution rather than failing.
    pub fn new(params: GeometryParams) -> Self {
        let fine_interval = params.fine_interval_minutes.max(1);
        let coarse_interval = params.coarse_interval_minutes.max(1);

        let fine_ticks_per_hour = TOTAL_MINUTES / fine_interval;
        let coarse_ticks_per_hour = TOTAL_MINUTES / coarse_interval;
        let total_fine_ticks = TOTAL_HOURS * fine_ticks_per_hour;
        let total_coarse_ticks = TOTAL_HOURS * coarse_ticks_per_hour;

        let angle_per_fine_tick = TOTAL_ANGLE as f32 / total_fine_ticks as f32;
        let angle_per_coarse_tick = TOTAL_ANGLE as f32 / total_coarse_ticks as f32;

        // Fold the rotation into the indices. Negative rotation gives a
        // positive offset and vice versa; wrapping happens per lookup.
        let rotation = params.rotation_degrees as f32;
        let fine_tick_offset = (-rotation / angle_per_fine_tick).round() as i32;
        let coarse_tick_offset = (-rotation / angle_per_coarse_tick).round() as i32;

        ClockGeometry {
            fine_interval,
            coarse_interval,
            rotation_degrees: params.rotation_degrees,
            fine_ticks_per_hour,
            coarse_ticks_per_hour,
            total_fine_ticks,
            total_coarse_ticks,
            angle_per_fine_tick,
            angle_per_coarse_tick,
            fine_tick_offset,
            coarse_tick_offset,
        }
    }

    /// Fine tick index for a validated (hour, minute), always in
    /// `[0, total_fine_ticks)`.
    pub fn fine_tick_for(&self, hour: i32, minute: i32) -> i32 {
        let position = hour * self.fine_ticks_per_hour + minute / self.fine_interval;
        (position + self.fine_tick_offset).rem_euclid(self.total_fine_ticks)
    }

    /// Coarse tick index for a validated (hour, minute), always in
    /// `[0, total_coarse_ticks)`. Used for hour-label placement and for
    /// checking that the two scales agree.
    pub fn coarse_tick_for(&self, hour: i32, minute: i32) -> i32 {
        let position = hour * self.coarse_ticks_per_hour + minute / self.coarse_interval;
        (position + self.coarse_tick_offset).rem_euclid(self.total_coarse_ticks)
    }

    /// Reduce an arbitrary raw tick value into `[0, total_fine_ticks)`.
    ///
    /// Floored modulo: `wrap_fine(-1)` is the last tick, not `-1`.
    pub fn wrap_fine(&self, raw: i64) -> i32 {
        raw.rem_euclid(self.total_fine_ticks as i64) as i32
    }

    /// Visual angle of a fine tick in `[0, 360)` degrees.
    pub fn needle_angle(&self, tick: i32) -> f32 {
        (self.rotation_degrees as f32 + tick as f32 * self.angle_per_fine_tick).rem_euclid(360.0)
    }

    /// Visual angle of a coarse tick in `[0, 360)` degrees.
    pub fn coarse_angle(&self, tick: i32) -> f32 {
        (self.rotation_degrees as f32 + tick as f32 * self.angle_per_coarse_tick).rem_euclid(360.0)
    }

    /// Fine ticks per hour (60 in the default configuration).
    pub fn fine_ticks_per_hour(&self) -> i32 {
        self.fine_ticks_per_hour
    }

    /// Coarse ticks per hour (6 in the default configuration).
    pub fn coarse_ticks_per_hour(&self) -> i32 {
        self.coarse_ticks_per_hour
    }

    /// Total fine ticks around the dial (1440 in the default configuration).
    pub fn total_fine_ticks(&self) -> i32 {
        self.total_fine_ticks
    }

    /// Total coarse ticks around the dial (144 in the default configuration).
    pub fn total_coarse_ticks(&self) -> i32 {
        self.total_coarse_ticks
    }

    /// Degrees swept by one fine tick.
    pub fn angle_per_fine_tick(&self) -> f32 {
        self.angle_per_fine_tick
    }

    /// Degrees swept by one coarse tick.
    pub fn angle_per_coarse_tick(&self) -> f32 {
        self.angle_per_coarse_tick
    }

    /// Configured rotation in degrees.
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Signed index shift folded into fine tick lookups.
    pub fn fine_tick_offset(&self) -> i32 {
        self.fine_tick_offset
    }

    /// Signed index shift folded into coarse tick lookups.
    pub fn coarse_tick_offset(&self) -> i32 {
        self.coarse_tick_offset
    }
}

impl Default for ClockGeometry {
    fn default() -> Self {
        ClockGeometry::new(GeometryParams::default())
    }
}
