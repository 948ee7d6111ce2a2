//! # Display-Mode Engine
//!
//! Owns the display mode and the effective time, and is the sole authority for
//! which fine tick index is currently "true". The host builds exactly one
//! [`ModeEngine`] and drives it from two directions:
//!
//! - a periodic driver calls [`ModeEngine::evaluate`] every tick interval and
//!   hands the returned index to the dial renderer
//! - command handlers call [`ModeEngine::set_time`], [`ModeEngine::set_range`]
//!   and [`ModeEngine::reset`] in response to operator input
//!
//! ## State machine
//!
//! States: `Automatic`, `ManualTime`, `ManualRaw`; initial state `Automatic`;
//! every state is reachable from every other via the three commands. Rejected
//! commands (malformed text, out-of-range time, overrides disabled) leave the
//! engine exactly as it was; there are no partially applied transitions.
//!
//! ## Ordering
//!
//! All operations are synchronous, bounded-time computations that take
//! `&mut self`, so a command that completes before the next periodic
//! `evaluate` is guaranteed to be reflected in that evaluation's result.
//! `set_time` additionally updates the effective time immediately, so a
//! render issued right after the command already shows the override.

use crate::geometry::{ClockGeometry, HOUR_BEGIN, HOUR_END, MINUTE_BEGIN, MINUTE_END};
use crate::WallTime;
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from [`ModeEngine::set_time`].
///
/// All variants are local and recoverable; the engine stays in its prior
/// mode whenever one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeParseError {
    /// Input text does not match the `HH:MM` pattern
    #[error("malformed time input, expected HH:MM")]
    MalformedInput,

    /// Parsed hour outside [0, 23]
    #[error("hour {0} out of range (00-23)")]
    InvalidHour(i32),

    /// Parsed minute outside [0, 59]
    #[error("minute {0} out of range (00-59)")]
    InvalidMinute(i32),

    /// Engine was built with manual overrides disabled
    #[error("manual override is disabled")]
    OverrideDisabled,
}

/// Errors from [`ModeEngine::set_range`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeParseError {
    /// Input text is not an integer
    #[error("malformed range input, expected an integer")]
    MalformedInput,

    /// Engine was built with manual overrides disabled
    #[error("manual override is disabled")]
    OverrideDisabled,
}

/// Source of the current wall-clock time, the engine's read-only collaborator.
///
/// Implementations must return in-range values (hour 0-23, minute 0-59);
/// the engine performs no smoothing and no validation on this boundary.
pub trait TimeSource {
    /// Current hour and minute of day.
    fn now(&self) -> WallTime;
}

/// [`TimeSource`] backed by the host system clock in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> WallTime {
        let now = Local::now();
        WallTime {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
        }
    }
}

/// What drives the needle right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Mirror the time source on every evaluation
    Automatic,
    /// Pinned to an operator-chosen, validated time
    ManualTime {
        /// Pinned hour (0-23)
        hour: i32,
        /// Pinned minute (0-59)
        minute: i32,
    },
    /// Pinned directly to a raw fine tick value, bypassing hour/minute
    /// semantics; used for range-testing the dial. Stored unreduced and
    /// wrapped at evaluation time.
    ManualRaw {
        /// Raw tick value, any magnitude or sign
        tick: i64,
    },
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Automatic => write!(f, "automatic"),
            DisplayMode::ManualTime { hour, minute } => {
                write!(f, "manual {:02}:{:02}", hour, minute)
            }
            DisplayMode::ManualRaw { tick } => write!(f, "raw {}", tick),
        }
    }
}

/// Where [`ModeEngine::reset`] lands.
///
/// Some dial installations want reset to resume tracking the live clock,
/// others want the needle parked at midnight. Both are supported as a
/// runtime choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetTarget {
    /// Resume tracking the time source
    #[default]
    Automatic,
    /// Pin the needle to 00:00
    FixedZero,
}

/// Constructor-time behavior switches for [`ModeEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Accept `set_time`/`set_range` commands; when false the engine only
    /// ever tracks the time source
    pub allow_manual_override: bool,
    /// Where `reset` lands
    pub reset_target: ResetTarget,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            allow_manual_override: true,
            reset_target: ResetTarget::Automatic,
        }
    }
}

/// Display-mode state machine and tick authority.
///
/// # Example
/// ```
/// use dial_clock_lib::engine::{ModeEngine, EngineOptions, TimeSource};
/// use dial_clock_lib::geometry::ClockGeometry;
/// use dial_clock_lib::WallTime;
///
/// struct Noon;
/// impl TimeSource for Noon {
///     fn now(&self) -> WallTime {
///         WallTime { hour: 12, minute: 0 }
///     }
/// }
///
/// let mut engine = ModeEngine::new(ClockGeometry::default(), EngineOptions::default());
/// let tick = engine.evaluate(&Noon);
/// assert_eq!(tick, engine.geometry().fine_tick_for(12, 0));
///
/// engine.set_time("07:30").unwrap();
/// assert_eq!(engine.evaluate(&Noon), engine.geometry().fine_tick_for(7, 30));
/// ```
#[derive(Debug)]
pub struct ModeEngine {
    geometry: ClockGeometry,
    options: EngineOptions,
    mode: DisplayMode,
    effective: WallTime,
}

impl ModeEngine {
    /// Build an engine in `Automatic` mode with the effective time at
    /// midnight until the first evaluation.
    pub fn new(geometry: ClockGeometry, options: EngineOptions) -> Self {
        ModeEngine {
            geometry,
            options,
            mode: DisplayMode::Automatic,
            effective: WallTime::ZERO,
        }
    }

    /// The geometry this engine computes against.
    pub fn geometry(&self) -> &ClockGeometry {
        &self.geometry
    }

    /// Current display mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The time currently driving the needle. In `ManualRaw` mode this is
    /// whatever was effective before the raw override; raw ticks bypass
    /// hour/minute semantics entirely.
    pub fn effective_time(&self) -> WallTime {
        self.effective
    }

    /// Produce the fine tick index that is currently "true".
    ///
    /// In `Automatic` mode this reads the time source and stores the result
    /// as the effective time; the manual modes never touch the source.
    pub fn evaluate(&mut self, source: &dyn TimeSource) -> i32 {
        match self.mode {
            DisplayMode::Automatic => {
                self.effective = source.now();
                self.geometry
                    .fine_tick_for(self.effective.hour as i32, self.effective.minute as i32)
            }
            DisplayMode::ManualTime { hour, minute } => self.geometry.fine_tick_for(hour, minute),
            DisplayMode::ManualRaw { tick } => self.geometry.wrap_fine(tick),
        }
    }

    /// Parse an `HH:MM` command and pin the needle to that time.
    ///
    /// Accepts surrounding whitespace around either number. On any error the
    /// mode and effective time are unchanged.
    pub fn set_time(&mut self, input: &str) -> Result<(), TimeParseError> {
        let (hour_text, minute_text) = input
            .split_once(':')
            .ok_or(TimeParseError::MalformedInput)?;
        let hour: i32 = hour_text
            .trim()
            .parse()
            .map_err(|_| TimeParseError::MalformedInput)?;
        let minute: i32 = minute_text
            .trim()
            .parse()
            .map_err(|_| TimeParseError::MalformedInput)?;
        self.set_time_parts(hour, minute)
    }

    /// Pin the needle to a pre-parsed (hour, minute).
    ///
    /// Validates ranges, transitions to `ManualTime`, and updates the
    /// effective time immediately so the next render reflects the override
    /// without waiting for a periodic tick.
    pub fn set_time_parts(&mut self, hour: i32, minute: i32) -> Result<(), TimeParseError> {
        if !self.options.allow_manual_override {
            return Err(TimeParseError::OverrideDisabled);
        }
        if !(HOUR_BEGIN..=HOUR_END).contains(&hour) {
            return Err(TimeParseError::InvalidHour(hour));
        }
        if !(MINUTE_BEGIN..=MINUTE_END).contains(&minute) {
            return Err(TimeParseError::InvalidMinute(minute));
        }

        self.mode = DisplayMode::ManualTime { hour, minute };
        self.effective = WallTime {
            hour: hour as u8,
            minute: minute as u8,
        };
        Ok(())
    }

    /// Parse an integer command and pin the needle to that raw tick.
    pub fn set_range(&mut self, input: &str) -> Result<(), RangeParseError> {
        let tick: i64 = input
            .trim()
            .parse()
            .map_err(|_| RangeParseError::MalformedInput)?;
        self.set_range_raw(tick)
    }

    /// Pin the needle to a raw tick value.
    ///
    /// No bounds are applied beyond representability: any `i64` is accepted
    /// and reduced with floored modulo at evaluation time, so `-1` renders
    /// as the last tick on the dial.
    pub fn set_range_raw(&mut self, tick: i64) -> Result<(), RangeParseError> {
        if !self.options.allow_manual_override {
            return Err(RangeParseError::OverrideDisabled);
        }
        self.mode = DisplayMode::ManualRaw { tick };
        Ok(())
    }

    /// Clear any manual override. Idempotent, always succeeds.
    ///
    /// Lands in `Automatic` or pinned at 00:00 depending on the configured
    /// [`ResetTarget`].
    pub fn reset(&mut self) {
        match self.options.reset_target {
            ResetTarget::Automatic => {
                self.mode = DisplayMode::Automatic;
            }
            ResetTarget::FixedZero => {
                self.mode = DisplayMode::ManualTime { hour: 0, minute: 0 };
                self.effective = WallTime::ZERO;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryParams;

    /// Deterministic time source for tests.
    struct FixedTimeSource(WallTime);

    impl TimeSource for FixedTimeSource {
        fn now(&self) -> WallTime {
            self.0
        }
    }

    fn engine() -> ModeEngine {
        ModeEngine::new(ClockGeometry::default(), EngineOptions::default())
    }

    fn at(hour: u8, minute: u8) -> FixedTimeSource {
        FixedTimeSource(WallTime { hour, minute })
    }

    #[test]
    fn test_automatic_mirrors_time_source() {
        let mut engine = engine();
        let source = at(12, 34);

        let tick = engine.evaluate(&source);
        assert_eq!(tick, engine.geometry().fine_tick_for(12, 34));
        assert_eq!(engine.effective_time(), WallTime { hour: 12, minute: 34 });
        assert_eq!(engine.mode(), DisplayMode::Automatic);
    }

    #[test]
    fn test_set_time_pins_needle_and_ignores_source() {
        let mut engine = engine();
        engine.set_time("07:30").unwrap();

        assert_eq!(engine.mode(), DisplayMode::ManualTime { hour: 7, minute: 30 });
        // Effective time updates before any evaluation.
        assert_eq!(engine.effective_time(), WallTime { hour: 7, minute: 30 });

        // The source says something else entirely; manual wins.
        let tick = engine.evaluate(&at(23, 59));
        assert_eq!(tick, engine.geometry().fine_tick_for(7, 30));
    }

    #[test]
    fn test_set_time_accepts_loose_whitespace() {
        let mut engine = engine();
        engine.set_time(" 7 : 05 ").unwrap();
        assert_eq!(engine.mode(), DisplayMode::ManualTime { hour: 7, minute: 5 });
    }

    #[test]
    fn test_set_time_rejects_invalid_hour() {
        let mut engine = engine();
        engine.set_time("20:00").unwrap();
        let before = engine.evaluate(&at(1, 0));

        assert_eq!(engine.set_time("25:00"), Err(TimeParseError::InvalidHour(25)));

        // Mode is unchanged: still the prior manual time, not Automatic.
        let after = engine.evaluate(&at(1, 0));
        assert_eq!(before, after);
        assert_eq!(engine.mode(), DisplayMode::ManualTime { hour: 20, minute: 0 });
    }

    #[test]
    fn test_set_time_rejects_invalid_minute() {
        let mut engine = engine();
        assert_eq!(engine.set_time("10:60"), Err(TimeParseError::InvalidMinute(60)));
        assert_eq!(engine.set_time("10:-1"), Err(TimeParseError::InvalidMinute(-1)));
        assert_eq!(engine.mode(), DisplayMode::Automatic);
    }

    #[test]
    fn test_set_time_rejects_malformed_text() {
        let mut engine = engine();
        for input in ["", "noon", "1230", "12:", ":30", "12:3a", "12:30:00"] {
            assert_eq!(
                engine.set_time(input),
                Err(TimeParseError::MalformedInput),
                "input {:?} should be malformed",
                input
            );
        }
        assert_eq!(engine.mode(), DisplayMode::Automatic);
    }

    #[test]
    fn test_set_range_wraps_with_floored_modulo() {
        let mut engine = engine();
        let total = engine.geometry().total_fine_ticks();

        engine.set_range("-1").unwrap();
        assert_eq!(engine.evaluate(&at(0, 0)), total - 1);

        engine.set_range_raw(total as i64 + 5).unwrap();
        assert_eq!(engine.evaluate(&at(0, 0)), 5);

        engine.set_range_raw(i64::MIN + 1).unwrap();
        let tick = engine.evaluate(&at(0, 0));
        assert!((0..total).contains(&tick));
    }

    #[test]
    fn test_set_range_rejects_non_integers() {
        let mut engine = engine();
        assert_eq!(engine.set_range("1.5"), Err(RangeParseError::MalformedInput));
        assert_eq!(engine.set_range("ten"), Err(RangeParseError::MalformedInput));
        assert_eq!(engine.mode(), DisplayMode::Automatic);
    }

    #[test]
    fn test_raw_mode_leaves_effective_time_alone() {
        let mut engine = engine();
        engine.evaluate(&at(9, 15));
        engine.set_range("100").unwrap();
        engine.evaluate(&at(18, 45));

        // Raw overrides bypass hour/minute semantics; the stored effective
        // time stays at the last real reading.
        assert_eq!(engine.effective_time(), WallTime { hour: 9, minute: 15 });
    }

    #[test]
    fn test_reset_returns_to_automatic() {
        let mut engine = engine();
        let source = at(16, 20);
        let automatic_tick = engine.evaluate(&source);

        engine.set_time("07:30").unwrap();
        engine.reset();
        assert_eq!(engine.mode(), DisplayMode::Automatic);
        assert_eq!(engine.evaluate(&source), automatic_tick);

        // Idempotent.
        engine.reset();
        assert_eq!(engine.mode(), DisplayMode::Automatic);
    }

    #[test]
    fn test_reset_to_fixed_zero() {
        let mut engine = ModeEngine::new(
            ClockGeometry::default(),
            EngineOptions {
                reset_target: ResetTarget::FixedZero,
                ..EngineOptions::default()
            },
        );
        engine.set_range("777").unwrap();
        engine.reset();

        assert_eq!(engine.mode(), DisplayMode::ManualTime { hour: 0, minute: 0 });
        assert_eq!(engine.effective_time(), WallTime::ZERO);
        let tick = engine.evaluate(&at(5, 5));
        assert_eq!(tick, engine.geometry().fine_tick_for(0, 0));
    }

    #[test]
    fn test_overrides_can_be_disabled() {
        let mut engine = ModeEngine::new(
            ClockGeometry::default(),
            EngineOptions {
                allow_manual_override: false,
                ..EngineOptions::default()
            },
        );

        assert_eq!(engine.set_time("07:30"), Err(TimeParseError::OverrideDisabled));
        assert_eq!(engine.set_range("42"), Err(RangeParseError::OverrideDisabled));
        assert_eq!(engine.mode(), DisplayMode::Automatic);

        let tick = engine.evaluate(&at(3, 33));
        assert_eq!(tick, engine.geometry().fine_tick_for(3, 33));
    }

    #[test]
    fn test_all_transitions_reachable() {
        let mut engine = engine();

        engine.set_time("01:00").unwrap();
        assert!(matches!(engine.mode(), DisplayMode::ManualTime { .. }));

        engine.set_range("5").unwrap();
        assert!(matches!(engine.mode(), DisplayMode::ManualRaw { .. }));

        engine.set_time("02:00").unwrap();
        assert!(matches!(engine.mode(), DisplayMode::ManualTime { .. }));

        engine.reset();
        assert_eq!(engine.mode(), DisplayMode::Automatic);

        engine.set_range("5").unwrap();
        engine.reset();
        assert_eq!(engine.mode(), DisplayMode::Automatic);
    }

    #[test]
    fn test_engine_works_with_rotated_geometry() {
        let mut engine = ModeEngine::new(
            ClockGeometry::new(GeometryParams {
                rotation_degrees: 90,
                ..GeometryParams::default()
            }),
            EngineOptions::default(),
        );
        // Negative offsets still produce in-range ticks.
        let tick = engine.evaluate(&at(0, 0));
        assert!((0..engine.geometry().total_fine_ticks()).contains(&tick));
    }
}
