//! # Dial Clock Core Library
//!
//! This library drives an analog-style 24-hour clock face on a fixed-resolution
//! round display. Its core is the arithmetic that turns a wall-clock time (or an
//! operator-supplied override) into a needle position on the dial, plus the small
//! state machine that decides which of the two is in charge.
//!
//! ## Design Philosophy
//!
//! ### Dual-resolution scale
//! The dial carries two differently-grained tick scales that must stay in exact
//! geometric agreement:
//! - **Fine ticks**: the smallest addressable positions, used for needle
//!   placement (one per minute in the default configuration, 1440 around the
//!   full dial)
//! - **Coarse ticks**: a sparser scale used only for the visible hour labels
//!   (one per 10 minutes by default, 144 around the dial)
//!
//! Both scales share the same angular range and rotation offset, so a fine tick
//! and its coarse counterpart always land at the same visual angle (within one
//! coarse tick's angular width, since the per-tick angle is a real number and
//! need not divide 360° exactly).
//!
//! ### Single owned engine
//! All mutable state lives in one [`engine::ModeEngine`] instance owned by the
//! host application. There are no module-level statics and no singletons; the
//! periodic driver and the command handlers borrow the same engine.
//!
//! ### Data Flow
//! 1. **Automatic**: periodic tick → read time source → compute fine tick →
//!    hand to the renderer
//! 2. **Manual**: operator pins a time (`HH:MM`) or a raw tick index; the
//!    engine stops consulting the time source until reset
//! 3. **Rendering**: the renderer maps the fine tick index to a needle angle
//!    using the per-tick angle; rendering never feeds back into the engine
//!
//! ## Core Types
//!
//! - [`WallTime`]: an (hour, minute) pair, the time currently driving the needle
//! - [`geometry::ClockGeometry`]: immutable tick/angle conversion constants
//! - [`engine::ModeEngine`]: display-mode state machine and tick authority

use serde::{Deserialize, Serialize};

// Module declarations
pub mod config;
pub mod engine;
pub mod geometry;
pub mod renderer;

/// A wall-clock time of day, hour and minute only.
///
/// This is the "effective time" driving the needle: either mirrored from the
/// live time source every evaluation, or pinned by a manual override. It is
/// deliberately small:
/// - `u8` hour (0-23) and `u8` minute (0-59), 2 bytes total
/// - No seconds, no date, no timezone; the dial resolves one minute at most
///
/// Validation happens at the edges (time source contract, command parsing);
/// a constructed `WallTime` is always in range.
///
/// # Example
/// ```
/// use dial_clock_lib::WallTime;
///
/// let afternoon = WallTime { hour: 14, minute: 30 };
/// assert_eq!(afternoon.hour, 14);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallTime {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Minute of hour (0-59)
    pub minute: u8,
}

impl WallTime {
    /// Midnight, the fixed-zero reset target.
    pub const ZERO: WallTime = WallTime { hour: 0, minute: 0 };
}

impl std::fmt::Display for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
