//! # Dial Rendering
//!
//! This module handles rendering the clock dial to both pixel displays and
//! ASCII terminal output. The renderers are pure consumers of the mode
//! engine: they receive a single fine tick index per evaluation and map it
//! to a needle angle with the shared [`ClockGeometry`]; nothing here feeds
//! back into engine state.
//!
//! Angles follow the dial convention: 0° at the 3-o'clock direction,
//! increasing clockwise (screen coordinates, y axis down).

use crate::engine::DisplayMode;
use crate::geometry::ClockGeometry;
use crate::WallTime;
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};

/// Status line shown above the dial: what the needle reflects and why.
#[derive(Clone, Copy, Debug)]
pub struct DialStatus {
    /// Time currently driving the needle
    pub effective: WallTime,
    /// Mode that produced it
    pub mode: DisplayMode,
    /// Fine tick index handed over by the engine
    pub tick: i32,
}

impl std::fmt::Display for DialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time: {}  Pos: {}  Mode: {}",
            self.effective, self.tick, self.mode
        )
    }
}

/// Convert a dial angle in degrees to a grid/screen offset from the center.
///
/// `aspect` stretches x to compensate for non-square cells (terminal
/// characters are roughly twice as tall as wide).
fn angle_to_offset(angle_degrees: f32, radius: f32, aspect: f32) -> (f32, f32) {
    let radians = angle_degrees.to_radians();
    (radius * aspect * radians.cos(), radius * radians.sin())
}

/// Render the dial as a character grid and return it as a string.
///
/// Draws the outer ring, hour labels at their coarse tick positions, the
/// needle ray for the given fine tick, and a center cap. Separated from
/// [`draw_ascii`] so tests can inspect the output.
pub fn render_ascii(geometry: &ClockGeometry, status: &DialStatus) -> String {
    const ROWS: usize = 25;
    const COLS: usize = 53;
    // Terminal cells are taller than wide; stretch x by 2.
    const ASPECT: f32 = 2.0;

    let center_row = (ROWS / 2) as f32;
    let center_col = (COLS / 2) as f32;
    let radius = center_row - 0.5;

    let mut grid = vec![vec![' '; COLS]; ROWS];

    let mut plot = |col: f32, row: f32, ch: char| {
        let c = col.round() as i64;
        let r = row.round() as i64;
        if (0..COLS as i64).contains(&c) && (0..ROWS as i64).contains(&r) {
            grid[r as usize][c as usize] = ch;
        }
    };

    // Outer ring
    for step in 0..180 {
        let (dx, dy) = angle_to_offset(step as f32 * 2.0, radius, ASPECT);
        plot(center_col + dx, center_row + dy, '·');
    }

    // Hour labels at their coarse tick positions, pulled slightly inward
    for hour in 0..24 {
        let tick = geometry.coarse_tick_for(hour, 0);
        let (dx, dy) = angle_to_offset(geometry.coarse_angle(tick), radius - 2.0, ASPECT);
        let label = hour.to_string();
        let col = center_col + dx - (label.len() as f32 - 1.0) / 2.0;
        let row = center_row + dy;
        for (i, ch) in label.chars().enumerate() {
            plot(col + i as f32, row, ch);
        }
    }

    // Needle ray from just outside the cap to 70% of the radius
    let needle_angle = geometry.needle_angle(status.tick);
    let mut reach = 0.15;
    while reach <= 0.7 {
        let (dx, dy) = angle_to_offset(needle_angle, radius * reach, ASPECT);
        plot(center_col + dx, center_row + dy, '*');
        reach += 0.05;
    }

    // Center cap
    plot(center_col, center_row, 'o');

    let mut out = String::with_capacity(ROWS * (COLS + 1) + 64);
    out.push_str(&status.to_string());
    out.push('\n');
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

/// Render the dial to the terminal.
pub fn draw_ascii(geometry: &ClockGeometry, status: &DialStatus) {
    print!("{}", render_ascii(geometry, status));
}

/// Render the dial to a pixel display.
///
/// Draws the dial ring, a coarse tick mark per label position, the needle
/// line, and a filled center cap. The display is assumed to be at least
/// `width` x `height`; the dial is centered and sized to fit.
pub fn draw_dial<D: DrawTarget<Color = BinaryColor, Error = core::convert::Infallible>>(
    geometry: &ClockGeometry,
    tick: i32,
    width: i32,
    height: i32,
    display: &mut D,
) {
    let cx = width / 2;
    let cy = height / 2;
    let radius = (width.min(height) / 2 - 1).max(1);
    let center = Point::new(cx, cy);

    let point_at = |angle_degrees: f32, reach: f32| {
        let (dx, dy) = angle_to_offset(angle_degrees, radius as f32 * reach, 1.0);
        Point::new(cx + dx.round() as i32, cy + dy.round() as i32)
    };

    // Dial ring
    Circle::with_center(center, (radius * 2) as u32)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)
        .ok();

    // Coarse tick marks; hour positions get a longer stroke
    for coarse in 0..geometry.total_coarse_ticks() {
        let angle = geometry.coarse_angle(coarse);
        let hour_mark = coarse.rem_euclid(geometry.coarse_ticks_per_hour())
            == geometry
                .coarse_tick_offset()
                .rem_euclid(geometry.coarse_ticks_per_hour());
        let inner = if hour_mark { 0.86 } else { 0.93 };
        Line::new(point_at(angle, inner), point_at(angle, 0.98))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)
            .ok();
    }

    // Needle
    let needle_angle = geometry.needle_angle(tick);
    Line::new(center, point_at(needle_angle, 0.78))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
        .draw(display)
        .ok();

    // Center cap
    Circle::with_center(center, (radius / 8).max(3) as u32)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)
        .ok();
}
