//! # Dial Clock Application Entry Point
//!
//! This binary crate provides the main application logic for the dial clock,
//! wiring the mode engine to the system clock, the terminal renderer, and the
//! textual command surface. It supports both one-shot mode (render once and
//! exit) and a periodic watch loop driven by a tick interval.

// Test modules
#[cfg(test)]
mod tests;

// Re-export library types for internal use
pub use dial_clock_lib::{config::Config, WallTime};

// Application dependencies
use dial_clock_lib::engine::{ModeEngine, SystemTimeSource, TimeSource};
use dial_clock_lib::geometry::ClockGeometry;
use dial_clock_lib::renderer::{draw_ascii, DialStatus};
use std::env;
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Dump the computed geometry at startup for debugging.
fn print_geometry(geometry: &ClockGeometry) {
    eprintln!("=== DIAL GEOMETRY ===");
    eprintln!("total_fine_ticks: {}", geometry.total_fine_ticks());
    eprintln!("total_coarse_ticks: {}", geometry.total_coarse_ticks());
    eprintln!("fine_ticks_per_hour: {}", geometry.fine_ticks_per_hour());
    eprintln!("coarse_ticks_per_hour: {}", geometry.coarse_ticks_per_hour());
    eprintln!("angle_per_fine_tick: {:.3}", geometry.angle_per_fine_tick());
    eprintln!("angle_per_coarse_tick: {:.3}", geometry.angle_per_coarse_tick());
    eprintln!("rotation_degrees: {}", geometry.rotation_degrees());
    eprintln!("fine_tick_offset: {}", geometry.fine_tick_offset());
    eprintln!("coarse_tick_offset: {}", geometry.coarse_tick_offset());
    eprintln!("=====================");
}

/// Evaluate the engine once and redraw the dial.
fn render_once(engine: &mut ModeEngine, source: &dyn TimeSource) {
    let tick = engine.evaluate(source);
    let status = DialStatus {
        effective: engine.effective_time(),
        mode: engine.mode(),
        tick,
    };
    draw_ascii(engine.geometry(), &status);
}

/// Outcome of one command line.
#[derive(Debug, PartialEq, Eq)]
enum CommandOutcome {
    /// State may have changed; redraw
    Handled,
    /// Leave the loop
    Quit,
}

/// Apply one line from the command surface to the engine.
///
/// Commands: `time HH:MM`, `range <int>`, `reset`, `quit`. Malformed or
/// rejected commands print the error and change nothing; an empty line is
/// just a redraw request.
fn handle_command(line: &str, engine: &mut ModeEngine) -> CommandOutcome {
    let mut words = line.split_whitespace();
    match words.next() {
        None => CommandOutcome::Handled,
        Some("time") => {
            let argument = words.next().unwrap_or("");
            match engine.set_time(argument) {
                Ok(()) => println!("Manual time set to: {}", engine.effective_time()),
                Err(e) => eprintln!("time rejected: {}", e),
            }
            CommandOutcome::Handled
        }
        Some("range") => {
            let argument = words.next().unwrap_or("");
            match engine.set_range(argument) {
                Ok(()) => println!("Manual range set to: {}", argument),
                Err(e) => eprintln!("range rejected: {}", e),
            }
            CommandOutcome::Handled
        }
        Some("reset") => {
            engine.reset();
            println!("Reset ({})", engine.mode());
            CommandOutcome::Handled
        }
        Some("quit") | Some("exit") => CommandOutcome::Quit,
        Some(other) => {
            eprintln!(
                "Unknown command {:?}. Commands: time HH:MM, range <int>, reset, quit",
                other
            );
            CommandOutcome::Handled
        }
    }
}

/// Periodic watch loop: redraw every tick interval, apply commands from
/// stdin as they arrive.
///
/// The engine stays on this thread; a helper thread only forwards stdin
/// lines through a channel, so every mutation and every evaluation happens
/// in one place and a completed command is always reflected in the next
/// redraw.
fn run_loop(
    engine: &mut ModeEngine,
    source: &dyn TimeSource,
    tick_interval: Duration,
) -> anyhow::Result<()> {
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("Commands: time HH:MM | range <int> | reset | quit");
    render_once(engine, source);

    loop {
        match line_rx.recv_timeout(tick_interval) {
            Ok(line) => {
                if handle_command(&line, engine) == CommandOutcome::Quit {
                    return Ok(());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // stdin closed; keep ticking on the interval alone.
                thread::sleep(tick_interval);
            }
        }
        render_once(engine, source);
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Development mode: render one frame to stdout and exit
    let one_shot = env::args().any(|arg| arg == "--stdout");

    let config = Config::load();
    let geometry = ClockGeometry::new(config.geometry_params());
    print_geometry(&geometry);

    let mut engine = ModeEngine::new(geometry, config.engine_options());
    let source = SystemTimeSource;

    if one_shot {
        render_once(&mut engine, &source);
        return Ok(());
    }

    run_loop(
        &mut engine,
        &source,
        Duration::from_secs(config.dial.tick_interval_seconds.max(1)),
    )
}
