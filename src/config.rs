//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! dial-config.toml file. It provides a centralized way to configure the
//! display surface, the dial's scale geometry, and the mode engine's
//! behavior switches.

use crate::engine::{EngineOptions, ResetTarget};
use crate::geometry::GeometryParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from dial-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Display surface and evaluation cadence
    pub dial: DialConfig,
    /// Tick scale geometry
    pub scale: ScaleConfig,
    /// Mode engine behavior switches
    pub engine: EngineConfig,
}

/// Display surface and evaluation cadence
#[derive(Debug, Deserialize, Serialize)]
pub struct DialConfig {
    /// Display width in pixels
    pub width: i32,
    /// Display height in pixels (round panels are square)
    pub height: i32,
    /// Seconds between periodic evaluations
    pub tick_interval_seconds: u64,
}

/// Tick scale geometry
#[derive(Debug, Deserialize, Serialize)]
pub struct ScaleConfig {
    /// Minutes per fine (needle) tick
    pub fine_interval_minutes: i32,
    /// Minutes per coarse (hour-label) tick
    pub coarse_interval_minutes: i32,
    /// Rotation aligning tick 0 with the visual start, in degrees
    /// (-90 puts tick 0 at the top of the dial)
    pub rotation_degrees: i32,
}

/// Mode engine behavior switches
#[derive(Debug, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Accept manual time/range override commands
    pub allow_manual_override: bool,
    /// Where reset lands: "automatic" resumes clock tracking,
    /// "fixed-zero" parks the needle at 00:00
    pub reset_target: ResetTarget,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dial: DialConfig {
                width: 466,  // 1.43" round AMOLED panel
                height: 466, // 1.43" round AMOLED panel
                tick_interval_seconds: 10,
            },
            scale: ScaleConfig {
                fine_interval_minutes: 1,
                coarse_interval_minutes: 10,
                rotation_degrees: -90,
            },
            engine: EngineConfig {
                allow_manual_override: true,
                reset_target: ResetTarget::Automatic,
            },
        }
    }
}

impl Config {
    /// Load configuration from dial-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("dial-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    println!(
                        "Loaded configuration: {}x{} dial, tick every {}s",
                        config.dial.width, config.dial.height, config.dial.tick_interval_seconds
                    );
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (466x466, 1-minute ticks)");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to dial-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("dial-config.toml", contents)?;
        println!("Configuration saved to dial-config.toml");
        Ok(())
    }

    /// Geometry parameters for [`crate::geometry::ClockGeometry::new`]
    pub fn geometry_params(&self) -> GeometryParams {
        GeometryParams {
            fine_interval_minutes: self.scale.fine_interval_minutes,
            coarse_interval_minutes: self.scale.coarse_interval_minutes,
            rotation_degrees: self.scale.rotation_degrees,
        }
    }

    /// Engine options for [`crate::engine::ModeEngine::new`]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            allow_manual_override: self.engine.allow_manual_override,
            reset_target: self.engine.reset_target,
        }
    }
}
