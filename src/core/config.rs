//! Runtime configuration.
//!
//! Every tuning knob of the game lives in [`GameConfig`]. Values come from
//! the built-in defaults, optionally overlaid by a JSON file, and finally by
//! command-line flags.

use super::constants::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Game tuning and collaborator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f64,
    pub world_height: f64,
    /// Fixed horizontal position of the bird.
    pub bird_x: f64,
    pub bird_radius: f64,
    /// Velocity added every tick (positive = downward).
    pub gravity: f64,
    /// Velocity the bird is set to on a flap (negative = upward).
    pub flap_strength: f64,
    pub pipe_width: f64,
    /// Full height of the opening in each pipe.
    pub gap_height: f64,
    /// Leftward pipe movement per tick.
    pub pipe_velocity: f64,
    pub tick_rate_hz: u32,
    /// Extra capture attempts after a failed one before giving up.
    pub capture_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub capture_backoff_ms: u64,
    /// Mirror landmark x coordinates (selfie view).
    pub mirror_landmarks: bool,
    /// Allow the Space key to flap while playing.
    pub keyboard_flap: bool,
    pub show_debug: bool,
    /// Command line of an external hand tracker writing JSON lines to stdout.
    pub tracker_command: Option<String>,
    /// Recorded landmark stream to replay instead of a live tracker.
    pub landmark_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            bird_x: BIRD_X,
            bird_radius: BIRD_RADIUS,
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            pipe_width: PIPE_WIDTH,
            gap_height: PIPE_GAP,
            pipe_velocity: PIPE_VELOCITY,
            tick_rate_hz: TICK_RATE_HZ,
            capture_retries: CAPTURE_RETRIES,
            capture_backoff_ms: CAPTURE_BACKOFF_MS,
            mirror_landmarks: true,
            keyboard_flap: true,
            show_debug: true,
            tracker_command: None,
            landmark_file: None,
        }
    }
}

impl GameConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform config
    /// directory is consulted and a missing file means defaults.
    pub fn load(path: Option<&Path>) -> io::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::info!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file. Fields left out keep their defaults.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&json).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> io::Result<()> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("bird_radius", self.bird_radius),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("pipe_velocity", self.pipe_velocity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !self.gravity.is_finite() || !self.flap_strength.is_finite() || !self.bird_x.is_finite()
        {
            return Err(invalid("gravity, flap_strength and bird_x must be finite".into()));
        }
        if self.tick_rate_hz == 0 {
            return Err(invalid("tick_rate_hz must be at least 1".into()));
        }
        // Gap centers are drawn from [gap_height, world_height - gap_height].
        if self.gap_height * 2.0 > self.world_height {
            return Err(invalid(format!(
                "gap_height {} leaves no room for a gap center in a world {} high",
                self.gap_height, self.world_height
            )));
        }
        // One retire per tick only keeps up if a pipe cannot skip the whole spacing.
        if self.pipe_velocity >= self.pipe_spacing() {
            return Err(invalid(format!(
                "pipe_velocity {} must be below the pipe spacing {}",
                self.pipe_velocity,
                self.pipe_spacing()
            )));
        }
        Ok(())
    }

    /// Distance a pipe travels from spawn until it is retired.
    pub fn pipe_spacing(&self) -> f64 {
        self.world_width + self.pipe_width
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    pub fn capture_backoff(&self) -> Duration {
        Duration::from_millis(self.capture_backoff_ms)
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "handflap")
}

/// `<config dir>/config.json`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for the log file, created if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let dirs = project_dirs().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;
    let dir = dirs.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
