use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `GameConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A single field holds a value the simulation cannot run with
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("spawn interval range is empty: min {min_ms}ms > max {max_ms}ms")]
    SpawnIntervalRange { min_ms: f32, max_ms: f32 },

    #[error("player width {player_width} does not fit a screen {screen_width} wide")]
    PlayerWiderThanScreen { player_width: f32, screen_width: f32 },
}
