use std::path::PathBuf;

/// Fatal engine errors. Food placement failures are the only errors the
/// engine's tick and input operations return; construction also rejects an
/// invalid config.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no free cell for food: snake covers all {cells} cells of a size-{grid_size} grid")]
    GridFull { grid_size: u32, cells: u64 },

    #[error("food placement gave up after {attempts} attempts")]
    FoodPlacementExhausted { attempts: u32 },

    #[error("cannot start game: {0}")]
    InvalidConfig(String),
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}

/// Problems loading or validating a [`GameConfig`](super::GameConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
