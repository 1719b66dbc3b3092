use thiserror::Error;

/// Unified error type for the ToolShield library.
#[derive(Debug, Error)]
pub enum ToolShieldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolShieldError>;
