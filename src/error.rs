use thiserror::Error;

pub type AppResult<T> = Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    /// Colour value in a theme that is neither a hex code nor a known name
    #[error("invalid colour: {0}")]
    InvalidColor(String),

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),
}
