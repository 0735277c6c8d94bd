#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse builder config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid builder config: {message}")]
    InvalidConfig { message: String },

    #[error("sheet {sheet} has no '{key}' metadata")]
    MissingMetadata { sheet: String, key: String },
}

impl BuildError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
