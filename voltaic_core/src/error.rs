//! Centralized error handling for the Voltaic core.
//!
//! Library-level failures are typed with `thiserror`; the desktop shell wraps
//! them in `anyhow` where it needs context. The per-frame simulation path has
//! no error conditions at all and never touches these types.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO errors while reading or writing the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but is not valid TOML
    #[error("could not parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// Config could not be serialized back to TOML
    #[error("could not serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    /// A color value in the config is not a recognized hex string
    #[error("invalid color value {0:?}")]
    Color(String),

    /// Home directory could not be resolved for the config path
    #[error("home directory not found")]
    NoHomeDir,
}

/// Convenience result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
