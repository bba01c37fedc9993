pub mod apply;
pub mod validate;

pub use apply::port_settings;
pub use validate::{
    validate_config, validate_config_for, Platform, ValidationReport, PARITY_TOKENS,
    REQUIRED_SERIAL_KEYS,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Key: {0} missing from mount serial config")]
    MissingKey(String),

    #[error("Unmappable value for {field}: {value}")]
    Unmappable { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
