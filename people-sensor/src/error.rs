//! Error types for people-sensor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Vision error: {0}")]
    Vision(String),

    #[error("`{0}` is not implemented")]
    Unimplemented(&'static str),
}

impl SensorError {
    /// Whether the error was raised while validating or applying configuration
    pub fn is_config(&self) -> bool {
        matches!(self, SensorError::Config(_))
    }
}
