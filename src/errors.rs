use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Browser not launched")]
    NotLaunched,

    #[error("Page creation failed: {0}")]
    PageCreationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript execution failed: {0}")]
    ScriptFailed(String),

    #[error("JavaScript execution timeout")]
    ScriptTimeout,

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element has no bounding box: {0}")]
    NotRendered(String),

    #[error("Option selection failed: {0}")]
    SelectionFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Driver error: {0}")]
    DriverError(String),
}

pub type Result<T> = std::result::Result<T, DeviceError>;

// Convert anyhow::Error to DeviceError
impl From<anyhow::Error> for DeviceError {
    fn from(err: anyhow::Error) -> Self {
        DeviceError::DriverError(err.to_string())
    }
}
