//! Error types for remote analysis and host setup.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons the remote analysis could not be used. All of them are recovered by
/// substituting the local heuristic; none reaches the UI.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Request could not be sent or the response body could not be read
    #[error("analysis transport failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-2xx status
    #[error("analysis endpoint returned status {0}")]
    Status(u16),

    /// Body was not the expected `{emotion, intensity, energy}` JSON
    #[error("malformed analysis response: {0}")]
    Malformed(String),
}

/// Setup failures of the browser host.
#[derive(Error, Debug)]
pub enum MotionError {
    /// Configuration JSON could not be parsed
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A required DOM object was missing or of the wrong type
    #[error("dom error: {0}")]
    Dom(String),
}

pub type MotionResult<T> = std::result::Result<T, MotionError>;

impl From<MotionError> for JsValue {
    fn from(err: MotionError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
