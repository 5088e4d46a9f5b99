//! Host configuration read from JSON.

use serde::Deserialize;

use crate::error::MotionResult;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/analyze";
pub const DEFAULT_DEBOUNCE_MS: u32 = 120;
pub const DEFAULT_WAVE_STEP: f64 = 10.0;

/// Host configuration, passed from JS as JSON. Every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub endpoint: String,
    pub debounce_ms: u32,
    pub canvas_id: String,
    pub input_id: String,
    pub name_id: String,
    pub meta_id: String,
    pub wave_step: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            canvas_id: "emotion-canvas".to_string(),
            input_id: "emotion-input".to_string(),
            name_id: "emotion-name".to_string(),
            meta_id: "emotion-meta".to_string(),
            wave_step: DEFAULT_WAVE_STEP,
        }
    }
}

impl MotionConfig {
    /// Parse JSON; blank input yields the defaults.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut cfg: MotionConfig = serde_json::from_str(json)?;
        if cfg.wave_step.is_nan() || cfg.wave_step <= 0.0 {
            tracing::warn!(wave_step = cfg.wave_step, "non-positive wave_step, using default");
            cfg.wave_step = DEFAULT_WAVE_STEP;
        }
        Ok(cfg)
    }
}
