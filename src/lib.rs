//! Emotion Motion core crate.
//!
//! A canvas background whose palette, wave and particles follow the emotional
//! tone of typed text. Analysis is debounced, asked of a remote endpoint first
//! and falls back to a local keyword heuristic. `start_emotion_motion()` wires
//! everything to the page; the pure pieces are public for native use and tests.

use wasm_bindgen::prelude::*;

pub mod analyzer;
pub mod canvas;
pub mod config;
pub mod error;
pub mod gateway;
pub mod particles;
pub mod remote;
pub mod render;
mod scene;
pub mod state;
pub mod style;

pub use analyzer::{EmotionDescriptor, analyze};
pub use config::MotionConfig;
pub use error::{AnalysisError, MotionError};
pub use style::{Emotion, StyleDefinition};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_tracing")]
    tracing_wasm::set_as_global_default();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Attach to the page. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn start_emotion_motion(config_json: &str) -> Result<(), JsValue> {
    let config = MotionConfig::from_json(config_json)?;
    scene::start(config)?;
    Ok(())
}

/// Local heuristic only, as `{"emotion","intensity","energy"}` JSON.
#[wasm_bindgen]
pub fn analyze_text(text: &str) -> String {
    let descriptor = analyze(text);
    serde_json::to_string(&descriptor).unwrap_or_else(|_| {
        r#"{"emotion":"neutral","intensity":0.0,"energy":"steady"}"#.to_string()
    })
}
