//! Remote emotion analysis over HTTP (`fetch`).

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::analyzer::{EmotionDescriptor, ENERGY_STEADY};
use crate::error::AnalysisError;
use crate::style::Emotion;

/// Something that can turn text into a descriptor somewhere else.
pub trait RemoteAnalysis {
    fn analyze(&self, text: &str) -> LocalBoxFuture<'static, Result<EmotionDescriptor, AnalysisError>>;
}

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct WireDescriptor {
    emotion: String,
    #[serde(default)]
    intensity: Option<f64>,
    #[serde(default)]
    energy: Option<String>,
}

/// Validate an endpoint response body.
///
/// Unknown emotion identifiers are coerced to neutral, intensity is clamped and
/// a missing energy label reads as `steady`.
pub fn parse_response(body: &str) -> Result<EmotionDescriptor, AnalysisError> {
    let wire: WireDescriptor =
        serde_json::from_str(body).map_err(|e| AnalysisError::Malformed(e.to_string()))?;
    let emotion = Emotion::from_id(&wire.emotion).unwrap_or_else(|| {
        tracing::debug!(emotion = %wire.emotion, "unknown remote emotion, using neutral");
        Emotion::Neutral
    });
    let energy = wire
        .energy
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| ENERGY_STEADY.to_string());
    Ok(EmotionDescriptor::new(emotion, wire.intensity.unwrap_or(0.0), energy))
}

/// `POST {"text": ...}` to a fixed endpoint.
#[derive(Clone, Debug)]
pub struct HttpAnalyzer {
    endpoint: String,
}

impl HttpAnalyzer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl RemoteAnalysis for HttpAnalyzer {
    fn analyze(&self, text: &str) -> LocalBoxFuture<'static, Result<EmotionDescriptor, AnalysisError>> {
        Box::pin(fetch_descriptor(self.endpoint.clone(), text.to_string()))
    }
}

fn transport(err: JsValue) -> AnalysisError {
    AnalysisError::Transport(format!("{err:?}"))
}

async fn fetch_descriptor(endpoint: String, text: String) -> Result<EmotionDescriptor, AnalysisError> {
    let body = serde_json::to_string(&AnalysisRequest { text: &text })
        .map_err(|e| AnalysisError::Transport(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(&endpoint, &opts).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| AnalysisError::Transport("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    if !response.ok() {
        return Err(AnalysisError::Status(response.status()));
    }

    let raw = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    let raw = raw
        .as_string()
        .ok_or_else(|| AnalysisError::Malformed("response body is not text".into()))?;
    parse_response(&raw)
}
