//! Emotion state and the particle backdrop it drives.

use rand::Rng;

use crate::analyzer::{EmotionDescriptor, ENERGY_STEADY, clamp_intensity};
use crate::particles::{ParticleField, Viewport};
use crate::render::{Surface, render_frame};
use crate::style::{Emotion, StyleDefinition};

/// Current emotion driving the scene.
///
/// One instance lives for the whole page session. It is only mutated from the
/// browser's main thread (frame callbacks and settled analysis futures), so it
/// is shared through `RefCell` without any locking.
#[derive(Debug)]
pub struct EmotionState {
    pub emotion: Emotion,
    pub style: &'static StyleDefinition,
    pub intensity: f64,
    pub energy: String,
}

impl Default for EmotionState {
    fn default() -> Self {
        Self {
            emotion: Emotion::Neutral,
            style: Emotion::Neutral.style(),
            intensity: 0.0,
            energy: ENERGY_STEADY.to_string(),
        }
    }
}

impl EmotionState {
    /// Overwrite with an analysis result (last write wins).
    pub fn apply(&mut self, descriptor: &EmotionDescriptor) {
        self.emotion = descriptor.emotion;
        self.style = descriptor.emotion.style();
        self.intensity = clamp_intensity(descriptor.intensity);
        self.energy = if descriptor.energy.is_empty() {
            ENERGY_STEADY.to_string()
        } else {
            descriptor.energy.clone()
        };
    }

    /// Secondary display line, e.g. `intensity 0.42 · steady`.
    pub fn meta_line(&self) -> String {
        format!("intensity {:.2} · {}", self.intensity, self.energy)
    }
}

/// Emotion state together with the particles sized by it.
///
/// Every state update and every resize regenerates the whole field.
pub struct Backdrop<R> {
    pub state: EmotionState,
    pub field: ParticleField,
    viewport: Viewport,
    rng: R,
}

impl<R: Rng> Backdrop<R> {
    pub fn new(viewport: Viewport, rng: R) -> Self {
        let mut backdrop = Self {
            state: EmotionState::default(),
            field: ParticleField::default(),
            viewport,
            rng,
        };
        backdrop.regenerate();
        backdrop
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn apply(&mut self, descriptor: &EmotionDescriptor) {
        self.state.apply(descriptor);
        self.regenerate();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.regenerate();
    }

    pub fn render<S: Surface + ?Sized>(&mut self, surface: &S, time: f64, wave_step: f64) {
        render_frame(surface, &self.state, &mut self.field, self.viewport, time, wave_step);
    }

    fn regenerate(&mut self) {
        self.field.regenerate(self.state.intensity, self.viewport, &mut self.rng);
    }
}
