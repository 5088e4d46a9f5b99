//! Per-frame drawing: gradient backdrop, one sine wave, drifting particles.

use crate::particles::{ParticleField, Viewport};
use crate::state::EmotionState;
use crate::style::StyleDefinition;

pub const WAVE_STROKE: &str = "rgba(255, 255, 255, 0.35)";
pub const WAVE_LINE_WIDTH: f64 = 2.0;

/// Drawing primitives the frame needs from the host surface.
pub trait Surface {
    fn clear(&self, viewport: Viewport);
    /// Linear gradient from the top-left to the bottom-right corner.
    fn fill_gradient(&self, viewport: Viewport, stops: &[(f64, &str)]);
    fn stroke_polyline(&self, points: &[(f64, f64)], line_width: f64, color: &str);
    fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str);
}

/// Wave amplitude: base style wave plus up to 40px from intensity.
pub fn wave_height(style: &StyleDefinition, intensity: f64) -> f64 {
    style.wave + intensity * 40.0
}

/// Sample the wave from x = 0 to the viewport width (inclusive) every `step` px.
pub fn wave_points(viewport: Viewport, time: f64, style: &StyleDefinition, intensity: f64, step: f64) -> Vec<(f64, f64)> {
    let amplitude = wave_height(style, intensity);
    let mid = viewport.height / 2.0;
    let samples = if step > 0.0 { (viewport.width / step).floor().max(0.0) as usize } else { 0 };
    (0..=samples)
        .map(|i| {
            let x = i as f64 * step;
            (x, mid + (x / 80.0 + time * 0.001 * style.speed).sin() * amplitude)
        })
        .collect()
}

pub fn particle_alpha(intensity: f64) -> f64 {
    0.3 + intensity * 0.6
}

pub fn particle_color(intensity: f64) -> String {
    format!("rgba(255, 255, 255, {})", particle_alpha(intensity))
}

/// Paint one frame at `time` (ms) and advance the particles in place.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &S,
    state: &EmotionState,
    field: &mut ParticleField,
    viewport: Viewport,
    time: f64,
    wave_step: f64,
) {
    surface.clear(viewport);

    let [c0, c1, c2] = state.style.palette;
    surface.fill_gradient(viewport, &[(0.0, c0), (0.5, c1), (1.0, c2)]);

    let wave = wave_points(viewport, time, state.style, state.intensity, wave_step);
    surface.stroke_polyline(&wave, WAVE_LINE_WIDTH, WAVE_STROKE);

    field.advance(time, viewport);
    let color = particle_color(state.intensity);
    for p in &field.particles {
        surface.fill_circle(p.x, p.y, p.radius, &color);
    }
}
