//! Drifting particle field sized by the current intensity.

use rand::Rng;
use std::f64::consts::TAU;

use crate::analyzer::clamp_intensity;

pub const MIN_PARTICLES: usize = 80;
pub const MAX_PARTICLES: usize = 180;

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed: f64,
    pub phase: f64, // offset into the sin/cos drift, [0, TAU)
}

impl Particle {
    /// One frame of drift, wrapping across the viewport edges.
    pub fn advance(&mut self, time: f64, viewport: Viewport) {
        let angle = time * 0.001 * self.speed + self.phase;
        self.y += angle.sin() * 0.6;
        self.x += angle.cos() * 0.4;

        if self.x < 0.0 {
            self.x = viewport.width;
        }
        if self.x > viewport.width {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = viewport.height;
        }
        if self.y > viewport.height {
            self.y = 0.0;
        }
    }
}

/// Number of particles for an intensity: 80 plus up to 120, capped at 180.
pub fn particle_count(intensity: f64) -> usize {
    let extra = (clamp_intensity(intensity) * 120.0).floor() as usize;
    (MIN_PARTICLES + extra).min(MAX_PARTICLES)
}

#[derive(Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    /// Throw away every particle and build a fresh set for `intensity`.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, intensity: f64, viewport: Viewport, rng: &mut R) {
        let intensity = clamp_intensity(intensity);
        let count = particle_count(intensity);
        let max_radius = 2.0 + intensity * 3.0;
        let max_speed = 0.4 + 1.2 + intensity;
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..=viewport.width.max(0.0)),
                y: rng.gen_range(0.0..=viewport.height.max(0.0)),
                radius: rng.gen_range(1.0..=max_radius),
                speed: rng.gen_range(0.4..=max_speed),
                phase: rng.gen_range(0.0..TAU),
            })
            .collect();
    }

    pub fn advance(&mut self, time: f64, viewport: Viewport) {
        for p in &mut self.particles {
            p.advance(time, viewport);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
