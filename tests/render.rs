// Frame rendering against a recording surface, plus particle field sizing.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use emotion_motion::particles::{MAX_PARTICLES, MIN_PARTICLES, ParticleField, Viewport};
use emotion_motion::render::{Surface, WAVE_STROKE, render_frame};
use emotion_motion::state::EmotionState;
use emotion_motion::{Emotion, EmotionDescriptor};

#[derive(Debug, PartialEq)]
enum Op {
    Clear,
    Gradient(Vec<(f64, String)>),
    Wave { points: usize, color: String },
    Circle { x: f64, y: f64, r: f64, color: String },
}

#[derive(Default)]
struct Recorder {
    ops: RefCell<Vec<Op>>,
}

impl Surface for Recorder {
    fn clear(&self, _viewport: Viewport) {
        self.ops.borrow_mut().push(Op::Clear);
    }
    fn fill_gradient(&self, _viewport: Viewport, stops: &[(f64, &str)]) {
        let stops = stops.iter().map(|&(o, c)| (o, c.to_string())).collect();
        self.ops.borrow_mut().push(Op::Gradient(stops));
    }
    fn stroke_polyline(&self, points: &[(f64, f64)], _line_width: f64, color: &str) {
        self.ops.borrow_mut().push(Op::Wave { points: points.len(), color: color.to_string() });
    }
    fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
        self.ops.borrow_mut().push(Op::Circle { x, y, r: radius, color: color.to_string() });
    }
}

fn field_for(intensity: f64, vp: Viewport, seed: u64) -> ParticleField {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut field = ParticleField::default();
    field.regenerate(intensity, vp, &mut rng);
    field
}

#[test]
fn particle_count_bounds() {
    let vp = Viewport::new(800.0, 600.0);
    assert_eq!(field_for(0.0, vp, 1).len(), MIN_PARTICLES);
    assert_eq!(field_for(1.0, vp, 2).len(), MAX_PARTICLES);
    for i in 0..=20 {
        let n = field_for(i as f64 / 20.0, vp, i).len();
        assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&n));
    }
}

#[test]
fn particle_parameters_within_ranges() {
    let vp = Viewport::new(320.0, 240.0);
    for intensity in [0.0, 0.35, 1.0] {
        for p in &field_for(intensity, vp, 42).particles {
            assert!((0.0..=vp.width).contains(&p.x));
            assert!((0.0..=vp.height).contains(&p.y));
            assert!((1.0..=2.0 + intensity * 3.0).contains(&p.radius));
            assert!((0.4..=0.4 + 1.2 + intensity).contains(&p.speed));
            assert!((0.0..std::f64::consts::TAU).contains(&p.phase));
        }
    }
}

#[test]
fn frame_draws_backdrop_wave_then_particles() {
    let vp = Viewport::new(200.0, 100.0);
    let mut state = EmotionState::default();
    state.apply(&EmotionDescriptor::new(Emotion::Joy, 0.5, "steady"));
    let mut field = field_for(state.intensity, vp, 9);
    let surface = Recorder::default();

    render_frame(&surface, &state, &mut field, vp, 1_000.0, 10.0);

    let ops = surface.ops.borrow();
    assert_eq!(ops[0], Op::Clear);
    assert_eq!(
        ops[1],
        Op::Gradient(vec![
            (0.0, "#f76c6c".to_string()),
            (0.5, "#fdd56a".to_string()),
            (1.0, "#ff9ff3".to_string()),
        ])
    );
    assert_eq!(ops[2], Op::Wave { points: 21, color: WAVE_STROKE.to_string() });
    let circles: Vec<_> = ops[3..].iter().collect();
    assert_eq!(circles.len(), 140);
    for op in circles {
        match op {
            Op::Circle { x, y, r, color } => {
                assert!((0.0..=vp.width).contains(x) && (0.0..=vp.height).contains(y));
                assert!(*r >= 1.0);
                assert_eq!(color, "rgba(255, 255, 255, 0.6)");
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}

#[test]
fn particles_stay_inside_viewport_over_many_frames() {
    let vp = Viewport::new(120.0, 80.0);
    let state = EmotionState::default();
    let mut field = field_for(0.0, vp, 3);
    let surface = Recorder::default();
    for frame in 0..600 {
        render_frame(&surface, &state, &mut field, vp, frame as f64 * 16.7, 10.0);
    }
    for p in &field.particles {
        assert!((0.0..=vp.width).contains(&p.x), "x {}", p.x);
        assert!((0.0..=vp.height).contains(&p.y), "y {}", p.y);
    }
}
