//! Canvas 2D implementation of the render surface.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::particles::Viewport;
use crate::render::Surface;

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Reset the transform and scale so drawing happens in CSS pixels.
    pub fn scale_to_device(&self, ratio: f64) {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.ctx.scale(ratio, ratio).ok();
    }
}

impl Surface for CanvasSurface {
    fn clear(&self, viewport: Viewport) {
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn fill_gradient(&self, viewport: Viewport, stops: &[(f64, &str)]) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, viewport.width, viewport.height);
        for &(offset, color) in stops {
            gradient.add_color_stop(offset as f32, color).ok();
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn stroke_polyline(&self, points: &[(f64, f64)], line_width: f64, color: &str) {
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.begin_path();
        for &(x, y) in points {
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
    }

    fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.arc(x, y, radius, 0.0, TAU).ok();
        self.ctx.fill();
    }
}
