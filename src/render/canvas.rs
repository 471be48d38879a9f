use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use crate::math::Vec2;
use super::{Fill, Stroke, Surface};

/// [`Surface`] backed by a canvas element's 2D context.
///
/// Canvas calls that can throw (negative radii, non-finite transforms) are
/// ignored: a dropped shape is preferable to interrupting the frame.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "getContext('2d') threw".to_string())?
            .ok_or("Canvas has no 2D context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Context is not a CanvasRenderingContext2d".to_string())?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Set the backing store size in device pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn apply_fill(&self, fill: &Fill) {
        self.ctx.set_global_alpha(fill.alpha as f64);
        self.ctx.set_fill_style_str(&fill.color.to_css());
        match fill.shadow {
            Some(shadow) => {
                self.ctx.set_shadow_color(&shadow.color.to_css());
                self.ctx.set_shadow_blur(shadow.blur as f64);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_global_alpha(stroke.alpha as f64);
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.set_shadow_blur(0.0);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn scale(&mut self, factor: f32) {
        let _ = self.ctx.scale(factor as f64, factor as f64);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, fill: &Fill) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.apply_fill(fill);
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x as f64,
            radii.y as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        if stroke.width <= 0.0 {
            return;
        }
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        if radius <= 0.0 || stroke.width <= 0.0 {
            return;
        }
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.stroke();
    }
}
