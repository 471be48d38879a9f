//! Surface that records draw calls instead of rasterising them
//!
//! Used by tests to check what a frame would have drawn. Positions are stored
//! after the current transform has been applied, so assertions can be made in
//! surface coordinates regardless of the save/translate/rotate/scale nesting
//! used to draw them. Radii and widths are stored untransformed.

use crate::math::Vec2;
use super::{Fill, Stroke, Surface};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillEllipse { center: Vec2, radii: Vec2, fill: Fill },
    StrokeLine { from: Vec2, to: Vec2, stroke: Stroke },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
}

/// Affine transform `[a c e; b d f]`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

/// Recording implementation of [`Surface`]
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    transform: Transform,
    stack: Vec<Transform>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last `clear`
    pub fn frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Whether every `save` has been matched by a `restore`
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn fill_count(&self) -> usize {
        self.frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillEllipse { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        let t = &mut self.transform;
        t.e += t.a * offset.x + t.c * offset.y;
        t.f += t.b * offset.x + t.d * offset.y;
    }

    fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let t = self.transform;
        self.transform = Transform {
            a: t.a * cos + t.c * sin,
            b: t.b * cos + t.d * sin,
            c: -t.a * sin + t.c * cos,
            d: -t.b * sin + t.d * cos,
            e: t.e,
            f: t.f,
        };
    }

    fn scale(&mut self, factor: f32) {
        let t = &mut self.transform;
        t.a *= factor;
        t.b *= factor;
        t.c *= factor;
        t.d *= factor;
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, fill: &Fill) {
        self.commands.push(DrawCommand::FillEllipse {
            center: self.transform.apply(center),
            radii,
            fill: *fill,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeLine {
            from: self.transform.apply(from),
            to: self.transform.apply(to),
            stroke: *stroke,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center: self.transform.apply(center),
            radius,
            stroke: *stroke,
        });
    }
}
