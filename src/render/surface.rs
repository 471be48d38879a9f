use crate::math::Vec2;
use super::Color;

/// Soft shadow behind a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

/// Paint for filled shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub shadow: Option<Shadow>,
}

impl Fill {
    pub fn solid(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
            shadow: None,
        }
    }

    pub fn with_shadow(mut self, color: Color, blur: f32) -> Self {
        self.shadow = Some(Shadow {
            color,
            blur: blur.max(0.0),
        });
        self
    }
}

/// Paint for stroked lines and rings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, alpha: f32, width: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
            width: width.max(0.0),
        }
    }
}

/// A 2D drawable layer.
///
/// Coordinates are in the surface's own pixel space. Transforms apply to all
/// later draws until the matching `restore`.
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, factor: f32);

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, fill: &Fill);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        self.fill_ellipse(center, Vec2::new(radius, radius), fill);
    }
}

/// One surface per layer
#[derive(Debug)]
pub struct Layers<S> {
    pub plant: S,
    pub flowers: S,
    pub particles: S,
}

impl<S: Surface> Layers<S> {
    pub fn new(plant: S, flowers: S, particles: S) -> Self {
        Self { plant, flowers, particles }
    }

    /// Size of the scene, taken from the plant layer
    pub fn size(&self) -> (f32, f32) {
        self.plant.size()
    }

    pub fn clear_all(&mut self) {
        self.plant.clear();
        self.flowers.clear();
        self.particles.clear();
    }
}
