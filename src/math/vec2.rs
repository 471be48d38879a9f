use std::ops::{Add, Mul, Sub};

/// 2D vector in surface coordinates (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, 0 = right, clockwise on screen)
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point
    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Clamp into a rectangle inset by `margin`.
    ///
    /// When the rectangle is narrower than two margins on an axis the
    /// coordinate collapses onto that axis' centre instead of panicking.
    pub fn clamp_to_bounds(&self, width: f32, height: f32, margin: f32) -> Self {
        Self {
            x: clamp_axis(self.x, width, margin),
            y: clamp_axis(self.y, height, margin),
        }
    }
}

fn clamp_axis(value: f32, extent: f32, margin: f32) -> f32 {
    let lo = margin;
    let hi = extent - margin;
    if hi < lo {
        extent.max(0.0) * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_length() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_from_angle_up() {
        let up = Vec2::from_angle(-std::f32::consts::FRAC_PI_2);
        assert!(up.x.abs() < 0.0001);
        assert!((up.y + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        assert_eq!((a + b).x, 5.0);
        assert_eq!((b - a).y, 4.0);
        assert_eq!((a * 2.0).y, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let p = Vec2::new(-10.0, 700.0).clamp_to_bounds(800.0, 600.0, 24.0);
        assert_eq!(p, Vec2::new(24.0, 576.0));

        let inside = Vec2::new(400.0, 300.0).clamp_to_bounds(800.0, 600.0, 24.0);
        assert_eq!(inside, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_clamp_degenerate_surface() {
        let p = Vec2::new(5.0, 5.0).clamp_to_bounds(0.0, 10.0, 24.0);
        assert_eq!(p, Vec2::new(0.0, 5.0));
    }
}
