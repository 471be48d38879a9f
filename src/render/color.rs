/// Colour in one of the CSS notations the canvas accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent
    Hsl { h: f32, s: f32, l: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsl {
            h: wrap_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// CSS colour string, e.g. `hsl(120.0, 80%, 68%)`
    pub fn to_css(&self) -> String {
        match self {
            Color::Hsl { h, s, l } => format!("hsl({:.1}, {:.0}%, {:.0}%)", h, s, l),
            Color::Rgb { r, g, b } => format!("rgb({}, {}, {})", r, g, b),
        }
    }

    /// Hue in degrees, if this is an HSL colour
    pub fn hue(&self) -> Option<f32> {
        match self {
            Color::Hsl { h, .. } => Some(*h),
            Color::Rgb { .. } => None,
        }
    }
}

/// Wrap any hue into [0, 360)
pub fn wrap_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(0.0), 0.0);
        assert_eq!(wrap_hue(370.0), 10.0);
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert!(wrap_hue(-1e-9) < 360.0);
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(Color::hsl(120.0, 80.0, 68.0).to_css(), "hsl(120.0, 80%, 68%)");
        assert_eq!(Color::rgb(178, 255, 89).to_css(), "rgb(178, 255, 89)");
    }

    #[test]
    fn test_hsl_clamps_components() {
        let c = Color::hsl(400.0, 120.0, -5.0);
        assert_eq!(c, Color::Hsl { h: 40.0, s: 100.0, l: 0.0 });
        assert_eq!(c.hue(), Some(40.0));
        assert_eq!(Color::rgb(0, 0, 0).hue(), None);
    }
}
