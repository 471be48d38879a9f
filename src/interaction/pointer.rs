use crate::math::Vec2;

/// Client-space rectangle of the element that received an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Convert client coordinates to surface pixels.
///
/// The canvas backing store can be larger or smaller than its on-screen box
/// (device pixel ratio, CSS scaling), so each axis is rescaled by
/// `surface / rect`. A collapsed rect maps everything to its origin.
pub fn to_surface_point(client: Vec2, rect: ClientRect, surface_width: f32, surface_height: f32) -> Vec2 {
    let sx = if rect.width > 0.0 { surface_width / rect.width } else { 0.0 };
    let sy = if rect.height > 0.0 { surface_height / rect.height } else { 0.0 };
    Vec2::new((client.x - rect.left) * sx, (client.y - rect.top) * sy)
}

/// Last known pointer position in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Horizontal target for plants following the pointer
    pub fn target_x(&self) -> Option<f32> {
        self.position.map(|p| p.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let rect = ClientRect { left: 0.0, top: 0.0, width: 800.0, height: 600.0 };
        let p = to_surface_point(Vec2::new(400.0, 300.0), rect, 800.0, 600.0);
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_offset_and_device_pixel_scaling() {
        // 400x300 CSS box at (100, 50) backed by an 800x600 canvas
        let rect = ClientRect { left: 100.0, top: 50.0, width: 400.0, height: 300.0 };
        let p = to_surface_point(Vec2::new(300.0, 200.0), rect, 800.0, 600.0);
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_collapsed_rect() {
        let rect = ClientRect { left: 10.0, top: 10.0, width: 0.0, height: 0.0 };
        let p = to_surface_point(Vec2::new(50.0, 50.0), rect, 800.0, 600.0);
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_state() {
        let mut pointer = PointerState::new();
        assert_eq!(pointer.target_x(), None);
        pointer.set(Vec2::new(12.0, 34.0));
        assert_eq!(pointer.target_x(), Some(12.0));
        assert_eq!(pointer.position(), Some(Vec2::new(12.0, 34.0)));
    }
}
