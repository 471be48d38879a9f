//! Layered hop blossoms: hanging from stem tips, falling as rain, and popping

use std::f32::consts::FRAC_PI_2;
use crate::config::{FlowerParams, RainParams};
use crate::math::Vec2;
use crate::particles::RainFlower;
use super::{Color, Fill, Stroke, Surface, color::wrap_hue};

/// Number of stacked ellipses in one blossom
pub const BLOSSOM_LAYERS: usize = 5;
/// Blossom radius drawn at unit scale
const UNIT_RADIUS: f32 = 24.0;
const POP_RING_COLOR: Color = Color::rgb(178, 255, 89);

/// Hue drifting with time and position
pub fn flower_hue(time_ms: f64, pos: Vec2) -> f32 {
    wrap_hue((time_ms / 40.0) as f32 + pos.x + pos.y)
}

/// Draws blossoms and pop rings
#[derive(Debug, Clone)]
pub struct FlowerRenderer {
    flowers: FlowerParams,
    ring_count: usize,
    ring_gap: f32,
}

impl FlowerRenderer {
    pub fn new(flowers: FlowerParams, rain: &RainParams) -> Self {
        Self {
            flowers,
            ring_count: rain.ring_count,
            ring_gap: rain.ring_gap,
        }
    }

    pub fn params(&self) -> &FlowerParams {
        &self.flowers
    }

    /// Stacked ellipses around the current origin, each layer lower, smaller
    /// and fainter than the one above it
    fn draw_blossom<S: Surface + ?Sized>(&self, surface: &mut S, hue: f32, opacity: f32) {
        for layer in 0..BLOSSOM_LAYERS {
            let l = layer as f32;
            let layer_hue = hue + l * 8.0;
            let fill = Fill::solid(Color::hsl(layer_hue, 80.0, 68.0 - l * 7.0), (0.7 - l * 0.11) * opacity)
                .with_shadow(Color::hsl(layer_hue, 60.0, 40.0), 7.0 - l * 1.5);
            surface.fill_ellipse(
                Vec2::new(0.0, 7.0 * l),
                Vec2::new(14.0 - l * 2.2, 10.0 - l * 1.5),
                &fill,
            );
        }
    }

    /// Blossom hanging below `attach`, swung slightly by the stem's lean
    pub fn draw_hanging<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        attach: Vec2,
        stem_angle: f32,
        time_ms: f64,
        opacity: f32,
    ) {
        let params = &self.flowers;
        let hue = flower_hue(time_ms, attach);
        let drop = Vec2::new(0.0, params.hang_drop);

        surface.save();
        surface.translate(attach);
        // Upright stems (-PI/2) hang their flower straight down
        surface.rotate((stem_angle + FRAC_PI_2) * params.hang_tilt);
        surface.stroke_line(
            Vec2::ZERO,
            drop,
            &Stroke::new(Color::hsl(hue, 45.0, 35.0), opacity, 1.5),
        );
        surface.translate(drop);
        surface.scale(params.radius / UNIT_RADIUS);
        self.draw_blossom(surface, hue, opacity);
        surface.restore();

        surface.fill_circle(
            attach,
            params.highlight_radius,
            &Fill::solid(Color::hsl(hue, 90.0, 85.0), opacity),
        );
    }

    /// Falling blossom at the flower's position
    pub fn draw_rain<S: Surface + ?Sized>(&self, surface: &mut S, flower: &RainFlower, time_ms: f64) {
        let hue = flower_hue(time_ms, flower.position);
        surface.save();
        surface.translate(flower.position);
        surface.scale(flower.radius / UNIT_RADIUS);
        self.draw_blossom(surface, hue, 1.0);
        surface.restore();
    }

    /// Expanding, fading rings around the spot where the flower popped
    pub fn draw_pop<S: Surface + ?Sized>(&self, surface: &mut S, flower: &RainFlower) {
        let p = flower.pop_progress.clamp(0.0, 1.0);
        let remaining = 1.0 - p;
        let stroke = Stroke::new(POP_RING_COLOR, 0.7 * remaining, 2.0 + 6.0 * remaining);

        surface.save();
        surface.translate(flower.position);
        for i in 0..self.ring_count {
            let radius = 10.0 + p * 30.0 + i as f32 * self.ring_gap * p;
            surface.stroke_circle(Vec2::ZERO, radius, &stroke);
        }
        surface.restore();
    }
}
