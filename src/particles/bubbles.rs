//! Rising bubbles
//!
//! A fixed pool: bubbles drift upward with a gentle sideways sway and are
//! recycled at the bottom once they leave the top. The pool never grows.

use std::f32::consts::TAU;
use crate::config::BubbleParams;
use crate::math::{RandomSource, Vec2};
use crate::render::{Color, Fill, Stroke, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Centre before sway is applied
    pub position: Vec2,
    pub radius: f32,
    /// Pixels per tick, upward
    pub speed: f32,
    /// Sway phase offset (radians)
    pub phase: f32,
}

impl Bubble {
    /// Horizontal sway at `time_ms`
    pub fn sway(&self, time_ms: f64, amplitude: f32) -> f32 {
        ((time_ms / 800.0) as f32 + self.phase + self.position.y / 50.0).sin() * amplitude
    }
}

/// Recycling pool of bubbles
#[derive(Debug, Clone)]
pub struct BubblePool {
    bubbles: Vec<Bubble>,
    params: BubbleParams,
    width: f32,
    height: f32,
}

impl BubblePool {
    /// Scatter `count` bubbles over a `width` x `height` surface
    pub fn new(count: usize, params: BubbleParams, width: f32, height: f32, rng: &mut dyn RandomSource) -> Self {
        let bubbles = (0..count)
            .map(|_| Bubble {
                position: Vec2::new(rng.range(0.0, width.max(0.0)), rng.range(0.0, height.max(0.0))),
                radius: params.radius.sample(rng),
                speed: params.speed.sample(rng),
                phase: rng.range(0.0, TAU),
            })
            .collect();
        Self {
            bubbles,
            params,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Rise one tick; bubbles fully above the top restart below the bottom
    pub fn advance(&mut self, rng: &mut dyn RandomSource) {
        for bubble in &mut self.bubbles {
            bubble.position.y -= bubble.speed;
            if bubble.position.y + bubble.radius < 0.0 {
                bubble.position = Vec2::new(
                    rng.range(0.0, self.width.max(0.0)),
                    self.height + bubble.radius,
                );
                bubble.phase = rng.range(0.0, TAU);
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, time_ms: f64) {
        let rim = Stroke::new(Color::rgb(180, 230, 255), 0.35, 1.2);
        let body = Fill::solid(Color::rgb(180, 230, 255), 0.08);
        let glint = Fill::solid(Color::rgb(255, 255, 255), 0.3);

        for bubble in &self.bubbles {
            let center = Vec2::new(
                bubble.position.x + bubble.sway(time_ms, self.params.amplitude),
                bubble.position.y,
            );
            surface.fill_circle(center, bubble.radius, &body);
            surface.stroke_circle(center, bubble.radius, &rim);
            let offset = Vec2::new(-bubble.radius / 3.0, -bubble.radius / 3.0);
            surface.fill_circle(center + offset, bubble.radius / 4.0, &glint);
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn count(&self) -> usize {
        self.bubbles.len()
    }
}
