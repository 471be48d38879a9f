//! Falling hop-flower rain with pop-on-click
//!
//! Flowers fall at their own constant speed until they leave the bottom of the
//! surface or are popped. A popped flower stops moving and plays its ring
//! animation until its progress reaches 1, then it is removed.

use crate::config::{FloatRange, RainParams};
use crate::console;
use crate::math::{RandomSource, Vec2};
use crate::render::{FlowerRenderer, Surface};

/// A single falling flower
#[derive(Debug, Clone, PartialEq)]
pub struct RainFlower {
    pub position: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
    pub popped: bool,
    /// Ring animation progress, advanced only once popped
    pub pop_progress: f32,
}

impl RainFlower {
    pub fn new(position: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            position,
            radius,
            speed,
            popped: false,
            pop_progress: 0.0,
        }
    }

    /// Whether `point` lies strictly inside the flower
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(&point) < self.radius
    }

    /// Pop the flower. Returns false if it had already popped.
    pub fn pop(&mut self) -> bool {
        if self.popped {
            return false;
        }
        self.popped = true;
        self.pop_progress = 0.0;
        true
    }

    fn advance(&mut self, pop_step: f32) {
        if self.popped {
            self.pop_progress += pop_step;
        } else {
            self.position.y += self.speed;
        }
    }

    /// Fallen out of view or finished popping
    pub fn is_spent(&self, height: f32, cull_margin: f32) -> bool {
        if self.popped {
            self.pop_progress >= 1.0
        } else {
            self.position.y >= height + cull_margin
        }
    }
}

/// Owns the live rain flowers
#[derive(Debug, Clone)]
pub struct RainSystem {
    flowers: Vec<RainFlower>,
    params: RainParams,
    cap_reported: bool,
}

impl RainSystem {
    pub fn new(params: RainParams) -> Self {
        Self {
            flowers: Vec::new(),
            params,
            cap_reported: false,
        }
    }

    pub fn params(&self) -> &RainParams {
        &self.params
    }

    /// Spawn `count` flowers jittered around `x`, as on a pointer move.
    /// Returns how many were actually added.
    pub fn spawn_at(&mut self, x: f32, count: usize, rng: &mut dyn RandomSource) -> usize {
        let jitter = self.params.pointer_jitter / 2.0;
        let (radius, speed) = (self.params.pointer_radius, self.params.pointer_speed);
        self.spawn_batch(count, radius, speed, rng, |rng| x + rng.jitter(jitter))
    }

    /// Spawn the periodic batch at random positions across `width`
    pub fn spawn_across(&mut self, width: f32, rng: &mut dyn RandomSource) -> usize {
        let count = self.params.timer_batch;
        let (radius, speed) = (self.params.timer_radius, self.params.timer_speed);
        self.spawn_batch(count, radius, speed, rng, |rng| rng.range(0.0, width.max(0.0)))
    }

    fn spawn_batch(
        &mut self,
        count: usize,
        radius: FloatRange,
        speed: FloatRange,
        rng: &mut dyn RandomSource,
        mut pick_x: impl FnMut(&mut dyn RandomSource) -> f32,
    ) -> usize {
        let mut added = 0;
        for _ in 0..count {
            if !self.has_room() {
                break;
            }
            let x = pick_x(&mut *rng);
            let flower = RainFlower::new(
                Vec2::new(x, self.params.spawn_y),
                radius.sample(rng),
                speed.sample(rng),
            );
            self.flowers.push(flower);
            added += 1;
        }
        added
    }

    fn has_room(&mut self) -> bool {
        match self.params.max_flowers {
            Some(cap) if self.flowers.len() >= cap => {
                if !self.cap_reported {
                    console::warn(&format!("rain flower cap of {} reached, dropping spawns", cap));
                    self.cap_reported = true;
                }
                false
            }
            _ => {
                self.cap_reported = false;
                true
            }
        }
    }

    /// Move falling flowers and advance pop animations by one tick
    pub fn advance(&mut self) {
        let step = self.params.pop_step;
        for flower in &mut self.flowers {
            flower.advance(step);
        }
    }

    /// Drop flowers that have fallen out of view or finished popping
    pub fn cull(&mut self, height: f32) {
        let margin = self.params.cull_margin;
        self.flowers.retain(|f| !f.is_spent(height, margin));
    }

    /// Pop every falling flower under `point`. Returns the number popped.
    pub fn pop_at(&mut self, point: Vec2) -> usize {
        self.flowers
            .iter_mut()
            .filter(|f| !f.popped && f.contains(point))
            .map(|f| f.pop())
            .filter(|&popped| popped)
            .count()
    }

    /// Draw falling blossoms and pop rings
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, renderer: &FlowerRenderer, time_ms: f64) {
        for flower in &self.flowers {
            if flower.popped {
                renderer.draw_pop(surface, flower);
            } else {
                renderer.draw_rain(surface, flower, time_ms);
            }
        }
    }

    pub fn flowers(&self) -> &[RainFlower] {
        &self.flowers
    }

    pub fn count(&self) -> usize {
        self.flowers.len()
    }

    pub fn popped_count(&self) -> usize {
        self.flowers.iter().filter(|f| f.popped).count()
    }
}
