//! The simulation context
//!
//! A [`Garden`] owns every piece of mutable state: the plant bed, the rain and
//! bubble particles, the pointer, the pending timed events and the random
//! source. The host calls [`Garden::frame`] once per display refresh and the
//! input methods whenever events arrive. Input only mutates state; drawing
//! happens exclusively inside `frame`.

use crate::animation::{smoothstep, Timeline};
use crate::config::{DeviceClass, DeviceProfile, GardenConfig};
use crate::console;
use crate::growth::PlantBed;
use crate::interaction::PointerState;
use crate::math::{Lcg, RandomSource, Vec2};
use crate::particles::{BubblePool, RainSystem};
use crate::render::{FlowerRenderer, Layers, PlantRenderer, Surface};

/// Timed events applied at the start of the frame they fall due in
#[derive(Debug, Clone, Copy, PartialEq)]
enum GardenEvent {
    /// Replace the finished plant set
    RegeneratePlants,
    /// Periodic rain batch; re-arms itself
    RainShower,
}

pub struct Garden {
    config: GardenConfig,
    device: DeviceClass,
    width: f32,
    height: f32,
    bed: PlantBed,
    rain: RainSystem,
    bubbles: BubblePool,
    flowers: FlowerRenderer,
    pointer: PointerState,
    timeline: Timeline<GardenEvent>,
    started: bool,
    frames: u64,
    rng: Box<dyn RandomSource>,
}

impl Garden {
    pub fn new(
        config: GardenConfig,
        device: DeviceClass,
        width: f32,
        height: f32,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let profile = config.profile(device).clone();
        let bed = PlantBed::sow(
            config.growth.clone(),
            profile.clone(),
            config.mode,
            width,
            height,
            &mut *rng,
        );
        let bubbles = BubblePool::new(
            profile.bubble_count,
            config.bubbles.clone(),
            width,
            height,
            &mut *rng,
        );
        let rain = RainSystem::new(config.rain.clone());
        let flowers = FlowerRenderer::new(config.flowers.clone(), &config.rain);

        Self {
            config,
            device,
            width,
            height,
            bed,
            rain,
            bubbles,
            flowers,
            pointer: PointerState::new(),
            timeline: Timeline::new(),
            started: false,
            frames: 0,
            rng,
        }
    }

    /// Garden driven by a seeded generator, reproducible across runs
    pub fn seeded(config: GardenConfig, device: DeviceClass, width: f32, height: f32, seed: u32) -> Self {
        Self::new(config, device, width, height, Box::new(Lcg::new(seed)))
    }

    fn profile(&self) -> &DeviceProfile {
        self.config.profile(self.device)
    }

    // === Input ===

    /// Pointer moved to `position` (surface coordinates): rain falls from it
    /// and a following plant leans toward it
    pub fn on_pointer_move(&mut self, position: Vec2) -> usize {
        self.pointer.set(position);
        let batch = self.profile().rain_batch;
        self.rain.spawn_at(position.x, batch, &mut *self.rng)
    }

    /// Touch move with one position per active touch point
    pub fn on_touch_move(&mut self, touches: &[Vec2]) -> usize {
        touches.iter().map(|&t| self.on_pointer_move(t)).sum()
    }

    /// Click or tap at `position`: pops every falling flower under it
    pub fn on_click(&mut self, position: Vec2) -> usize {
        self.rain.pop_at(position)
    }

    /// Surfaces changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.bed.resize(width, height);
        self.bubbles.resize(width, height);
    }

    // === Frame ===

    /// Run one frame: apply due events, grow, draw plants, move particles,
    /// draw particles
    pub fn frame<S: Surface>(&mut self, time_ms: f64, layers: &mut Layers<S>) {
        let (width, height) = layers.size();
        if width != self.width || height != self.height {
            self.resize(width, height);
        }

        self.apply_due_events(time_ms);
        self.grow(time_ms);

        layers.clear_all();
        self.draw_plants(time_ms, layers);

        self.advance_particles();
        self.draw_particles(time_ms, layers);

        self.frames += 1;
    }

    fn apply_due_events(&mut self, time_ms: f64) {
        if !self.started {
            self.started = true;
            if self.config.rain.timer_enabled {
                self.rain.spawn_across(self.width, &mut *self.rng);
                self.timeline.schedule(time_ms, self.config.rain.spawn_interval_ms, GardenEvent::RainShower);
            }
        }

        for (due_ms, event) in self.timeline.drain_due(time_ms) {
            match event {
                GardenEvent::RegeneratePlants => {
                    self.bed.regenerate(self.width, self.height, &mut *self.rng);
                    console::info(&format!("plants regrown (generation {})", self.bed.generation()));
                }
                GardenEvent::RainShower => {
                    self.rain.spawn_across(self.width, &mut *self.rng);
                    // Re-arm from the due time; showers missed by a long frame gap are skipped
                    let interval = self.config.rain.spawn_interval_ms;
                    let from = if due_ms + interval <= time_ms { time_ms } else { due_ms };
                    self.timeline.schedule(from, interval, GardenEvent::RainShower);
                }
            }
        }
    }

    fn grow(&mut self, time_ms: f64) {
        let all_finished = self.bed.advance(self.pointer.target_x(), &mut *self.rng);
        if all_finished && !self.is_regenerating() {
            self.timeline.schedule(time_ms, self.config.regeneration_delay_ms, GardenEvent::RegeneratePlants);
        }
    }

    fn draw_plants<S: Surface>(&self, time_ms: f64, layers: &mut Layers<S>) {
        let fade = self.fade(time_ms);
        let renderer = PlantRenderer::new(&self.flowers);
        for plant in self.bed.plants() {
            renderer.render_plant(&mut layers.plant, &mut layers.flowers, plant, time_ms, fade);
        }
    }

    fn advance_particles(&mut self) {
        self.rain.advance();
        self.rain.cull(self.height);
        self.bubbles.advance(&mut *self.rng);
    }

    fn draw_particles<S: Surface>(&self, time_ms: f64, layers: &mut Layers<S>) {
        self.bubbles.draw(&mut layers.particles, time_ms);
        self.rain.draw(&mut layers.particles, &self.flowers, time_ms);
    }

    /// Fade-out of a finished plant set while it waits to be regrown, 0 to 1
    pub fn fade(&self, time_ms: f64) -> f32 {
        let delay = self.config.regeneration_delay_ms;
        match self.timeline.due_time(&GardenEvent::RegeneratePlants) {
            Some(due) if delay > 0.0 => {
                let t = (1.0 - (due - time_ms) / delay) as f32;
                smoothstep(t)
            }
            _ => 0.0,
        }
    }

    // === Accessors ===

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn bed(&self) -> &PlantBed {
        &self.bed
    }

    pub fn rain(&self) -> &RainSystem {
        &self.rain
    }

    pub fn bubbles(&self) -> &BubblePool {
        &self.bubbles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn is_regenerating(&self) -> bool {
        self.timeline.is_pending(&GardenEvent::RegeneratePlants)
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
