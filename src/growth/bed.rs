//! Plants and the bed that grows them

use std::f32::consts::FRAC_PI_2;
use crate::config::{DeviceProfile, GrowthParams, PlantMode};
use crate::math::{RandomSource, Vec2};
use super::{GrowthEngine, Stem};

/// A plant: one or more root stems sharing a base point
#[derive(Debug, Clone)]
pub struct Plant {
    pub roots: Vec<Stem>,
    /// Set once every root subtree has all of its tips at full length
    pub finished: bool,
}

impl Plant {
    pub fn new(roots: Vec<Stem>) -> Self {
        Self { roots, finished: false }
    }

    fn check_finished(&mut self) -> bool {
        if !self.finished {
            self.finished = self.roots.iter().all(Stem::all_tips_flowered);
        }
        self.finished
    }
}

/// The active plant set and the engine that grows it
#[derive(Debug, Clone)]
pub struct PlantBed {
    plants: Vec<Plant>,
    engine: GrowthEngine,
    mode: PlantMode,
    /// Surface width the roots are currently laid out for
    width: f32,
    /// Incremented each time the set is replaced
    generation: u32,
}

impl PlantBed {
    /// Sow a fresh set of plants along the bottom of a `width` x `height` surface
    pub fn sow(
        params: GrowthParams,
        profile: DeviceProfile,
        mode: PlantMode,
        width: f32,
        height: f32,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let engine = GrowthEngine::new(params, profile);
        let plants = Self::build_plants(&engine, mode, width, height, rng);
        Self {
            plants,
            engine,
            mode,
            width,
            generation: 0,
        }
    }

    fn build_plants(
        engine: &GrowthEngine,
        mode: PlantMode,
        width: f32,
        height: f32,
        rng: &mut dyn RandomSource,
    ) -> Vec<Plant> {
        let count = match mode {
            PlantMode::FollowPointer => 1,
            PlantMode::Meadow { plants } => plants.max(1),
        };

        (0..count)
            .map(|i| {
                let base = Vec2::new(width * (i as f32 + 0.5) / count as f32, height);
                Plant::new(Self::build_roots(engine, base, rng))
            })
            .collect()
    }

    fn build_roots(engine: &GrowthEngine, base: Vec2, rng: &mut dyn RandomSource) -> Vec<Stem> {
        let params = engine.params();
        let profile = engine.profile();
        let n = params.roots_per_plant.max(1);
        let center = (n as f32 - 1.0) / 2.0;

        (0..n)
            .map(|i| {
                let angle = -FRAC_PI_2
                    + (i as f32 - center) * params.root_fan
                    + rng.jitter(params.root_angle_jitter);
                Stem::new(
                    base,
                    angle,
                    params.root_length.sample(rng),
                    profile.root_thickness,
                    profile.branch_count(0),
                )
            })
            .collect()
    }

    /// Advance every plant by one tick. Returns true when all plants are finished.
    ///
    /// In follow-pointer mode the roots ease toward `pointer_x` when one is known.
    pub fn advance(&mut self, pointer_x: Option<f32>, rng: &mut dyn RandomSource) -> bool {
        let follow_x = match self.mode {
            PlantMode::FollowPointer => pointer_x,
            PlantMode::Meadow { .. } => None,
        };

        let mut all_finished = true;
        for plant in &mut self.plants {
            // Finished plants have nothing left to grow but still track the pointer
            if !plant.finished || follow_x.is_some() {
                for root in &mut plant.roots {
                    self.engine.advance(root, 0, follow_x, rng);
                }
            }
            all_finished &= plant.check_finished();
        }
        all_finished
    }

    /// Replace the whole plant set with freshly sown plants
    pub fn regenerate(&mut self, width: f32, height: f32, rng: &mut dyn RandomSource) {
        self.plants = Self::build_plants(&self.engine, self.mode, width, height, rng);
        self.width = width;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Move the live plants onto a resized surface.
    ///
    /// Roots drop to the new bottom edge and keep their relative horizontal
    /// position. Every subtree is re-anchored so finished plants follow too.
    pub fn resize(&mut self, width: f32, height: f32) {
        let count = self.plants.len().max(1) as f32;
        let ratio = if self.width > 0.0 { width / self.width } else { 0.0 };

        for (i, plant) in self.plants.iter_mut().enumerate() {
            for root in &mut plant.roots {
                root.anchor.x = match self.mode {
                    PlantMode::Meadow { .. } => width * (i as f32 + 0.5) / count,
                    PlantMode::FollowPointer if ratio > 0.0 => root.anchor.x * ratio,
                    PlantMode::FollowPointer => width * 0.5,
                };
                root.anchor.y = height;
                root.reanchor_children();
            }
        }
        self.width = width;
    }

    pub fn all_finished(&self) -> bool {
        self.plants.iter().all(|p| p.finished)
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Total number of stems across all plants
    pub fn stem_count(&self) -> usize {
        self.plants
            .iter()
            .flat_map(|p| p.roots.iter())
            .map(Stem::count)
            .sum()
    }
}
