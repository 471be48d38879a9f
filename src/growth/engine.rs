//! Per-tick stem growth and branching

use crate::config::{DeviceProfile, GrowthParams};
use crate::math::RandomSource;
use super::Stem;

/// Advances stem trees one tick at a time.
///
/// The device profile is captured when the engine is built, so branch counts
/// and maximum depth never change while a plant set is growing.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    params: GrowthParams,
    profile: DeviceProfile,
}

impl GrowthEngine {
    pub fn new(params: GrowthParams, profile: DeviceProfile) -> Self {
        Self { params, profile }
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Advance `stem` and its subtree by one tick.
    ///
    /// `follow_x` is only honoured at depth 0: the stem's base eases toward it
    /// by `follow_smoothing` of the remaining distance.
    pub fn advance(
        &self,
        stem: &mut Stem,
        depth: usize,
        follow_x: Option<f32>,
        rng: &mut dyn RandomSource,
    ) {
        if depth == 0 {
            if let Some(target_x) = follow_x {
                stem.anchor.x += (target_x - stem.anchor.x) * self.params.follow_smoothing;
            }
        }

        if stem.length < stem.max_length {
            let speed = self.params.growth_speed.sample(rng).max(f32::EPSILON);
            stem.length = (stem.length + speed).min(stem.max_length);
        }

        if stem.is_full_length() && !stem.grown {
            if depth < self.profile.max_depth {
                stem.children = self.spawn_children(stem, depth, rng);
            }
            stem.grown = true;
        }

        let tip = stem.tip();
        for child in &mut stem.children {
            child.anchor = tip;
            self.advance(child, depth + 1, None, rng);
        }
    }

    /// Build the children of a stem that just reached full length.
    ///
    /// Children fan out symmetrically around the parent's angle, shorter and
    /// thinner than the parent.
    fn spawn_children(&self, parent: &Stem, depth: usize, rng: &mut dyn RandomSource) -> Vec<Stem> {
        let params = &self.params;
        let n = parent.branch_count;
        let center = (n as f32 - 1.0) / 2.0;
        let tip = parent.tip();
        let thickness = (parent.thickness * params.thickness_decay).max(params.min_thickness);
        let grandchildren = self.profile.branch_count(depth + 1);

        (0..n)
            .map(|i| {
                let angle = parent.angle
                    + (i as f32 - center) * params.branch_spread
                    + rng.jitter(params.angle_jitter);
                let max_length = parent.max_length * params.length_decay.sample(rng);
                Stem::new(tip, angle, max_length, thickness, grandchildren)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FloatRange;
    use crate::math::{Lcg, Vec2};
    use std::f32::consts::FRAC_PI_2;

    fn fixed_speed_engine(speed: f32) -> GrowthEngine {
        let params = GrowthParams {
            growth_speed: FloatRange::fixed(speed),
            ..Default::default()
        };
        GrowthEngine::new(params, DeviceProfile::desktop())
    }

    fn root(engine: &GrowthEngine, max_length: f32, thickness: f32) -> Stem {
        Stem::new(
            Vec2::new(400.0, 600.0),
            -FRAC_PI_2,
            max_length,
            thickness,
            engine.profile().branch_count(0),
        )
    }

    fn assert_lengths_in_bounds(stem: &Stem) {
        for (_, s) in stem.iter_preorder() {
            assert!(s.length >= 0.0 && s.length <= s.max_length, "length {} > max {}", s.length, s.max_length);
        }
    }

    #[test]
    fn test_grows_by_fixed_speed() {
        let engine = fixed_speed_engine(1.2);
        let mut rng = Lcg::default();
        let mut stem = root(&engine, 160.0, 7.0);

        engine.advance(&mut stem, 0, None, &mut rng);
        assert!((stem.length - 1.2).abs() < 0.0001);
    }

    #[test]
    fn test_grown_after_exact_tick_count() {
        let engine = fixed_speed_engine(1.2);
        let mut rng = Lcg::new(5);
        let mut stem = root(&engine, 160.0, 7.0);

        for _ in 0..133 {
            engine.advance(&mut stem, 0, None, &mut rng);
            assert!(!stem.grown);
        }
        engine.advance(&mut stem, 0, None, &mut rng);

        assert!(stem.grown);
        assert_eq!(stem.length, 160.0);
        assert_eq!(stem.children.len(), 2);

        let decay = engine.params().length_decay;
        for child in &stem.children {
            assert!(child.max_length >= 160.0 * decay.min && child.max_length <= 160.0 * decay.max);
            assert!((child.thickness - 7.0 * 0.68).abs() < 0.0001);
        }
    }

    #[test]
    fn test_children_fan_around_parent() {
        let engine = fixed_speed_engine(200.0);
        let mut rng = Lcg::new(11);
        let mut stem = root(&engine, 100.0, 7.0);
        engine.advance(&mut stem, 0, None, &mut rng);

        let left = stem.children[0].angle;
        let right = stem.children[1].angle;
        let jitter = engine.params().angle_jitter;
        let spread = engine.params().branch_spread;
        assert!(left < right);
        assert!((left - (-FRAC_PI_2 - spread / 2.0)).abs() <= jitter);
        assert!((right - (-FRAC_PI_2 + spread / 2.0)).abs() <= jitter);
    }

    #[test]
    fn test_branching_is_one_shot() {
        let engine = fixed_speed_engine(50.0);
        let mut rng = Lcg::new(3);
        let mut stem = root(&engine, 100.0, 7.0);

        engine.advance(&mut stem, 0, None, &mut rng);
        engine.advance(&mut stem, 0, None, &mut rng);
        assert!(stem.grown);
        let count = stem.children.len();
        let first_angle = stem.children[0].angle;

        for _ in 0..50 {
            engine.advance(&mut stem, 0, None, &mut rng);
            assert_eq!(stem.children.len(), count);
            assert_eq!(stem.children[0].angle, first_angle);
        }
    }

    #[test]
    fn test_length_invariant_and_monotonic_completion() {
        let engine = GrowthEngine::new(GrowthParams::default(), DeviceProfile::desktop());
        let mut rng = Lcg::new(77);
        let mut stem = root(&engine, 150.0, 7.0);

        let mut flowered = false;
        for _ in 0..2000 {
            engine.advance(&mut stem, 0, None, &mut rng);
            assert_lengths_in_bounds(&stem);
            let now = stem.all_tips_flowered();
            assert!(!(flowered && !now), "all_tips_flowered must not revert");
            flowered = now;
        }
        assert!(flowered);
    }

    #[test]
    fn test_depth_limit_and_thickness_floor() {
        let engine = GrowthEngine::new(GrowthParams::default(), DeviceProfile::desktop());
        let mut rng = Lcg::new(8);
        let mut stem = root(&engine, 150.0, 7.0);
        for _ in 0..2000 {
            engine.advance(&mut stem, 0, None, &mut rng);
        }

        let max_depth = engine.profile().max_depth;
        for (depth, s) in stem.iter_preorder() {
            assert!(depth <= max_depth);
            assert!(s.thickness >= engine.params().min_thickness);
            if depth == max_depth {
                assert!(s.children.is_empty());
                assert!(s.grown);
            }
        }
        // 2 * 2 * 2 * 1 tips on desktop
        let tips = stem.iter_preorder().filter(|(d, s)| s.is_flower_bearing(*d)).count();
        assert_eq!(tips, 8);
    }

    #[test]
    fn test_children_stay_attached_to_tip() {
        let engine = fixed_speed_engine(30.0);
        let mut rng = Lcg::new(21);
        let mut stem = root(&engine, 60.0, 7.0);
        for _ in 0..10 {
            engine.advance(&mut stem, 0, Some(100.0), &mut rng);
        }

        let tip = stem.tip();
        for child in &stem.children {
            assert!(child.anchor.distance(&tip) < 0.001);
        }
    }

    #[test]
    fn test_follow_pointer_smoothing() {
        let engine = fixed_speed_engine(1.0);
        let mut rng = Lcg::default();
        let mut stem = root(&engine, 160.0, 7.0);

        engine.advance(&mut stem, 0, Some(500.0), &mut rng);
        // 6% of the 100px gap
        assert!((stem.anchor.x - 406.0).abs() < 0.001);

        for _ in 0..500 {
            engine.advance(&mut stem, 0, Some(500.0), &mut rng);
        }
        assert!((stem.anchor.x - 500.0).abs() < 0.01);
    }

    #[test]
    fn test_follow_ignored_below_root() {
        let engine = fixed_speed_engine(1.0);
        let mut rng = Lcg::default();
        let mut stem = root(&engine, 160.0, 7.0);

        engine.advance(&mut stem, 1, Some(500.0), &mut rng);
        assert_eq!(stem.anchor.x, 400.0);
    }
}
