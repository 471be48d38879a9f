//! Garden configuration
//!
//! One coherent constant set for both device classes. Every section carries
//! `#[serde(default)]`, so a YAML document only needs the keys it overrides.

use serde::Deserialize;
use crate::math::RandomSource;

/// Inclusive-exclusive float range `[min, max)` sampled per draw
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn sample(&self, rng: &mut dyn RandomSource) -> f32 {
        rng.range(self.min, self.max)
    }
}

/// How plants are laid out
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlantMode {
    /// One plant centred at the bottom whose base follows the pointer
    #[default]
    FollowPointer,
    /// Several plants spaced evenly along the bottom edge
    Meadow { plants: usize },
}

/// Device class, chosen once at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Viewports narrower than `breakpoint` CSS pixels count as mobile
    pub fn from_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Per-device branching and particle budget
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Stems at this depth never branch
    pub max_depth: usize,
    /// Children spawned per depth; the last entry repeats for deeper stems
    pub branch_counts: Vec<usize>,
    /// Thickness of root stems
    pub root_thickness: f32,
    /// Rain flowers spawned per pointer/touch move
    pub rain_batch: usize,
    /// Size of the recycled bubble pool
    pub bubble_count: usize,
}

impl DeviceProfile {
    pub fn desktop() -> Self {
        Self {
            max_depth: 4,
            branch_counts: vec![2, 2, 2, 1],
            root_thickness: 7.0,
            rain_batch: 6,
            bubble_count: 18,
        }
    }

    pub fn mobile() -> Self {
        Self {
            max_depth: 3,
            branch_counts: vec![2, 2, 1],
            root_thickness: 5.0,
            rain_batch: 4,
            bubble_count: 8,
        }
    }

    /// Number of children a stem at `depth` spawns when it finishes growing
    pub fn branch_count(&self, depth: usize) -> usize {
        if depth >= self.max_depth {
            return 0;
        }
        self.branch_counts
            .get(depth)
            .or_else(|| self.branch_counts.last())
            .copied()
            .unwrap_or(0)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

/// Parameters controlling stem growth
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Length added per tick, drawn per stem per tick
    pub growth_speed: FloatRange,
    /// Maximum length of root stems
    pub root_length: FloatRange,
    /// Child max length as a fraction of the parent's
    pub length_decay: FloatRange,
    /// Child thickness multiplier
    pub thickness_decay: f32,
    /// Thickness floor for deep stems
    pub min_thickness: f32,
    /// Angle between neighbouring children (radians)
    pub branch_spread: f32,
    /// Random variation added to each child angle (radians)
    pub angle_jitter: f32,
    /// Random lean of root stems away from vertical (radians)
    pub root_angle_jitter: f32,
    /// Fraction of the pointer distance covered per tick in follow mode
    pub follow_smoothing: f32,
    /// Root stems sprouting from one plant base
    pub roots_per_plant: usize,
    /// Angle between neighbouring roots of one plant (radians)
    pub root_fan: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            growth_speed: FloatRange::new(0.6, 1.6),
            root_length: FloatRange::new(120.0, 180.0),
            length_decay: FloatRange::new(0.55, 0.75),
            thickness_decay: 0.68,
            min_thickness: 1.0,
            branch_spread: 0.45,
            angle_jitter: 0.18,
            root_angle_jitter: 0.12,
            follow_smoothing: 0.06,
            roots_per_plant: 1,
            root_fan: 0.35,
        }
    }
}

/// Falling hop-flower rain
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RainParams {
    /// Horizontal spread of a pointer batch around the event x
    pub pointer_jitter: f32,
    pub pointer_radius: FloatRange,
    pub pointer_speed: FloatRange,
    /// Periodic rain across the whole width
    pub timer_enabled: bool,
    pub timer_batch: usize,
    pub timer_radius: FloatRange,
    pub timer_speed: FloatRange,
    pub spawn_interval_ms: f64,
    /// Spawn height (above the top edge)
    pub spawn_y: f32,
    /// Pop progress added per tick
    pub pop_step: f32,
    /// Distance past the bottom edge before an unpopped flower is culled
    pub cull_margin: f32,
    pub ring_count: usize,
    /// Extra radius between neighbouring pop rings at full progress
    pub ring_gap: f32,
    /// Spawns beyond this many live flowers are dropped
    pub max_flowers: Option<usize>,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            pointer_jitter: 60.0,
            pointer_radius: FloatRange::new(18.0, 28.0),
            pointer_speed: FloatRange::new(1.2, 3.0),
            timer_enabled: true,
            timer_batch: 5,
            timer_radius: FloatRange::new(22.0, 30.0),
            timer_speed: FloatRange::new(1.2, 2.4),
            spawn_interval_ms: 10_000.0,
            spawn_y: -30.0,
            pop_step: 0.04,
            cull_margin: 40.0,
            ring_count: 8,
            ring_gap: 3.0,
            max_flowers: None,
        }
    }
}

/// Rising bubbles
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BubbleParams {
    pub radius: FloatRange,
    pub speed: FloatRange,
    /// Peak horizontal sway in pixels
    pub amplitude: f32,
}

impl Default for BubbleParams {
    fn default() -> Self {
        Self {
            radius: FloatRange::new(4.0, 12.0),
            speed: FloatRange::new(0.3, 1.0),
            amplitude: 8.0,
        }
    }
}

/// Hanging flowers at stem tips
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowerParams {
    /// Blossom radius (24 draws at unit scale)
    pub radius: f32,
    /// Distance the blossom hangs below its attachment point
    pub hang_drop: f32,
    /// Fraction of the branch lean passed on to the blossom
    pub hang_tilt: f32,
    /// Tips are kept this far inside the surface
    pub edge_margin: f32,
    pub highlight_radius: f32,
}

impl Default for FlowerParams {
    fn default() -> Self {
        Self {
            radius: 16.0,
            hang_drop: 8.0,
            hang_tilt: 0.35,
            edge_margin: 24.0,
            highlight_radius: 2.5,
        }
    }
}

/// Complete garden configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub mode: PlantMode,
    pub growth: GrowthParams,
    pub desktop: DeviceProfile,
    pub mobile: DeviceProfile,
    pub rain: RainParams,
    pub bubbles: BubbleParams,
    pub flowers: FlowerParams,
    /// Pause between the last plant finishing and the set being regrown
    pub regeneration_delay_ms: f64,
    /// Viewport width (CSS px) below which the mobile profile applies
    pub mobile_breakpoint: f32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            mode: PlantMode::default(),
            growth: GrowthParams::default(),
            desktop: DeviceProfile::desktop(),
            mobile: DeviceProfile::mobile(),
            rain: RainParams::default(),
            bubbles: BubbleParams::default(),
            flowers: FlowerParams::default(),
            regeneration_delay_ms: 1200.0,
            mobile_breakpoint: 768.0,
        }
    }
}

impl GardenConfig {
    /// Parse from YAML, filling unspecified keys with defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let config: GardenConfig = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall growth or produce inverted ranges
    pub fn validate(&self) -> Result<(), String> {
        let ranges = [
            ("growth.growth_speed", self.growth.growth_speed),
            ("growth.root_length", self.growth.root_length),
            ("growth.length_decay", self.growth.length_decay),
            ("rain.pointer_radius", self.rain.pointer_radius),
            ("rain.pointer_speed", self.rain.pointer_speed),
            ("rain.timer_radius", self.rain.timer_radius),
            ("rain.timer_speed", self.rain.timer_speed),
            ("bubbles.radius", self.bubbles.radius),
            ("bubbles.speed", self.bubbles.speed),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(format!("{}: min {} exceeds max {}", name, range.min, range.max));
            }
        }

        if self.growth.growth_speed.min <= 0.0 {
            return Err("growth.growth_speed must be strictly positive".to_string());
        }
        if self.rain.pop_step <= 0.0 {
            return Err("rain.pop_step must be strictly positive".to_string());
        }
        if self.rain.timer_enabled && self.rain.spawn_interval_ms <= 0.0 {
            return Err("rain.spawn_interval_ms must be positive when the timer is enabled".to_string());
        }
        if let PlantMode::Meadow { plants: 0 } = self.mode {
            return Err("mode.plants must be at least 1".to_string());
        }
        Ok(())
    }

    /// Profile for the given device class
    pub fn profile(&self, device: DeviceClass) -> &DeviceProfile {
        match device {
            DeviceClass::Desktop => &self.desktop,
            DeviceClass::Mobile => &self.mobile,
        }
    }

    /// Device class for a viewport width in CSS pixels
    pub fn device_for_width(&self, width: f32) -> DeviceClass {
        DeviceClass::from_width(width, self.mobile_breakpoint)
    }
}
