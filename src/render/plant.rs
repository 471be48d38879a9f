use crate::growth::{Plant, Stem};
use super::{Color, FlowerRenderer, Stroke, Surface, color::wrap_hue};

/// Stem hue cycling with time, offset per branch depth
pub fn stem_hue(time_ms: f64, depth: usize) -> f32 {
    wrap_hue((time_ms / 40.0) as f32 + depth as f32 * 30.0)
}

/// Draws stem trees onto the plant layer and their hanging flowers onto the
/// flower layer
#[derive(Debug, Clone)]
pub struct PlantRenderer<'a> {
    flowers: &'a FlowerRenderer,
}

impl<'a> PlantRenderer<'a> {
    pub fn new(flowers: &'a FlowerRenderer) -> Self {
        Self { flowers }
    }

    /// Draw every root of `plant`
    pub fn render_plant<S: Surface + ?Sized>(
        &self,
        stems: &mut S,
        blossoms: &mut S,
        plant: &Plant,
        time_ms: f64,
        fade: f32,
    ) {
        for root in &plant.roots {
            self.render(stems, blossoms, root, 0, time_ms, fade);
        }
    }

    /// Draw `stem`, then its children on top of it.
    ///
    /// `fade` in [0, 1] scales opacity down to nothing at 1.
    pub fn render<S: Surface + ?Sized>(
        &self,
        stems: &mut S,
        blossoms: &mut S,
        stem: &Stem,
        depth: usize,
        time_ms: f64,
        fade: f32,
    ) {
        let opacity = (1.0 - fade).clamp(0.0, 1.0);

        if stem.length > 0.0 {
            let stroke = Stroke::new(Color::hsl(stem_hue(time_ms, depth), 55.0, 42.0), opacity, stem.thickness);
            stems.stroke_line(stem.anchor, stem.tip(), &stroke);
        }

        if stem.is_flower_bearing(depth) {
            let (width, height) = blossoms.size();
            let margin = self.flowers.params().edge_margin;
            let attach = stem.tip().clamp_to_bounds(width, height, margin);
            self.flowers.draw_hanging(blossoms, attach, stem.angle, time_ms, opacity);
        }

        for child in &stem.children {
            self.render(stems, blossoms, child, depth + 1, time_ms, fade);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use crate::config::{FlowerParams, RainParams};
    use crate::math::Vec2;
    use crate::render::{DrawCommand, RecordingSurface, flower::BLOSSOM_LAYERS};

    fn full(mut stem: Stem) -> Stem {
        stem.length = stem.max_length;
        stem.grown = true;
        stem
    }

    fn two_tip_tree(anchor: Vec2) -> Stem {
        let mut root = full(Stem::new(anchor, -FRAC_PI_2, 100.0, 7.0, 2));
        let tip = root.tip();
        root.children = vec![
            full(Stem::new(tip, -2.2, 50.0, 4.0, 0)),
            full(Stem::new(tip, -0.9, 50.0, 4.0, 0)),
        ];
        root
    }

    fn render(stem: &Stem, fade: f32, time_ms: f64) -> (RecordingSurface, RecordingSurface) {
        let flowers = FlowerRenderer::new(FlowerParams::default(), &RainParams::default());
        let renderer = PlantRenderer::new(&flowers);
        let mut stems = RecordingSurface::new(800.0, 600.0);
        let mut blossoms = RecordingSurface::new(800.0, 600.0);
        renderer.render(&mut stems, &mut blossoms, stem, 0, time_ms, fade);
        (stems, blossoms)
    }

    fn line_strokes(surface: &RecordingSurface) -> Vec<Stroke> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeLine { stroke, .. } => Some(*stroke),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_stem_hue_formula() {
        assert_eq!(stem_hue(0.0, 0), 0.0);
        assert_eq!(stem_hue(400.0, 2), 70.0);
        assert_eq!(stem_hue(14400.0, 0), 0.0);
    }

    #[test]
    fn test_parent_drawn_before_children() {
        let tree = two_tip_tree(Vec2::new(400.0, 500.0));
        let (stems, _) = render(&tree, 0.0, 0.0);

        let strokes = line_strokes(&stems);
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0].width, 7.0);
        assert_eq!(strokes[0].color.hue(), Some(0.0));
        assert_eq!(strokes[1].color.hue(), Some(30.0));
        assert_eq!(strokes[2].width, 4.0);
    }

    #[test]
    fn test_one_flower_per_tip_not_on_root() {
        let tree = two_tip_tree(Vec2::new(400.0, 500.0));
        let (_, blossoms) = render(&tree, 0.0, 0.0);
        // blossom layers plus the highlight disc, per tip
        assert_eq!(blossoms.fill_count(), 2 * (BLOSSOM_LAYERS + 1));
        assert_eq!(blossoms.line_count(), 2);

        let bare_root = full(Stem::new(Vec2::new(400.0, 500.0), -FRAC_PI_2, 100.0, 7.0, 0));
        let (_, blossoms) = render(&bare_root, 0.0, 0.0);
        assert_eq!(blossoms.fill_count(), 0);
    }

    #[test]
    fn test_growing_tip_has_no_flower() {
        let mut tree = two_tip_tree(Vec2::new(400.0, 500.0));
        tree.children[1].length = 10.0;
        let (_, blossoms) = render(&tree, 0.0, 0.0);
        assert_eq!(blossoms.fill_count(), BLOSSOM_LAYERS + 1);
    }

    #[test]
    fn test_fade_reduces_opacity() {
        let tree = two_tip_tree(Vec2::new(400.0, 500.0));
        let (stems, blossoms) = render(&tree, 0.75, 0.0);

        for stroke in line_strokes(&stems) {
            assert!((stroke.alpha - 0.25).abs() < 0.0001);
        }
        for command in blossoms.commands() {
            if let DrawCommand::FillEllipse { fill, .. } = command {
                assert!(fill.alpha <= 0.25 + 0.0001);
            }
        }
    }

    #[test]
    fn test_flowers_clamped_near_edges() {
        // Tips poke out past the left edge and the top
        let tree = two_tip_tree(Vec2::new(10.0, 90.0));
        let (_, blossoms) = render(&tree, 0.0, 0.0);
        let margin = FlowerParams::default().edge_margin;

        for command in blossoms.commands() {
            if let DrawCommand::StrokeLine { from, .. } = command {
                assert!(from.x >= margin && from.x <= 800.0 - margin);
                assert!(from.y >= margin && from.y <= 600.0 - margin);
            }
        }
    }

    #[test]
    fn test_unstarted_stem_draws_nothing() {
        let stem = Stem::new(Vec2::new(400.0, 600.0), -FRAC_PI_2, 100.0, 7.0, 2);
        let (stems, blossoms) = render(&stem, 0.0, 0.0);
        assert!(stems.commands().is_empty());
        assert!(blossoms.commands().is_empty());
    }
}
