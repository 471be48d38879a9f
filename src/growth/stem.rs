use crate::math::Vec2;

/// One segment of a plant, owning the stems that branch from its tip
#[derive(Debug, Clone)]
pub struct Stem {
    /// Base of the segment in surface coordinates
    pub anchor: Vec2,
    /// Growth direction in radians (-PI/2 points straight up)
    pub angle: f32,
    /// Current length, always within `0..=max_length`
    pub length: f32,
    pub max_length: f32,
    /// Stroke width
    pub thickness: f32,
    /// Set once, when the stem reaches full length and has branched
    pub grown: bool,
    /// Children this stem will spawn, fixed at creation
    pub branch_count: usize,
    pub children: Vec<Stem>,
}

impl Stem {
    pub fn new(anchor: Vec2, angle: f32, max_length: f32, thickness: f32, branch_count: usize) -> Self {
        Self {
            anchor,
            angle,
            length: 0.0,
            max_length: max_length.max(0.0),
            thickness,
            grown: false,
            branch_count,
            children: Vec::new(),
        }
    }

    /// Current end point of the segment
    pub fn tip(&self) -> Vec2 {
        self.anchor + Vec2::from_angle(self.angle) * self.length
    }

    pub fn is_full_length(&self) -> bool {
        self.length >= self.max_length
    }

    /// Whether a flower hangs from this stem's tip. Roots never bear one.
    pub fn is_flower_bearing(&self, depth: usize) -> bool {
        depth > 0 && self.children.is_empty() && self.is_full_length()
    }

    /// True once every tip in this subtree has reached full length
    pub fn all_tips_flowered(&self) -> bool {
        if self.children.is_empty() {
            self.is_full_length()
        } else {
            self.children.iter().all(Stem::all_tips_flowered)
        }
    }

    /// Iterate `(depth, stem)` pairs in pre-order, relative to this stem at depth 0
    pub fn iter_preorder(&self) -> impl Iterator<Item = (usize, &Stem)> {
        PreorderStemIter { stack: vec![(0, self)] }
    }

    /// Move every descendant so it starts at its parent's tip
    pub fn reanchor_children(&mut self) {
        let tip = self.tip();
        for child in &mut self.children {
            child.anchor = tip;
            child.reanchor_children();
        }
    }

    /// Total number of stems in subtree
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|c| c.count()).sum::<usize>()
    }
}

struct PreorderStemIter<'a> {
    stack: Vec<(usize, &'a Stem)>,
}

impl<'a> Iterator for PreorderStemIter<'a> {
    type Item = (usize, &'a Stem);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, stem) = self.stack.pop()?;
        for child in stem.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, stem))
    }
}
