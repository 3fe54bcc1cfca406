use crate::detection::glyphs;
use crate::models::{Contour, Hierarchy};

/// Structural filter over the containment forest.
///
/// A character outline should contain only a handful of nested contours
/// (counter shapes, specular noise), and a genuine plate character sits
/// in a sibling group with the other characters. Contours violating
/// either assumption are treated as texture or noise.
pub struct InclusionFilter<'a> {
    hierarchy: &'a Hierarchy,
    classified: Vec<bool>,
    max_descendants: usize,
}

impl<'a> InclusionFilter<'a> {
    pub fn new(
        contours: &[Contour],
        hierarchy: &'a Hierarchy,
        img_width: u32,
        img_height: u32,
        max_descendants: usize,
    ) -> Self {
        // classify() runs many times per contour during the tree walks;
        // compute it once up front.
        let classified = contours
            .iter()
            .map(|c| glyphs::classify(c, img_width, img_height))
            .collect();
        Self {
            hierarchy,
            classified,
            max_descendants,
        }
    }

    pub fn is_classified(&self, index: usize) -> bool {
        self.classified[index]
    }

    /// Both structural rules together. A contour survives only if it
    /// contains few nested contours and is not a member of a small
    /// contained group.
    pub fn include(&self, index: usize) -> bool {
        if self.descendant_count(index) > self.max_descendants {
            return false;
        }

        // A plate carries several characters, so a real character's
        // enclosing contour holds a large sibling group. A contained
        // contour whose resolved parent holds a small group is noise.
        if let Some(parent) = self.resolve_parent(index) {
            if self.descendant_count(parent) <= self.max_descendants {
                return false;
            }
        }

        true
    }

    /// Number of classify-passing contours nested below `index`, walking
    /// each child level's sibling chain in both directions. Iterative,
    /// with a visited set so malformed sibling or child links from the
    /// tracer terminate instead of looping.
    pub fn descendant_count(&self, index: usize) -> usize {
        let mut visited = vec![false; self.hierarchy.len()];
        let mut stack = Vec::new();
        let mut count = 0;

        self.push_child_level(index, &mut visited, &mut stack);
        while let Some(i) = stack.pop() {
            if self.classified[i] {
                count += 1;
            }
            self.push_child_level(i, &mut visited, &mut stack);
        }

        count
    }

    fn push_child_level(&self, index: usize, visited: &mut [bool], stack: &mut Vec<usize>) {
        let Some(first) = self.hierarchy.node(index).first_child else {
            return;
        };

        let mut cursor = Some(first);
        while let Some(i) = cursor {
            if visited[i] {
                break;
            }
            visited[i] = true;
            stack.push(i);
            cursor = self.hierarchy.node(i).next_sibling;
        }

        let mut cursor = self.hierarchy.node(first).prev_sibling;
        while let Some(i) = cursor {
            if visited[i] {
                break;
            }
            visited[i] = true;
            stack.push(i);
            cursor = self.hierarchy.node(i).prev_sibling;
        }
    }

    /// Walk the parent chain upward, skipping ancestors that fail the
    /// shape classifier. `None` means the contour reaches the forest
    /// root without meeting a classify-passing ancestor. Hop-bounded
    /// against malformed parent links.
    pub fn resolve_parent(&self, index: usize) -> Option<usize> {
        let mut hops = 0;
        let mut cursor = self.hierarchy.node(index).parent;

        while let Some(p) = cursor {
            if self.classified[p] {
                return Some(p);
            }
            hops += 1;
            if hops > self.hierarchy.len() {
                return None;
            }
            cursor = self.hierarchy.node(p).parent;
        }

        None
    }
}
