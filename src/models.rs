use imageproc::point::Point;

/// Bounding box in the padded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Smallest axis-aligned rectangle enclosing a set of points.
    ///
    /// Uses the inclusive convention: width = max_x - min_x + 1.
    pub fn of_points(points: &[Point<i32>]) -> Self {
        if points.is_empty() {
            return Self {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            };
        }

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self {
            x: min_x.max(0) as u32,
            y: min_y.max(0) as u32,
            width: (max_x - min_x + 1).max(0) as u32,
            height: (max_y - min_y + 1).max(0) as u32,
        }
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// An ordered boundary trace of a connected region in the edge mask.
/// Immutable once produced by the tracer.
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub bbox: BoundingBox,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        let bbox = BoundingBox::of_points(&points);
        Self { points, bbox }
    }
}

/// Containment links for one contour. `None` means no link.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyNode {
    pub next_sibling: Option<usize>,
    pub prev_sibling: Option<usize>,
    pub first_child: Option<usize>,
    pub parent: Option<usize>,
}

/// Containment forest over the contour list, one node per contour,
/// positionally aligned. Links are index lookups, not ownership.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Build sibling/child links from per-contour parent indices, in
    /// discovery order: the first contour found under a parent becomes its
    /// first child, later ones are chained as next siblings.
    pub fn from_parents(parents: &[Option<usize>]) -> Self {
        let mut nodes = vec![HierarchyNode::default(); parents.len()];
        let mut last_child: Vec<Option<usize>> = vec![None; parents.len()];

        for (i, parent) in parents.iter().enumerate() {
            nodes[i].parent = *parent;
            if let Some(p) = *parent {
                match last_child[p] {
                    None => nodes[p].first_child = Some(i),
                    Some(prev) => {
                        nodes[prev].next_sibling = Some(i);
                        nodes[i].prev_sibling = Some(prev);
                    }
                }
                last_child[p] = Some(i);
            }
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &HierarchyNode {
        &self.nodes[index]
    }

    /// Test hook for malformed link layouts that `from_parents` cannot
    /// produce (the tree walks must survive them).
    #[cfg(test)]
    pub(crate) fn from_nodes(nodes: Vec<HierarchyNode>) -> Self {
        Self { nodes }
    }
}

/// A contour that survived filtering, with its provenance index into the
/// contour list. Candidates are appended and then progressively removed,
/// never mutated in place.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub index: usize,
    pub bbox: BoundingBox,
}

/// The two intermediate readings and the reconciled result.
#[derive(Debug, Clone)]
pub struct PlateReading {
    /// Concatenation of the per-character recognitions, left to right.
    pub cumulative: String,
    /// Whole-canvas recognition, spaces stripped.
    pub composite: String,
    /// Final reconciled string.
    pub text: String,
}
