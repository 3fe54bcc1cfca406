use image::GrayImage;
use imageproc::contours::find_contours;

use crate::models::{Contour, Hierarchy};

/// Trace contours in the merged edge mask and build the containment
/// forest over them.
///
/// The tracer reports a parent index per contour; the sibling and
/// first-child links of the [`Hierarchy`] arena are derived from those
/// in discovery order, so contour `i` and hierarchy node `i` always
/// describe the same boundary.
pub fn trace_contours(edges: &GrayImage) -> (Vec<Contour>, Hierarchy) {
    let traced = find_contours::<i32>(edges);

    let parents: Vec<Option<usize>> = traced.iter().map(|c| c.parent).collect();
    let hierarchy = Hierarchy::from_parents(&parents);

    let contours = traced
        .into_iter()
        .map(|c| Contour::new(c.points))
        .collect();

    (contours, hierarchy)
}
