use crate::models::Contour;

/// Minimum bounding-box area for a plausible character, in pixels.
const MIN_GLYPH_AREA: u32 = 25;

/// A character outline traced from an edge mask comes back to where it
/// started; a trace whose endpoints drift apart is an open fragment.
pub fn is_closed(contour: &Contour) -> bool {
    let first = match contour.points.first() {
        Some(p) => p,
        None => return false,
    };
    let last = match contour.points.last() {
        Some(p) => p,
        None => return false,
    };
    (first.x - last.x).abs() <= 1 && (first.y - last.y).abs() <= 1
}

/// Geometric predicate: could this contour be the outline of a single
/// plate character? Pure and stateless; `img_width`/`img_height` are the
/// padded image dimensions.
///
/// The two aspect-ratio checks are kept separate on purpose. Their
/// combination leaves a narrow valid band tuned against real plates;
/// do not merge or widen them.
pub fn classify(contour: &Contour, img_width: u32, img_height: u32) -> bool {
    if !is_closed(contour) {
        return false;
    }

    let ratio = contour.bbox.aspect_ratio();

    // Not tall enough, or too wide, to be a letter.
    if ratio < 0.15 || ratio > 1.0 {
        return false;
    }

    // Close to a square: plate characters are not.
    if ratio > 0.7 && ratio < 1.3 {
        return false;
    }

    let area = contour.bbox.area();
    if u64::from(area) > u64::from(img_width) * u64::from(img_height) / 5
        || area < MIN_GLYPH_AREA
    {
        return false;
    }

    true
}
