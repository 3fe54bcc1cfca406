use tracing::debug;

use crate::error::PlateError;
use crate::models::Candidate;

/// Median with the numpy convention: mean of the two middle values for
/// an even count. Callers guarantee a non-empty slice.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("heights are finite"));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Remove candidates whose bounding-box height is a statistical outlier
/// within the group.
///
/// Two passes: first keep only candidates strictly taller than the mean
/// height (plate characters tower over residual noise), then keep those
/// whose height sits within half the *original* mean of the group
/// median. Every empty intermediate set is an explicit failure, never a
/// division by zero.
pub fn eliminate_outliers(candidates: Vec<Candidate>) -> Result<Vec<Candidate>, PlateError> {
    if candidates.is_empty() {
        return Err(PlateError::NoCandidatesFound);
    }

    let avg = candidates
        .iter()
        .map(|c| c.bbox.height as f64)
        .sum::<f64>()
        / candidates.len() as f64;

    let tall: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.bbox.height as f64 > avg)
        .collect();
    debug!(avg, survivors = tall.len(), "mean height pass");

    if tall.is_empty() {
        return Err(PlateError::NoCandidatesFound);
    }

    let heights: Vec<f64> = tall.iter().map(|c| c.bbox.height as f64).collect();
    let median = median(&heights);

    // Band test against the original mean, not a recomputed one.
    let band: Vec<Candidate> = tall
        .into_iter()
        .filter(|c| {
            let h = c.bbox.height as f64;
            h - avg / 2.0 < median && median < h + avg / 2.0
        })
        .collect();
    debug!(median, survivors = band.len(), "median band pass");

    if band.is_empty() {
        return Err(PlateError::NoCandidatesFound);
    }

    Ok(band)
}

/// Sort candidates left to right by bounding-box x. The sort is stable,
/// so equal positions keep their discovery order.
pub fn order_left_to_right(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|c| c.bbox.x);
}
