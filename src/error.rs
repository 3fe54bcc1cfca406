use thiserror::Error;

/// Failure taxonomy for the plate reading pipeline.
///
/// The pipeline is all-or-nothing per image: no retries, no partial
/// recovery. These variants are the inspectable outcomes a caller can
/// downcast from an `anyhow::Error`.
#[derive(Debug, Error)]
pub enum PlateError {
    /// Every filtering stage left the candidate set empty. Raised
    /// explicitly instead of letting the mean/median computations
    /// divide by zero.
    #[error("no candidate characters found on the plate")]
    NoCandidatesFound,

    /// An OCR call errored or returned an empty reading. Carries the
    /// partial cumulative text gathered so far for diagnostics.
    #[error("recognition failed at {stage}: {reason} (partial reading: {partial:?})")]
    RecognitionFailed {
        stage: &'static str,
        reason: String,
        partial: String,
    },
}
