pub mod binarize;
pub mod contours;
pub mod glyphs;
pub mod hierarchy;
pub mod ocr;
pub mod preprocessing;
pub mod stats;

use image::{DynamicImage, GrayImage, Luma};
use tracing::{debug, info};

use crate::error::PlateError;
use crate::models::{Candidate, PlateReading};

use hierarchy::InclusionFilter;
use ocr::OcrEngine;

/// Candidate characters and the shared binarized canvas they were
/// rendered into. Candidates are sorted left to right; `glyphs[i]` is
/// the cropped, white-bordered patch for `candidates[i]`.
#[derive(Debug)]
pub struct Segmentation {
    pub canvas: GrayImage,
    pub candidates: Vec<Candidate>,
    pub glyphs: Vec<GrayImage>,
}

/// Main plate reading pipeline orchestrator
pub struct PlateProcessor {
    /// Uniform black border added around the source image before edge
    /// detection, in pixels.
    pub border: u32,
    /// Canny hysteresis thresholds applied per color channel.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Upper bound on nested contours below (and sibling group size
    /// around) a genuine character outline.
    pub max_descendants: usize,
    /// White border added around each cropped glyph before OCR.
    pub glyph_border: u32,
}

impl PlateProcessor {
    pub fn new() -> Self {
        Self {
            border: 50,
            canny_low: 128.0,
            canny_high: 255.0,
            max_descendants: 5,
            glyph_border: 5,
        }
    }

    /// Stages 1-6: pad, detect edges, trace contours, filter down to
    /// plausible characters, order them, and binarize each into the
    /// shared canvas.
    pub fn segment(&self, img: &DynamicImage) -> Result<Segmentation, PlateError> {
        let padded = preprocessing::pad_image(img, self.border);
        let (width, height) = padded.dimensions();

        let edges = preprocessing::channel_edges(&padded, self.canny_low, self.canny_high);
        let (contours, hierarchy) = contours::trace_contours(&edges);
        debug!(count = contours.len(), "traced contours");

        let filter =
            InclusionFilter::new(&contours, &hierarchy, width, height, self.max_descendants);

        let mut candidates: Vec<Candidate> = Vec::new();
        for (index, contour) in contours.iter().enumerate() {
            if filter.is_classified(index) && filter.include(index) {
                candidates.push(Candidate {
                    index,
                    bbox: contour.bbox.clone(),
                });
            }
        }
        debug!(count = candidates.len(), "structurally plausible candidates");

        let mut candidates = stats::eliminate_outliers(candidates)?;
        stats::order_left_to_right(&mut candidates);
        info!(count = candidates.len(), "candidate characters");

        let mut canvas = GrayImage::from_pixel(width, height, Luma([255u8]));
        let mut patches = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let contour = &contours[candidate.index];
            binarize::binarize_into(&padded, contour, &mut canvas);
            patches.push(binarize::crop_with_border(
                &canvas,
                &candidate.bbox,
                self.glyph_border,
            ));
        }

        Ok(Segmentation {
            canvas,
            candidates,
            glyphs: patches,
        })
    }

    /// Stages 7-8: per-character recognition, whole-canvas recognition,
    /// reconciliation.
    pub fn recognize(
        &self,
        segmentation: &Segmentation,
        engine: &dyn OcrEngine,
    ) -> Result<PlateReading, PlateError> {
        let cumulative = ocr::read_glyphs(&segmentation.glyphs, engine)?;
        debug!(%cumulative, "cumulative reading");

        let composite = ocr::read_composite(&segmentation.canvas, engine, &cumulative)?;
        debug!(%composite, "composite reading");

        let text = ocr::reconcile(&cumulative, &composite);
        Ok(PlateReading {
            cumulative,
            composite,
            text,
        })
    }

    /// Run the full pipeline on one cropped plate image.
    pub fn read(
        &self,
        img: &DynamicImage,
        engine: &dyn OcrEngine,
    ) -> Result<PlateReading, PlateError> {
        let segmentation = self.segment(img)?;
        self.recognize(&segmentation, engine)
    }
}

impl Default for PlateProcessor {
    fn default() -> Self {
        Self::new()
    }
}
