use std::io::Cursor;
use std::sync::Mutex;

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat};
use leptess::{LepTess, Variable};
use tracing::debug;

use crate::error::PlateError;

/// Symbols allowed at letter positions of the fixed plate format.
pub const LETTERS: &str = "ASDFGHJKLQWERTYUIOPMNBVCXZ";
/// Symbols allowed at digit positions of the fixed plate format.
pub const DIGITS: &str = "1234567890";
/// Fallback whitelist when the candidate count does not match the format.
pub const LETTERS_AND_DIGITS: &str = "ASDFGHJKLQWERTYUIOPMNBVCXZ1234567890";
/// Whitelist for the whole-canvas pass. Kept byte-for-byte distinct from
/// the per-character fallback (different digit ordering).
pub const COMPOSITE_CHARSET: &str = "ASDFGHJKLQWERTYUIOPMNBVCXZ0123456789";

/// The plate format this reader is tuned for: 2 letters, 3 digits,
/// 2 letters.
pub const PLATE_FORMAT_LEN: usize = 7;

/// Segmentation hint passed to the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// The patch holds exactly one symbol.
    SingleGlyph,
    /// The patch holds free-form text.
    TextBlock,
}

impl SegmentMode {
    fn psm(self) -> &'static str {
        match self {
            SegmentMode::SingleGlyph => "10",
            SegmentMode::TextBlock => "3",
        }
    }
}

/// Boundary to the external recognition engine. Implementations receive
/// a binarized patch, the allowed output symbols, and a segmentation
/// hint, and return the recognized text as-is (line breaks and spaces
/// included).
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &GrayImage, whitelist: &str, mode: SegmentMode) -> Result<String>;
}

/// Tesseract-backed engine.
///
/// Tesseract's API mutates engine state per call (whitelist, page
/// segmentation mode, input image), so the handle lives behind a mutex
/// and calls are serialized.
pub struct TessOcr {
    engine: Mutex<LepTess>,
}

impl TessOcr {
    pub fn new(lang: &str) -> Result<Self> {
        let tess = LepTess::new(None, lang)
            .with_context(|| format!("failed to initialize Tesseract for language {lang:?}"))?;
        Ok(Self {
            engine: Mutex::new(tess),
        })
    }
}

fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("failed to encode patch for OCR")?;
    Ok(buf)
}

impl OcrEngine for TessOcr {
    fn recognize(&self, image: &GrayImage, whitelist: &str, mode: SegmentMode) -> Result<String> {
        // A poisoned lock only means an earlier call panicked; the
        // handle itself is still usable, so recover it rather than
        // propagate the panic.
        let mut tess = self.engine.lock().unwrap_or_else(|e| e.into_inner());

        tess.set_variable(Variable::TesseditCharWhitelist, whitelist)
            .context("failed to set character whitelist")?;
        tess.set_variable(Variable::TesseditPagesegMode, mode.psm())
            .context("failed to set page segmentation mode")?;

        let png = encode_png(image)?;
        tess.set_image_from_mem(&png)
            .context("failed to load patch into Tesseract")?;
        tess.set_source_resolution(300);

        let text = tess
            .get_utf8_text()
            .context("Tesseract returned unreadable output")?;
        debug!(?mode, text = text.trim(), "ocr call");
        Ok(text)
    }
}

/// Whitelist for one candidate position. With exactly the format count,
/// the outer positions are letters and the middle three are digits; any
/// other count falls back to the combined set for every position.
pub fn whitelist_for(position: usize, count: usize) -> &'static str {
    if count == PLATE_FORMAT_LEN {
        if (2..=4).contains(&position) {
            DIGITS
        } else {
            LETTERS
        }
    } else {
        LETTERS_AND_DIGITS
    }
}

/// Recognize each glyph patch left to right and concatenate the
/// readings. An engine error or a blank reading aborts with the partial
/// text gathered so far.
pub fn read_glyphs(glyphs: &[GrayImage], engine: &dyn OcrEngine) -> Result<String, PlateError> {
    let mut cumulative = String::new();

    for (position, glyph) in glyphs.iter().enumerate() {
        let whitelist = whitelist_for(position, glyphs.len());
        let text = engine
            .recognize(glyph, whitelist, SegmentMode::SingleGlyph)
            .map_err(|e| PlateError::RecognitionFailed {
                stage: "per-character recognition",
                reason: e.to_string(),
                partial: cumulative.clone(),
            })?;

        let symbol = text.trim();
        if symbol.is_empty() {
            return Err(PlateError::RecognitionFailed {
                stage: "per-character recognition",
                reason: format!("empty reading at position {position}"),
                partial: cumulative.clone(),
            });
        }
        cumulative.push_str(symbol);
    }

    Ok(cumulative)
}

/// Recognize the whole composite canvas in one pass and strip spaces.
/// Interior line breaks are kept: reconciliation inspects them.
pub fn read_composite(
    canvas: &GrayImage,
    engine: &dyn OcrEngine,
    partial: &str,
) -> Result<String, PlateError> {
    let text = engine
        .recognize(canvas, COMPOSITE_CHARSET, SegmentMode::TextBlock)
        .map_err(|e| PlateError::RecognitionFailed {
            stage: "composite recognition",
            reason: e.to_string(),
            partial: partial.to_string(),
        })?;

    let composite = text.trim().replace(' ', "");
    if composite.is_empty() {
        return Err(PlateError::RecognitionFailed {
            stage: "composite recognition",
            reason: "empty composite reading".to_string(),
            partial: partial.to_string(),
        });
    }

    Ok(composite)
}

/// Pick the final reading from the two candidates. The cumulative
/// reading wins when both have the same length or when the composite
/// pass fractured the plate into multiple lines; otherwise the
/// composite reading is trusted. A plain heuristic, no confidence
/// weighting.
pub fn reconcile(cumulative: &str, composite: &str) -> String {
    if cumulative.chars().count() == composite.chars().count() || composite.contains('\n') {
        cumulative.to_string()
    } else {
        composite.to_string()
    }
}
