use std::collections::VecDeque;
use std::sync::Mutex;

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use platereader::{OcrEngine, SegmentMode};

pub const PLATE_BG: Rgb<u8> = Rgb([220, 220, 220]);
pub const GLYPH_INK: Rgb<u8> = Rgb([20, 20, 20]);

/// Synthetic cropped plate: seven dark 20x40 glyph rectangles on a light
/// background, evenly spaced left to right, plus two short decoy marks.
///
/// The decoys matter: the mean-height pass removes everything at or
/// below the group average, so a plate of perfectly uniform glyphs needs
/// shorter noise in the set for the glyphs to clear the mean.
///
/// Each glyph gets a two-step intensity ramp at its boundary so the
/// traced edge sits on mid-gray pixels, like the soft edges of a real
/// photograph. The contour-path intensity then falls clearly below the
/// backdrop and the polarity decision is deterministic.
pub fn synthetic_plate() -> DynamicImage {
    let mut img = RgbImage::from_pixel(500, 130, PLATE_BG);

    for i in 0..7u32 {
        let x = (40 + i * 60) as i32;
        draw_filled_rect_mut(&mut img, Rect::at(x, 40).of_size(20, 40), Rgb([170, 170, 170]));
        draw_filled_rect_mut(&mut img, Rect::at(x + 2, 42).of_size(16, 36), Rgb([70, 70, 70]));
        draw_filled_rect_mut(&mut img, Rect::at(x + 4, 44).of_size(12, 32), GLYPH_INK);
    }

    // Decoy marks, glyph-shaped but short (think mounting screws).
    draw_filled_rect_mut(&mut img, Rect::at(14, 60).of_size(8, 16), GLYPH_INK);
    draw_filled_rect_mut(&mut img, Rect::at(470, 60).of_size(8, 16), GLYPH_INK);

    DynamicImage::ImageRgb8(img)
}

/// One recorded OCR call.
#[derive(Debug, Clone)]
pub struct OcrCall {
    pub whitelist: String,
    pub mode: SegmentMode,
    pub patch_size: (u32, u32),
}

/// Scripted OCR engine: returns canned readings in call order and
/// records every call for assertions.
pub struct ScriptedOcr {
    script: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<OcrCall>>,
}

impl ScriptedOcr {
    pub fn new<S: Into<String>>(outputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            script: Mutex::new(outputs.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<OcrCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl OcrEngine for ScriptedOcr {
    fn recognize(
        &self,
        image: &GrayImage,
        whitelist: &str,
        mode: SegmentMode,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(OcrCall {
            whitelist: whitelist.to_string(),
            mode,
            patch_size: image.dimensions(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted OCR exhausted"))
    }
}
