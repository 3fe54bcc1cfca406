use image::{GrayImage, Luma, RgbImage};

use crate::detection::stats;
use crate::models::{BoundingBox, Contour};

/// Perceived luminance of a pixel. Positions outside the image
/// contribute 0.
///
/// The channel weighting is deliberate and must stay as is: blue
/// carries the largest weight, red the smallest. It is not the Rec. 709
/// luma formula, and the downstream polarity thresholds are tuned
/// against exactly these coefficients.
pub fn luminance(img: &RgbImage, x: i64, y: i64) -> f64 {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return 0.0;
    }
    let pixel = img.get_pixel(x as u32, y as u32);
    0.2126 * pixel[2] as f64 + 0.7125 * pixel[1] as f64 + 0.0722 * pixel[0] as f64
}

/// Mean luminance along the contour path: the intensity of the glyph
/// stroke itself.
pub fn contour_intensity(img: &RgbImage, contour: &Contour) -> f64 {
    if contour.points.is_empty() {
        return 0.0;
    }
    let sum: f64 = contour
        .points
        .iter()
        .map(|p| luminance(img, p.x as i64, p.y as i64))
        .sum();
    sum / contour.points.len() as f64
}

/// Median luminance of 12 samples taken just outside the four corners
/// of the bounding box: one pixel past each edge on each side of each
/// corner. Out-of-bounds samples read as 0.
pub fn backdrop_intensity(img: &RgbImage, bbox: &BoundingBox) -> f64 {
    let x = bbox.x as i64;
    let y = bbox.y as i64;
    let w = bbox.width as i64;
    let h = bbox.height as i64;

    let samples = [
        luminance(img, x - 1, y + h + 1),
        luminance(img, x - 1, y + h),
        luminance(img, x, y + h + 1),
        luminance(img, x + w + 1, y + h + 1),
        luminance(img, x + w, y + h + 1),
        luminance(img, x + w + 1, y + h),
        luminance(img, x - 1, y - 1),
        luminance(img, x - 1, y),
        luminance(img, x, y - 1),
        luminance(img, x + w + 1, y - 1),
        luminance(img, x + w, y - 1),
        luminance(img, x + w + 1, y),
    ];

    stats::median(&samples)
}

/// Decide which output value renders the glyph stroke and which the
/// backdrop. Returns `(foreground_color, background_color)`.
pub fn polarity(foreground: f64, backdrop: f64) -> (u8, u8) {
    if foreground >= backdrop {
        (255, 0)
    } else {
        (0, 255)
    }
}

/// Threshold every pixel of the candidate's bounding box against the
/// stroke intensity and write the result into the shared canvas at the
/// same absolute position. Pixels outside the padded image are skipped.
pub fn binarize_into(img: &RgbImage, contour: &Contour, canvas: &mut GrayImage) {
    let bbox = &contour.bbox;
    let foreground = contour_intensity(img, contour);
    let backdrop = backdrop_intensity(img, bbox);
    let (foreground_color, background_color) = polarity(foreground, backdrop);

    for x in bbox.x..bbox.x + bbox.width {
        for y in bbox.y..bbox.y + bbox.height {
            if x >= img.width() || y >= img.height() {
                continue;
            }
            let value = if luminance(img, x as i64, y as i64) > foreground {
                background_color
            } else {
                foreground_color
            };
            canvas.put_pixel(x, y, Luma([value]));
        }
    }
}

/// Extract the candidate's region from the canvas and add a uniform
/// white border around it: the unit handed to per-character OCR.
pub fn crop_with_border(canvas: &GrayImage, bbox: &BoundingBox, border: u32) -> GrayImage {
    let cropped =
        image::imageops::crop_imm(canvas, bbox.x, bbox.y, bbox.width, bbox.height).to_image();

    let mut framed = GrayImage::from_pixel(
        bbox.width + 2 * border,
        bbox.height + 2 * border,
        Luma([255u8]),
    );
    image::imageops::overlay(&mut framed, &cropped, border.into(), border.into());
    framed
}
