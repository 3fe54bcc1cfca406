use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::edges::canny;

/// Pad the source image with a uniform black border on all four sides.
pub fn pad_image(img: &DynamicImage, border: u32) -> RgbImage {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut padded = RgbImage::from_pixel(
        width + 2 * border,
        height + 2 * border,
        Rgb([0u8, 0u8, 0u8]),
    );
    image::imageops::overlay(&mut padded, &rgb, border.into(), border.into());
    padded
}

/// Extract one color channel as a grayscale image.
fn channel(img: &RgbImage, index: usize) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([img.get_pixel(x, y)[index]])
    })
}

/// Run Canny on each color channel separately and merge the three edge
/// maps with a bitwise OR. Edges faint in one channel can still show up
/// strongly in another, so the merged mask is denser than a single
/// grayscale pass.
pub fn channel_edges(img: &RgbImage, low: f32, high: f32) -> GrayImage {
    let red_edges = canny(&channel(img, 0), low, high);
    let green_edges = canny(&channel(img, 1), low, high);
    let blue_edges = canny(&channel(img, 2), low, high);

    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([red_edges.get_pixel(x, y)[0]
            | green_edges.get_pixel(x, y)[0]
            | blue_edges.get_pixel(x, y)[0]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_grows_extent_and_keeps_content() {
        let mut img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        img.put_pixel(0, 0, Rgb([200, 200, 200]));
        let padded = pad_image(&DynamicImage::ImageRgb8(img), 50);

        assert_eq!(padded.dimensions(), (104, 103));
        assert_eq!(padded.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(padded.get_pixel(50, 50), &Rgb([200, 200, 200]));
        assert_eq!(padded.get_pixel(51, 50), &Rgb([10, 20, 30]));
    }

    #[test]
    fn channel_edges_picks_up_single_channel_step() {
        // Step only in the green channel; the merged mask must see it.
        let img = RgbImage::from_fn(40, 40, |x, _| {
            if x < 20 { Rgb([0, 0, 0]) } else { Rgb([0, 255, 0]) }
        });
        let edges = channel_edges(&img, 128.0, 255.0);
        let lit = edges.pixels().filter(|p| p[0] > 0).count();
        assert!(lit > 0);
    }
}
