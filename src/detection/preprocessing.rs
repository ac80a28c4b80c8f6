use image::{GrayImage, Rgb, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

/// Convert a color frame to grayscale
pub fn grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Apply Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Add black border rows above and below the frame, `fraction` of the height
/// on each side. The width is unchanged.
pub fn pad_vertical(img: &RgbImage, fraction: f32) -> RgbImage {
    let (width, height) = img.dimensions();
    let pad = (height as f32 * fraction) as u32;
    let mut padded = RgbImage::from_pixel(width, height + 2 * pad, Rgb([0, 0, 0]));
    image::imageops::replace(&mut padded, img, 0, i64::from(pad));
    padded
}

/// Gamma remap via a 256-entry lookup table, applied per channel.
pub fn gamma_correct(img: &RgbImage, gamma: f32) -> RgbImage {
    let inv_gamma = 1.0 / gamma;
    let mut table = [0u8; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = ((i as f32 / 255.0).powf(inv_gamma) * 255.0) as u8;
    }

    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = table[*channel as usize];
        }
    }
    out
}

/// Linear contrast remap `out = gain * in + bias`, saturating at 0 and 255.
pub fn adjust_contrast(img: &RgbImage, gain: f32, bias: f32) -> RgbImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = (gain * *channel as f32 + bias).clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_vertical_adds_black_rows_on_both_sides() {
        let img = RgbImage::from_pixel(100, 200, Rgb([50, 60, 70]));
        let padded = pad_vertical(&img, 0.01);
        assert_eq!(padded.dimensions(), (100, 204));
        assert_eq!(*padded.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*padded.get_pixel(50, 1), Rgb([0, 0, 0]));
        assert_eq!(*padded.get_pixel(50, 2), Rgb([50, 60, 70]));
        assert_eq!(*padded.get_pixel(50, 201), Rgb([50, 60, 70]));
        assert_eq!(*padded.get_pixel(99, 203), Rgb([0, 0, 0]));
    }

    #[test]
    fn gamma_correct_preserves_endpoints() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let out = gamma_correct(&img, 2.2);
        assert_eq!(*out.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(1, 0), Rgb([255, 255, 255]));
    }

    #[test]
    fn gamma_correct_brightens_midtones_for_gamma_above_one() {
        let img = RgbImage::from_pixel(1, 1, Rgb([64, 64, 64]));
        let out = gamma_correct(&img, 2.2);
        assert!(out.get_pixel(0, 0)[0] > 64);
    }

    #[test]
    fn adjust_contrast_saturates() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([200, 100, 0]));
        img.put_pixel(1, 0, Rgb([10, 10, 10]));
        let out = adjust_contrast(&img, 1.7, 10.0);
        assert_eq!(*out.get_pixel(0, 0), Rgb([255, 180, 10]));
        assert_eq!(*out.get_pixel(1, 0), Rgb([27, 27, 27]));
    }
}
