use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use panelmark::RotatedRect;

/// Black canvas with one solid white rotated rectangle drawn on it.
pub fn synthetic_panel(width: u32, height: u32, rect: &RotatedRect) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    let corners: Vec<Point<i32>> = rect
        .corners()
        .iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();
    draw_polygon_mut(&mut img, &corners, Rgb([255, 255, 255]));
    img
}

/// Save a small, featureless frame the pipeline can decode and process
/// (it yields no detections, which is fine for batch accounting).
pub fn write_blank_tiff(path: &std::path::Path, side: u32) {
    let img = RgbImage::from_pixel(side, side, Rgb([8, 8, 8]));
    img.save(path).expect("failed to write fixture image");
}

/// The angle difference modulo 90 degrees; a fitted rectangle may report its
/// rotation relative to either side.
pub fn angle_difference_mod_90(a: f32, b: f32) -> f32 {
    let mut d = (a - b).abs() % 90.0;
    if d > 45.0 {
        d = 90.0 - d;
    }
    d
}
