//! Drawing survivors onto the original frame and the optional JSON geometry
//! report for the labeled output variant.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::models::RotatedRect;

const CORNER_MARKER_RADIUS: i32 = 6;

/// One annotation color per rectangle, visual variety only.
pub fn random_color(rng: &mut StdRng) -> Rgb<u8> {
    Rgb([
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
    ])
}

/// Draw the four edges of a rectangle.
pub fn draw_rectangle(img: &mut RgbImage, rect: &RotatedRect, color: Rgb<u8>) {
    let corners = rect.corners();
    for i in 0..4 {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % 4];
        draw_line_segment_mut(img, (x0, y0), (x1, y1), color);
    }
}

/// Draw a filled dot at each corner.
pub fn draw_corner_markers(img: &mut RgbImage, rect: &RotatedRect, color: Rgb<u8>) {
    for (x, y) in rect.corners() {
        draw_filled_circle_mut(img, (x as i32, y as i32), CORNER_MARKER_RADIUS, color);
    }
}

/// Draw every survivor onto the frame, each with its own random color.
/// Draw order affects visual layering only.
pub fn annotate(
    img: &mut RgbImage,
    survivors: &[RotatedRect],
    rng: &mut StdRng,
    corner_markers: bool,
) {
    for rect in survivors {
        let color = random_color(rng);
        draw_rectangle(img, rect, color);
        if corner_markers {
            draw_corner_markers(img, rect, color);
        }
    }
}

/// Geometry of one surviving rectangle, for the JSON sidecar.
#[derive(Debug, Clone, Serialize)]
pub struct RectReport {
    pub center: [f32; 2],
    pub width: f32,
    pub height: f32,
    pub angle_deg: f32,
    pub area: f32,
    pub corners: [[f32; 2]; 4],
}

impl From<&RotatedRect> for RectReport {
    fn from(rect: &RotatedRect) -> Self {
        Self {
            center: [rect.center.0, rect.center.1],
            width: rect.width,
            height: rect.height,
            angle_deg: rect.angle_deg,
            area: rect.area(),
            corners: rect.corners().map(|(x, y)| [x, y]),
        }
    }
}

pub fn report(survivors: &[RotatedRect]) -> Vec<RectReport> {
    survivors.iter().map(RectReport::from).collect()
}
