use image::GrayImage;
use serde::Serialize;

/// Minimum-area rotated rectangle: center point, side lengths and rotation.
///
/// The angle is the rotation of the `width` edge, normalized to `(-90, 90]`
/// degrees. A rectangle fitted to a degenerate contour (a single point or a
/// straight segment) has zero area; that is valid geometry, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotatedRect {
    pub center: (f32, f32),
    pub width: f32,
    pub height: f32,
    pub angle_deg: f32,
}

impl RotatedRect {
    pub fn new(center: (f32, f32), width: f32, height: f32, angle_deg: f32) -> Self {
        Self {
            center,
            width,
            height,
            angle_deg: normalize_angle(angle_deg),
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// The four corner points in draw order (consecutive corners share an edge).
    pub fn corners(&self) -> [(f32, f32); 4] {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let local = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
        local.map(|(x, y)| {
            (
                self.center.0 + x * cos - y * sin,
                self.center.1 + x * sin + y * cos,
            )
        })
    }

    pub fn center_distance(&self, other: &RotatedRect) -> f32 {
        let dx = self.center.0 - other.center.0;
        let dy = self.center.1 - other.center.1;
        dx.hypot(dy)
    }

    /// Area ratio, always larger over smaller. Infinite when the smaller
    /// rectangle has zero area, so degenerate pairs never count as duplicates.
    pub fn area_ratio(&self, other: &RotatedRect) -> f32 {
        let larger = self.area().max(other.area());
        let smaller = self.area().min(other.area());
        if smaller <= 0.0 {
            f32::INFINITY
        } else {
            larger / smaller
        }
    }
}

fn normalize_angle(mut angle: f32) -> f32 {
    while angle <= -90.0 {
        angle += 180.0;
    }
    while angle > 90.0 {
        angle -= 180.0;
    }
    angle
}

/// Real-valued corner-response map, row-major, normalized to the 0-255 scale.
#[derive(Debug, Clone)]
pub struct CornerResponseMap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl CornerResponseMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        }
    }

    /// Response at `(x, y)`. Out-of-range coordinates are clamped to the
    /// nearest valid coordinate, never wrapped or skipped, so neighborhood
    /// scans near the border resample boundary pixels.
    pub fn get(&self, x: i32, y: i32) -> f32 {
        let xx = x.clamp(0, self.width as i32 - 1) as usize;
        let yy = y.clamp(0, self.height as i32 - 1) as usize;
        self.data[yy * self.width as usize + xx]
    }

    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        self.data[(y * self.width + x) as usize] = value;
    }
}

/// Per-image detection output: the surviving rectangles plus the reinforced
/// edge map kept as an optional side artifact.
#[derive(Debug, Clone)]
pub struct Detection {
    pub survivors: Vec<RotatedRect>,
    pub reinforced: GrayImage,
}
