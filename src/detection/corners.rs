//! Harris-style corner response computed from the binary edge map.
//!
//! The structure tensor is accumulated over a fixed square window and the
//! response `det(M) - k * trace(M)^2` is min-max normalized onto the 0-255
//! scale, so downstream thresholds can be plain integer comparisons.

use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::models::CornerResponseMap;

/// Corner response of `edges` with a `block_size` x `block_size` window and
/// sensitivity constant `k`, normalized to 0-255. A constant-response map
/// (e.g. a blank edge map) normalizes to all zeros.
pub fn corner_response(edges: &GrayImage, block_size: u32, k: f32) -> CornerResponseMap {
    let (width, height) = edges.dimensions();
    let mut map = CornerResponseMap::new(width, height);
    if width == 0 || height == 0 {
        return map;
    }

    let gx = horizontal_sobel(edges);
    let gy = vertical_sobel(edges);

    let n = (width * height) as usize;
    let mut ixx = vec![0.0f32; n];
    let mut ixy = vec![0.0f32; n];
    let mut iyy = vec![0.0f32; n];
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;
            let dx = gx.get_pixel(x, y)[0] as f32;
            let dy = gy.get_pixel(x, y)[0] as f32;
            ixx[i] = dx * dx;
            ixy[i] = dx * dy;
            iyy[i] = dy * dy;
        }
    }

    let r = (block_size / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut sxx = 0.0f32;
            let mut sxy = 0.0f32;
            let mut syy = 0.0f32;
            for dy in -r..=r {
                for dx in -r..=r {
                    // window coordinates clamp to the map extent
                    let xx = (x + dx).clamp(0, w - 1) as usize;
                    let yy = (y + dy).clamp(0, h - 1) as usize;
                    let i = yy * width as usize + xx;
                    sxx += ixx[i];
                    sxy += ixy[i];
                    syy += iyy[i];
                }
            }
            let det = sxx * syy - sxy * sxy;
            let trace = sxx + syy;
            map.set(x as u32, y as u32, det - k * trace * trace);
        }
    }

    normalize_to_255(&mut map);
    map
}

fn normalize_to_255(map: &mut CornerResponseMap) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in &map.data {
        min = min.min(v);
        max = max.max(v);
    }
    let span = max - min;
    if !span.is_finite() || span <= f32::EPSILON {
        map.data.fill(0.0);
        return;
    }
    for v in &mut map.data {
        *v = (*v - min) / span * 255.0;
    }
}
