//! Local-maximum reinforcement: thickens true corner responses into solid
//! markers so contour tracing can close regions the raw edge map leaves open.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::DetectorConfig;
use crate::models::CornerResponseMap;

/// Reinforced copy of `edges`: a filled disc is drawn at every pixel whose
/// response exceeds the threshold and is the maximum within the square search
/// window. The input edge map is never mutated.
///
/// The running maximum starts at the pixel's own response and neighbors are
/// compared with a strict `>`, so a tie still counts as a local maximum.
/// Window coordinates clamp to the map extent; boundary pixels get resampled
/// near the border, which is an accepted approximation. The scan is
/// deliberately brute force, the full window for every qualifying pixel.
pub fn reinforce(
    edges: &GrayImage,
    response: &CornerResponseMap,
    config: &DetectorConfig,
    rng: &mut StdRng,
) -> GrayImage {
    let mut reinforced = edges.clone();
    // one marker intensity per pass, non-zero so contour tracing sees it
    let intensity: u8 = rng.gen_range(1..=255);
    let radius = config.search_radius as i32;
    let (width, height) = edges.dimensions();

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let own = response.get(x, y) as i32;
            if own <= config.response_threshold {
                continue;
            }
            let mut search_max = own;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let v = response.get(x + dx, y + dy) as i32;
                    if v > search_max {
                        search_max = v;
                    }
                }
            }
            if search_max == own {
                draw_filled_circle_mut(
                    &mut reinforced,
                    (x, y),
                    config.disc_radius as i32,
                    Luma([intensity]),
                );
            }
        }
    }

    reinforced
}
