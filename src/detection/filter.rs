//! Two-stage rectangle selection: classification by size and position, then
//! overlap deduplication among the classified candidates.

use crate::config::{EdgeRule, FilterConfig};
use crate::models::RotatedRect;

/// Stage A: keep a candidate that either falls inside the absolute-area band
/// (exclusive on both ends) or is large enough and centered near the image
/// border. The verdict is a pure function of area, center and extent.
pub fn classify(
    candidates: &[RotatedRect],
    width: u32,
    height: u32,
    config: &FilterConfig,
) -> Vec<RotatedRect> {
    candidates
        .iter()
        .filter(|rect| {
            let area = rect.area();
            let in_band = area > config.band_min && area < config.band_max;
            in_band || (area > config.edge_min_area && near_border(rect, width, height, config))
        })
        .copied()
        .collect()
}

fn near_border(rect: &RotatedRect, width: u32, height: u32, config: &FilterConfig) -> bool {
    let (cx, cy) = rect.center;
    let near_x = cx < config.edge_margin || cx > width as f32 - config.edge_margin;
    let near_y = cy < config.edge_margin || cy > height as f32 - config.edge_margin;
    match config.edge_rule {
        EdgeRule::Both => near_x && near_y,
        EdgeRule::Either => near_x || near_y,
    }
}

/// Stage B: all-pairs overlap deduplication. Two candidates whose centers are
/// closer than the margin and whose area ratio is under the threshold count
/// as the same physical object; the smaller-area member is removed. On
/// exactly equal areas the earlier-indexed candidate is kept, so the outcome
/// does not depend on pair evaluation order. Survivors keep their input order.
pub fn dedup_overlapping(candidates: &[RotatedRect], config: &FilterConfig) -> Vec<RotatedRect> {
    let n = candidates.len();
    let mut keep = vec![true; n];

    for i in 0..n {
        if !keep[i] {
            continue;
        }
        for j in (i + 1)..n {
            if !keep[j] {
                continue;
            }
            let same_object = candidates[i].center_distance(&candidates[j])
                < config.dedup_center_margin
                && candidates[i].area_ratio(&candidates[j]) < config.dedup_area_ratio;
            if !same_object {
                continue;
            }
            if candidates[j].area() > candidates[i].area() {
                keep[i] = false;
                break;
            }
            keep[j] = false;
        }
    }

    candidates
        .iter()
        .zip(keep)
        .filter_map(|(rect, kept)| kept.then_some(*rect))
        .collect()
}

/// Both stages in order: classification, then overlap deduplication.
pub fn select(
    candidates: &[RotatedRect],
    width: u32,
    height: u32,
    config: &FilterConfig,
) -> Vec<RotatedRect> {
    let classified = classify(candidates, width, height, config);
    dedup_overlapping(&classified, config)
}
