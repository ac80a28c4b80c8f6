//! Candidate rectangle extraction: trace every contour of the reinforced map
//! and fit one minimum-area rotated rectangle per contour. Plausibility is
//! judged downstream; degenerate contours simply yield zero-area candidates.

use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::point::Point;

use crate::models::RotatedRect;

/// Fit one rectangle per traced contour, outer borders and holes alike.
pub fn extract_candidates(reinforced: &GrayImage) -> Vec<RotatedRect> {
    find_contours::<i32>(reinforced)
        .iter()
        .map(|contour| min_area_rect(&contour.points))
        .collect()
}

/// Minimum-area rotated rectangle enclosing `points`, via convex hull and
/// rotating calipers. Handles empty, single-point and collinear inputs with
/// degenerate (zero-area) rectangles instead of failing.
pub fn min_area_rect(points: &[Point<i32>]) -> RotatedRect {
    let pts: Vec<(f32, f32)> = points.iter().map(|p| (p.x as f32, p.y as f32)).collect();

    match pts.len() {
        0 => return RotatedRect::new((0.0, 0.0), 0.0, 0.0, 0.0),
        1 => return RotatedRect::new(pts[0], 0.0, 0.0, 0.0),
        2 => {
            let (ax, ay) = pts[0];
            let (bx, by) = pts[1];
            let length = (bx - ax).hypot(by - ay);
            let angle = (by - ay).atan2(bx - ax).to_degrees();
            return RotatedRect::new(((ax + bx) / 2.0, (ay + by) / 2.0), length, 0.0, angle);
        }
        _ => {}
    }

    let hull = convex_hull(&pts);
    match hull.len() {
        0 => RotatedRect::new((0.0, 0.0), 0.0, 0.0, 0.0),
        1 => RotatedRect::new(hull[0], 0.0, 0.0, 0.0),
        2 => {
            // collinear points: a zero-height rectangle along the segment
            let (ax, ay) = hull[0];
            let (bx, by) = hull[1];
            let length = (bx - ax).hypot(by - ay);
            let angle = (by - ay).atan2(bx - ax).to_degrees();
            RotatedRect::new(((ax + bx) / 2.0, (ay + by) / 2.0), length, 0.0, angle)
        }
        _ => rotating_calipers(&hull),
    }
}

/// Andrew's monotone chain. Collinear points are dropped from the hull.
fn convex_hull(points: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    pts.dedup();

    let mut lower: Vec<(f32, f32)> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<(f32, f32)> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[inline]
fn cross(o: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Try each hull edge as the rectangle base and keep the smallest-area fit.
fn rotating_calipers(hull: &[(f32, f32)]) -> RotatedRect {
    let n = hull.len();
    let mut best_area = f32::MAX;
    let mut best = RotatedRect::new((0.0, 0.0), 0.0, 0.0, 0.0);

    for i in 0..n {
        let (px, py) = hull[i];
        let (qx, qy) = hull[(i + 1) % n];
        let edge_len = (qx - px).hypot(qy - py);
        if edge_len < 1e-10 {
            continue;
        }
        let ux = (qx - px) / edge_len;
        let uy = (qy - py) / edge_len;
        // perpendicular axis
        let vx = -uy;
        let vy = ux;

        let mut min_u = f32::MAX;
        let mut max_u = f32::MIN;
        let mut min_v = f32::MAX;
        let mut max_v = f32::MIN;
        for &(x, y) in hull {
            let dx = x - px;
            let dy = y - py;
            let u = dx * ux + dy * uy;
            let v = dx * vx + dy * vy;
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }

        let width = max_u - min_u;
        let height = max_v - min_v;
        let area = width * height;
        if area < best_area {
            best_area = area;
            let center_u = (min_u + max_u) / 2.0;
            let center_v = (min_v + max_v) / 2.0;
            let cx = px + center_u * ux + center_v * vx;
            let cy = py + center_u * uy + center_v * vy;
            let angle = uy.atan2(ux).to_degrees();
            best = RotatedRect::new((cx, cy), width, height, angle);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn pt(x: i32, y: i32) -> Point<i32> {
        Point::new(x, y)
    }

    #[test]
    fn axis_aligned_rectangle_fits_exactly() {
        let points = vec![pt(10, 20), pt(110, 20), pt(110, 70), pt(10, 70), pt(60, 45)];
        let rect = min_area_rect(&points);
        assert!((rect.area() - 5000.0).abs() < 1.0);
        assert!((rect.center.0 - 60.0).abs() < 0.5);
        assert!((rect.center.1 - 45.0).abs() < 0.5);
        assert!(rect.angle_deg.abs() < 1e-3 || (rect.angle_deg.abs() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn rotated_square_recovers_rotation() {
        // square with corners on the axes: sides at 45 degrees
        let points = vec![pt(0, 10), pt(10, 0), pt(20, 10), pt(10, 20)];
        let rect = min_area_rect(&points);
        assert!((rect.area() - 200.0).abs() < 1.0);
        assert!((rect.angle_deg.abs() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_inputs_yield_zero_area() {
        assert_eq!(min_area_rect(&[]).area(), 0.0);
        assert_eq!(min_area_rect(&[pt(5, 5)]).area(), 0.0);
        assert_eq!(min_area_rect(&[pt(0, 0), pt(10, 0)]).area(), 0.0);
        let collinear = vec![pt(0, 0), pt(5, 5), pt(10, 10), pt(15, 15)];
        assert_eq!(min_area_rect(&collinear).area(), 0.0);
    }

    #[test]
    fn extraction_yields_one_candidate_per_contour() {
        let mut img = GrayImage::new(100, 100);
        // two separate filled blocks
        for y in 10..30 {
            for x in 10..40 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        for y in 60..80 {
            for x in 50..90 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let candidates = extract_candidates(&img);
        // solid blocks have no holes: exactly one outer contour each
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.area() > 0.0));
    }
}
