//! Outline simplification: pixel-exact contours → sparse polygons.

use geo::{LineString, Simplify};

/// Simplify a closed outline with RDP, epsilon scaled to the perimeter.
///
/// Epsilon is expressed as a fraction of the closed arc length, the usual
/// contour-approximation convention, so coarse and fine stones simplify
/// comparably.
pub fn approx_polygon(points: &[(f64, f64)], epsilon_frac: f64) -> Vec<(f64, f64)> {
    if points.len() <= 2 || epsilon_frac <= 0.0 {
        return points.to_vec();
    }
    let epsilon = epsilon_frac * perimeter(points);
    LineString::from(points.to_vec())
        .simplify(&epsilon)
        .into_inner()
        .into_iter()
        .map(|c| (c.x, c.y))
        .collect()
}

/// Closed-polyline arc length.
fn perimeter(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            let dx = points[j].0 - points[i].0;
            let dy = points[j].1 - points[i].1;
            dx.hypot(dy)
        })
        .sum()
}
