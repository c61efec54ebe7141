//! Corner recovery and edge angles.
//!
//! A block outline is an unordered set as far as semantics go: nothing in
//! the traced polygon marks which vertex is the top-left. Corners are
//! recovered with a bounding-box heuristic: each corner of the
//! axis-aligned bounding box picks the outline point nearest to it. For
//! concave or highly irregular outlines this can pick implausible
//! corners; stone outlines are near-quadrilateral, which keeps the
//! heuristic honest.

use kurbo::Point;
use thiserror::Error;

/// The four named corners of a block outline.
///
/// Two corners may be the same physical point for small or degenerate
/// outlines (a near-triangle). That is accepted, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

/// Why a block was skipped instead of classified.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("invalid polygon: outline is empty or contains non-finite coordinates")]
    InvalidPolygon,
}

/// Estimate the four corners of an outline.
///
/// Builds the axis-aligned bounding box and, for each of its corners,
/// selects the outline point with minimum Euclidean distance to it. Ties
/// resolve to the first point in outline order, so repeated runs on
/// identical input are reproducible.
pub fn estimate(outline: &[Point]) -> Result<Corners, SkipReason> {
    if outline.is_empty() || outline.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(SkipReason::InvalidPolygon);
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in outline {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    // Document coordinates grow downward, so min_y is the top edge.
    let [top_left, top_right, bottom_left, bottom_right] = [
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(min_x, max_y),
        Point::new(max_x, max_y),
    ]
    .map(|reference| nearest(outline, reference));

    Ok(Corners {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    })
}

/// Angle of the directed edge `from → to`, in degrees.
///
/// Total over any finite pair of points; a zero-length edge yields 0 by
/// atan2 convention.
pub fn edge_angle(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Outline point nearest to `reference`; the first one wins on a tie.
fn nearest(outline: &[Point], reference: Point) -> Point {
    let mut best = outline[0];
    let mut best_d2 = (best - reference).hypot2();
    for &p in &outline[1..] {
        let d2 = (p - reference).hypot2();
        if d2 < best_d2 {
            best = p;
            best_d2 = d2;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn rectangle_corners_are_exact() {
        let outline = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        let c = estimate(&outline).unwrap();
        assert_eq!(c.top_left, Point::new(0.0, 0.0));
        assert_eq!(c.top_right, Point::new(10.0, 0.0));
        assert_eq!(c.bottom_left, Point::new(0.0, 5.0));
        assert_eq!(c.bottom_right, Point::new(10.0, 5.0));
    }

    #[test]
    fn estimation_is_deterministic() {
        let outline = pts(&[(3.0, 1.0), (9.0, 2.0), (8.0, 7.0), (2.0, 6.0)]);
        let a = estimate(&outline).unwrap();
        let b = estimate(&outline).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ties_resolve_to_first_point_in_order() {
        // Diamond: (5,0) and (0,5) are equidistant from the (0,0) bbox corner.
        let outline = pts(&[(5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)]);
        let c = estimate(&outline).unwrap();
        assert_eq!(c.top_left, Point::new(5.0, 0.0));
    }

    #[test]
    fn degenerate_outline_shares_corners() {
        // Near-triangle: top-left and top-right may land on the same point.
        let outline = pts(&[(5.0, 0.0), (0.0, 8.0), (10.0, 8.0)]);
        let c = estimate(&outline).unwrap();
        assert_eq!(c.top_left, c.top_right);
        assert_eq!(c.bottom_left, Point::new(0.0, 8.0));
        assert_eq!(c.bottom_right, Point::new(10.0, 8.0));
    }

    #[test]
    fn single_point_outline_is_accepted() {
        let outline = pts(&[(4.0, 4.0)]);
        let c = estimate(&outline).unwrap();
        assert_eq!(c.top_left, c.bottom_right);
    }

    #[test]
    fn empty_or_non_finite_outline_is_invalid() {
        assert_eq!(estimate(&[]), Err(SkipReason::InvalidPolygon));
        let outline = pts(&[(0.0, 0.0), (f64::NAN, 1.0)]);
        assert_eq!(estimate(&outline), Err(SkipReason::InvalidPolygon));
    }

    #[test]
    fn edge_angles() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(edge_angle(o, Point::new(10.0, 0.0)), 0.0);
        assert_eq!(edge_angle(o, Point::new(0.0, 10.0)), 90.0);
        assert_eq!(edge_angle(o, Point::new(-10.0, 0.0)), 180.0);
        assert!((edge_angle(o, Point::new(5.0, 5.0)) - 45.0).abs() < 1e-12);
        // Zero-length edge.
        assert_eq!(edge_angle(o, o), 0.0);
    }
}
