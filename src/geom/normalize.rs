//! Ring normalization for polygonal boundaries
//!
//! Shapes built from raw coordinate sequences rely on two post-conditions:
//! rings are closed (first coordinate equals the last) and polygon shells
//! are wound clockwise. Consumers can assume both after passing a boundary
//! through [`close_ring`] and [`ensure_clockwise`].

use super::{GeomError, GeomResult, Point};

/// A closed ring has at least 4 coordinates and identical first/last points
pub fn is_ring(points: &[Point]) -> bool {
    if points.len() < 4 {
        return false;
    }
    let first = points[0];
    let last = points[points.len() - 1];
    first.x == last.x && first.y == last.y
}

/// Close an open ring by appending the first coordinate
///
/// Rejects sequences too short to enclose any area.
pub fn close_ring(mut points: Vec<Point>) -> GeomResult<Vec<Point>> {
    if is_ring(&points) {
        return Ok(points);
    }
    if points.len() < 3 {
        return Err(GeomError::DegenerateRing(points.len()));
    }
    points.push(points[0]);
    Ok(points)
}

/// Twice the signed area of a closed ring (shoelace formula)
///
/// Positive for counterclockwise winding, negative for clockwise.
pub fn signed_area(ring: &[Point]) -> f64 {
    ring.windows(2)
        .map(|seg| (seg[1].x - seg[0].x) * (seg[1].y + seg[0].y))
        .sum::<f64>()
        * -1.0
}

/// Force a closed ring into clockwise winding
pub fn ensure_clockwise(ring: Vec<Point>) -> Vec<Point> {
    if signed_area(&ring) > 0.0 {
        ring.into_iter().rev().collect()
    } else {
        ring
    }
}
