//! Line-shaped geometry backing graph edges
//!
//! A polyline is an ordered coordinate path with at least two points. Its
//! length is the geometric default weight for edges derived from geometry.

use super::{GeomError, GeomResult, Point};
use serde::{Deserialize, Serialize};

/// An ordered path of at least two coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Build a path from raw coordinates, rejecting degenerate input
    pub fn new(points: Vec<Point>) -> GeomResult<Self> {
        if points.len() < 2 {
            return Err(GeomError::DegeneratePath(points.len()));
        }
        Ok(Polyline { points })
    }

    /// First coordinate of the path
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Last coordinate of the path
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// All coordinates, in order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Total geometric length of the path
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|seg| seg[0].distance_3d(&seg[1]))
            .sum()
    }
}
