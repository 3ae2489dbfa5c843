//! Geometric primitives shared by the graph and grid substrates
//!
//! Coordinates are plain 3D points (z defaults to 0 for planar models).
//! `PointKey` gives points an exact, hashable identity for coordinate-keyed
//! maps; nearness under a tolerance is handled separately by the callers
//! that need it.

pub mod normalize;
pub mod polyline;

pub use polyline::Polyline;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when a shape cannot be built from raw coordinates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeomError {
    /// A path needs at least two coordinates
    #[error("a path requires at least 2 coordinates, got {0}")]
    DegeneratePath(usize),

    /// A ring needs at least three distinct coordinates
    #[error("a ring requires at least 3 distinct coordinates, got {0}")]
    DegenerateRing(usize),
}

pub type GeomResult<T> = Result<T, GeomError>;

/// A point in 2D/3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Create a planar point (z = 0)
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y, z: 0.0 }
    }

    /// Create a point with an explicit z coordinate
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    /// Planar distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Full 3D distance to another point
    pub fn distance_3d(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Exact identity key for coordinate-keyed maps
    pub fn key(&self) -> PointKey {
        PointKey([self.x.to_bits(), self.y.to_bits(), self.z.to_bits()])
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.z == 0.0 {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            write!(f, "({}, {}, {})", self.x, self.y, self.z)
        }
    }
}

/// Bit-exact coordinate identity, usable as a hash map key
///
/// Two points get the same key iff their coordinates are bit-identical,
/// which is the exact-match semantics required by node maps built from an
/// explicit vertex collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey([u64; 3]);
