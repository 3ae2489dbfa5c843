//! Diamond-ring neighbor computation on a regular grid

use super::Grid;
use rustc_hash::FxHashSet;

/// Neighbor-set computation for a grid metric
pub trait GridNeighborhood {
    /// Cells lying exactly on the ring at the given radius from a cell
    ///
    /// The result is an unordered set; cell order carries no meaning.
    fn neighbors_at_radius(&self, index: usize, radius: usize) -> FxHashSet<usize>;

    /// Whether this is the 4-connected (von Neumann) metric
    fn is_von_neumann(&self) -> bool {
        false
    }

    /// Drop any cached state; recomputing metrics keep this a no-op
    fn clear(&mut self) {}
}

/// The 4-connected diamond metric
///
/// `neighbors_at_radius` yields the cells at exact Manhattan distance
/// `radius`: the ring, not the filled disk. Radius 0 is an empty set since
/// that ring has zero width. Nothing is cached between calls; correctness
/// under grid mutation comes from recomputing every time.
#[derive(Debug, Clone, Copy)]
pub struct VonNeumannNeighborhood {
    grid: Grid,
}

impl VonNeumannNeighborhood {
    pub fn new(grid: Grid) -> Self {
        VonNeumannNeighborhood { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl GridNeighborhood for VonNeumannNeighborhood {
    fn neighbors_at_radius(&self, index: usize, radius: usize) -> FxHashSet<usize> {
        let (x, y) = self.grid.position_of(index);
        let (x, y) = (x as isize, y as isize);
        let radius = radius as isize;

        let mut ring =
            FxHashSet::with_capacity_and_hasher((radius as usize) << 2, Default::default());
        for i in -radius..radius {
            // two symmetric offsets per step; they coincide at ring corners
            // and the set deduplicates them
            if let Some(p) = self.grid.index_at(x - i, y - i.abs() + radius) {
                ring.insert(p);
            }
            if let Some(p) = self.grid.index_at(x + i, y + i.abs() - radius) {
                ring.insert(p);
            }
        }
        ring
    }

    fn is_von_neumann(&self) -> bool {
        true
    }
}
