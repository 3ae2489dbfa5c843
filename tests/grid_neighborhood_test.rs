//! Grid neighborhood integration test
//!
//! Checks the diamond-ring computation against hand-computed cell sets and
//! against the Manhattan-distance definition on larger grids.

use rustc_hash::FxHashSet;
use topograph::{Grid, GridNeighborhood, VonNeumannNeighborhood};

#[test]
fn test_five_by_five_reference_cells() {
    let hood = VonNeumannNeighborhood::new(Grid::new(5, 5));

    let center: FxHashSet<usize> = hood.neighbors_at_radius(12, 1);
    assert_eq!(center, [7, 11, 13, 17].into_iter().collect());

    assert!(hood.neighbors_at_radius(12, 0).is_empty());

    let corner: FxHashSet<usize> = hood.neighbors_at_radius(0, 1);
    assert_eq!(corner, [1, 5].into_iter().collect());
}

#[test]
fn test_rings_partition_the_grid() {
    // every cell of a grid lies on exactly one ring around the center
    let grid = Grid::new(7, 7);
    let hood = VonNeumannNeighborhood::new(grid);
    let center = grid.index_at(3, 3).unwrap();

    let mut seen: FxHashSet<usize> = FxHashSet::default();
    // max Manhattan distance from the center of a 7x7 grid is 6
    for radius in 1..=6 {
        let ring = hood.neighbors_at_radius(center, radius);
        for cell in ring {
            assert!(seen.insert(cell), "cell {cell} appeared on two rings");
        }
    }
    // all cells except the center itself
    assert_eq!(seen.len(), grid.len() - 1);
    assert!(!seen.contains(&center));
}

#[test]
fn test_boundary_clipping_matches_definition() {
    let grid = Grid::new(6, 4);
    let hood = VonNeumannNeighborhood::new(grid);

    for index in 0..grid.len() {
        let (x, y) = grid.position_of(index);
        for radius in 0..=5usize {
            let ring = hood.neighbors_at_radius(index, radius);
            let expected: FxHashSet<usize> = (0..grid.len())
                .filter(|&cell| {
                    let (cx, cy) = grid.position_of(cell);
                    cx.abs_diff(x) + cy.abs_diff(y) == radius && cell != index
                })
                .collect();
            assert_eq!(ring, expected, "cell {index} radius {radius}");
        }
    }
}

#[test]
fn test_neighborhood_is_stateless_across_queries() {
    let mut hood = VonNeumannNeighborhood::new(Grid::new(5, 5));
    let first = hood.neighbors_at_radius(12, 2);
    // interleave other queries and a clear
    hood.neighbors_at_radius(0, 3);
    hood.clear();
    assert_eq!(hood.neighbors_at_radius(12, 2), first);
}
