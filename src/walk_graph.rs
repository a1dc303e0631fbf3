//! Walkability graph over floor cells.
//!
//! Nodes are keyed by [`Cell`]; a node's canonical world position is
//! [`Grid::cell_center`]. Keys never move when the camera does, so the graph
//! is built once per dungeon and never rewritten.

use std::collections::HashMap;

use crate::grid::{Cell, Grid};

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Adjacency lists linking each non-wall cell to its 4-adjacent non-wall cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkGraph {
    adjacency: HashMap<Cell, Vec<Cell>>,
}

impl WalkGraph {
    /// Scan every non-wall cell and link it to its walkable neighbours.
    pub fn build(grid: &Grid) -> Self {
        let mut adjacency = HashMap::new();
        for (cell, tile) in grid.cells() {
            if !tile.is_walkable() {
                continue;
            }
            let neighbors: Vec<Cell> = NEIGHBOR_OFFSETS
                .iter()
                .map(|(dx, dy)| Cell::new(cell.x + dx, cell.y + dy))
                .filter(|n| grid.is_walkable(n.x, n.y))
                .collect();
            adjacency.insert(cell, neighbors);
        }
        Self { adjacency }
    }

    /// Build a graph from explicit undirected edges; isolated nodes may be
    /// listed with no edges.
    pub fn from_edges(nodes: &[Cell], edges: &[(Cell, Cell)]) -> Self {
        let mut adjacency: HashMap<Cell, Vec<Cell>> =
            nodes.iter().map(|n| (*n, Vec::new())).collect();
        for (a, b) in edges {
            adjacency.entry(*a).or_default().push(*b);
            adjacency.entry(*b).or_default().push(*a);
        }
        Self { adjacency }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.adjacency.contains_key(&cell)
    }

    /// Neighbours of `cell`, empty for unknown cells.
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        self.adjacency.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = Cell> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Directed edge count (each undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
