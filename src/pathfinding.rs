use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::grid::Cell;
use crate::walk_graph::WalkGraph;

/// Frontier entry: `(f_score, node, route so far)`. `Reverse` turns the
/// max-heap into a min-heap; ties on `f_score` fall back to the cell order.
type Frontier = BinaryHeap<Reverse<(i32, Cell, Vec<Cell>)>>;

/// Find a path from start to goal using the A* algorithm.
///
/// Returns the full route including both `start` and `goal`, or `None` when
/// either endpoint is not a graph node or the goal is unreachable. Positions
/// must be snapped to their cell (see [`crate::grid::Grid::cell_at`]) before
/// querying.
pub fn find_path(graph: &WalkGraph, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    puffin::profile_function!();

    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }

    let mut open_set: Frontier = BinaryHeap::new();
    let mut visited: HashSet<Cell> = HashSet::new();
    open_set.push(Reverse((heuristic(start, goal), start, vec![start])));

    while let Some(Reverse((_, current, path))) = open_set.pop() {
        if current == goal {
            return Some(path);
        }
        if !visited.insert(current) {
            continue;
        }

        // Every edge costs one step, so g is the route length so far
        let g = path.len() as i32;
        for &neighbor in graph.neighbors(current) {
            if visited.contains(&neighbor) {
                continue;
            }
            let mut route = path.clone();
            route.push(neighbor);
            open_set.push(Reverse((g + heuristic(neighbor, goal), neighbor, route)));
        }
    }

    None // No path found
}

/// The first cell to step into on the way to `goal`.
/// Returns None if no path exists or already at goal.
pub fn next_step(graph: &WalkGraph, start: Cell, goal: Cell) -> Option<Cell> {
    if start == goal {
        return None;
    }
    find_path(graph, start, goal).and_then(|path| path.get(1).copied())
}

/// Manhattan distance heuristic
fn heuristic(from: Cell, to: Cell) -> i32 {
    from.manhattan(to)
}
