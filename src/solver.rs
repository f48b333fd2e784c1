//! Maze traversal module.
//!
//! This module contains the flood fill used to check that every open cell of a maze can be walked
//! to from the entrance, and a breadth-first search producing the shortest route between two
//! cells.

use std::collections::VecDeque;

use crate::maze::{Direction, Grid, Position};

/// Marks every open cell reachable from `from` through open cells.
///
/// The result has the same shape as the grid. If `from` is a wall or lies outside the grid,
/// nothing is reachable and every entry is `false`. The fill uses an explicit stack, so the depth
/// of the maze has no effect on the call stack.
#[must_use]
pub fn reachable(grid: &Grid, from: Position) -> Vec<Vec<bool>> {
    let mut seen = vec![vec![false; grid.cols()]; grid.rows()];

    if !grid.is_open(from) {
        return seen;
    }

    let mut stack = vec![from];
    mark(&mut seen, from);

    while let Some(current) = stack.pop() {
        for next in open_neighbours(grid, current) {
            if !is_marked(&seen, next) {
                mark(&mut seen, next);
                stack.push(next);
            }
        }
    }

    seen
}

/// Returns `true` if every open cell of the grid can be reached from the entrance.
#[must_use]
pub fn is_connected(grid: &Grid) -> bool {
    let seen = reachable(grid, Grid::ENTRANCE);

    grid.open_positions().all(|pos| is_marked(&seen, pos))
}

/// Finds the shortest walk between two open cells.
///
/// The returned path starts at `from` and ends at `to`, both included, with every consecutive
/// pair of positions adjacent. `None` is returned when either end is not an open cell of the grid
/// or when no walk exists.
#[must_use]
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Option<Vec<Position>> {
    if !grid.is_open(from) || !grid.is_open(to) {
        return None;
    }

    let mut previous: Vec<Vec<Option<Position>>> = vec![vec![None; grid.cols()]; grid.rows()];
    let mut seen = vec![vec![false; grid.cols()]; grid.rows()];
    let mut queue = VecDeque::from([from]);
    mark(&mut seen, from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            return Some(backtrack(&previous, from, to));
        }

        for next in open_neighbours(grid, current) {
            if !is_marked(&seen, next) {
                mark(&mut seen, next);
                if let Some(slot) = previous.get_mut(next.row).and_then(|row| row.get_mut(next.col)) {
                    *slot = Some(current);
                }
                queue.push_back(next);
            }
        }
    }

    None
}

/// Rebuilds the path to `to` by following the predecessor links back to `from`.
fn backtrack(previous: &[Vec<Option<Position>>], from: Position, to: Position) -> Vec<Position> {
    let mut path = vec![to];
    let mut current = to;

    while current != from {
        let Some(prior) = previous
            .get(current.row)
            .and_then(|row| row.get(current.col))
            .copied()
            .flatten()
        else {
            break;
        };
        path.push(prior);
        current = prior;
    }

    path.reverse();
    path
}

/// Returns the open cells directly adjacent to `pos`.
fn open_neighbours(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| pos.neighbour(direction))
        .filter(move |next| grid.is_open(*next))
}

/// Returns whether `pos` has been flagged in a visitation table.
fn is_marked(seen: &[Vec<bool>], pos: Position) -> bool {
    seen.get(pos.row)
        .and_then(|row| row.get(pos.col))
        .copied()
        .unwrap_or(false)
}

/// Flags `pos` in a visitation table.
fn mark(seen: &mut [Vec<bool>], pos: Position) {
    if let Some(flag) = seen.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
        *flag = true;
    }
}
