use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tracing::debug;

use crate::types::{Strategy, Vec2};
use crate::world::GridMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub step_budget: Option<usize>,
}

pub fn next_step(
    strategy: Strategy,
    origin: Vec2,
    target: Vec2,
    grid: &GridMap,
    options: SearchOptions,
) -> Vec2 {
    match strategy {
        Strategy::GreedyBestFirst => greedy_best_first(origin, target, grid, options),
        Strategy::DepthFirst => depth_first(origin, target, grid, options),
    }
}

/// Entries with equal heuristic pop in insertion order: the sequence number
/// is the secondary key, so the fields after it never take part in ordering.
pub fn greedy_best_first(
    origin: Vec2,
    target: Vec2,
    grid: &GridMap,
    options: SearchOptions,
) -> Vec2 {
    let mut heap = BinaryHeap::new();
    let mut visited = HashSet::new();
    let mut seq = 0u64;
    let mut closed = 0usize;
    heap.push(Reverse((0, seq, origin, None::<Vec2>)));

    while let Some(Reverse((_, _, current, first_step))) = heap.pop() {
        if current == target {
            return first_step.unwrap_or(origin);
        }
        if !visited.insert(current) {
            continue;
        }
        closed += 1;
        if budget_exhausted(options, closed) {
            debug!(%origin, %target, closed, "greedy search hit step budget");
            return origin;
        }

        for neighbor in grid.passable_neighbors(current) {
            if visited.contains(&neighbor) {
                continue;
            }
            seq += 1;
            heap.push(Reverse((
                neighbor.manhattan(target),
                seq,
                neighbor,
                Some(first_step.unwrap_or(neighbor)),
            )));
        }
    }

    origin
}

/// Stack-based search. Neighbors are pushed in `Direction::ALL` order, so
/// the last one in that table is explored first.
pub fn depth_first(origin: Vec2, target: Vec2, grid: &GridMap, options: SearchOptions) -> Vec2 {
    let mut stack = vec![(origin, None::<Vec2>)];
    let mut visited = HashSet::new();
    let mut closed = 0usize;

    while let Some((current, first_step)) = stack.pop() {
        if current == target {
            return first_step.unwrap_or(origin);
        }
        if !visited.insert(current) {
            continue;
        }
        closed += 1;
        if budget_exhausted(options, closed) {
            debug!(%origin, %target, closed, "depth-first search hit step budget");
            return origin;
        }

        for neighbor in grid.passable_neighbors(current) {
            if !visited.contains(&neighbor) {
                stack.push((neighbor, Some(first_step.unwrap_or(neighbor))));
            }
        }
    }

    origin
}

fn budget_exhausted(options: SearchOptions, closed: usize) -> bool {
    options.step_budget.is_some_and(|budget| closed > budget)
}
