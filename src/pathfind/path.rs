// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use smallvec::SmallVec;

use crate::model::{Direction, Pos};

/// Cost of a straight step. Diagonals cost more, so carved corridors prefer
/// straight runs over stair-stepping.
pub const STRAIGHT_STEP_COST: u32 = 10;
pub const DIAGONAL_STEP_COST: u32 = 14;

/// Uniform-cost Dijkstra over every in-bounds tile with eight-way movement.
///
/// Terrain is deliberately ignored: the generator carves the returned path,
/// so the route may tunnel through walls. Returns the path from `start` to
/// `goal` inclusive of both endpoints, or an empty path when either endpoint
/// lies outside the grid.
pub fn shortest_path(width: usize, height: usize, start: Pos, goal: Pos) -> Vec<Pos> {
    if start.x >= width || start.y >= height || goal.x >= width || goal.y >= height {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let index_of = |pos: Pos| pos.y * width + pos.x;
    let mut costs = vec![u32::MAX; width * height];
    let mut came_from: Vec<Option<Pos>> = vec![None; width * height];
    let mut heap = BinaryHeap::new();

    costs[index_of(start)] = 0;
    heap.push(Reverse((0u32, start)));

    while let Some(Reverse((cost, current))) = heap.pop() {
        if current == goal {
            break;
        }
        if cost > costs[index_of(current)] {
            continue;
        }

        let neighbors: SmallVec<[(Pos, u32); 8]> = Direction::ALL
            .iter()
            .filter_map(|direction| {
                current.step(*direction, width, height).map(|next| {
                    let step_cost = if direction.is_diagonal() {
                        DIAGONAL_STEP_COST
                    } else {
                        STRAIGHT_STEP_COST
                    };
                    (next, step_cost)
                })
            })
            .collect();

        for (next, step_cost) in neighbors {
            let next_cost = cost + step_cost;
            if next_cost < costs[index_of(next)] {
                costs[index_of(next)] = next_cost;
                came_from[index_of(next)] = Some(current);
                heap.push(Reverse((next_cost, next)));
            }
        }
    }

    if came_from[index_of(goal)].is_none() {
        return Vec::new();
    }

    let mut path = vec![goal];
    let mut current = goal;
    while let Some(previous) = came_from[index_of(current)] {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
