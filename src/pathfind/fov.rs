// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Pos;

// One (xx, xy, yx, yy) transform per octant.
const OCTANTS: [(i64, i64, i64, i64); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Recursive shadowcasting field-of-view.
///
/// Returns a row-major visibility mask. The origin is always visible; a tile
/// is visible only within `radius` (Euclidean). Tiles for which `blocks`
/// returns true are themselves visible but occlude everything behind them.
pub fn compute_fov(
    width: usize,
    height: usize,
    origin: Pos,
    radius: usize,
    blocks: impl Fn(Pos) -> bool,
) -> Vec<bool> {
    let mut visible = vec![false; width * height];
    if origin.x >= width || origin.y >= height {
        return visible;
    }

    visible[origin.y * width + origin.x] = true;

    let mut scan = Scan {
        width,
        height,
        origin,
        radius: radius as i64,
        blocks: &blocks,
        visible: &mut visible,
    };
    for (xx, xy, yx, yy) in OCTANTS {
        scan.cast_light(1, 1.0, 0.0, xx, xy, yx, yy);
    }

    visible
}

struct Scan<'a, F: Fn(Pos) -> bool> {
    width: usize,
    height: usize,
    origin: Pos,
    radius: i64,
    blocks: &'a F,
    visible: &'a mut Vec<bool>,
}

impl<F: Fn(Pos) -> bool> Scan<'_, F> {
    /// One octant-local tile, translated back onto the grid. `None` when the
    /// translated coordinates leave the grid.
    fn translate(&self, dx: i64, dy: i64, xx: i64, xy: i64, yx: i64, yy: i64) -> Option<Pos> {
        let x = self.origin.x as i64 + dx * xx + dy * xy;
        let y = self.origin.y as i64 + dx * yx + dy * yy;
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(Pos::new(x as usize, y as usize))
    }

    fn cast_light(
        &mut self,
        row: i64,
        mut start_slope: f64,
        end_slope: f64,
        xx: i64,
        xy: i64,
        yx: i64,
        yy: i64,
    ) {
        if start_slope < end_slope {
            return;
        }

        let radius_squared = self.radius * self.radius;
        let mut next_start = start_slope;

        for distance in row..=self.radius {
            let dy = -distance;
            let mut blocked = false;

            for dx in -distance..=0 {
                let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

                if start_slope < right_slope {
                    continue;
                }
                if end_slope > left_slope {
                    break;
                }

                let pos = self.translate(dx, dy, xx, xy, yx, yy);
                let in_radius = dx * dx + dy * dy <= radius_squared;

                if let (Some(pos), true) = (pos, in_radius) {
                    self.visible[pos.y * self.width + pos.x] = true;
                }

                // Off-grid tiles occlude like walls so sight never wraps
                // around the map edge.
                let occludes = pos.map(|pos| (self.blocks)(pos)).unwrap_or(true);

                if blocked {
                    if occludes {
                        next_start = right_slope;
                    } else {
                        blocked = false;
                        start_slope = next_start;
                    }
                } else if occludes && distance < self.radius {
                    blocked = true;
                    self.cast_light(distance + 1, start_slope, left_slope, xx, xy, yx, yy);
                    next_start = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
