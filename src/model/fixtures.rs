// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hand-built floors shared by tests and benches.

use super::floor::Floor;
use super::grid::{FloorGrid, Pos};
use super::ids::{FloorId, LevelId};
use super::palette::{TerrainPalette, EMPTY_INDEX, WALL_INDEX};

fn floor_from_rows(rows: &[&str]) -> Floor {
    let height = rows.len();
    let width = rows.first().map(|row| row.len()).unwrap_or(0);
    let mut grid = FloorGrid::new_filled(width, height, WALL_INDEX).expect("grid");

    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width, "fixture rows must be rectangular");
        for (x, glyph) in row.chars().enumerate() {
            let tile = match glyph {
                '#' => WALL_INDEX,
                '.' => EMPTY_INDEX,
                other => panic!("fixture glyph {other:?} is not supported"),
            };
            grid.set(Pos::new(x, y), tile).expect("set");
        }
    }

    Floor::new(
        LevelId::new("fixture").expect("level id"),
        FloorId::new("1").expect("floor id"),
        grid,
        TerrainPalette::default(),
        Vec::new(),
    )
}

/// A 7x7 walled room with open interior.
pub(crate) fn single_room_floor() -> Floor {
    floor_from_rows(&[
        "#######",
        "#.....#",
        "#.....#",
        "#.....#",
        "#.....#",
        "#.....#",
        "#######",
    ])
}

/// Two rooms joined by a corridor, wide enough that one end is out of sight
/// from the other.
pub(crate) fn two_room_floor() -> Floor {
    floor_from_rows(&[
        "################",
        "#....###########",
        "#..............#",
        "#....#####....##",
        "#....#####....##",
        "#....#####....##",
        "################",
    ])
}
