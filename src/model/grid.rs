// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The floor grid and its coordinate types.
//!
//! The grid is row-major with row 0 at the top; north is `y - 1`. Cells hold
//! `u8` indices into the floor's `TerrainPalette`.

use std::fmt;

/// A tile position on a floor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Steps one tile in `direction`, staying inside a `width` x `height`
    /// grid. Returns `None` when the step would leave the grid.
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let x = self.x as i64 + dx;
        let y = self.y as i64 + dy;
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return None;
        }
        Some(Self {
            x: x as usize,
            y: y as usize,
        })
    }

    pub fn squared_distance(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }

    /// Steps required with eight-way movement.
    pub fn step_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// `(dx, dy)` with y growing southward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// Spoken name, used by the accessibility layer.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "north-east",
            Self::East => "east",
            Self::SouthEast => "south-east",
            Self::South => "south",
            Self::SouthWest => "south-west",
            Self::West => "west",
            Self::NorthWest => "north-west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-size, bounds-checked tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorGrid {
    width: usize,
    height: usize,
    tiles: Vec<u8>,
}

impl FloorGrid {
    /// Creates a new grid with every tile set to `fill`.
    pub fn new_filled(width: usize, height: usize, fill: u8) -> Result<Self, GridError> {
        let len = width
            .checked_mul(height)
            .ok_or(GridError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            tiles: vec![fill; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Pos) -> Result<u8, GridError> {
        let idx = self.index_of(pos)?;
        Ok(self.tiles[idx])
    }

    pub fn set(&mut self, pos: Pos, tile: u8) -> Result<(), GridError> {
        let idx = self.index_of(pos)?;
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Raw row-major tile bytes (used by the save file).
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Rebuilds a grid from raw row-major bytes.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<u8>) -> Result<Self, GridError> {
        let len = width
            .checked_mul(height)
            .ok_or(GridError::AreaOverflow { width, height })?;
        if tiles.len() != len {
            return Err(GridError::TileCountMismatch {
                expected: len,
                found: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        (0..self.tiles.len()).map(move |idx| Pos::new(idx % width, idx / width))
    }

    /// Positions holding `tile`.
    pub fn positions_of(&self, tile: u8) -> Vec<Pos> {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == tile)
            .map(|(idx, _)| Pos::new(idx % width, idx / width))
            .collect()
    }

    fn index_of(&self, pos: Pos) -> Result<usize, GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            });
        }
        Ok((pos.y * self.width) + pos.x)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        pos: Pos,
        width: usize,
        height: usize,
    },
    TileCountMismatch {
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "grid area overflow: {width}*{height}")
            }
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "out of bounds: {pos} for {width}x{height} grid")
            }
            Self::TileCountMismatch { expected, found } => {
                write!(f, "tile count mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}
