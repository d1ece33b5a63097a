// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A built floor: grid, palette and the entrances the generator connected.

use std::fmt;

use super::grid::{FloorGrid, GridError, Pos};
use super::ids::{FloorId, LevelId, TerrainId};
use super::palette::TerrainPalette;
use super::terrain::{Terrain, TerrainCatalog};

/// The plan a floor is generated from (parsed from `floors/<level>/<floor>.txt`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorPlan {
    level_id: LevelId,
    floor_id: FloorId,
    width: usize,
    height: usize,
}

impl FloorPlan {
    pub fn new(level_id: LevelId, floor_id: FloorId, width: usize, height: usize) -> Self {
        Self {
            level_id,
            floor_id,
            width,
            height,
        }
    }

    pub fn level_id(&self) -> &LevelId {
        &self.level_id
    }

    pub fn floor_id(&self) -> &FloorId {
        &self.floor_id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    level_id: LevelId,
    floor_id: FloorId,
    grid: FloorGrid,
    palette: TerrainPalette,
    entrances: Vec<Pos>,
}

impl Floor {
    pub fn new(
        level_id: LevelId,
        floor_id: FloorId,
        grid: FloorGrid,
        palette: TerrainPalette,
        entrances: Vec<Pos>,
    ) -> Self {
        Self {
            level_id,
            floor_id,
            grid,
            palette,
            entrances,
        }
    }

    pub fn level_id(&self) -> &LevelId {
        &self.level_id
    }

    pub fn floor_id(&self) -> &FloorId {
        &self.floor_id
    }

    pub fn grid(&self) -> &FloorGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut FloorGrid {
        &mut self.grid
    }

    pub fn palette(&self) -> &TerrainPalette {
        &self.palette
    }

    pub fn entrances(&self) -> &[Pos] {
        &self.entrances
    }

    pub fn terrain_id_at(&self, pos: Pos) -> Result<&TerrainId, FloorError> {
        let index = self.grid.get(pos)?;
        self.palette
            .terrain_id(index)
            .ok_or(FloorError::UnmappedTile { pos, index })
    }

    pub fn terrain_at<'a>(
        &self,
        catalog: &'a TerrainCatalog,
        pos: Pos,
    ) -> Result<&'a Terrain, FloorError> {
        let terrain_id = self.terrain_id_at(pos)?;
        catalog.get(terrain_id).ok_or_else(|| FloorError::UnknownTerrain {
            terrain_id: terrain_id.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorError {
    Grid(GridError),
    UnmappedTile { pos: Pos, index: u8 },
    UnknownTerrain { terrain_id: TerrainId },
}

impl fmt::Display for FloorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(err) => err.fmt(f),
            Self::UnmappedTile { pos, index } => {
                write!(f, "tile {index} at {pos} is not in the floor palette")
            }
            Self::UnknownTerrain { terrain_id } => {
                write!(f, "terrain '{terrain_id}' is not in the catalog")
            }
        }
    }
}

impl std::error::Error for FloorError {}

impl From<GridError> for FloorError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}
