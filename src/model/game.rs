// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The top-level game session the TUI runs against.

use std::collections::BTreeMap;
use std::fmt;

use super::cell::{OtherCell, Player};
use super::cloud::Cloud;
use super::floor::{Floor, FloorError};
use super::grid::Pos;
use super::terrain::TerrainCatalog;
use super::view::ViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    catalog: TerrainCatalog,
    floor: Floor,
    player: Player,
    cells: BTreeMap<Pos, OtherCell>,
    clouds: BTreeMap<Pos, Cloud>,
    view: ViewState,
    turn: u64,
}

impl Game {
    pub fn new(
        catalog: TerrainCatalog,
        floor: Floor,
        player_pos: Pos,
    ) -> Result<Self, FloorError> {
        let view = ViewState::new(floor.grid().width(), floor.grid().height());
        let mut game = Self {
            catalog,
            floor,
            player: Player::new(player_pos),
            cells: BTreeMap::new(),
            clouds: BTreeMap::new(),
            view,
            turn: 0,
        };
        game.refresh_view()?;
        Ok(game)
    }

    /// Rebuilds a session from saved parts. The caller provides the restored
    /// view so remembered tiles survive; the masks are refreshed here.
    pub fn restore(
        catalog: TerrainCatalog,
        floor: Floor,
        player_pos: Pos,
        cells: BTreeMap<Pos, OtherCell>,
        clouds: BTreeMap<Pos, Cloud>,
        view: ViewState,
        turn: u64,
    ) -> Result<Self, FloorError> {
        let mut game = Self {
            catalog,
            floor,
            player: Player::new(player_pos),
            cells,
            clouds,
            view,
            turn,
        };
        game.refresh_view()?;
        Ok(game)
    }

    pub fn catalog(&self) -> &TerrainCatalog {
        &self.catalog
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn cells(&self) -> &BTreeMap<Pos, OtherCell> {
        &self.cells
    }

    pub fn clouds(&self) -> &BTreeMap<Pos, Cloud> {
        &self.clouds
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn bump_turn(&mut self) {
        self.turn += 1;
    }

    /// Places a non-player cell. The tile must be free of other cells and
    /// must not hold the player.
    pub fn place_cell(&mut self, pos: Pos, cell: OtherCell) -> Result<(), GameError> {
        if pos == self.player.pos() || self.cells.contains_key(&pos) {
            return Err(GameError::TileOccupied { pos });
        }
        if !self.floor.grid().in_bounds(pos) {
            return Err(GameError::Floor(FloorError::Grid(
                crate::model::grid::GridError::OutOfBounds {
                    pos,
                    width: self.floor.grid().width(),
                    height: self.floor.grid().height(),
                },
            )));
        }
        self.cells.insert(pos, cell);
        Ok(())
    }

    pub fn place_cloud(&mut self, pos: Pos, cloud: Cloud) -> Result<(), GameError> {
        if !self.floor.grid().in_bounds(pos) {
            return Err(GameError::Floor(FloorError::Grid(
                crate::model::grid::GridError::OutOfBounds {
                    pos,
                    width: self.floor.grid().width(),
                    height: self.floor.grid().height(),
                },
            )));
        }
        self.clouds.insert(pos, cloud);
        Ok(())
    }

    pub fn move_player_to(&mut self, pos: Pos) {
        self.player.set_pos(pos);
    }

    pub fn refresh_view(&mut self) -> Result<(), FloorError> {
        self.view
            .refresh(&self.catalog, &self.floor, self.player.pos())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Floor(FloorError),
    TileOccupied { pos: Pos },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor(err) => err.fmt(f),
            Self::TileOccupied { pos } => write!(f, "tile {pos} is already occupied"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<FloorError> for GameError {
    fn from(err: FloorError) -> Self {
        Self::Floor(err)
    }
}
