// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A game session holds a floor (grid + terrain palette), the player,
//! other cells and clouds, and the per-floor visibility state.

pub mod cell;
pub mod cloud;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod floor;
pub mod game;
pub mod grid;
pub mod ids;
pub mod palette;
pub mod template;
pub mod terrain;
pub mod view;

pub use cell::{OtherCell, Player, PLAYER_GLYPH};
pub use cloud::Cloud;
pub use floor::{Floor, FloorError, FloorPlan};
pub use game::{Game, GameError};
pub use grid::{Direction, FloorGrid, GridError, Pos};
pub use ids::{CellId, FloorId, Id, IdError, LevelId, TemplateId, TerrainId};
pub use palette::{PaletteError, TerrainPalette, EMPTY_INDEX, WALL_INDEX};
pub use template::{Template, TemplateError, TerrainDef};
pub use terrain::{
    is_builtin_terrain, Terrain, TerrainCatalog, TerrainCatalogError, EMPTY_TERRAIN,
    ENTRANCE_TERRAIN, UNKNOWN_TERRAIN, WALL_TERRAIN,
};
pub use view::{ViewState, ViewStateError, DISPLAY_RADIUS, LOS_RADIUS};
