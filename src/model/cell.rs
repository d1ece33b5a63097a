// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cells: the player and everything else that walks.
//!
//! A cell occupies exactly one tile on top of its terrain. At most one cell
//! stands on a tile at a time.

use smol_str::SmolStr;

use super::grid::Pos;
use super::ids::CellId;

pub const PLAYER_GLYPH: char = '@';

/// The player's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pos: Pos,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self { pos }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Pos) {
        self.pos = pos;
    }
}

/// Any cell that is not the player: monsters, allies, anything that walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherCell {
    cell_id: CellId,
    name: SmolStr,
    glyph: char,
}

impl OtherCell {
    pub fn new(cell_id: CellId, name: impl AsRef<str>, glyph: char) -> Self {
        Self {
            cell_id,
            name: SmolStr::new(name.as_ref()),
            glyph,
        }
    }

    pub fn cell_id(&self) -> &CellId {
        &self.cell_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }
}

#[cfg(test)]
mod tests {
    use crate::model::grid::Pos;
    use crate::model::ids::CellId;

    use super::{OtherCell, Player};

    #[test]
    fn player_moves() {
        let mut player = Player::new(Pos::new(1, 1));
        player.set_pos(Pos::new(2, 1));
        assert_eq!(player.pos(), Pos::new(2, 1));
    }

    #[test]
    fn other_cell_keeps_identity() {
        let watcher = OtherCell::new(CellId::new("watcher").expect("id"), "watcher", 'w');
        assert_eq!(watcher.name(), "watcher");
        assert_eq!(watcher.glyph(), 'w');
    }
}
