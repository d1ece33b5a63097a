// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The map window.
//!
//! The frame is the bounding box of the display mask around the player.
//! In-sight tiles render live with the precedence player > cell > cloud >
//! terrain; tiles seen earlier render from memory; everything else is blank.

use std::fmt;

use crate::model::{FloorError, Game, Pos, PLAYER_GLYPH};

use super::text::canvas_to_string_trimmed;
use super::{Canvas, CanvasError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    Canvas(CanvasError),
    Floor(FloorError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => err.fmt(f),
            Self::Floor(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<CanvasError> for FrameError {
    fn from(err: CanvasError) -> Self {
        Self::Canvas(err)
    }
}

impl From<FloorError> for FrameError {
    fn from(err: FloorError) -> Self {
        Self::Floor(err)
    }
}

/// Renders the visible map window as text, trailing blanks trimmed.
pub fn render_frame(game: &Game) -> Result<String, FrameError> {
    let view = game.view();
    let Some((min, max)) = view.display_bounds() else {
        return Ok(String::new());
    };

    let width = max.x - min.x + 1;
    let height = max.y - min.y + 1;
    let mut canvas = Canvas::new(width, height)?;

    for y in 0..height {
        for x in 0..width {
            let pos = Pos::new(min.x + x, min.y + y);
            let glyph = if !view.in_display(pos) {
                ' '
            } else if view.in_sight(pos) {
                live_glyph(game, pos)?
            } else {
                view.remembered_glyph(pos)
            };
            canvas.set(x, y, glyph)?;
        }
    }

    Ok(canvas_to_string_trimmed(&canvas))
}

/// The glyph a tile shows while in sight.
fn live_glyph(game: &Game, pos: Pos) -> Result<char, FrameError> {
    if pos == game.player().pos() {
        return Ok(PLAYER_GLYPH);
    }
    if let Some(cell) = game.cells().get(&pos) {
        return Ok(cell.glyph());
    }
    if let Some(cloud) = game.clouds().get(&pos) {
        return Ok(cloud.glyph());
    }
    Ok(game.floor().terrain_at(game.catalog(), pos)?.glyph())
}
