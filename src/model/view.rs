// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-floor visibility state.
//!
//! Three layers are tracked around the player: a circular *display mask*
//! (what the map window may show at all), a *line-of-sight mask* (what is
//! seen right now, computed by field-of-view against opaque terrain), and a
//! *memory* of terrain glyphs for tiles seen earlier. Memory records terrain
//! only; the player, cells and clouds never leave ghosts behind.

use std::fmt;

use crate::pathfind::compute_fov;

use super::floor::{Floor, FloorError};
use super::grid::Pos;
use super::terrain::TerrainCatalog;

/// Radius of the window remembered tiles are shown in.
pub const DISPLAY_RADIUS: usize = 14;
/// Radius of live sight.
pub const LOS_RADIUS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    width: usize,
    height: usize,
    display_mask: Vec<bool>,
    los_mask: Vec<bool>,
    remembered: Vec<char>,
    all_seeing: bool,
}

impl ViewState {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            display_mask: vec![false; len],
            los_mask: vec![false; len],
            remembered: vec![' '; len],
            all_seeing: false,
        }
    }

    /// Restores a view from remembered glyph rows (save loading).
    pub fn from_remembered(
        width: usize,
        height: usize,
        rows: &[String],
    ) -> Result<Self, ViewStateError> {
        if rows.len() != height {
            return Err(ViewStateError::BadRowCount {
                expected: height,
                found: rows.len(),
            });
        }

        let mut remembered = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let glyphs = row.chars().collect::<Vec<_>>();
            if glyphs.len() != width {
                return Err(ViewStateError::BadRowWidth {
                    row: y,
                    expected: width,
                    found: glyphs.len(),
                });
            }
            remembered.extend(glyphs);
        }

        Ok(Self {
            width,
            height,
            display_mask: vec![false; width * height],
            los_mask: vec![false; width * height],
            remembered,
            all_seeing: false,
        })
    }

    pub fn set_all_seeing(&mut self, all_seeing: bool) {
        self.all_seeing = all_seeing;
    }

    pub fn is_all_seeing(&self) -> bool {
        self.all_seeing
    }

    pub fn in_display(&self, pos: Pos) -> bool {
        self.index_of(pos).is_some_and(|idx| self.display_mask[idx])
    }

    pub fn in_sight(&self, pos: Pos) -> bool {
        self.index_of(pos).is_some_and(|idx| self.los_mask[idx])
    }

    pub fn remembered_glyph(&self, pos: Pos) -> char {
        self.index_of(pos)
            .map(|idx| self.remembered[idx])
            .unwrap_or(' ')
    }

    /// Remembered glyphs as one string per row (the save file stores these).
    pub fn remembered_rows(&self) -> Vec<String> {
        self.remembered
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Recomputes both masks around the player and folds newly seen terrain
    /// into memory.
    pub fn refresh(
        &mut self,
        catalog: &TerrainCatalog,
        floor: &Floor,
        player: Pos,
    ) -> Result<(), FloorError> {
        debug_assert_eq!(self.width, floor.grid().width());
        debug_assert_eq!(self.height, floor.grid().height());

        let display_r2 = (DISPLAY_RADIUS * DISPLAY_RADIUS) as u64;
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos::new(x, y);
                self.display_mask[y * self.width + x] =
                    pos.squared_distance(player) <= display_r2;
            }
        }

        if self.all_seeing {
            self.los_mask.iter_mut().for_each(|seen| *seen = true);
        } else {
            let mut opaque = vec![false; self.width * self.height];
            for y in 0..self.height {
                for x in 0..self.width {
                    let pos = Pos::new(x, y);
                    opaque[y * self.width + x] =
                        floor.terrain_at(catalog, pos)?.is_opaque();
                }
            }
            self.los_mask = compute_fov(self.width, self.height, player, LOS_RADIUS, |pos| {
                opaque[pos.y * self.width + pos.x]
            });
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                if self.display_mask[idx] && self.los_mask[idx] {
                    let pos = Pos::new(x, y);
                    self.remembered[idx] = floor.terrain_at(catalog, pos)?.glyph();
                }
            }
        }

        Ok(())
    }

    /// Bounding box of the display mask, if anything is displayable.
    pub fn display_bounds(&self) -> Option<(Pos, Pos)> {
        let mut min: Option<Pos> = None;
        let mut max: Option<Pos> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.display_mask[y * self.width + x] {
                    let pos = Pos::new(x, y);
                    min = Some(match min {
                        Some(m) => Pos::new(m.x.min(x), m.y.min(y)),
                        None => pos,
                    });
                    max = Some(match max {
                        Some(m) => Pos::new(m.x.max(x), m.y.max(y)),
                        None => pos,
                    });
                }
            }
        }
        min.zip(max)
    }

    fn index_of(&self, pos: Pos) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.y * self.width + pos.x)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStateError {
    BadRowCount {
        expected: usize,
        found: usize,
    },
    BadRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ViewStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRowCount { expected, found } => {
                write!(f, "expected {expected} remembered rows, found {found}")
            }
            Self::BadRowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "remembered row {row} has {found} glyphs, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for ViewStateError {}

#[cfg(test)]
mod tests {
    use crate::model::fixtures;
    use crate::model::grid::Pos;
    use crate::model::terrain::TerrainCatalog;

    use super::{ViewState, ViewStateError};

    #[test]
    fn refresh_sees_the_room_and_remembers_terrain() {
        let catalog = TerrainCatalog::default();
        let floor = fixtures::single_room_floor();
        let mut view = ViewState::new(floor.grid().width(), floor.grid().height());

        let player = Pos::new(3, 3);
        view.refresh(&catalog, &floor, player).expect("refresh");

        assert!(view.in_sight(player));
        assert!(view.in_sight(Pos::new(1, 1)));
        assert_eq!(view.remembered_glyph(Pos::new(1, 1)), '.');
        assert_eq!(view.remembered_glyph(Pos::new(0, 0)), '#');
    }

    #[test]
    fn memory_survives_after_sight_moves_away() {
        let catalog = TerrainCatalog::default();
        let floor = fixtures::two_room_floor();
        let mut view = ViewState::new(floor.grid().width(), floor.grid().height());

        view.refresh(&catalog, &floor, Pos::new(2, 2)).expect("refresh");
        assert_eq!(view.remembered_glyph(Pos::new(1, 1)), '.');

        // Move far enough east that (1,1) falls out of LOS but stays remembered.
        view.refresh(&catalog, &floor, Pos::new(12, 2)).expect("refresh");
        assert!(!view.in_sight(Pos::new(1, 1)));
        assert_eq!(view.remembered_glyph(Pos::new(1, 1)), '.');
    }

    #[test]
    fn all_seeing_lights_everything() {
        let catalog = TerrainCatalog::default();
        let floor = fixtures::two_room_floor();
        let mut view = ViewState::new(floor.grid().width(), floor.grid().height());
        view.set_all_seeing(true);

        view.refresh(&catalog, &floor, Pos::new(2, 2)).expect("refresh");
        assert!(view.in_sight(Pos::new(12, 2)));
    }

    #[test]
    fn from_remembered_validates_shape() {
        let err = ViewState::from_remembered(3, 2, &["...".to_owned()]).unwrap_err();
        assert_eq!(
            err,
            ViewStateError::BadRowCount {
                expected: 2,
                found: 1
            }
        );

        let err =
            ViewState::from_remembered(3, 2, &["...".to_owned(), "..".to_owned()]).unwrap_err();
        assert_eq!(
            err,
            ViewStateError::BadRowWidth {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }
}
