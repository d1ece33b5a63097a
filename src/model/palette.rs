// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The floor-local terrain palette.
//!
//! A floor grid stores one byte per tile; the palette maps those indices to
//! terrain ids. Index 0 is always `wall` and index 1 always `empty`, since
//! both are needed for every floor (the border and corridor carving). A
//! palette holds at most 256 entries.

use std::collections::BTreeMap;
use std::fmt;

use super::ids::TerrainId;
use super::terrain::{EMPTY_TERRAIN, WALL_TERRAIN};

pub const WALL_INDEX: u8 = 0;
pub const EMPTY_INDEX: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainPalette {
    by_index: Vec<TerrainId>,
    by_id: BTreeMap<TerrainId, u8>,
}

impl Default for TerrainPalette {
    fn default() -> Self {
        let wall = TerrainId::new(WALL_TERRAIN).expect("wall id");
        let empty = TerrainId::new(EMPTY_TERRAIN).expect("empty id");
        let mut by_id = BTreeMap::new();
        by_id.insert(wall.clone(), WALL_INDEX);
        by_id.insert(empty.clone(), EMPTY_INDEX);
        Self {
            by_index: vec![wall, empty],
            by_id,
        }
    }
}

impl TerrainPalette {
    /// Returns the index for `terrain_id`, interning it if needed.
    pub fn intern(&mut self, terrain_id: &TerrainId) -> Result<u8, PaletteError> {
        if let Some(index) = self.by_id.get(terrain_id) {
            return Ok(*index);
        }

        if self.by_index.len() > u8::MAX as usize {
            return Err(PaletteError::Full {
                terrain_id: terrain_id.clone(),
            });
        }

        let index = self.by_index.len() as u8;
        self.by_index.push(terrain_id.clone());
        self.by_id.insert(terrain_id.clone(), index);
        Ok(index)
    }

    pub fn index_of(&self, terrain_id: &TerrainId) -> Option<u8> {
        self.by_id.get(terrain_id).copied()
    }

    pub fn terrain_id(&self, index: u8) -> Option<&TerrainId> {
        self.by_index.get(index as usize)
    }

    /// Number of interned terrains (always at least the two reserved).
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Interned ids in index order (the save file stores these).
    pub fn terrain_ids(&self) -> &[TerrainId] {
        &self.by_index
    }

    /// Rebuilds a palette from an index-ordered id list (save loading).
    pub fn from_terrain_ids(ids: Vec<TerrainId>) -> Result<Self, PaletteError> {
        if ids.len() > 256 {
            return Err(PaletteError::Full {
                terrain_id: ids[256].clone(),
            });
        }
        if ids.first().map(TerrainId::as_str) != Some(WALL_TERRAIN)
            || ids.get(1).map(TerrainId::as_str) != Some(EMPTY_TERRAIN)
        {
            return Err(PaletteError::MissingReservedEntries);
        }

        let mut by_id = BTreeMap::new();
        for (index, terrain_id) in ids.iter().enumerate() {
            if by_id.insert(terrain_id.clone(), index as u8).is_some() {
                return Err(PaletteError::Duplicate {
                    terrain_id: terrain_id.clone(),
                });
            }
        }

        Ok(Self {
            by_index: ids,
            by_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    Full { terrain_id: TerrainId },
    Duplicate { terrain_id: TerrainId },
    MissingReservedEntries,
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { terrain_id } => {
                write!(f, "too many terrains on this floor (interning '{terrain_id}')")
            }
            Self::Duplicate { terrain_id } => {
                write!(f, "terrain '{terrain_id}' appears twice in the palette")
            }
            Self::MissingReservedEntries => {
                f.write_str("palette must start with 'wall' then 'empty'")
            }
        }
    }
}

impl std::error::Error for PaletteError {}

#[cfg(test)]
mod tests {
    use crate::model::ids::TerrainId;

    use super::{PaletteError, TerrainPalette, EMPTY_INDEX, WALL_INDEX};

    fn tid(value: &str) -> TerrainId {
        TerrainId::new(value).expect("terrain id")
    }

    #[test]
    fn reserves_wall_and_empty() {
        let palette = TerrainPalette::default();
        assert_eq!(palette.index_of(&tid("wall")), Some(WALL_INDEX));
        assert_eq!(palette.index_of(&tid("empty")), Some(EMPTY_INDEX));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn intern_is_stable() {
        let mut palette = TerrainPalette::default();
        let moss = tid("depths.moss");
        let first = palette.intern(&moss).expect("intern");
        let second = palette.intern(&moss).expect("intern");
        assert_eq!(first, second);
        assert_eq!(palette.terrain_id(first), Some(&moss));
    }

    #[test]
    fn intern_caps_at_256() {
        let mut palette = TerrainPalette::default();
        for n in 0..254 {
            palette.intern(&tid(&format!("t{n}"))).expect("intern");
        }
        assert_eq!(palette.len(), 256);
        let err = palette.intern(&tid("one-too-many")).unwrap_err();
        assert_eq!(
            err,
            PaletteError::Full {
                terrain_id: tid("one-too-many")
            }
        );
    }

    #[test]
    fn from_terrain_ids_requires_reserved_prefix() {
        let err = TerrainPalette::from_terrain_ids(vec![tid("empty"), tid("wall")]).unwrap_err();
        assert_eq!(err, PaletteError::MissingReservedEntries);
    }

    #[test]
    fn from_terrain_ids_rejects_duplicates() {
        let err =
            TerrainPalette::from_terrain_ids(vec![tid("wall"), tid("empty"), tid("empty")])
                .unwrap_err();
        assert_eq!(
            err,
            PaletteError::Duplicate {
                terrain_id: tid("empty")
            }
        );
    }
}
