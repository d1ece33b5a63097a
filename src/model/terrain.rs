// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terrain descriptors.
//!
//! A terrain is the kind of a tile: wall, empty floor, an entrance, moss,
//! water. Terrains carry everything the renderer and the accessibility layer
//! need: a one-character glyph, a spoken name, passability, opacity, and an
//! optional long description. Cells and clouds are *on* tiles, never part of
//! the terrain; a tile can change terrain, a terrain never moves.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

use super::ids::TerrainId;

pub const WALL_TERRAIN: &str = "wall";
pub const EMPTY_TERRAIN: &str = "empty";
pub const ENTRANCE_TERRAIN: &str = "entrance";
pub const UNKNOWN_TERRAIN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    terrain_id: TerrainId,
    name: SmolStr,
    glyph: char,
    passable: bool,
    opaque: bool,
    description: Option<String>,
}

impl Terrain {
    pub fn new(
        terrain_id: TerrainId,
        name: impl AsRef<str>,
        glyph: char,
        passable: bool,
        opaque: bool,
        description: Option<String>,
    ) -> Self {
        Self {
            terrain_id,
            name: SmolStr::new(name.as_ref()),
            glyph,
            passable,
            opaque,
            description,
        }
    }

    pub fn wall() -> Self {
        Self::new(builtin_id(WALL_TERRAIN), "wall", '#', false, true, None)
    }

    pub fn empty() -> Self {
        Self::new(builtin_id(EMPTY_TERRAIN), "floor", '.', true, false, None)
    }

    pub fn entrance() -> Self {
        Self::new(
            builtin_id(ENTRANCE_TERRAIN),
            "entrance",
            '+',
            true,
            false,
            None,
        )
    }

    pub fn unknown() -> Self {
        Self::new(builtin_id(UNKNOWN_TERRAIN), "unknown", ' ', false, false, None)
    }

    pub fn terrain_id(&self) -> &TerrainId {
        &self.terrain_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn is_passable(&self) -> bool {
        self.passable
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Terrains worth calling out in the surroundings report.
    ///
    /// Built-in floor and walls are ambient; entrances and anything with a
    /// description are noteworthy.
    pub fn is_noteworthy(&self) -> bool {
        self.terrain_id.as_str() == ENTRANCE_TERRAIN || self.description.is_some()
    }
}

fn builtin_id(name: &str) -> TerrainId {
    TerrainId::new(name).expect("builtin terrain id")
}

pub fn is_builtin_terrain(name: &str) -> bool {
    matches!(
        name,
        WALL_TERRAIN | EMPTY_TERRAIN | ENTRANCE_TERRAIN | UNKNOWN_TERRAIN
    )
}

/// The set of known terrains: the four built-ins plus loaded customs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainCatalog {
    terrains: BTreeMap<TerrainId, Terrain>,
}

impl Default for TerrainCatalog {
    fn default() -> Self {
        let mut terrains = BTreeMap::new();
        for terrain in [
            Terrain::wall(),
            Terrain::empty(),
            Terrain::entrance(),
            Terrain::unknown(),
        ] {
            terrains.insert(terrain.terrain_id().clone(), terrain);
        }
        Self { terrains }
    }
}

impl TerrainCatalog {
    pub fn get(&self, terrain_id: &TerrainId) -> Option<&Terrain> {
        self.terrains.get(terrain_id)
    }

    pub fn contains(&self, terrain_id: &TerrainId) -> bool {
        self.terrains.contains_key(terrain_id)
    }

    /// Registers a custom terrain. Re-registering a built-in is an error.
    pub fn insert(&mut self, terrain: Terrain) -> Result<(), TerrainCatalogError> {
        if is_builtin_terrain(terrain.terrain_id().as_str()) {
            return Err(TerrainCatalogError::BuiltinShadowed {
                terrain_id: terrain.terrain_id().clone(),
            });
        }
        self.terrains.insert(terrain.terrain_id().clone(), terrain);
        Ok(())
    }

    pub fn ids(&self) -> impl Iterator<Item = &TerrainId> {
        self.terrains.keys()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainCatalogError {
    BuiltinShadowed { terrain_id: TerrainId },
}

impl fmt::Display for TerrainCatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltinShadowed { terrain_id } => {
                write!(f, "cannot redefine builtin terrain '{terrain_id}'")
            }
        }
    }
}

impl std::error::Error for TerrainCatalogError {}
