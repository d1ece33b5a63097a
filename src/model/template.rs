// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Map templates: the static part of a semi-random floor.
//!
//! A template is a small rectangular glyph map plus the symbol bindings and
//! placement constraints the generator stamps it with. Parsing lives in
//! `format::template`.

use std::collections::BTreeMap;
use std::fmt;

use super::grid::Pos;
use super::ids::{TemplateId, TerrainId};

/// What a template symbol stands for: one terrain, or a union resolved to
/// one member independently per tile at stamp time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainDef {
    Terrain(TerrainId),
    Union(Vec<TerrainDef>),
}

impl TerrainDef {
    /// Every terrain id reachable through this definition (unions flattened).
    pub fn terrain_ids(&self) -> Vec<&TerrainId> {
        match self {
            Self::Terrain(terrain_id) => vec![terrain_id],
            Self::Union(members) => members.iter().flat_map(TerrainDef::terrain_ids).collect(),
        }
    }

    pub fn is_terrain(&self, terrain_id: &TerrainId) -> bool {
        matches!(self, Self::Terrain(own) if own == terrain_id)
    }
}

impl fmt::Display for TerrainDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terrain(terrain_id) => terrain_id.fmt(f),
            Self::Union(members) => {
                for (idx, member) in members.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" | ")?;
                    }
                    member.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    template_id: TemplateId,
    rows: Vec<Vec<char>>,
    width: usize,
    symbols: BTreeMap<char, TerrainDef>,
    min_on_floor: u32,
    max_on_floor: Option<u32>,
    min_entrances: u32,
    max_entrances: u32,
}

impl Template {
    pub fn new(
        template_id: TemplateId,
        rows: Vec<Vec<char>>,
        symbols: BTreeMap<char, TerrainDef>,
        min_on_floor: u32,
        max_on_floor: Option<u32>,
        min_entrances: u32,
        max_entrances: u32,
    ) -> Result<Self, TemplateError> {
        if rows.is_empty() || rows.iter().all(|row| row.is_empty()) {
            return Err(TemplateError::EmptyMap {
                template_id: template_id.clone(),
            });
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        // Right-pad to a rectangle; padding is the `unknown` symbol (space),
        // which must therefore be bound like any other used glyph.
        let mut rows = rows;
        for row in &mut rows {
            row.resize(width, ' ');
        }

        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                if !symbols.contains_key(glyph) {
                    return Err(TemplateError::UnboundSymbol {
                        template_id: template_id.clone(),
                        glyph: *glyph,
                        pos: Pos::new(x, y),
                    });
                }
            }
        }

        if max_on_floor.is_some_and(|max| max < min_on_floor) {
            return Err(TemplateError::InvertedRange {
                template_id,
                option: "max_on_floor",
            });
        }
        if max_entrances < min_entrances {
            return Err(TemplateError::InvertedRange {
                template_id,
                option: "max_entrances",
            });
        }

        Ok(Self {
            template_id,
            rows,
            width,
            symbols,
            min_on_floor,
            max_on_floor,
            min_entrances,
            max_entrances,
        })
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn glyph_at(&self, pos: Pos) -> Option<char> {
        self.rows.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn symbols(&self) -> &BTreeMap<char, TerrainDef> {
        &self.symbols
    }

    pub fn def_at(&self, pos: Pos) -> Option<&TerrainDef> {
        self.glyph_at(pos).and_then(|glyph| self.symbols.get(&glyph))
    }

    /// Template-local positions whose symbol is bound directly to `terrain_id`.
    pub fn positions_bound_to(&self, terrain_id: &TerrainId) -> Vec<Pos> {
        let mut positions = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                if self
                    .symbols
                    .get(glyph)
                    .is_some_and(|def| def.is_terrain(terrain_id))
                {
                    positions.push(Pos::new(x, y));
                }
            }
        }
        positions
    }

    pub fn min_on_floor(&self) -> u32 {
        self.min_on_floor
    }

    pub fn max_on_floor(&self) -> Option<u32> {
        self.max_on_floor
    }

    pub fn min_entrances(&self) -> u32 {
        self.min_entrances
    }

    pub fn max_entrances(&self) -> u32 {
        self.max_entrances
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    EmptyMap {
        template_id: TemplateId,
    },
    UnboundSymbol {
        template_id: TemplateId,
        glyph: char,
        pos: Pos,
    },
    InvertedRange {
        template_id: TemplateId,
        option: &'static str,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap { template_id } => {
                write!(f, "template '{template_id}' has an empty map")
            }
            Self::UnboundSymbol {
                template_id,
                glyph,
                pos,
            } => write!(
                f,
                "template '{template_id}' uses unbound symbol {glyph:?} at {pos}"
            ),
            Self::InvertedRange {
                template_id,
                option,
            } => write!(
                f,
                "template '{template_id}': {option} is below its minimum"
            ),
        }
    }
}

impl std::error::Error for TemplateError {}
