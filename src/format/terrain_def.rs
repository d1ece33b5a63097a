// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terrain definitions and terrain files.
//!
//! A terrain definition is what a template symbol binds to:
//!
//! ```text
//! wall
//! depths.moss
//! wall | empty
//! depths.moss | depths.rubble | empty
//! ```
//!
//! Built-in names (`wall`, `empty`, `entrance`, `unknown`) resolve directly;
//! anything else is a dotted address into `terrains/` and must be loadable.
//! `|` builds a union: the generator picks one member per tile at stamp time.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{is_builtin_terrain, Terrain, TerrainDef, TerrainId};

fn address_regex() -> &'static Regex {
    static ADDRESS: OnceLock<Regex> = OnceLock::new();
    ADDRESS.get_or_init(|| {
        Regex::new(r"^[a-z0-9_]+(?:\.[a-z0-9_]+)*$").expect("terrain address regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainDefParseError {
    Empty,
    EmptyUnionMember { definition: String },
    InvalidAddress { definition: String },
}

impl fmt::Display for TerrainDefParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty terrain definition"),
            Self::EmptyUnionMember { definition } => {
                write!(f, "empty union member in terrain definition '{definition}'")
            }
            Self::InvalidAddress { definition } => write!(
                f,
                "'{definition}' is not a valid terrain address (expected lowercase \
                 segments joined by '.', e.g. 'depths.moss')"
            ),
        }
    }
}

impl std::error::Error for TerrainDefParseError {}

/// Parses a terrain definition, unions included.
pub fn parse_terrain_def(input: &str) -> Result<TerrainDef, TerrainDefParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TerrainDefParseError::Empty);
    }

    if trimmed.contains('|') {
        let mut members = Vec::new();
        for part in trimmed.split('|') {
            let part = part.trim();
            if part.is_empty() {
                return Err(TerrainDefParseError::EmptyUnionMember {
                    definition: trimmed.to_owned(),
                });
            }
            members.push(parse_terrain_def(part)?);
        }
        return Ok(TerrainDef::Union(members));
    }

    if !address_regex().is_match(trimmed) {
        return Err(TerrainDefParseError::InvalidAddress {
            definition: trimmed.to_owned(),
        });
    }

    let terrain_id = TerrainId::new(trimmed).map_err(|_| TerrainDefParseError::InvalidAddress {
        definition: trimmed.to_owned(),
    })?;
    Ok(TerrainDef::Terrain(terrain_id))
}

/// True when the definition needs a terrain file (not a built-in).
pub fn is_custom_address(terrain_id: &TerrainId) -> bool {
    !is_builtin_terrain(terrain_id.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainFileParseError {
    MissingValue {
        line_no: usize,
        key: String,
    },
    UnknownKey {
        line_no: usize,
        key: String,
    },
    DuplicateKey {
        line_no: usize,
        key: String,
    },
    GlyphNotSingle {
        line_no: usize,
        value: String,
    },
    InvalidFlag {
        line_no: usize,
        key: String,
        value: String,
    },
    MissingGlyph,
}

impl fmt::Display for TerrainFileParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { line_no, key } => {
                write!(f, "missing value for '{key}' on line {line_no}")
            }
            Self::UnknownKey { line_no, key } => {
                write!(
                    f,
                    "unknown terrain key '{key}' on line {line_no} (expected name, char, \
                     passable, opaque or description)"
                )
            }
            Self::DuplicateKey { line_no, key } => {
                write!(f, "duplicate terrain key '{key}' on line {line_no}")
            }
            Self::GlyphNotSingle { line_no, value } => {
                write!(
                    f,
                    "terrain char on line {line_no} must be a single character, got '{value}'"
                )
            }
            Self::InvalidFlag {
                line_no,
                key,
                value,
            } => write!(
                f,
                "invalid value '{value}' for '{key}' on line {line_no} (expected yes or no)"
            ),
            Self::MissingGlyph => f.write_str("terrain file defines no 'char'"),
        }
    }
}

impl std::error::Error for TerrainFileParseError {}

/// Parses a terrain file (`terrains/<level>/<name>.txt`).
pub fn parse_terrain_file(
    terrain_id: TerrainId,
    input: &str,
) -> Result<Terrain, TerrainFileParseError> {
    let mut name: Option<String> = None;
    let mut glyph: Option<char> = None;
    let mut passable: Option<bool> = None;
    let mut opaque: Option<bool> = None;
    let mut description: Option<String> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => {
                return Err(TerrainFileParseError::MissingValue {
                    line_no,
                    key: line.to_owned(),
                })
            }
        };
        if value.is_empty() {
            return Err(TerrainFileParseError::MissingValue {
                line_no,
                key: key.to_owned(),
            });
        }

        match key {
            "name" => {
                if name.replace(value.to_owned()).is_some() {
                    return Err(duplicate(line_no, key));
                }
            }
            "char" => {
                let mut chars = value.chars();
                let single = match (chars.next(), chars.next()) {
                    (Some(single), None) => single,
                    _ => {
                        return Err(TerrainFileParseError::GlyphNotSingle {
                            line_no,
                            value: value.to_owned(),
                        })
                    }
                };
                if glyph.replace(single).is_some() {
                    return Err(duplicate(line_no, key));
                }
            }
            "passable" => {
                if passable.replace(parse_flag(line_no, key, value)?).is_some() {
                    return Err(duplicate(line_no, key));
                }
            }
            "opaque" => {
                if opaque.replace(parse_flag(line_no, key, value)?).is_some() {
                    return Err(duplicate(line_no, key));
                }
            }
            "description" => {
                if description.replace(value.to_owned()).is_some() {
                    return Err(duplicate(line_no, key));
                }
            }
            other => {
                return Err(TerrainFileParseError::UnknownKey {
                    line_no,
                    key: other.to_owned(),
                })
            }
        }
    }

    let glyph = glyph.ok_or(TerrainFileParseError::MissingGlyph)?;
    let name = name.unwrap_or_else(|| default_name(&terrain_id));

    Ok(Terrain::new(
        terrain_id,
        name,
        glyph,
        passable.unwrap_or(true),
        opaque.unwrap_or(false),
        description,
    ))
}

fn duplicate(line_no: usize, key: &str) -> TerrainFileParseError {
    TerrainFileParseError::DuplicateKey {
        line_no,
        key: key.to_owned(),
    }
}

fn parse_flag(line_no: usize, key: &str, value: &str) -> Result<bool, TerrainFileParseError> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(TerrainFileParseError::InvalidFlag {
            line_no,
            key: key.to_owned(),
            value: other.to_owned(),
        }),
    }
}

/// Last address segment with underscores spaced out: `depths.huge_rock`
/// speaks as "huge rock".
fn default_name(terrain_id: &TerrainId) -> String {
    terrain_id
        .as_str()
        .rsplit('.')
        .next()
        .unwrap_or(terrain_id.as_str())
        .replace('_', " ")
}
