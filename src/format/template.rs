// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Template file parsing.
//!
//! Everything before the first blank line is the map; the rest is
//! configuration:
//!
//! ```text
//! #########
//! #.......+
//! #.......#
//! #########
//!
//! min_on_floor 1
//! max_on_floor 3
//! max_entrances 1
//! ~ wall | empty
//! m depths.moss
//! ```
//!
//! The standard symbols `#` (wall), `.` (empty), `+` (entrance) and space
//! (unknown) are pre-bound and may be rebound.

use std::collections::BTreeMap;
use std::fmt;

use memchr::memmem;

use crate::model::{Template, TemplateError, TemplateId, TerrainDef, TerrainId};

use super::terrain_def::{parse_terrain_def, TerrainDefParseError};

const NUMERIC_OPTIONS: [&str; 4] = [
    "min_on_floor",
    "max_on_floor",
    "min_entrances",
    "max_entrances",
];

const STANDARD_SYMBOLS: [(char, &str); 4] =
    [('#', "wall"), ('.', "empty"), ('+', "entrance"), (' ', "unknown")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateParseError {
    MissingValue {
        line_no: usize,
        line: String,
    },
    UnknownOption {
        line_no: usize,
        option: String,
    },
    InvalidNumericOption {
        line_no: usize,
        option: String,
        value: String,
    },
    InvalidSymbolDef {
        line_no: usize,
        symbol: char,
        reason: TerrainDefParseError,
    },
    Template(TemplateError),
}

impl fmt::Display for TemplateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { line_no, line } => {
                write!(f, "missing value on line {line_no}: {line}")
            }
            Self::UnknownOption { line_no, option } => write!(
                f,
                "unknown template option '{option}' on line {line_no} (expected one of \
                 min_on_floor, max_on_floor, min_entrances, max_entrances, or a \
                 single-character symbol binding)"
            ),
            Self::InvalidNumericOption {
                line_no,
                option,
                value,
            } => write!(
                f,
                "invalid value '{value}' for '{option}' on line {line_no} (expected a \
                 non-negative integer)"
            ),
            Self::InvalidSymbolDef {
                line_no,
                symbol,
                reason,
            } => write!(
                f,
                "invalid terrain definition for symbol {symbol:?} on line {line_no}: {reason}"
            ),
            Self::Template(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for TemplateParseError {}

impl From<TemplateError> for TemplateParseError {
    fn from(err: TemplateError) -> Self {
        Self::Template(err)
    }
}

/// Parses one template file.
pub fn parse_template(
    template_id: TemplateId,
    input: &str,
) -> Result<Template, TemplateParseError> {
    let (map_part, config_part, config_first_line) =
        match memmem::find(input.as_bytes(), b"\n\n") {
            Some(idx) => {
                let map = &input[..idx];
                // Map lines, then the blank line, then the config.
                let first = map.matches('\n').count() + 3;
                (map, &input[idx + 2..], first)
            }
            None => (input, "", 0),
        };

    let rows = map_part
        .trim_end_matches('\n')
        .lines()
        .map(|line| line.chars().collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut symbols = BTreeMap::new();
    for (glyph, name) in STANDARD_SYMBOLS {
        symbols.insert(
            glyph,
            TerrainDef::Terrain(TerrainId::new(name).expect("standard terrain id")),
        );
    }

    let mut min_on_floor: u32 = 1;
    let mut max_on_floor: Option<u32> = None;
    let mut min_entrances: u32 = 1;
    let mut max_entrances: u32 = 1;

    for (offset, raw_line) in config_part.lines().enumerate() {
        let line_no = config_first_line + offset;
        let line = raw_line.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        let (key, value) = match line.trim_start().split_once(char::is_whitespace) {
            Some((key, value)) if !value.trim().is_empty() => (key, value.trim()),
            _ => {
                return Err(TemplateParseError::MissingValue {
                    line_no,
                    line: line.to_owned(),
                })
            }
        };

        if NUMERIC_OPTIONS.contains(&key) {
            let parsed: u32 = value.parse().map_err(|_| {
                TemplateParseError::InvalidNumericOption {
                    line_no,
                    option: key.to_owned(),
                    value: value.to_owned(),
                }
            })?;
            match key {
                "min_on_floor" => min_on_floor = parsed,
                "max_on_floor" => max_on_floor = Some(parsed),
                "min_entrances" => min_entrances = parsed,
                "max_entrances" => max_entrances = parsed,
                _ => unreachable!("numeric option list is exhaustive"),
            }
            continue;
        }

        let mut key_chars = key.chars();
        match (key_chars.next(), key_chars.next()) {
            (Some(symbol), None) => {
                let def = parse_terrain_def(value).map_err(|reason| {
                    TemplateParseError::InvalidSymbolDef {
                        line_no,
                        symbol,
                        reason,
                    }
                })?;
                symbols.insert(symbol, def);
            }
            _ => {
                return Err(TemplateParseError::UnknownOption {
                    line_no,
                    option: key.to_owned(),
                })
            }
        }
    }

    let template = Template::new(
        template_id,
        rows,
        symbols,
        min_on_floor,
        max_on_floor,
        min_entrances,
        max_entrances,
    )?;
    Ok(template)
}
