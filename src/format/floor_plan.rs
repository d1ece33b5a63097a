// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Floor plan files (`floors/<level>/<floor>.txt`).
//!
//! ```text
//! width 48
//! height 32
//! ```

use std::fmt;

use crate::model::{FloorId, FloorPlan, LevelId};

/// A floor must at least fit a one-tile border plus a small template.
pub const MIN_FLOOR_EDGE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorPlanParseError {
    MissingValue {
        line_no: usize,
        line: String,
    },
    UnknownKey {
        line_no: usize,
        key: String,
    },
    DuplicateKey {
        line_no: usize,
        key: String,
    },
    InvalidValue {
        line_no: usize,
        key: String,
        value: String,
    },
    TooSmall {
        key: &'static str,
        value: usize,
    },
    MissingKey {
        key: &'static str,
    },
}

impl fmt::Display for FloorPlanParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { line_no, line } => {
                write!(f, "missing value on line {line_no}: {line}")
            }
            Self::UnknownKey { line_no, key } => {
                write!(
                    f,
                    "unknown floor key '{key}' on line {line_no} (expected width or height)"
                )
            }
            Self::DuplicateKey { line_no, key } => {
                write!(f, "duplicate floor key '{key}' on line {line_no}")
            }
            Self::InvalidValue {
                line_no,
                key,
                value,
            } => write!(
                f,
                "invalid value '{value}' for '{key}' on line {line_no} (expected an integer)"
            ),
            Self::TooSmall { key, value } => write!(
                f,
                "floor {key} {value} is too small (minimum {MIN_FLOOR_EDGE})"
            ),
            Self::MissingKey { key } => write!(f, "floor plan defines no '{key}'"),
        }
    }
}

impl std::error::Error for FloorPlanParseError {}

/// Parses a floor plan file.
pub fn parse_floor_plan(
    level_id: LevelId,
    floor_id: FloorId,
    input: &str,
) -> Result<FloorPlan, FloorPlanParseError> {
    let mut width: Option<usize> = None;
    let mut height: Option<usize> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((key, value)) if !value.trim().is_empty() => (key, value.trim()),
            _ => {
                return Err(FloorPlanParseError::MissingValue {
                    line_no,
                    line: line.to_owned(),
                })
            }
        };

        let slot = match key {
            "width" => &mut width,
            "height" => &mut height,
            other => {
                return Err(FloorPlanParseError::UnknownKey {
                    line_no,
                    key: other.to_owned(),
                })
            }
        };

        let parsed: usize = value.parse().map_err(|_| FloorPlanParseError::InvalidValue {
            line_no,
            key: key.to_owned(),
            value: value.to_owned(),
        })?;

        if slot.replace(parsed).is_some() {
            return Err(FloorPlanParseError::DuplicateKey {
                line_no,
                key: key.to_owned(),
            });
        }
    }

    let width = width.ok_or(FloorPlanParseError::MissingKey { key: "width" })?;
    let height = height.ok_or(FloorPlanParseError::MissingKey { key: "height" })?;

    for (key, value) in [("width", width), ("height", height)] {
        if value < MIN_FLOOR_EDGE {
            return Err(FloorPlanParseError::TooSmall { key, value });
        }
    }

    Ok(FloorPlan::new(level_id, floor_id, width, height))
}

#[cfg(test)]
mod tests {
    use crate::model::{FloorId, LevelId};

    use super::{parse_floor_plan, FloorPlanParseError};

    fn plan(input: &str) -> Result<crate::model::FloorPlan, FloorPlanParseError> {
        parse_floor_plan(
            LevelId::new("depths").expect("level id"),
            FloorId::new("1").expect("floor id"),
            input,
        )
    }

    #[test]
    fn parses_width_and_height() {
        let plan = plan("width 48\nheight 32\n").expect("plan");
        assert_eq!(plan.width(), 48);
        assert_eq!(plan.height(), 32);
    }

    #[test]
    fn requires_both_dimensions() {
        assert_eq!(
            plan("width 48\n"),
            Err(FloorPlanParseError::MissingKey { key: "height" })
        );
    }

    #[test]
    fn rejects_tiny_floors() {
        assert_eq!(
            plan("width 48\nheight 4\n"),
            Err(FloorPlanParseError::TooSmall {
                key: "height",
                value: 4
            })
        );
    }

    #[test]
    fn rejects_unknown_and_duplicate_keys() {
        assert_eq!(
            plan("width 48\ndepth 3\n"),
            Err(FloorPlanParseError::UnknownKey {
                line_no: 2,
                key: "depth".to_owned()
            })
        );
        assert_eq!(
            plan("width 48\nwidth 32\n"),
            Err(FloorPlanParseError::DuplicateKey {
                line_no: 2,
                key: "width".to_owned()
            })
        );
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(
            plan("width large\n"),
            Err(FloorPlanParseError::InvalidValue {
                line_no: 1,
                key: "width".to_owned(),
                value: "large".to_owned()
            })
        );
    }
}
