// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parsers for the plain-text content formats.
//!
//! All game content is hand-editable text: template files (a glyph map plus
//! configuration), terrain files and floor plans. Every parse error carries
//! a 1-based line number.

pub mod floor_plan;
pub mod template;
pub mod terrain_def;

pub use floor_plan::{parse_floor_plan, FloorPlanParseError};
pub use template::{parse_template, TemplateParseError};
pub use terrain_def::{
    is_custom_address, parse_terrain_def, parse_terrain_file, TerrainDefParseError,
    TerrainFileParseError,
};
