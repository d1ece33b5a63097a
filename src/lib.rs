// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Damasen — an accessible, terminal-first Crawl-like game.
//!
//! Floors are generated from plain-text templates, connected by carved
//! corridors, and played through a TUI whose entire state is readable as
//! text (map window, message history, status line, surroundings reports).

pub mod format;
pub mod mapgen;
pub mod model;
pub mod ops;
pub mod pathfind;
pub mod render;
pub mod store;
pub mod tui;
