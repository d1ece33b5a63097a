// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content loading and save persistence.
//!
//! The store reads the game folder format (floor plans, template
//! directories, terrain files) and reads/writes the JSON save file used by
//! the TUI.

pub mod game_folder;

pub use game_folder::{FloorContent, GameFolder, StoreError, WriteDurability, SAVE_FILENAME};
