// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid algorithms: spanning trees, shortest paths and field-of-view.
//!
//! Everything in here is deterministic for a given input; randomness stays
//! in `mapgen` where the RNG is seeded.

mod fov;
mod mst;
mod path;

pub use fov::compute_fov;
pub use mst::minimum_spanning_tree;
pub use path::{shortest_path, DIAGONAL_STEP_COST, STRAIGHT_STEP_COST};
