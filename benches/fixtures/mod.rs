// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Shared by every bench target; each target uses a subset.
#![allow(dead_code)]

use damasen::format::parse_template;
use damasen::model::{
    FloorId, FloorPlan, LevelId, Template, TemplateId, Terrain, TerrainCatalog, TerrainId,
};

pub const HALL_TEMPLATE: &str = "###########\n#.........#\n#.........+\n#.........#\n+.........#\n###########\n\nmax_entrances 2\nmax_on_floor 2\n";
pub const GROTTO_TEMPLATE: &str =
    "########\n#mm...##\n#mmm...+\n#.mm..##\n########\n\nm bench.moss\nmax_on_floor 2\n";
pub const CLOSET_TEMPLATE: &str = "####\n#..+\n####\n\nmax_on_floor 4\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }

    pub fn plan(self) -> FloorPlan {
        let (width, height) = match self {
            Self::Small => (32, 24),
            Self::Large => (96, 64),
        };
        FloorPlan::new(
            LevelId::new("bench").expect("level id"),
            FloorId::new("1").expect("floor id"),
            width,
            height,
        )
    }
}

pub fn catalog() -> TerrainCatalog {
    let mut catalog = TerrainCatalog::default();
    catalog
        .insert(Terrain::new(
            TerrainId::new("bench.moss").expect("terrain id"),
            "mossy floor",
            '"',
            true,
            false,
            None,
        ))
        .expect("bench terrain");
    catalog
}

pub fn templates() -> Vec<Template> {
    [HALL_TEMPLATE, GROTTO_TEMPLATE, CLOSET_TEMPLATE]
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let template_id = TemplateId::new(format!("bench-{idx}")).expect("template id");
            parse_template(template_id, text).expect("bench template")
        })
        .collect()
}
