// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end coverage of the shipped `game/` folder: load the depths
//! content, generate a floor, start a session, and round-trip a save.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use damasen::mapgen::{spawn_position, FloorBuilder};
use damasen::model::{Direction, FloorId, Game, LevelId, TerrainId, EMPTY_INDEX};
use damasen::store::GameFolder;

fn game_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("game")
}

fn depths() -> LevelId {
    LevelId::new("depths").expect("level id")
}

fn first_floor() -> FloorId {
    FloorId::new("1").expect("floor id")
}

#[test]
fn shipped_content_loads_generates_and_connects() {
    let folder = GameFolder::new(game_dir());

    assert_eq!(folder.levels().expect("levels"), vec![depths()]);
    assert_eq!(
        folder.floors(&depths()).expect("floors"),
        vec![first_floor()]
    );

    let content = folder
        .load_floor_content(&depths(), &first_floor())
        .expect("content");
    assert_eq!(content.templates.len(), 3);
    for address in ["depths.moss", "depths.rubble"] {
        let terrain_id = TerrainId::new(address).expect("terrain id");
        assert!(
            content.catalog.contains(&terrain_id),
            "expected {address} to be loaded from the terrains folder"
        );
    }

    let mut rng = StdRng::seed_from_u64(1234);
    let floor = FloorBuilder::new(&content.plan, &content.templates, &content.catalog)
        .build(&mut rng)
        .expect("floor");

    assert_eq!(floor.grid().width(), 48);
    assert_eq!(floor.grid().height(), 32);
    assert!(floor.entrances().len() >= 3);

    // Every kept entrance was carved open and all of them share one
    // component of empty tiles.
    for entrance in floor.entrances() {
        assert_eq!(floor.grid().get(*entrance).unwrap(), EMPTY_INDEX);
    }
    let grid = floor.grid();
    let start = floor.entrances()[0];
    let mut reached = vec![false; grid.width() * grid.height()];
    let mut queue = vec![start];
    reached[start.y * grid.width() + start.x] = true;
    while let Some(pos) = queue.pop() {
        for direction in Direction::ALL {
            if let Some(next) = pos.step(direction, grid.width(), grid.height()) {
                let idx = next.y * grid.width() + next.x;
                if !reached[idx] && grid.get(next).unwrap() == EMPTY_INDEX {
                    reached[idx] = true;
                    queue.push(next);
                }
            }
        }
    }
    for entrance in floor.entrances() {
        assert!(
            reached[entrance.y * grid.width() + entrance.x],
            "entrance {entrance} is cut off from the others"
        );
    }

    let spawn = spawn_position(&floor, &mut rng).expect("spawn");
    let game = Game::new(content.catalog, floor, spawn).expect("game");
    assert!(game.view().in_sight(spawn));
}

#[test]
fn generation_is_deterministic_per_seed() {
    let folder = GameFolder::new(game_dir());
    let content = folder
        .load_floor_content(&depths(), &first_floor())
        .expect("content");
    let builder = FloorBuilder::new(&content.plan, &content.templates, &content.catalog);

    let first = builder.build(&mut StdRng::seed_from_u64(99)).expect("floor");
    let second = builder.build(&mut StdRng::seed_from_u64(99)).expect("floor");
    assert_eq!(first, second);
}

#[test]
fn a_real_session_survives_a_save_round_trip() {
    let folder = GameFolder::new(game_dir());
    let content = folder
        .load_floor_content(&depths(), &first_floor())
        .expect("content");

    let mut rng = StdRng::seed_from_u64(7);
    let floor = FloorBuilder::new(&content.plan, &content.templates, &content.catalog)
        .build(&mut rng)
        .expect("floor");
    let spawn = spawn_position(&floor, &mut rng).expect("spawn");
    let mut game = Game::new(content.catalog, floor, spawn).expect("game");
    for direction in [Direction::East, Direction::South] {
        let _ = damasen::ops::apply_action(&mut game, damasen::ops::Action::Move(direction));
    }

    // Save into a scratch folder that carries the same terrain files, so
    // loading can resolve the palette's custom addresses.
    let scratch = std::env::temp_dir().join(format!(
        "damasen-depths-roundtrip-{}",
        std::process::id()
    ));
    for name in ["moss", "rubble"] {
        let from = game_dir().join("terrains/depths").join(format!("{name}.txt"));
        let to = scratch.join("terrains/depths").join(format!("{name}.txt"));
        fs::create_dir_all(to.parent().expect("parent")).expect("create scratch dirs");
        fs::copy(&from, &to).expect("copy terrain file");
    }

    let scratch_folder = GameFolder::new(&scratch);
    scratch_folder.save_game(&game).expect("save");
    let loaded = scratch_folder.load_game().expect("load");
    assert_eq!(loaded, game);
    assert_eq!(loaded.player().pos(), game.player().pos());
    assert!(loaded.turn() >= 2);

    let _ = fs::remove_dir_all(&scratch);
}

#[test]
fn moss_is_described_to_the_player() {
    let folder = GameFolder::new(game_dir());
    let content = folder
        .load_floor_content(&depths(), &first_floor())
        .expect("content");
    let moss = TerrainId::new("depths.moss").expect("terrain id");
    let terrain = content.catalog.get(&moss).expect("moss");
    assert!(terrain.is_noteworthy());
    assert_eq!(
        terrain.description(),
        Some("A patch of soft moss muffles your steps.")
    );
}
