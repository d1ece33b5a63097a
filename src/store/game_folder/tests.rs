// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::fixtures;
use crate::model::{CellId, Cloud, FloorId, Game, LevelId, OtherCell, Pos, TerrainCatalog, TerrainId};

use super::{GameFolder, StoreError, WriteDurability};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_game_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "damasen-store-{label}-{}-{}",
        std::process::id(),
        DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
    ))
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create content dirs");
    }
    fs::write(path, content).expect("write content file");
}

fn write_depths_content(root: &Path) {
    write(&root.join("floors/depths/1.txt"), "width 32\nheight 24\n");
    write(
        &root.join("templates/depths/1/hall.txt"),
        "#######\n#.....+\n#.....#\n#######\n",
    );
    write(
        &root.join("templates/depths/1/grotto.txt"),
        "#####\n#mmm+\n#####\n\nm depths.moss\n",
    );
    write(
        &root.join("terrains/depths/moss.txt"),
        "name mossy floor\nchar \"\npassable yes\ndescription A patch of soft moss.\n",
    );
}

fn level(value: &str) -> LevelId {
    LevelId::new(value).expect("level id")
}

fn floor(value: &str) -> FloorId {
    FloorId::new(value).expect("floor id")
}

#[test]
fn discovers_levels_and_floors_sorted() {
    let root = temp_game_dir("discover");
    write_depths_content(&root);
    write(&root.join("floors/crypt/1.txt"), "width 16\nheight 16\n");
    write(&root.join("floors/crypt/2.txt"), "width 16\nheight 16\n");

    let folder = GameFolder::new(&root);
    assert_eq!(folder.levels().expect("levels"), vec![level("crypt"), level("depths")]);
    assert_eq!(
        folder.floors(&level("crypt")).expect("floors"),
        vec![floor("1"), floor("2")]
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_content_is_reported_as_such() {
    let root = temp_game_dir("missing");
    fs::create_dir_all(&root).expect("create root");

    let folder = GameFolder::new(&root);
    assert!(matches!(folder.levels(), Err(StoreError::NoLevels { .. })));
    assert!(matches!(
        folder.floors(&level("depths")),
        Err(StoreError::NoFloors { .. })
    ));
    assert!(matches!(
        folder.load_floor_content(&level("depths"), &floor("1")),
        Err(StoreError::Io { .. })
    ));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn loads_floor_content_with_custom_terrains() {
    let root = temp_game_dir("content");
    write_depths_content(&root);

    let folder = GameFolder::new(&root);
    let content = folder
        .load_floor_content(&level("depths"), &floor("1"))
        .expect("content");

    assert_eq!(content.plan.width(), 32);
    assert_eq!(content.plan.height(), 24);
    // Sorted by file name: grotto before hall.
    assert_eq!(content.templates.len(), 2);
    assert_eq!(content.templates[0].template_id().as_str(), "grotto");
    assert_eq!(content.templates[1].template_id().as_str(), "hall");

    let moss = TerrainId::new("depths.moss").expect("id");
    let terrain = content.catalog.get(&moss).expect("moss loaded");
    assert_eq!(terrain.name(), "mossy floor");
    assert_eq!(terrain.description(), Some("A patch of soft moss."));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn unknown_terrain_suggests_the_closest_address() {
    let root = temp_game_dir("suggest");
    write_depths_content(&root);
    write(
        &root.join("templates/depths/1/typo.txt"),
        "#m+#\n\nm depths.mos\n",
    );

    let folder = GameFolder::new(&root);
    let err = folder
        .load_floor_content(&level("depths"), &floor("1"))
        .unwrap_err();

    match err {
        StoreError::UnknownTerrain {
            terrain_id,
            suggestion,
            ..
        } => {
            assert_eq!(terrain_id.as_str(), "depths.mos");
            assert_eq!(suggestion.as_deref(), Some("depths.moss"));
        }
        other => panic!("expected UnknownTerrain, got {other:?}"),
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn save_and_load_round_trip() {
    let root = temp_game_dir("save");
    fs::create_dir_all(&root).expect("create root");

    let mut game = Game::new(
        TerrainCatalog::default(),
        fixtures::single_room_floor(),
        Pos::new(3, 3),
    )
    .expect("game");
    game.place_cell(
        Pos::new(1, 1),
        OtherCell::new(CellId::new("watcher").expect("id"), "watcher", 'w'),
    )
    .expect("place cell");
    game.place_cloud(Pos::new(5, 5), Cloud::new("smoke", '§'))
        .expect("place cloud");
    game.bump_turn();
    game.bump_turn();

    let folder = GameFolder::new(&root).with_durability(WriteDurability::Durable);
    assert!(!folder.has_save());
    folder.save_game(&game).expect("save");
    assert!(folder.has_save());

    let loaded = folder.load_game().expect("load");
    assert_eq!(loaded, game);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn loading_without_a_save_file_says_so() {
    let root = temp_game_dir("nosave");
    fs::create_dir_all(&root).expect("create root");

    let folder = GameFolder::new(&root);
    assert!(matches!(folder.load_game(), Err(StoreError::NoSave { .. })));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn unsupported_save_versions_are_rejected() {
    let root = temp_game_dir("version");
    fs::create_dir_all(&root).expect("create root");

    let game = Game::new(
        TerrainCatalog::default(),
        fixtures::single_room_floor(),
        Pos::new(3, 3),
    )
    .expect("game");
    let folder = GameFolder::new(&root);
    folder.save_game(&game).expect("save");

    let save_path = folder.save_path();
    let text = fs::read_to_string(&save_path).expect("read save");
    let bumped = text.replace("\"version\": 1", "\"version\": 99");
    assert_ne!(text, bumped, "version field should have been rewritten");
    fs::write(&save_path, bumped).expect("rewrite save");

    assert!(matches!(
        folder.load_game(),
        Err(StoreError::SaveVersion {
            found: 99,
            expected: 1
        })
    ));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn corrupt_save_files_are_malformed_not_a_panic() {
    let root = temp_game_dir("corrupt");
    fs::create_dir_all(&root).expect("create root");

    let folder = GameFolder::new(&root);
    fs::write(folder.save_path(), "{not json").expect("write corrupt save");

    assert!(matches!(
        folder.load_game(),
        Err(StoreError::SaveMalformed { .. })
    ));

    let _ = fs::remove_dir_all(&root);
}
