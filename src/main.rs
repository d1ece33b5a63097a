// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Damasen CLI entrypoint.
//!
//! By default this loads the `game` folder next to the working directory,
//! generates the first discovered floor, and runs the interactive TUI.
//! `--demo` plays a built-in floor instead; `--resume` restores the save
//! file from the game folder.

use std::error::Error;

use rand::rngs::StdRng;
use rand::SeedableRng;

use damasen::mapgen::{spawn_position, FloorBuilder};
use damasen::model::{FloorId, Game, LevelId};
use damasen::store::GameFolder;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<game-dir>] [--level <id>] [--floor <id>] [--seed <n>] [--resume] [--all-seeing]\n  {program} --demo [--seed <n>] [--all-seeing]\n\nIf game-dir is omitted, `game` is used. If --level/--floor are omitted,\nthe first discovered level and floor are used.\n\n--seed makes floor generation deterministic.\n--resume loads damasen-save.json from the game folder instead of generating.\n--all-seeing reveals the whole floor (for debugging and map authoring).\n--demo plays a built-in floor and cannot be combined with game-dir,\n--level, --floor or --resume."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    game_dir: Option<String>,
    level: Option<String>,
    floor: Option<String>,
    seed: Option<u64>,
    resume: bool,
    all_seeing: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--level" => {
                if options.level.is_some() {
                    return Err(());
                }
                options.level = Some(args.next().ok_or(())?);
            }
            "--floor" => {
                if options.floor.is_some() {
                    return Err(());
                }
                options.floor = Some(args.next().ok_or(())?);
            }
            "--seed" => {
                if options.seed.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let seed: u64 = raw.parse().map_err(|_| ())?;
                options.seed = Some(seed);
            }
            "--resume" => {
                if options.resume {
                    return Err(());
                }
                options.resume = true;
            }
            "--all-seeing" => {
                if options.all_seeing {
                    return Err(());
                }
                options.all_seeing = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.game_dir.is_some() {
                    return Err(());
                }
                options.game_dir = Some(arg);
            }
        }
    }

    if options.demo
        && (options.game_dir.is_some()
            || options.level.is_some()
            || options.floor.is_some()
            || options.resume)
    {
        return Err(());
    }

    Ok(options)
}

fn prepare_game(options: &CliOptions) -> Result<(Game, Option<GameFolder>), Box<dyn Error>> {
    if options.demo {
        return Ok((damasen::tui::demo_game(options.seed), None));
    }

    let dir = options.game_dir.clone().unwrap_or_else(|| "game".to_owned());
    let folder = GameFolder::new(dir);

    if options.resume {
        let game = folder.load_game()?;
        return Ok((game, Some(folder)));
    }

    let level_id = match &options.level {
        Some(value) => LevelId::new(value.clone())?,
        None => folder.levels()?.remove(0),
    };
    let floor_id = match &options.floor {
        Some(value) => FloorId::new(value.clone())?,
        None => folder.floors(&level_id)?.remove(0),
    };

    let content = folder.load_floor_content(&level_id, &floor_id)?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let floor = FloorBuilder::new(&content.plan, &content.templates, &content.catalog)
        .build(&mut rng)?;
    let spawn = spawn_position(&floor, &mut rng)?;
    let game = Game::new(content.catalog, floor, spawn)?;

    Ok((game, Some(folder)))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "damasen".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let (mut game, folder) = prepare_game(&options)?;
        if options.all_seeing {
            game.view_mut().set_all_seeing(true);
            game.refresh_view()?;
        }

        damasen::tui::run_with_game(game, folder)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("damasen: {err}");
        std::process::exit(1);
    }
}
