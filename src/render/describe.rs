// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The accessibility layer.
//!
//! Everything the game does is reported as a short sentence a screen reader
//! can speak: one message per turn event, a one-line status, and an
//! on-demand surroundings report listing what is in sight with direction
//! and step distance.

use crate::model::{Direction, Game, Pos};
use crate::ops::Event;

/// Compass sector from `from` to `to`.
///
/// A cardinal direction wins when its axis dominates the other twice over;
/// anything else is diagonal. Returns `None` when both positions are equal.
pub fn compass_between(from: Pos, to: Pos) -> Option<Direction> {
    if from == to {
        return None;
    }

    let dx = to.x as i64 - from.x as i64;
    let dy = to.y as i64 - from.y as i64;
    let adx = dx.abs();
    let ady = dy.abs();

    let direction = if adx > 2 * ady {
        if dx > 0 {
            Direction::East
        } else {
            Direction::West
        }
    } else if ady > 2 * adx {
        if dy > 0 {
            Direction::South
        } else {
            Direction::North
        }
    } else {
        match (dx > 0, dy > 0) {
            (true, true) => Direction::SouthEast,
            (true, false) => Direction::NorthEast,
            (false, true) => Direction::SouthWest,
            (false, false) => Direction::NorthWest,
        }
    };

    Some(direction)
}

/// One sentence per turn event.
pub fn message_for_event(event: &Event) -> String {
    match event {
        Event::Moved { direction, .. } => format!("You move {direction}."),
        Event::BlockedByTerrain {
            direction,
            terrain_name,
        } => format!("A {terrain_name} blocks the way {direction}."),
        Event::BlockedByCell {
            direction,
            cell_name,
        } => format!("A {cell_name} stands in the way {direction}."),
        Event::BlockedByEdge { direction } => {
            format!("The map ends {direction}.")
        }
        Event::Waited => "You wait.".to_owned(),
        Event::EnteredTerrain {
            terrain_name,
            description,
        } => match description {
            Some(description) => description.clone(),
            None => format!("You step onto the {terrain_name}."),
        },
        Event::EnteredCloud { cloud_name } => {
            format!("You enter a cloud of {cloud_name}.")
        }
    }
}

/// One line for the status bar: level, floor, position, turn.
pub fn status_line(game: &Game) -> String {
    let mut x_buf = itoa::Buffer::new();
    let mut y_buf = itoa::Buffer::new();
    let mut turn_buf = itoa::Buffer::new();
    let pos = game.player().pos();

    let mut line = String::new();
    line.push_str(game.floor().level_id().as_str());
    line.push(' ');
    line.push_str(game.floor().floor_id().as_str());
    line.push_str(" | x ");
    line.push_str(x_buf.format(pos.x));
    line.push_str(", y ");
    line.push_str(y_buf.format(pos.y));
    line.push_str(" | turn ");
    line.push_str(turn_buf.format(game.turn()));
    line
}

/// What is in sight, nearest first.
///
/// Lists cells, clouds and noteworthy terrain with step distance and
/// compass direction. The first line always says what the player stands on.
pub fn describe_surroundings(game: &Game) -> Vec<String> {
    let player = game.player().pos();
    let mut lines = Vec::new();

    match game.floor().terrain_at(game.catalog(), player) {
        Ok(terrain) => lines.push(format!("You stand on the {}.", terrain.name())),
        Err(_) => lines.push("You stand nowhere you can name.".to_owned()),
    }

    let mut sighted: Vec<(usize, String)> = Vec::new();

    for (pos, cell) in game.cells() {
        if game.view().in_sight(*pos) {
            sighted.push((player.step_distance(*pos), located(cell.name(), player, *pos)));
        }
    }

    for (pos, cloud) in game.clouds() {
        if game.view().in_sight(*pos) {
            sighted.push((
                player.step_distance(*pos),
                located(&format!("cloud of {}", cloud.name()), player, *pos),
            ));
        }
    }

    let grid = game.floor().grid();
    for pos in grid.positions() {
        if pos == player || !game.view().in_sight(pos) {
            continue;
        }
        if let Ok(terrain) = game.floor().terrain_at(game.catalog(), pos) {
            if terrain.is_noteworthy() {
                sighted.push((player.step_distance(pos), located(terrain.name(), player, pos)));
            }
        }
    }

    if sighted.is_empty() {
        lines.push("Nothing notable is in sight.".to_owned());
        return lines;
    }

    sighted.sort();
    lines.extend(sighted.into_iter().map(|(_, line)| line));
    lines
}

fn located(name: &str, player: Pos, pos: Pos) -> String {
    let mut steps_buf = itoa::Buffer::new();
    let steps = player.step_distance(pos);
    match compass_between(player, pos) {
        Some(direction) => {
            let plural = if steps == 1 { "step" } else { "steps" };
            format!(
                "{name}, {} {plural} {direction}",
                steps_buf.format(steps)
            )
        }
        None => format!("{name}, here"),
    }
}
