// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Turn operations.
//!
//! Every player action is applied through here and produces a report of
//! typed events; the UI turns events into spoken messages. A blocked move
//! still consumes the turn — the report says why it failed.

use std::fmt;

use crate::model::{Direction, FloorError, Game, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Wait,
}

/// What one applied action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Moved {
        direction: Direction,
        to: Pos,
    },
    BlockedByTerrain {
        direction: Direction,
        terrain_name: String,
    },
    BlockedByCell {
        direction: Direction,
        cell_name: String,
    },
    BlockedByEdge {
        direction: Direction,
    },
    Waited,
    EnteredTerrain {
        terrain_name: String,
        description: Option<String>,
    },
    EnteredCloud {
        cloud_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Floor(FloorError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<FloorError> for ActionError {
    fn from(err: FloorError) -> Self {
        Self::Floor(err)
    }
}

/// Applies one action, advances the turn, refreshes the view.
pub fn apply_action(game: &mut Game, action: Action) -> Result<TurnReport, ActionError> {
    let mut events = Vec::new();

    match action {
        Action::Wait => {
            events.push(Event::Waited);
        }
        Action::Move(direction) => {
            let from = game.player().pos();
            let width = game.floor().grid().width();
            let height = game.floor().grid().height();

            match from.step(direction, width, height) {
                None => {
                    events.push(Event::BlockedByEdge { direction });
                }
                Some(to) => {
                    if let Some(cell) = game.cells().get(&to) {
                        events.push(Event::BlockedByCell {
                            direction,
                            cell_name: cell.name().to_owned(),
                        });
                    } else {
                        let terrain = game.floor().terrain_at(game.catalog(), to)?;
                        if !terrain.is_passable() {
                            events.push(Event::BlockedByTerrain {
                                direction,
                                terrain_name: terrain.name().to_owned(),
                            });
                        } else {
                            let terrain_name = terrain.name().to_owned();
                            let description =
                                terrain.description().map(ToOwned::to_owned);
                            let noteworthy = terrain.is_noteworthy();

                            game.move_player_to(to);
                            events.push(Event::Moved { direction, to });
                            if noteworthy {
                                events.push(Event::EnteredTerrain {
                                    terrain_name,
                                    description,
                                });
                            }
                            if let Some(cloud) = game.clouds().get(&to) {
                                events.push(Event::EnteredCloud {
                                    cloud_name: cloud.name().to_owned(),
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    game.bump_turn();
    game.refresh_view()?;

    Ok(TurnReport {
        turn: game.turn(),
        events,
    })
}
