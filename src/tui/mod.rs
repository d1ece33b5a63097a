// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): a menu screen, then the game
//! screen with the map pane, a reviewable message history and a one-line
//! status bar. Every game event lands in the history as a full sentence, so
//! a screen reader can follow play without ever reading the map grid.

use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::Direction as LayoutDirection,
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::format::parse_template;
use crate::mapgen::{spawn_position, FloorBuilder};
use crate::model::{
    Cloud, Direction, FloorId, FloorPlan, Game, LevelId, OtherCell, Template, TemplateId, Terrain,
    TerrainCatalog, TerrainId, EMPTY_INDEX,
};
use crate::model::CellId;
use crate::ops::{apply_action, Action};
use crate::render::{describe_surroundings, message_for_event, render_frame, status_line};
use crate::store::GameFolder;

mod theme;

use theme::TuiTheme;

const KEY_HINTS: &str = "arrows/hjkl move | . wait | x describe | s save | Tab history | q menu";

/// Runs the interactive terminal UI for a prepared game.
pub fn run_with_game(game: Game, folder: Option<GameFolder>) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(game, folder);
    app.theme = TuiTheme::from_env()?;

    let mut terminal = TerminalSession::new()?;
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

const DEMO_SEED: u64 = 0xDA;

const DEMO_TEMPLATES: [&str; 3] = [
    "#########\n#.......#\n#.......+\n#.......#\n+.......#\n#########\n\nmax_entrances 2\nmax_on_floor 2\n",
    "######\n#mmm.#\n#.mm.+\n######\n\nm demo.moss\n",
    "####\n#..+\n####\n\nmax_on_floor 3\n",
];

/// A built-in game that needs no content folder.
pub fn demo_game(seed: Option<u64>) -> Game {
    let seed = seed.unwrap_or(DEMO_SEED);
    let plan = FloorPlan::new(
        LevelId::new("demo").expect("demo level id"),
        FloorId::new("1").expect("demo floor id"),
        40,
        28,
    );

    let mut catalog = TerrainCatalog::default();
    catalog
        .insert(Terrain::new(
            TerrainId::new("demo.moss").expect("demo terrain id"),
            "mossy floor",
            '"',
            true,
            false,
            Some("A patch of soft moss.".to_owned()),
        ))
        .expect("demo terrain");

    let templates = DEMO_TEMPLATES
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let template_id = TemplateId::new(format!("demo-{idx}")).expect("demo template id");
            parse_template(template_id, text).expect("demo template")
        })
        .collect::<Vec<Template>>();

    let mut rng = StdRng::seed_from_u64(seed);
    let floor = FloorBuilder::new(&plan, &templates, &catalog)
        .build(&mut rng)
        .expect("demo floor");
    let spawn = spawn_position(&floor, &mut rng).expect("demo spawn");
    let mut game = Game::new(catalog, floor, spawn).expect("demo game");

    let empties = game.floor().grid().positions_of(EMPTY_INDEX);
    if let Some(pos) = empties
        .iter()
        .copied()
        .find(|pos| pos.step_distance(spawn) >= 3)
    {
        let watcher = OtherCell::new(CellId::new("watcher").expect("demo cell id"), "watcher", 'w');
        let _ = game.place_cell(pos, watcher);
    }
    if let Some(pos) = empties
        .iter()
        .copied()
        .find(|pos| *pos != spawn && pos.step_distance(spawn) >= 2 && !game.cells().contains_key(pos))
    {
        let _ = game.place_cloud(pos, Cloud::new("smoke", '§'));
    }

    game
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Map,
    Messages,
}

const MENU_ITEMS: [&str; 2] = ["Play", "Quit"];

struct App {
    screen: Screen,
    focus: Focus,
    game: Game,
    folder: Option<GameFolder>,
    messages: Vec<String>,
    messages_state: ListState,
    menu_state: ListState,
    theme: TuiTheme,
    should_quit: bool,
}

impl App {
    fn new(game: Game, folder: Option<GameFolder>) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));
        Self {
            screen: Screen::Menu,
            focus: Focus::Map,
            game,
            folder,
            messages: Vec::new(),
            messages_state: ListState::default(),
            menu_state,
            theme: TuiTheme::default(),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Game => self.handle_game_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let selected = self.menu_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_state
                    .select(Some(selected.saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_state
                    .select(Some((selected + 1).min(MENU_ITEMS.len() - 1)));
            }
            KeyCode::Enter => {
                if selected == 0 {
                    self.start_game();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        self.screen = Screen::Game;
        self.focus = Focus::Map;
        self.push_message(format!(
            "Welcome to Damasen. You are on {} {}.",
            self.game.floor().level_id(),
            self.game.floor().floor_id()
        ));
        for line in describe_surroundings(&self.game) {
            self.push_message(line);
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Map => Focus::Messages,
                Focus::Messages => Focus::Map,
            };
            return;
        }

        match self.focus {
            Focus::Messages => self.handle_messages_key(key),
            Focus::Map => self.handle_map_key(key),
        }
    }

    fn handle_messages_key(&mut self, key: KeyEvent) {
        let selected = self.messages_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up => {
                self.messages_state
                    .select(Some(selected.saturating_sub(1)));
            }
            KeyCode::Down => {
                if !self.messages.is_empty() {
                    self.messages_state
                        .select(Some((selected + 1).min(self.messages.len() - 1)));
                }
            }
            KeyCode::Esc => {
                self.focus = Focus::Map;
            }
            KeyCode::Char('q') => {
                self.leave_game();
            }
            _ => {}
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        if let Some(direction) = direction_for_key(key.code) {
            self.act(Action::Move(direction));
            return;
        }

        match key.code {
            KeyCode::Char('.') | KeyCode::Char('5') => self.act(Action::Wait),
            KeyCode::Char('x') => {
                for line in describe_surroundings(&self.game) {
                    self.push_message(line);
                }
            }
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('q') | KeyCode::Esc => self.leave_game(),
            _ => {}
        }
    }

    fn act(&mut self, action: Action) {
        match apply_action(&mut self.game, action) {
            Ok(report) => {
                for event in &report.events {
                    self.push_message(message_for_event(event));
                }
            }
            Err(err) => self.push_message(format!("Something went wrong: {err}")),
        }
    }

    fn save(&mut self) {
        match &self.folder {
            Some(folder) => match folder.save_game(&self.game) {
                Ok(()) => self.push_message("Game saved.".to_owned()),
                Err(err) => self.push_message(format!("Saving failed: {err}")),
            },
            None => self.push_message("The demo cannot be saved.".to_owned()),
        }
    }

    fn leave_game(&mut self) {
        self.screen = Screen::Menu;
    }

    fn push_message(&mut self, message: String) {
        self.messages.push(message);
        self.messages_state.select(Some(self.messages.len() - 1));
    }

    fn map_text(&self) -> String {
        render_frame(&self.game).unwrap_or_else(|err| format!("map unavailable: {err}"))
    }
}

/// Key-to-direction mapping: arrows, vi keys and the numpad.
fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('8') => Some(Direction::North),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('2') => Some(Direction::South),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('4') => Some(Direction::West),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('6') => Some(Direction::East),
        KeyCode::Char('y') | KeyCode::Char('7') => Some(Direction::NorthWest),
        KeyCode::Char('u') | KeyCode::Char('9') => Some(Direction::NorthEast),
        KeyCode::Char('b') | KeyCode::Char('1') => Some(Direction::SouthWest),
        KeyCode::Char('n') | KeyCode::Char('3') => Some(Direction::SouthEast),
        _ => None,
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    match app.screen {
        Screen::Menu => draw_menu(frame, app, area),
        Screen::Game => draw_game(frame, app, area),
    }
}

fn draw_menu(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let width = area.width.min(24);
    let height = area.height.min(4 + MENU_ITEMS.len() as u16);
    let menu_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let items = MENU_ITEMS
        .iter()
        .map(|label| ListItem::new(*label))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Damasen")
                .border_style(app.theme.panel_border_style(true)),
        )
        .style(app.theme.base_style())
        .highlight_style(app.theme.selection_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, menu_area, &mut app.menu_state);
}

fn draw_game(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let status_area = rows[1];

    let panes = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_area);
    let map_area = panes[0];
    let messages_area = panes[1];

    let map = Paragraph::new(app.map_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Map")
                .border_style(app.theme.panel_border_style(app.focus == Focus::Map)),
        )
        .style(app.theme.base_style());
    frame.render_widget(map, map_area);

    let items = app
        .messages
        .iter()
        .map(|message| ListItem::new(message.as_str()))
        .collect::<Vec<_>>();
    let messages = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Messages")
                .border_style(app.theme.panel_border_style(app.focus == Focus::Messages)),
        )
        .style(app.theme.base_style())
        .highlight_style(app.theme.selection_style());
    frame.render_stateful_widget(messages, messages_area, &mut app.messages_state);

    let status = Paragraph::new(format!("{} | {KEY_HINTS}", status_line(&app.game)))
        .style(app.theme.status_style());
    frame.render_widget(status, status_area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}
