// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The game folder.
//!
//! ```text
//! <root>/
//!   floors/<level>/<floor>.txt
//!   templates/<level>/<floor>/*.txt
//!   terrains/<level>/<name>.txt
//!   damasen-save.json
//! ```
//!
//! Terrain addresses map dots to path separators: `depths.moss` lives in
//! `terrains/depths/moss.txt`. Saves are written atomically (temp file plus
//! rename); `WriteDurability::Durable` opts into fsync on the file and its
//! directory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::format::{
    is_custom_address, parse_floor_plan, parse_template, parse_terrain_file, FloorPlanParseError,
    TemplateParseError, TerrainFileParseError,
};
use crate::model::{
    CellId, Cloud, Floor, FloorError, FloorGrid, FloorId, Game, GridError, IdError, LevelId,
    OtherCell, PaletteError, Pos, Template, Terrain, TerrainCatalog, TerrainCatalogError,
    TerrainId, TerrainPalette, ViewState, ViewStateError,
};

pub const SAVE_FILENAME: &str = "damasen-save.json";
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    #[default]
    BestEffort,
    Durable,
}

/// Everything needed to generate one floor.
#[derive(Debug, Clone)]
pub struct FloorContent {
    pub plan: crate::model::FloorPlan,
    pub templates: Vec<Template>,
    pub catalog: TerrainCatalog,
}

#[derive(Debug, Clone)]
pub struct GameFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl GameFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::BestEffort,
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Levels in the folder, sorted by id.
    pub fn levels(&self) -> Result<Vec<LevelId>, StoreError> {
        let floors_dir = self.root.join("floors");
        let entries = fs::read_dir(&floors_dir).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NoLevels {
                    root: self.root.clone(),
                }
            } else {
                StoreError::Io {
                    path: floors_dir.clone(),
                    source,
                }
            }
        })?;

        let mut levels = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: floors_dir.clone(),
                source,
            })?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    levels.push(parse_id::<crate::model::ids::LevelIdTag>(name)?);
                }
            }
        }

        if levels.is_empty() {
            return Err(StoreError::NoLevels {
                root: self.root.clone(),
            });
        }
        levels.sort();
        Ok(levels)
    }

    /// Floors of a level, sorted by id.
    pub fn floors(&self, level_id: &LevelId) -> Result<Vec<FloorId>, StoreError> {
        let level_dir = self.root.join("floors").join(level_id.as_str());
        let entries = fs::read_dir(&level_dir).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NoFloors {
                    level_id: level_id.clone(),
                }
            } else {
                StoreError::Io {
                    path: level_dir.clone(),
                    source,
                }
            }
        })?;

        let mut floors = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: level_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    floors.push(parse_id::<crate::model::ids::FloorIdTag>(stem)?);
                }
            }
        }

        if floors.is_empty() {
            return Err(StoreError::NoFloors {
                level_id: level_id.clone(),
            });
        }
        floors.sort();
        Ok(floors)
    }

    /// Loads a floor plan, its templates, and every custom terrain they
    /// reference.
    pub fn load_floor_content(
        &self,
        level_id: &LevelId,
        floor_id: &FloorId,
    ) -> Result<FloorContent, StoreError> {
        let plan_path = self
            .root
            .join("floors")
            .join(level_id.as_str())
            .join(format!("{}.txt", floor_id.as_str()));
        let plan_text = read_file(&plan_path)?;
        let plan = parse_floor_plan(level_id.clone(), floor_id.clone(), &plan_text).map_err(
            |source| StoreError::FloorPlan {
                path: plan_path.clone(),
                source,
            },
        )?;

        let templates_dir = self
            .root
            .join("templates")
            .join(level_id.as_str())
            .join(floor_id.as_str());
        let mut template_paths = Vec::new();
        let entries = fs::read_dir(&templates_dir).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NoTemplates {
                    level_id: level_id.clone(),
                    floor_id: floor_id.clone(),
                }
            } else {
                StoreError::Io {
                    path: templates_dir.clone(),
                    source,
                }
            }
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: templates_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
                template_paths.push(path);
            }
        }
        template_paths.sort();

        if template_paths.is_empty() {
            return Err(StoreError::NoTemplates {
                level_id: level_id.clone(),
                floor_id: floor_id.clone(),
            });
        }

        let mut templates = Vec::new();
        for path in template_paths {
            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            let template_id = parse_id::<crate::model::ids::TemplateIdTag>(stem)?;
            let text = read_file(&path)?;
            let template = parse_template(template_id, &text).map_err(|source| {
                StoreError::Template {
                    path: path.clone(),
                    source,
                }
            })?;
            templates.push(template);
        }

        let mut catalog = TerrainCatalog::default();
        for template in &templates {
            for def in template.symbols().values() {
                for terrain_id in def.terrain_ids() {
                    if is_custom_address(terrain_id) && !catalog.contains(terrain_id) {
                        let terrain = self.load_terrain(terrain_id)?;
                        catalog.insert(terrain)?;
                    }
                }
            }
        }

        Ok(FloorContent {
            plan,
            templates,
            catalog,
        })
    }

    /// Loads one custom terrain by dotted address.
    pub fn load_terrain(&self, terrain_id: &TerrainId) -> Result<Terrain, StoreError> {
        let path = self.terrain_path(terrain_id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::UnknownTerrain {
                    terrain_id: terrain_id.clone(),
                    path,
                    suggestion: self.closest_terrain_address(terrain_id.as_str()),
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        parse_terrain_file(terrain_id.clone(), &text)
            .map_err(|source| StoreError::TerrainFile { path, source })
    }

    fn terrain_path(&self, terrain_id: &TerrainId) -> PathBuf {
        let mut path = self.root.join("terrains");
        let mut segments = terrain_id.as_str().split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.txt"));
            }
        }
        path
    }

    /// Every terrain address present on disk, as dotted strings.
    fn terrain_addresses(&self) -> Vec<String> {
        fn walk(dir: &Path, prefix: &str, out: &mut Vec<String>) {
            let Ok(entries) = fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let address = if prefix.is_empty() {
                    name.to_owned()
                } else {
                    format!("{prefix}.{name}")
                };
                if path.is_dir() {
                    walk(&path, &address, out);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
                    out.push(address);
                }
            }
        }

        let mut addresses = Vec::new();
        walk(&self.root.join("terrains"), "", &mut addresses);
        addresses.sort();
        addresses
    }

    fn closest_terrain_address(&self, wanted: &str) -> Option<String> {
        let mut best: Option<(f64, String)> = None;
        for address in self.terrain_addresses() {
            let score = rapidfuzz::distance::levenshtein::normalized_similarity(
                wanted.chars(),
                address.chars(),
            );
            if score >= 0.6 && best.as_ref().map(|(b, _)| score > *b).unwrap_or(true) {
                best = Some((score, address));
            }
        }
        best.map(|(_, address)| address)
    }

    pub fn save_path(&self) -> PathBuf {
        self.root.join(SAVE_FILENAME)
    }

    pub fn has_save(&self) -> bool {
        self.save_path().is_file()
    }

    /// Writes the save file atomically.
    pub fn save_game(&self, game: &Game) -> Result<(), StoreError> {
        let floor = game.floor();
        let save = SaveGame {
            version: SAVE_VERSION,
            level: floor.level_id().as_str().to_owned(),
            floor: floor.floor_id().as_str().to_owned(),
            width: floor.grid().width(),
            height: floor.grid().height(),
            palette: floor
                .palette()
                .terrain_ids()
                .iter()
                .map(|id| id.as_str().to_owned())
                .collect(),
            grid: BASE64.encode(floor.grid().tiles()),
            entrances: floor
                .entrances()
                .iter()
                .map(|pos| SavePos { x: pos.x, y: pos.y })
                .collect(),
            player: SavePos {
                x: game.player().pos().x,
                y: game.player().pos().y,
            },
            turn: game.turn(),
            remembered: game.view().remembered_rows(),
            cells: game
                .cells()
                .iter()
                .map(|(pos, cell)| SaveCell {
                    x: pos.x,
                    y: pos.y,
                    id: cell.cell_id().as_str().to_owned(),
                    name: cell.name().to_owned(),
                    glyph: cell.glyph(),
                })
                .collect(),
            clouds: game
                .clouds()
                .iter()
                .map(|(pos, cloud)| SaveCloud {
                    x: pos.x,
                    y: pos.y,
                    name: cloud.name().to_owned(),
                    glyph: cloud.glyph(),
                })
                .collect(),
        };

        let path = self.save_path();
        let bytes = serde_json::to_vec_pretty(&save).map_err(|source| {
            StoreError::SaveMalformed {
                path: path.clone(),
                reason: source.to_string(),
            }
        })?;
        self.write_atomic(&path, &bytes)
    }

    /// Loads the save file and rebuilds the session, reloading any custom
    /// terrains the palette references.
    pub fn load_game(&self) -> Result<Game, StoreError> {
        let path = self.save_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NoSave { path });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let save: SaveGame =
            serde_json::from_str(&text).map_err(|source| StoreError::SaveMalformed {
                path: path.clone(),
                reason: source.to_string(),
            })?;

        if save.version != SAVE_VERSION {
            return Err(StoreError::SaveVersion {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }

        let level_id = parse_id::<crate::model::ids::LevelIdTag>(&save.level)?;
        let floor_id = parse_id::<crate::model::ids::FloorIdTag>(&save.floor)?;

        let mut palette_ids = Vec::with_capacity(save.palette.len());
        for value in &save.palette {
            palette_ids.push(parse_id::<crate::model::ids::TerrainIdTag>(value)?);
        }
        let palette = TerrainPalette::from_terrain_ids(palette_ids)?;

        let mut catalog = TerrainCatalog::default();
        for terrain_id in palette.terrain_ids() {
            if is_custom_address(terrain_id) && !catalog.contains(terrain_id) {
                let terrain = self.load_terrain(terrain_id)?;
                catalog.insert(terrain)?;
            }
        }

        let tiles = BASE64
            .decode(&save.grid)
            .map_err(|source| StoreError::SaveMalformed {
                path: path.clone(),
                reason: source.to_string(),
            })?;
        let grid = FloorGrid::from_tiles(save.width, save.height, tiles)?;

        let entrances = save
            .entrances
            .iter()
            .map(|pos| Pos::new(pos.x, pos.y))
            .collect();
        let floor = Floor::new(level_id, floor_id, grid, palette, entrances);

        let view = ViewState::from_remembered(save.width, save.height, &save.remembered)?;

        let mut cells = BTreeMap::new();
        for cell in &save.cells {
            let cell_id: CellId = parse_id::<crate::model::ids::CellIdTag>(&cell.id)?;
            cells.insert(
                Pos::new(cell.x, cell.y),
                OtherCell::new(cell_id, &cell.name, cell.glyph),
            );
        }

        let mut clouds = BTreeMap::new();
        for cloud in &save.clouds {
            clouds.insert(Pos::new(cloud.x, cloud.y), Cloud::new(&cloud.name, cloud.glyph));
        }

        let game = Game::restore(
            catalog,
            floor,
            Pos::new(save.player.x, save.player.y),
            cells,
            clouds,
            view,
            save.turn,
        )?;
        Ok(game)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("save");
        let tmp_path = dir.join(format!(".{file_name}.tmp-{}", std::process::id()));

        let result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(bytes)?;
            if self.durability == WriteDurability::Durable {
                file.sync_all()?;
            }
            drop(file);
            fs::rename(&tmp_path, path)?;
            if self.durability == WriteDurability::Durable {
                if let Ok(dir_file) = fs::File::open(dir) {
                    // Directory fsync is best-effort; not every platform
                    // supports it.
                    let _ = dir_file.sync_all();
                }
            }
            Ok(())
        })();

        result.map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

fn read_file(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_id<T>(value: &str) -> Result<crate::model::Id<T>, StoreError> {
    crate::model::Id::new(value).map_err(|source| StoreError::InvalidId {
        value: value.to_owned(),
        source,
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveGame {
    version: u32,
    level: String,
    floor: String,
    width: usize,
    height: usize,
    palette: Vec<String>,
    grid: String,
    entrances: Vec<SavePos>,
    player: SavePos,
    turn: u64,
    remembered: Vec<String>,
    cells: Vec<SaveCell>,
    clouds: Vec<SaveCloud>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavePos {
    x: usize,
    y: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveCell {
    x: usize,
    y: usize,
    id: String,
    name: String,
    glyph: char,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveCloud {
    x: usize,
    y: usize,
    name: String,
    glyph: char,
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    FloorPlan {
        path: PathBuf,
        source: FloorPlanParseError,
    },
    Template {
        path: PathBuf,
        source: TemplateParseError,
    },
    TerrainFile {
        path: PathBuf,
        source: TerrainFileParseError,
    },
    UnknownTerrain {
        terrain_id: TerrainId,
        path: PathBuf,
        suggestion: Option<String>,
    },
    Catalog(TerrainCatalogError),
    NoLevels {
        root: PathBuf,
    },
    NoFloors {
        level_id: LevelId,
    },
    NoTemplates {
        level_id: LevelId,
        floor_id: FloorId,
    },
    NoSave {
        path: PathBuf,
    },
    SaveMalformed {
        path: PathBuf,
        reason: String,
    },
    SaveVersion {
        found: u32,
        expected: u32,
    },
    InvalidId {
        value: String,
        source: IdError,
    },
    Grid(GridError),
    Palette(PaletteError),
    View(ViewStateError),
    Floor(FloorError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::FloorPlan { path, source } => {
                write!(f, "invalid floor plan {path:?}: {source}")
            }
            Self::Template { path, source } => {
                write!(f, "invalid template {path:?}: {source}")
            }
            Self::TerrainFile { path, source } => {
                write!(f, "invalid terrain file {path:?}: {source}")
            }
            Self::UnknownTerrain {
                terrain_id,
                path,
                suggestion,
            } => {
                write!(f, "unknown terrain '{terrain_id}' (no file at {path:?})")?;
                if let Some(suggestion) = suggestion {
                    write!(f, "; did you mean '{suggestion}'?")?;
                }
                Ok(())
            }
            Self::Catalog(err) => err.fmt(f),
            Self::NoLevels { root } => {
                write!(f, "no levels found under {root:?} (expected floors/<level>/)")
            }
            Self::NoFloors { level_id } => {
                write!(f, "level '{level_id}' has no floor files")
            }
            Self::NoTemplates { level_id, floor_id } => {
                write!(f, "no templates for floor '{level_id}/{floor_id}'")
            }
            Self::NoSave { path } => write!(f, "no save file at {path:?}"),
            Self::SaveMalformed { path, reason } => {
                write!(f, "malformed save file {path:?}: {reason}")
            }
            Self::SaveVersion { found, expected } => {
                write!(f, "save file version {found} is not supported (expected {expected})")
            }
            Self::InvalidId { value, source } => {
                write!(f, "invalid id '{value}': {source}")
            }
            Self::Grid(err) => err.fmt(f),
            Self::Palette(err) => err.fmt(f),
            Self::View(err) => err.fmt(f),
            Self::Floor(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<TerrainCatalogError> for StoreError {
    fn from(err: TerrainCatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<GridError> for StoreError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<PaletteError> for StoreError {
    fn from(err: PaletteError) -> Self {
        Self::Palette(err)
    }
}

impl From<ViewStateError> for StoreError {
    fn from(err: ViewStateError) -> Self {
        Self::View(err)
    }
}

impl From<FloorError> for StoreError {
    fn from(err: FloorError) -> Self {
        Self::Floor(err)
    }
}

#[cfg(test)]
mod tests;
