// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Floor generation.
//!
//! A floor starts as solid wall. Templates are stamped into free windows
//! (the one-tile border stays wall), surplus entrances are pruned, and the
//! kept entrances are joined by carving the minimum spanning tree's edges
//! with straight-preferring shortest paths. The same seed always yields the
//! same floor.

use std::cmp::Reverse;
use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use crate::model::{
    Floor, FloorGrid, FloorPlan, GridError, PaletteError, Pos, Template, TemplateId,
    TerrainCatalog, TerrainDef, TerrainId, TerrainPalette, EMPTY_INDEX, ENTRANCE_TERRAIN,
    WALL_INDEX,
};
use crate::pathfind::{minimum_spanning_tree, shortest_path};

pub struct FloorBuilder<'a> {
    plan: &'a FloorPlan,
    templates: &'a [Template],
    catalog: &'a TerrainCatalog,
}

impl<'a> FloorBuilder<'a> {
    pub fn new(
        plan: &'a FloorPlan,
        templates: &'a [Template],
        catalog: &'a TerrainCatalog,
    ) -> Self {
        Self {
            plan,
            templates,
            catalog,
        }
    }

    /// Builds the floor. Fails when a template cannot be satisfied (no
    /// space, no entrance, unknown terrain) rather than producing a floor
    /// that silently dropped content.
    pub fn build(&self, rng: &mut StdRng) -> Result<Floor, MapgenError> {
        self.check_terrains()?;

        let width = self.plan.width();
        let height = self.plan.height();
        let mut grid = FloorGrid::new_filled(width, height, WALL_INDEX)?;
        let mut palette = TerrainPalette::default();

        let mut occupied = vec![false; width * height];
        for x in 0..width {
            occupied[x] = true;
            occupied[(height - 1) * width + x] = true;
        }
        for y in 0..height {
            occupied[y * width] = true;
            occupied[y * width + (width - 1)] = true;
        }

        let entrance_id = TerrainId::new(ENTRANCE_TERRAIN).expect("entrance id");
        let wall_id = TerrainId::new(crate::model::WALL_TERRAIN).expect("wall id");
        let mut all_entrances = Vec::new();

        for template in self.instances(rng) {
            let window = self.choose_window(&occupied, template, rng)?;
            let kept = self.kept_entrances(template, &entrance_id, rng)?;

            for y in 0..template.height() {
                for x in 0..template.width() {
                    let local = Pos::new(x, y);
                    let def = template
                        .def_at(local)
                        .expect("template symbols are validated on construction");

                    let terrain_id = if def.is_terrain(&entrance_id) && !kept.contains(&local) {
                        // Surplus entrance, sealed off.
                        &wall_id
                    } else {
                        resolve_def(template.template_id(), def, rng)?
                    };

                    let index = palette.intern(terrain_id)?;
                    let pos = Pos::new(window.x + x, window.y + y);
                    grid.set(pos, index)?;
                    occupied[pos.y * width + pos.x] = true;
                }
            }

            all_entrances.extend(
                kept.iter()
                    .map(|local| Pos::new(window.x + local.x, window.y + local.y)),
            );
        }

        for (start, goal) in minimum_spanning_tree(&all_entrances) {
            for pos in shortest_path(width, height, start, goal) {
                grid.set(pos, EMPTY_INDEX)?;
            }
        }

        Ok(Floor::new(
            self.plan.level_id().clone(),
            self.plan.floor_id().clone(),
            grid,
            palette,
            all_entrances,
        ))
    }

    fn check_terrains(&self) -> Result<(), MapgenError> {
        for template in self.templates {
            for def in template.symbols().values() {
                for terrain_id in def.terrain_ids() {
                    if !self.catalog.contains(terrain_id) {
                        return Err(MapgenError::UnknownTerrain {
                            template_id: template.template_id().clone(),
                            terrain_id: terrain_id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Expands templates into stamp instances, largest `min_on_floor` first.
    fn instances(&self, rng: &mut StdRng) -> Vec<&'a Template> {
        let mut instances = Vec::new();
        for template in self.templates {
            let count = match template.max_on_floor() {
                Some(max) => rng.gen_range(template.min_on_floor()..=max),
                None => template.min_on_floor(),
            };
            for _ in 0..count {
                instances.push(template);
            }
        }
        instances.sort_by_key(|template| Reverse(template.min_on_floor()));
        instances
    }

    fn choose_window(
        &self,
        occupied: &[bool],
        template: &Template,
        rng: &mut StdRng,
    ) -> Result<Pos, MapgenError> {
        let width = self.plan.width();
        let height = self.plan.height();
        let t_width = template.width();
        let t_height = template.height();

        let mut windows = Vec::new();
        if t_width <= width && t_height <= height {
            for y in 0..=(height - t_height) {
                'window: for x in 0..=(width - t_width) {
                    for wy in y..(y + t_height) {
                        for wx in x..(x + t_width) {
                            if occupied[wy * width + wx] {
                                continue 'window;
                            }
                        }
                    }
                    windows.push(Pos::new(x, y));
                }
            }
        }

        if windows.is_empty() {
            return Err(MapgenError::NoSpaceForTemplate {
                template_id: template.template_id().clone(),
            });
        }
        Ok(windows[rng.gen_range(0..windows.len())])
    }

    /// Template-local entrances that survive pruning.
    fn kept_entrances(
        &self,
        template: &Template,
        entrance_id: &TerrainId,
        rng: &mut StdRng,
    ) -> Result<Vec<Pos>, MapgenError> {
        let mut entrances = template.positions_bound_to(entrance_id);
        if entrances.is_empty() {
            return Err(MapgenError::TemplateHasNoEntrance {
                template_id: template.template_id().clone(),
            });
        }

        let found = entrances.len() as u32;
        if found < template.min_entrances() {
            return Err(MapgenError::TooFewEntrances {
                template_id: template.template_id().clone(),
                required: template.min_entrances(),
                found,
            });
        }

        while entrances.len() as u32 > template.max_entrances() {
            let index = rng.gen_range(0..entrances.len());
            entrances.remove(index);
        }

        Ok(entrances)
    }
}

fn resolve_def<'a>(
    template_id: &TemplateId,
    def: &'a TerrainDef,
    rng: &mut StdRng,
) -> Result<&'a TerrainId, MapgenError> {
    match def {
        TerrainDef::Terrain(terrain_id) => Ok(terrain_id),
        TerrainDef::Union(members) => {
            if members.is_empty() {
                return Err(MapgenError::EmptyUnion {
                    template_id: template_id.clone(),
                });
            }
            let member = &members[rng.gen_range(0..members.len())];
            resolve_def(template_id, member, rng)
        }
    }
}

/// Picks where the player starts: a random empty tile with no wall among
/// its eight neighbours when one exists, otherwise any empty tile.
pub fn spawn_position(
    floor: &Floor,
    rng: &mut StdRng,
) -> Result<Pos, MapgenError> {
    let grid = floor.grid();
    let empties = grid.positions_of(EMPTY_INDEX);
    if empties.is_empty() {
        return Err(MapgenError::NoEmptyTile);
    }

    let width = grid.width();
    let height = grid.height();
    let clear_of_walls = |pos: &Pos| {
        crate::model::Direction::ALL.iter().all(|direction| {
            match pos.step(*direction, width, height) {
                Some(neighbor) => grid.get(neighbor) != Ok(WALL_INDEX),
                // The grid edge counts as wall.
                None => false,
            }
        })
    };

    let preferred = empties
        .par_iter()
        .filter(|pos| clear_of_walls(pos))
        .copied()
        .collect::<Vec<_>>();

    let pool = if preferred.is_empty() { &empties } else { &preferred };
    Ok(pool[rng.gen_range(0..pool.len())])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapgenError {
    Grid(GridError),
    Palette(PaletteError),
    UnknownTerrain {
        template_id: TemplateId,
        terrain_id: TerrainId,
    },
    EmptyUnion {
        template_id: TemplateId,
    },
    NoSpaceForTemplate {
        template_id: TemplateId,
    },
    TemplateHasNoEntrance {
        template_id: TemplateId,
    },
    TooFewEntrances {
        template_id: TemplateId,
        required: u32,
        found: u32,
    },
    NoEmptyTile,
}

impl fmt::Display for MapgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(err) => err.fmt(f),
            Self::Palette(err) => err.fmt(f),
            Self::UnknownTerrain {
                template_id,
                terrain_id,
            } => write!(
                f,
                "template '{template_id}' references unknown terrain '{terrain_id}'"
            ),
            Self::EmptyUnion { template_id } => {
                write!(f, "template '{template_id}' has an empty terrain union")
            }
            Self::NoSpaceForTemplate { template_id } => {
                write!(f, "no space left to place template '{template_id}'")
            }
            Self::TemplateHasNoEntrance { template_id } => {
                write!(f, "template '{template_id}' has no entrance")
            }
            Self::TooFewEntrances {
                template_id,
                required,
                found,
            } => write!(
                f,
                "template '{template_id}' needs at least {required} entrances, found {found}"
            ),
            Self::NoEmptyTile => f.write_str("the floor has no empty tile to start on"),
        }
    }
}

impl std::error::Error for MapgenError {}

impl From<GridError> for MapgenError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<PaletteError> for MapgenError {
    fn from(err: PaletteError) -> Self {
        Self::Palette(err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::model::{
        FloorId, FloorPlan, LevelId, Template, TemplateId, TerrainCatalog, TerrainDef, TerrainId,
        EMPTY_INDEX, WALL_INDEX,
    };
    use crate::model::Pos;

    use super::{spawn_position, FloorBuilder, MapgenError};

    fn plan(width: usize, height: usize) -> FloorPlan {
        FloorPlan::new(
            LevelId::new("depths").expect("level id"),
            FloorId::new("1").expect("floor id"),
            width,
            height,
        )
    }

    fn standard_symbols() -> BTreeMap<char, TerrainDef> {
        let mut symbols = BTreeMap::new();
        for (glyph, name) in [('#', "wall"), ('.', "empty"), ('+', "entrance"), (' ', "unknown")]
        {
            symbols.insert(
                glyph,
                TerrainDef::Terrain(TerrainId::new(name).expect("terrain id")),
            );
        }
        symbols
    }

    fn room_template(id: &str, lines: &[&str], max_entrances: u32) -> Template {
        Template::new(
            TemplateId::new(id).expect("template id"),
            lines.iter().map(|line| line.chars().collect()).collect(),
            standard_symbols(),
            1,
            None,
            1,
            max_entrances,
        )
        .expect("template")
    }

    fn small_room(id: &str) -> Template {
        room_template(id, &["#####", "#...+", "#...#", "#####"], 1)
    }

    #[test]
    fn same_seed_same_floor() {
        let plan = plan(32, 24);
        let templates = vec![small_room("a"), small_room("b")];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);

        let first = builder.build(&mut StdRng::seed_from_u64(7)).expect("floor");
        let second = builder.build(&mut StdRng::seed_from_u64(7)).expect("floor");
        assert_eq!(first, second);
    }

    #[test]
    fn border_stays_wall() {
        let plan = plan(24, 16);
        let templates = vec![small_room("a")];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let floor = builder.build(&mut StdRng::seed_from_u64(3)).expect("floor");

        let grid = floor.grid();
        for x in 0..grid.width() {
            assert_eq!(grid.get(Pos::new(x, 0)).unwrap(), WALL_INDEX);
            assert_eq!(grid.get(Pos::new(x, grid.height() - 1)).unwrap(), WALL_INDEX);
        }
        for y in 0..grid.height() {
            assert_eq!(grid.get(Pos::new(0, y)).unwrap(), WALL_INDEX);
            assert_eq!(grid.get(Pos::new(grid.width() - 1, y)).unwrap(), WALL_INDEX);
        }
    }

    #[test]
    fn entrances_end_up_connected_by_empty_corridors() {
        let plan = plan(40, 30);
        let templates = vec![small_room("a"), small_room("b"), small_room("c")];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let floor = builder.build(&mut StdRng::seed_from_u64(11)).expect("floor");

        assert_eq!(floor.entrances().len(), 3);
        for entrance in floor.entrances() {
            assert_eq!(floor.grid().get(*entrance).unwrap(), EMPTY_INDEX);
        }

        // Flood fill over empty tiles from the first entrance reaches the rest.
        let grid = floor.grid();
        let mut reached = vec![false; grid.width() * grid.height()];
        let start = floor.entrances()[0];
        let mut queue = vec![start];
        reached[start.y * grid.width() + start.x] = true;
        while let Some(pos) = queue.pop() {
            for direction in crate::model::Direction::ALL {
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
            assert!(reached[entrance.y * grid.width() + entrance.x]);
        }
    }

    #[test]
    fn surplus_entrances_are_sealed() {
        let plan = plan(24, 16);
        let templates = vec![room_template(
            "doors",
            &["##+##", "+...+", "##+##"],
            1,
        )];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let floor = builder.build(&mut StdRng::seed_from_u64(5)).expect("floor");

        // Four entrance tiles in the template, one kept.
        assert_eq!(floor.entrances().len(), 1);
    }

    #[test]
    fn no_space_is_an_error() {
        let plan = plan(8, 8);
        // Interior is 6x6; a 7-wide template cannot fit.
        let templates = vec![room_template("wide", &["#######", "#....+#", "#######"], 1)];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let err = builder.build(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, MapgenError::NoSpaceForTemplate { .. }));
    }

    #[test]
    fn template_without_entrance_is_an_error() {
        let plan = plan(24, 16);
        let templates = vec![room_template("sealed", &["###", "#.#", "###"], 1)];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let err = builder.build(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, MapgenError::TemplateHasNoEntrance { .. }));
    }

    #[test]
    fn unknown_terrain_is_reported_before_building() {
        let plan = plan(24, 16);
        let mut symbols = standard_symbols();
        symbols.insert(
            'm',
            TerrainDef::Terrain(TerrainId::new("depths.moss").expect("id")),
        );
        let templates = vec![Template::new(
            TemplateId::new("mossy").expect("id"),
            vec![vec!['#', 'm', '+']],
            symbols,
            1,
            None,
            1,
            1,
        )
        .expect("template")];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let err = builder.build(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, MapgenError::UnknownTerrain { .. }));
    }

    #[test]
    fn unions_resolve_to_members() {
        let plan = plan(24, 16);
        let mut symbols = standard_symbols();
        symbols.insert(
            '~',
            TerrainDef::Union(vec![
                TerrainDef::Terrain(TerrainId::new("wall").expect("id")),
                TerrainDef::Terrain(TerrainId::new("empty").expect("id")),
            ]),
        );
        let templates = vec![Template::new(
            TemplateId::new("rubble").expect("id"),
            vec![
                "#####".chars().collect(),
                "#~~~+".chars().collect(),
                "#####".chars().collect(),
            ],
            symbols,
            1,
            None,
            1,
            1,
        )
        .expect("template")];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let floor = builder.build(&mut StdRng::seed_from_u64(2)).expect("floor");

        // Every stamped tile resolved to wall or empty; the palette grew no
        // further than the reserved entries plus entrance/unknown.
        for id in floor.palette().terrain_ids() {
            assert!(matches!(
                id.as_str(),
                "wall" | "empty" | "entrance" | "unknown"
            ));
        }
    }

    #[test]
    fn spawn_prefers_open_ground() {
        let plan = plan(32, 24);
        let templates = vec![room_template(
            "hall",
            &[
                "#########",
                "#.......+",
                "#.......#",
                "#.......#",
                "#.......#",
                "#########",
            ],
            1,
        )];
        let catalog = TerrainCatalog::default();
        let builder = FloorBuilder::new(&plan, &templates, &catalog);
        let floor = builder.build(&mut StdRng::seed_from_u64(9)).expect("floor");

        let mut rng = StdRng::seed_from_u64(9);
        let spawn = spawn_position(&floor, &mut rng).expect("spawn");
        assert_eq!(floor.grid().get(spawn).unwrap(), EMPTY_INDEX);

        // The hall interior is wide enough that a wall-free-neighbourhood
        // tile exists, so the preferred pool must have been used.
        for direction in crate::model::Direction::ALL {
            let neighbor = spawn
                .step(direction, floor.grid().width(), floor.grid().height())
                .expect("spawn is interior");
            assert_ne!(floor.grid().get(neighbor).unwrap(), WALL_INDEX);
        }
    }
}
