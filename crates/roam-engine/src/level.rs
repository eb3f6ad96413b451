//! ASCII room layouts.
//!
//! A level is authored as rows of symbols. The legend says what each symbol
//! is: a floor tile, a wall tile, or a spawn marker that the game replaces
//! with a real entity once the level is built.
//!
//! ```text
//! ##########
//! #..c..t..#
//! #...@....#
//! ##########
//! ```

use std::collections::HashMap;
use glam::Vec2;
use thiserror::Error;

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::sprite::AtlasId;
use crate::components::tilemap::{Tile, TilemapComponent};
use crate::core::scene::Scene;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};

/// Tag given to the merged wall collider entities.
pub const WALL_TAG: &str = "wall";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level map has no cells")]
    Empty,
    #[error("level has no '{0}' spawn marker")]
    MissingMarker(String),
    #[error("unknown symbol '{symbol}' at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
}

/// What a map symbol stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Floor(Tile),
    /// Drawn like floor, and blocks movement.
    Wall(Tile),
    /// A spawn marker, optionally drawn over a floor tile.
    Marker { name: String, floor: Option<Tile> },
}

/// Symbol → cell mapping. Space is always empty and cannot be remapped.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    cells: HashMap<char, Cell>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: char, cell: Cell) -> Self {
        self.cells.insert(symbol, cell);
        self
    }

    pub fn get(&self, symbol: char) -> Option<&Cell> {
        if symbol == ' ' {
            return None;
        }
        self.cells.get(&symbol)
    }
}

/// A room authored as ASCII rows.
#[derive(Debug, Clone)]
pub struct LevelMap {
    rows: Vec<Vec<char>>,
    legend: Legend,
    tile_size: f32,
    origin: Vec2,
    atlas: AtlasId,
    strict: bool,
}

/// Everything `LevelMap::build` produced.
#[derive(Debug, Clone)]
pub struct BuiltLevel {
    /// Floor and wall visuals.
    pub tilemap: TilemapComponent,
    /// World-space (min, max) of the whole map.
    pub bounds: (Vec2, Vec2),
    /// One entity per merged horizontal run of wall cells.
    pub walls: Vec<EntityId>,
    pub marker_count: usize,
}

impl LevelMap {
    pub fn new(rows: &[&str], legend: Legend, tile_size: f32) -> Self {
        Self {
            rows: rows.iter().map(|r| r.chars().collect()).collect(),
            legend,
            tile_size,
            origin: Vec2::ZERO,
            atlas: AtlasId(0),
            strict: false,
        }
    }

    /// World position of the top-left corner of cell (0, 0).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Atlas the floor and wall tiles are cut from.
    pub fn with_atlas(mut self, atlas: AtlasId) -> Self {
        self.atlas = atlas;
        self
    }

    /// Reject symbols missing from the legend instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Width in cells (the longest row).
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space centre of cell (x, y).
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        self.origin + Vec2::new((x as f32 + 0.5) * self.tile_size, (y as f32 + 0.5) * self.tile_size)
    }

    /// Lay the level out into `ctx`: tilemap visuals, wall colliders, spawn markers.
    pub fn build(&self, ctx: &mut EngineContext) -> Result<BuiltLevel, LevelError> {
        let width = self.width();
        let height = self.height();
        if width == 0 || height == 0 {
            return Err(LevelError::Empty);
        }
        if self.strict {
            self.check_symbols()?;
        }

        let mut tilemap = TilemapComponent::new(width as u32, height as u32, self.tile_size)
            .with_atlas(self.atlas)
            .with_origin(self.origin);
        let mut walls = Vec::new();
        let mut marker_count = 0;

        for (y, row) in self.rows.iter().enumerate() {
            let mut run_start: Option<usize> = None;

            for (x, &symbol) in row.iter().enumerate() {
                let cell = match self.legend.get(symbol) {
                    Some(cell) => Some(cell),
                    None if symbol == ' ' => None,
                    None => {
                        log::debug!("level: skipping unknown symbol '{}' at ({}, {})", symbol, x, y);
                        None
                    }
                };

                let is_wall = matches!(cell, Some(Cell::Wall(_)));
                match (is_wall, run_start) {
                    (true, None) => run_start = Some(x),
                    (false, Some(start)) => {
                        walls.push(self.spawn_wall_run(ctx, y, start, x));
                        run_start = None;
                    }
                    _ => {}
                }

                match cell {
                    Some(Cell::Floor(tile)) | Some(Cell::Wall(tile)) => {
                        tilemap.set(x as u32, y as u32, Some(*tile));
                    }
                    Some(Cell::Marker { name, floor }) => {
                        tilemap.set(x as u32, y as u32, *floor);
                        let id = ctx.next_id();
                        ctx.scene.spawn(Entity::marker(id, name, self.cell_center(x, y)));
                        marker_count += 1;
                    }
                    None => {}
                }
            }

            if let Some(start) = run_start {
                walls.push(self.spawn_wall_run(ctx, y, start, row.len()));
            }
        }

        log::debug!(
            "level built: {}x{} cells, {} tiles, {} wall runs, {} markers",
            width,
            height,
            tilemap.tile_count(),
            walls.len(),
            marker_count
        );

        Ok(BuiltLevel {
            bounds: tilemap.bounds(),
            tilemap,
            walls,
            marker_count,
        })
    }

    /// First symbol, in reading order, that the legend does not know.
    fn check_symbols(&self) -> Result<(), LevelError> {
        for (row, symbols) in self.rows.iter().enumerate() {
            for (col, &symbol) in symbols.iter().enumerate() {
                if symbol != ' ' && self.legend.get(symbol).is_none() {
                    return Err(LevelError::UnknownSymbol { symbol, row, col });
                }
            }
        }
        Ok(())
    }

    /// One blocking entity covering cells `start..end` of row `y`.
    fn spawn_wall_run(&self, ctx: &mut EngineContext, y: usize, start: usize, end: usize) -> EntityId {
        let first = self.cell_center(start, y);
        let last = self.cell_center(end - 1, y);
        let center = (first + last) / 2.0;
        let id = ctx.next_id();
        let entity = Entity::new(id).with_tag(WALL_TAG).with_pos(center);

        #[cfg(feature = "physics")]
        {
            let size = Vec2::new((end - start) as f32 * self.tile_size, self.tile_size);
            ctx.spawn_with_body(
                entity,
                BodyDesc::fixed(ColliderDesc::rect(size)),
                ColliderMaterial::default(),
            );
        }
        #[cfg(not(feature = "physics"))]
        ctx.scene.spawn(entity);

        id
    }
}

/// `Scene::take_markers`, failing when the level has no marker of that name.
pub fn require_marker(scene: &mut Scene, name: &str) -> Result<Vec<Vec2>, LevelError> {
    let positions = scene.take_markers(name);
    if positions.is_empty() {
        return Err(LevelError::MissingMarker(name.to_string()));
    }
    Ok(positions)
}
