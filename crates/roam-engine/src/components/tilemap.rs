//! Tilemap component for grid-based floor and wall visuals.
//!
//! Tilemaps store a grid of atlas cells. Rendering is culled against the
//! camera viewport so large rooms only emit the visible tiles.

use crate::components::layer::RenderLayer;
use crate::components::sprite::AtlasId;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::RenderInstance;
use glam::Vec2;

/// A single tile in the tilemap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (1.0 = opaque).
    pub alpha: f32,
}

impl Tile {
    /// Create a new tile at the given atlas position.
    pub fn new(col: u32, row: u32) -> Self {
        Self {
            col: col as f32,
            row: row as f32,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Tilemap component for grid-based rendering.
///
/// Tiles are stored in row-major order: index = y * width + x.
/// The origin is the top-left corner of cell (0, 0); Y grows downward.
#[derive(Debug, Clone)]
pub struct TilemapComponent {
    /// Width of the tilemap in tiles.
    pub width: u32,
    /// Height of the tilemap in tiles.
    pub height: u32,
    /// Size of each tile in world units.
    pub tile_size: f32,
    /// Atlas containing the tile graphics.
    pub atlas: AtlasId,
    pub layer: RenderLayer,
    /// Position of the tilemap's top-left corner in world space.
    pub origin: Vec2,
    tiles: Vec<Option<Tile>>,
}

impl TilemapComponent {
    /// Create a new empty tilemap.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            tile_size,
            atlas: AtlasId(0),
            layer: RenderLayer::Floor,
            origin: Vec2::ZERO,
            tiles: vec![None; count],
        }
    }

    pub fn with_atlas(mut self, atlas: AtlasId) -> Self {
        self.atlas = atlas;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Get a tile at grid position (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[(y * self.width + x) as usize].as_ref()
    }

    /// Set a tile at grid position (x, y). Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, tile: Option<Tile>) {
        if x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize] = tile;
        }
    }

    /// World-space bounds of the tilemap as (min, max).
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = self.origin;
        let max = self.origin
            + Vec2::new(
                self.width as f32 * self.tile_size,
                self.height as f32 * self.tile_size,
            );
        (min, max)
    }

    /// Convert world position to tile grid coordinates.
    pub fn world_to_tile(&self, world_pos: Vec2) -> Option<(u32, u32)> {
        let local = world_pos - self.origin;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let tx = (local.x / self.tile_size) as u32;
        let ty = (local.y / self.tile_size) as u32;
        if tx >= self.width || ty >= self.height {
            return None;
        }
        Some((tx, ty))
    }

    /// Convert tile grid coordinates to world position (center of tile).
    pub fn tile_to_world(&self, x: u32, y: u32) -> Vec2 {
        let half = self.tile_size / 2.0;
        self.origin
            + Vec2::new(
                x as f32 * self.tile_size + half,
                y as f32 * self.tile_size + half,
            )
    }

    /// Append render instances for tiles overlapping the camera viewport.
    pub fn push_visible_instances(&self, camera: &Camera2D, out: &mut Vec<RenderInstance>) {
        let (cam_min, cam_max) = camera.view_rect();
        let local_min = cam_min - self.origin;
        let local_max = cam_max - self.origin;

        let min_tx = ((local_min.x / self.tile_size).floor() as i32).max(0) as u32;
        let min_ty = ((local_min.y / self.tile_size).floor() as i32).max(0) as u32;
        let max_tx = (((local_max.x / self.tile_size).ceil() as i32).max(0) as u32).min(self.width);
        let max_ty = (((local_max.y / self.tile_size).ceil() as i32).max(0) as u32).min(self.height);

        for ty in min_ty..max_ty {
            for tx in min_tx..max_tx {
                if let Some(tile) = self.get(tx, ty) {
                    let world_pos = self.tile_to_world(tx, ty);
                    out.push(RenderInstance {
                        x: world_pos.x,
                        y: world_pos.y,
                        z: 0.0,
                        size: self.tile_size,
                        col: tile.col,
                        row: tile.row,
                        alpha: tile.alpha,
                        atlas: self.atlas.0 as f32,
                    });
                }
            }
        }
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tilemap_is_empty() {
        let tm = TilemapComponent::new(10, 10, 32.0);
        assert_eq!(tm.tile_count(), 0);
        assert_eq!(tm.layer, RenderLayer::Floor);
    }

    #[test]
    fn set_and_get_tile() {
        let mut tm = TilemapComponent::new(5, 5, 16.0);
        tm.set(2, 3, Some(Tile::new(2, 3)));

        let got = tm.get(2, 3).unwrap();
        assert_eq!(got.col, 2.0);
        assert_eq!(got.row, 3.0);
        assert_eq!(tm.tile_count(), 1);
        assert!(tm.get(10, 10).is_none());
    }

    #[test]
    fn world_and_tile_coordinates_agree() {
        let tm = TilemapComponent::new(10, 10, 64.0).with_origin(Vec2::new(100.0, 200.0));

        let center = tm.tile_to_world(3, 2);
        assert!((center.x - (100.0 + 3.0 * 64.0 + 32.0)).abs() < 1e-3);
        assert!((center.y - (200.0 + 2.0 * 64.0 + 32.0)).abs() < 1e-3);
        assert_eq!(tm.world_to_tile(center), Some((3, 2)));
        assert!(tm.world_to_tile(Vec2::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn culling_emits_only_visible_tiles() {
        let mut tm = TilemapComponent::new(100, 100, 32.0);
        for y in 0..100 {
            for x in 0..100 {
                tm.set(x, y, Some(Tile::new(0, 0)));
            }
        }

        let mut camera = Camera2D::new(128.0, 128.0);
        camera.look_at(Vec2::new(64.0, 64.0));

        let mut out = Vec::new();
        tm.push_visible_instances(&camera, &mut out);
        assert!(out.len() >= 16);
        assert!(out.len() < 100);
    }

    #[test]
    fn bounds_span_all_cells() {
        let tm = TilemapComponent::new(10, 8, 32.0).with_origin(Vec2::new(50.0, 100.0));
        let (min, max) = tm.bounds();
        assert_eq!(min, Vec2::new(50.0, 100.0));
        assert_eq!(max, Vec2::new(370.0, 356.0));
    }
}
