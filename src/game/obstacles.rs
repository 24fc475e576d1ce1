//! Wall lookup supplied by the host.
//!
//! The simulation only ever asks "is there a wall at this world point?".
//! [`Tilemap`] answers that the way a tile layer does: convert the point to a
//! tile cell, then check whether that cell holds a tile.

use std::collections::HashSet;

use super::state::Position;
use super::world::WorldPoint;

/// Slack added before flooring so a cell's own anchor never lands in the
/// neighbouring cell because of float rounding.
const CELL_EPSILON: f32 = 1e-4;

/// Answers whether a world position is blocked.
pub trait ObstacleMap {
    fn is_obstacle(&self, world: WorldPoint) -> bool;
}

impl<F> ObstacleMap for F
where
    F: Fn(WorldPoint) -> bool,
{
    fn is_obstacle(&self, world: WorldPoint) -> bool {
        self(world)
    }
}

/// An empty level.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObstacles;

impl ObstacleMap for NoObstacles {
    fn is_obstacle(&self, _world: WorldPoint) -> bool {
        false
    }
}

/// A sparse layer of wall tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    origin: WorldPoint,
    tile_width: f32,
    tile_height: f32,
    tiles: HashSet<(i32, i32)>,
}

impl Tilemap {
    pub fn new(origin: WorldPoint, tile_width: f32, tile_height: f32) -> Self {
        Self {
            origin,
            tile_width,
            tile_height,
            tiles: HashSet::new(),
        }
    }

    /// Build a tilemap from tile cells.
    pub fn with_tiles<I>(origin: WorldPoint, tile_width: f32, tile_height: f32, tiles: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut map = Self::new(origin, tile_width, tile_height);
        for cell in tiles {
            map.insert(cell);
        }
        map
    }

    pub fn insert(&mut self, cell: Position) -> bool {
        self.tiles.insert((cell.x, cell.y))
    }

    pub fn has_tile(&self, cell: Position) -> bool {
        self.tiles.contains(&(cell.x, cell.y))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile cell containing a world point.
    pub fn world_to_cell(&self, world: WorldPoint) -> Position {
        let x = ((world.x - self.origin.x) / self.tile_width + CELL_EPSILON).floor();
        let y = ((world.y - self.origin.y) / self.tile_height + CELL_EPSILON).floor();
        Position::new(x as i32, y as i32)
    }
}

impl ObstacleMap for Tilemap {
    fn is_obstacle(&self, world: WorldPoint) -> bool {
        self.has_tile(self.world_to_cell(world))
    }
}
