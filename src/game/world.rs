//! Mapping between grid cells and host world coordinates.

use serde::{Deserialize, Serialize};

use super::state::Position;

/// A point in host world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// `origin + (x * cell_x, y * cell_y)`
pub fn grid_to_world(pos: Position, origin: WorldPoint, cell_x: f32, cell_y: f32) -> WorldPoint {
    WorldPoint {
        x: origin.x + pos.x as f32 * cell_x,
        y: origin.y + pos.y as f32 * cell_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_origin_maps_to_world_origin() {
        let origin = WorldPoint::new(-100.0, -79.0);
        assert_eq!(grid_to_world(Position::new(0, 0), origin, 20.0, 20.0), origin);
    }

    #[test]
    fn test_cell_sizes_scale_independently() {
        let origin = WorldPoint::new(-100.0, -79.0);
        let world = grid_to_world(Position::new(3, 2), origin, 20.0, 10.0);
        assert_eq!(world, WorldPoint::new(-40.0, -59.0));
    }
}
