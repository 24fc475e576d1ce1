use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::direction::Direction;
use super::obstacles::Tilemap;
use super::state::{Position, Snake};
use super::world::{WorldPoint, grid_to_world};

/// Reasons a configuration is rejected before a game starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("cell size must be positive, got {x}x{y}")]
    InvalidCellSize { x: f32, y: f32 },

    #[error("move interval must be greater than zero")]
    ZeroMoveInterval,

    #[error("initial snake length {length} does not fit (allowed 2..={max})")]
    InvalidSnakeLength { length: usize, max: usize },

    #[error("wall at ({x}, {y}) is outside the {width}x{height} grid")]
    WallOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("wall at ({x}, {y}) overlaps the starting snake")]
    WallOnStart { x: i32, y: i32 },

    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the game, fixed for the lifetime of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// World position of grid cell (0, 0)
    pub origin: WorldPoint,
    /// Width of one cell in world units
    pub cell_size_x: f32,
    /// Height of one cell in world units
    pub cell_size_y: f32,
    /// Time between movement steps
    pub move_interval_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Wall tiles, in the tile layer aligned with the grid
    pub walls: Vec<Position>,
    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 7,
            grid_height: 7,
            origin: WorldPoint::new(-100.0, -79.0),
            cell_size_x: 20.0,
            cell_size_y: 20.0,
            move_interval_ms: 250,
            initial_snake_length: 3,
            walls: Vec::new(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    /// Head cell of a fresh snake
    pub fn start_position(&self) -> Position {
        Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }

    /// Snake laid out at the start of every game
    pub fn starting_snake(&self) -> Snake {
        Snake::new(
            self.start_position(),
            Direction::Right,
            self.initial_snake_length,
        )
    }

    pub fn grid_to_world(&self, pos: Position) -> WorldPoint {
        grid_to_world(pos, self.origin, self.cell_size_x, self.cell_size_y)
    }

    /// Wall layer sharing the grid's origin and cell size
    pub fn tilemap(&self) -> Tilemap {
        Tilemap::with_tiles(
            self.origin,
            self.cell_size_x,
            self.cell_size_y,
            self.walls.iter().copied(),
        )
    }

    /// Check the configuration describes a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if !(self.cell_size_x > 0.0 && self.cell_size_y > 0.0) {
            return Err(ConfigError::InvalidCellSize {
                x: self.cell_size_x,
                y: self.cell_size_y,
            });
        }

        if self.move_interval_ms == 0 {
            return Err(ConfigError::ZeroMoveInterval);
        }

        // The body trails left from the centre column
        let max = self.grid_width / 2 + 1;
        if self.initial_snake_length < 2 || self.initial_snake_length > max {
            return Err(ConfigError::InvalidSnakeLength {
                length: self.initial_snake_length,
                max,
            });
        }

        let start = self.starting_snake();
        for wall in &self.walls {
            let in_bounds = wall.x >= 0
                && wall.x < self.grid_width as i32
                && wall.y >= 0
                && wall.y < self.grid_height as i32;
            if !in_bounds {
                return Err(ConfigError::WallOutOfBounds {
                    x: wall.x,
                    y: wall.y,
                    width: self.grid_width,
                    height: self.grid_height,
                });
            }
            if start.occupies(*wall) {
                return Err(ConfigError::WallOnStart {
                    x: wall.x,
                    y: wall.y,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 7);
        assert_eq!(config.grid_height, 7);
        assert_eq!(config.cell_size_x, 20.0);
        assert_eq!(config.move_interval(), Duration::from_millis(250));
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 11);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 11);
        assert_eq!(config.start_position(), Position::new(7, 5));
    }

    #[test]
    fn test_starting_snake_is_centred() {
        let snake = GameConfig::default().starting_snake();
        assert_eq!(
            snake.body,
            vec![Position::new(3, 3), Position::new(2, 3), Position::new(1, 3)]
        );
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "grid_width": 9, "walls": [{ "x": 0, "y": 0 }] }"#)
                .unwrap();
        assert_eq!(config.grid_width, 9);
        assert_eq!(config.grid_height, 7);
        assert_eq!(config.walls, vec![Position::new(0, 0)]);
        assert!(config.tilemap().has_tile(Position::new(0, 0)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ grid_width: 9 }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here/snake.json");
        let err = GameConfig::from_json_file(path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("grid_snake_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "grid_height": 12, "move_interval_ms": 100 }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.grid_height, 12);
        assert_eq!(config.move_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let empty = GameConfig::new(0, 7);
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyGrid { .. })));

        let flat = GameConfig {
            cell_size_y: 0.0,
            ..Default::default()
        };
        assert!(matches!(flat.validate(), Err(ConfigError::InvalidCellSize { .. })));

        let frozen = GameConfig {
            move_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(frozen.validate(), Err(ConfigError::ZeroMoveInterval)));

        let too_long = GameConfig {
            initial_snake_length: 5,
            ..Default::default()
        };
        assert!(matches!(
            too_long.validate(),
            Err(ConfigError::InvalidSnakeLength { length: 5, max: 4 })
        ));
    }

    #[test]
    fn test_validation_rejects_bad_walls() {
        let outside = GameConfig {
            walls: vec![Position::new(7, 0)],
            ..Default::default()
        };
        assert!(matches!(outside.validate(), Err(ConfigError::WallOutOfBounds { .. })));

        let on_start = GameConfig {
            walls: vec![Position::new(2, 3)],
            ..Default::default()
        };
        assert!(matches!(
            on_start.validate(),
            Err(ConfigError::WallOnStart { x: 2, y: 3 })
        ));
    }
}
