//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts drive a [`SnakeSimulation`] and draw the [`Placement`]s it hands back.

pub mod config;
pub mod direction;
pub mod engine;
pub mod obstacles;
pub mod sprites;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{SnakeSimulation, StepResult};
pub use obstacles::{NoObstacles, ObstacleMap, Tilemap};
pub use sprites::{Placement, SegmentSprite, SpriteKind};
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
pub use world::{WorldPoint, grid_to_world};
