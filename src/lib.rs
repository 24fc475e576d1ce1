//! Grid Snake - a grid-based Snake game
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, food, sprite selection
//! - Terminal host pieces: input mapping, ratatui rendering, session metrics
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
