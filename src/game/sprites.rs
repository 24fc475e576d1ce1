//! Sprite selection for snake segments.
//!
//! Everything here is a pure function of the body layout: a segment's sprite
//! depends only on where its neighbours sit.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;
use super::world::WorldPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Head,
    Body,
    Turn,
    Tail,
    Food,
}

/// Sprite plus the transform the renderer applies to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentSprite {
    pub kind: SpriteKind,
    /// Rotation about the view axis in degrees
    pub rotation: f32,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl SegmentSprite {
    fn upright(kind: SpriteKind, rotation: f32) -> Self {
        Self {
            kind,
            rotation,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// One visual entity for the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub cell: Position,
    pub world: WorldPoint,
    pub sprite: SegmentSprite,
}

/// Rotation for the vector `to - from`; anything but a unit step maps to 0.
pub fn angle_between(to: Position, from: Position) -> f32 {
    to.direction_from(from)
        .map(|direction| direction.angle_degrees())
        .unwrap_or(0.0)
}

/// Corner piece for a segment entered along `from` and left along `to`.
///
/// The base sprite joins Up and Right; the other three corners are mirrors of
/// it. A pair and its reverse share a sprite.
pub fn turn_sprite(from: Direction, to: Direction) -> SegmentSprite {
    use Direction::*;

    let (flip_x, flip_y) = match (from, to) {
        (Up, Right) | (Right, Up) => (false, false),
        (Down, Right) | (Right, Down) => (false, true),
        (Up, Left) | (Left, Up) => (true, false),
        (Down, Left) | (Left, Down) => (true, true),
        // Straight or reversed: not a corner
        _ => (false, false),
    };

    SegmentSprite {
        kind: SpriteKind::Turn,
        rotation: 0.0,
        flip_x,
        flip_y,
    }
}

/// Sprite for every segment of `body`, head first.
pub fn segment_sprites(body: &[Position]) -> Vec<SegmentSprite> {
    let n = body.len();

    (0..n)
        .map(|i| {
            if i == 0 {
                let rotation = if n > 1 { angle_between(body[0], body[1]) } else { 0.0 };
                SegmentSprite::upright(SpriteKind::Head, rotation)
            } else if i == n - 1 {
                SegmentSprite::upright(SpriteKind::Tail, angle_between(body[i - 1], body[i]))
            } else {
                let prev = body[i - 1].direction_from(body[i]);
                let next = body[i].direction_from(body[i + 1]);
                match (prev, next) {
                    (Some(prev), Some(next)) if prev != next => turn_sprite(prev, next),
                    _ => SegmentSprite::upright(SpriteKind::Body, angle_between(body[i - 1], body[i])),
                }
            }
        })
        .collect()
}
