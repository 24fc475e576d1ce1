use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Unit direction from `other` to `self`, if the two cells are orthogonal neighbours
    pub fn direction_from(&self, other: Position) -> Option<Direction> {
        Direction::from_delta(self.x - other.x, self.y - other.y)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction the snake moved on its last step
    pub direction: Direction,
}

impl Snake {
    /// Create a snake whose body trails straight behind `head`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut snake = Self {
            body: vec![head],
            direction,
        };

        for _ in 1..length {
            snake.add_segment();
        }

        snake
    }

    /// Build a snake from an explicit body, head first.
    ///
    /// The direction is taken from the first two cells; a single-cell body
    /// faces right.
    pub fn from_body(body: Vec<Position>) -> Self {
        let direction = match body.as_slice() {
            [head, neck, ..] => head.direction_from(*neck).unwrap_or(Direction::Right),
            _ => Direction::Right,
        };
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is occupied by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Cell one past the tail, continuing the line formed by the last two segments
    pub fn extension_cell(&self) -> Position {
        let tail = self.tail();
        match self.body.len() {
            0 | 1 => tail.moved_in_direction(self.direction.opposite()),
            n => {
                let before_tail = self.body[n - 2];
                tail.moved_by(tail.x - before_tail.x, tail.y - before_tail.y)
            }
        }
    }

    /// Extend the snake by one cell past its tail. Returns the new tail.
    ///
    /// No bounds or occupancy checks; see `SnakeSimulation::add_segment`.
    pub fn add_segment(&mut self) -> Position {
        let new_tail = self.extension_cell();
        self.body.push(new_tail);
        new_tail
    }

    /// Move to `new_head`, growing if should_grow is true
    pub fn advance(&mut self, new_head: Position, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True when every pair of consecutive segments are orthogonal neighbours
    pub fn is_contiguous(&self) -> bool {
        self.body
            .windows(2)
            .all(|pair| pair[0].manhattan_distance(pair[1]) == 1)
    }

    /// True when no two segments share a cell
    pub fn is_self_disjoint(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .all(|(i, pos)| !self.body[i + 1..].contains(pos))
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Head left the grid
    Bounds,
    /// Head ran into the snake's own body
    SelfCollision,
    /// Head ran into a wall tile
    Obstacle,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    GameOver(CollisionType),
    /// No free cell was left to place food in.
    Cleared,
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board has been filled
    pub food: Option<Position>,
    /// Direction to apply on the next step
    pub pending_direction: Direction,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, grid_width: usize, grid_height: usize) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            status: GameStatus::Playing,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 4));
    }

    #[test]
    fn test_direction_from() {
        let pos = Position::new(3, 3);
        assert_eq!(Position::new(4, 3).direction_from(pos), Some(Direction::Right));
        assert_eq!(Position::new(3, 2).direction_from(pos), Some(Direction::Down));
        assert_eq!(Position::new(5, 3).direction_from(pos), None);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(3, 3), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.body,
            vec![Position::new(3, 3), Position::new(2, 3), Position::new(1, 3)]
        );
        assert!(snake.is_contiguous());
        assert!(snake.is_self_disjoint());
    }

    #[test]
    fn test_add_segment_continues_tail_line() {
        // Tail runs downwards: (2,2) -> (2,1)
        let mut snake = Snake::from_body(vec![
            Position::new(3, 2),
            Position::new(2, 2),
            Position::new(2, 1),
        ]);

        let added = snake.add_segment();

        assert_eq!(added, Position::new(2, 0));
        assert_eq!(snake.tail(), Position::new(2, 0));
        assert_eq!(snake.len(), 4);
        assert!(snake.is_contiguous());
    }

    #[test]
    fn test_add_segment_on_single_cell_trails_behind() {
        let mut snake = Snake::new(Position::new(3, 3), Direction::Up, 1);
        assert_eq!(snake.add_segment(), Position::new(3, 2));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(3, 3), Direction::Right, 3);

        snake.advance(Position::new(4, 3), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(4, 3));
        assert_eq!(snake.tail(), Position::new(2, 3));

        snake.advance(Position::new(5, 3), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(2, 3));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }

    #[test]
    fn test_self_disjoint_detects_overlap() {
        let snake = Snake::from_body(vec![
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(1, 1),
        ]);
        assert!(!snake.is_self_disjoint());
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(3, 3), Direction::Right, 3),
            Some(Position::new(5, 5)),
            7,
            7,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(6, 6)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(7, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 7)));
    }
}
