use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    obstacles::{NoObstacles, ObstacleMap},
    sprites::{Placement, SegmentSprite, SpriteKind, segment_sprites},
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};

/// Random draws per food placement before falling back to a full scan
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Result of a single movement step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Status after the step
    pub status: GameStatus,
}

impl StepResult {
    fn idle(status: GameStatus) -> Self {
        Self {
            ate_food: false,
            collision: None,
            status,
        }
    }

    pub fn terminated(&self) -> bool {
        !self.status.is_playing()
    }
}

/// Owns one game of Snake and everything needed to advance it.
///
/// The host calls [`set_direction`](Self::set_direction) for input,
/// [`tick`](Self::tick) once per frame, and reads back
/// [`placements`](Self::placements) to draw.
pub struct SnakeSimulation {
    config: GameConfig,
    obstacles: Box<dyn ObstacleMap>,
    rng: StdRng,
    state: GameState,
    move_timer: Duration,
}

impl SnakeSimulation {
    /// Simulation on an open board, walls from the config are ignored
    pub fn new(config: GameConfig) -> Self {
        Self::with_obstacles(config, NoObstacles)
    }

    /// Simulation whose walls come from the config's tile layer
    pub fn with_config_walls(config: GameConfig) -> Self {
        let tilemap = config.tilemap();
        Self::with_obstacles(config, tilemap)
    }

    pub fn with_obstacles<O>(config: GameConfig, obstacles: O) -> Self
    where
        O: ObstacleMap + 'static,
    {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = config.starting_snake();
        let state = GameState::new(snake, None, config.grid_width, config.grid_height);

        let mut sim = Self {
            config,
            obstacles: Box::new(obstacles),
            rng,
            state,
            move_timer: Duration::ZERO,
        };
        sim.start_new_game();
        sim
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Discard the current game and lay out a fresh one
    pub fn start_new_game(&mut self) {
        let snake = self.config.starting_snake();
        self.state = GameState::new(
            snake,
            None,
            self.config.grid_width,
            self.config.grid_height,
        );
        self.move_timer = Duration::ZERO;
        self.spawn_food();

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            head = ?self.state.snake.head(),
            "new game started"
        );
    }

    /// Queue a turn for the next step.
    ///
    /// Reversals relative to the direction of the last step are ignored; a
    /// later request before the next step replaces an earlier one.
    pub fn set_direction(&mut self, requested: Direction) {
        if !self.state.status.is_playing() {
            return;
        }
        if requested.is_opposite(self.state.snake.direction) {
            debug!(?requested, current = ?self.state.snake.direction, "reverse turn ignored");
            return;
        }
        self.state.pending_direction = requested;
    }

    /// Advance the move timer by one frame's worth of time
    pub fn tick(&mut self, elapsed: Duration) -> Option<StepResult> {
        if !self.state.status.is_playing() {
            return None;
        }

        self.move_timer += elapsed;
        if self.move_timer >= self.config.move_interval() {
            self.move_timer = Duration::ZERO;
            Some(self.step())
        } else {
            None
        }
    }

    /// Execute one movement step
    pub fn step(&mut self) -> StepResult {
        if !self.state.status.is_playing() {
            return StepResult::idle(self.state.status);
        }

        let direction = self.state.pending_direction;
        self.state.snake.direction = direction;
        let new_head = self.state.snake.head().moved_in_direction(direction);
        self.state.steps += 1;

        if let Some(collision) = self.check_collision(new_head) {
            self.state.status = GameStatus::GameOver(collision);
            info!(
                ?collision,
                score = self.state.score,
                length = self.state.snake.len(),
                "game over"
            );
            return StepResult {
                ate_food: false,
                collision: Some(collision),
                status: self.state.status,
            };
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            self.state.score += 1;
            debug!(length = self.state.snake.len(), "food eaten");
            self.spawn_food();
        }

        StepResult {
            ate_food,
            collision: None,
            status: self.state.status,
        }
    }

    /// Whether a cell holds a wall tile
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.is_obstacle(self.config.grid_to_world(pos))
    }

    fn is_free(&self, pos: Position) -> bool {
        !self.state.is_occupied_by_snake(pos) && !self.is_obstacle(pos)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Bounds);
        }

        // The tail still occupies its cell until the move completes
        if self.state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if self.is_obstacle(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Place food on a random free cell, or mark the board cleared if none is left
    pub fn spawn_food(&mut self) -> Option<Position> {
        let width = self.config.grid_width as i32;
        let height = self.config.grid_height as i32;

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let pos = Position::new(self.rng.gen_range(0..width), self.rng.gen_range(0..height));
            if self.is_free(pos) {
                self.state.food = Some(pos);
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|pos| self.is_free(*pos))
            .collect();

        if free.is_empty() {
            warn!(length = self.state.snake.len(), "no free cell left for food");
            self.state.food = None;
            self.state.status = GameStatus::Cleared;
            return None;
        }

        let pos = free[self.rng.gen_range(0..free.len())];
        debug!(free = free.len(), "food placed by full scan");
        self.state.food = Some(pos);
        Some(pos)
    }

    /// Grow the snake by one cell past its tail.
    ///
    /// Refused (`None`) when that cell is off the grid, a wall or part of the
    /// snake. Food under the new tail is moved elsewhere.
    pub fn add_segment(&mut self) -> Option<Position> {
        let cell = self.state.snake.extension_cell();
        if !self.state.is_in_bounds(cell) || !self.is_free(cell) {
            debug!(?cell, "segment refused");
            return None;
        }

        self.state.snake.add_segment();
        if self.state.food == Some(cell) {
            self.spawn_food();
        }
        Some(cell)
    }

    /// Sprites for the snake, head first
    pub fn segment_sprites(&self) -> Vec<SegmentSprite> {
        segment_sprites(&self.state.snake.body)
    }

    /// Everything the renderer needs: snake segments head first, then food
    pub fn placements(&self) -> Vec<Placement> {
        let mut placements: Vec<Placement> = self
            .state
            .snake
            .body
            .iter()
            .zip(self.segment_sprites())
            .map(|(cell, sprite)| Placement {
                cell: *cell,
                world: self.config.grid_to_world(*cell),
                sprite,
            })
            .collect();

        if let Some(food) = self.state.food {
            placements.push(Placement {
                cell: food,
                world: self.config.grid_to_world(food),
                sprite: SegmentSprite {
                    kind: SpriteKind::Food,
                    rotation: 0.0,
                    flip_x: false,
                    flip_y: false,
                },
            });
        }

        placements
    }

    /// Replace the snake and food; for hosts restoring a layout and for tests
    pub fn set_layout(&mut self, snake: Snake, food: Option<Position>) {
        self.state = GameState::new(snake, food, self.config.grid_width, self.config.grid_height);
        self.move_timer = Duration::ZERO;
    }
}
