use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{
    CollisionType, Direction, GameStatus, Placement, Position, SegmentSprite, SnakeSimulation,
    SpriteKind,
};
use crate::metrics::GameMetrics;

/// Direction a sprite's rotation points it at; inverse of `Direction::angle_degrees`.
fn facing(rotation: f32) -> Direction {
    match rotation.round() as i32 {
        -90 | 270 => Direction::Right,
        180 | -180 => Direction::Down,
        90 | -270 => Direction::Left,
        _ => Direction::Up,
    }
}

/// Terminal glyph standing in for a sprite.
pub fn sprite_glyph(sprite: &SegmentSprite) -> char {
    match sprite.kind {
        SpriteKind::Head => match facing(sprite.rotation) {
            Direction::Up => '▲',
            Direction::Right => '▶',
            Direction::Down => '▼',
            Direction::Left => '◀',
        },
        SpriteKind::Body => match facing(sprite.rotation) {
            Direction::Up | Direction::Down => '║',
            Direction::Left | Direction::Right => '═',
        },
        // Points back towards the rest of the body
        SpriteKind::Tail => match facing(sprite.rotation) {
            Direction::Up => '╹',
            Direction::Right => '╺',
            Direction::Down => '╻',
            Direction::Left => '╸',
        },
        SpriteKind::Turn => match (sprite.flip_x, sprite.flip_y) {
            (false, false) => '╚',
            (true, false) => '╝',
            (false, true) => '╔',
            (true, true) => '╗',
        },
        SpriteKind::Food => '●',
    }
}

fn glyph_style(kind: SpriteKind) -> Style {
    match kind {
        SpriteKind::Head => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        SpriteKind::Food => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Green),
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, sim: &SnakeSimulation, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(sim, metrics), chunks[0]);

        let board_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match sim.status() {
            GameStatus::Playing => frame.render_widget(self.render_grid(sim), board_area),
            status => frame.render_widget(self.render_game_over(sim, status), board_area),
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Board rows, top row first. Grid y grows upward so rows run from y = height - 1.
    pub fn grid_lines(&self, sim: &SnakeSimulation) -> Vec<Line<'static>> {
        let config = sim.config();
        let placements: HashMap<Position, Placement> = sim
            .placements()
            .into_iter()
            .map(|placement| (placement.cell, placement))
            .collect();

        (0..config.grid_height as i32)
            .rev()
            .map(|y| {
                let spans: Vec<Span> = (0..config.grid_width as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if let Some(placement) = placements.get(&pos) {
                            Span::styled(
                                format!("{} ", sprite_glyph(&placement.sprite)),
                                glyph_style(placement.sprite.kind),
                            )
                        } else if sim.is_obstacle(pos) {
                            Span::styled("█ ", Style::default().fg(Color::Gray))
                        } else {
                            Span::styled("· ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_grid(&self, sim: &SnakeSimulation) -> Paragraph<'static> {
        Paragraph::new(self.grid_lines(sim))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, sim: &SnakeSimulation, metrics: &GameMetrics) -> Paragraph<'static> {
        Paragraph::new(vec![self.stats_line(sim, metrics)]).alignment(Alignment::Center)
    }

    /// Header text: score, length, steps, best score and game clock
    pub fn stats_line(&self, sim: &SnakeSimulation, metrics: &GameMetrics) -> Line<'static> {
        let state = sim.state();
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])
    }

    fn render_game_over(&self, sim: &SnakeSimulation, status: GameStatus) -> Paragraph<'static> {
        let (title, reason, color) = match status {
            GameStatus::Cleared => ("BOARD CLEARED", "No room left for food", Color::Green),
            GameStatus::GameOver(CollisionType::Bounds) => ("GAME OVER", "Left the board", Color::Red),
            GameStatus::GameOver(CollisionType::SelfCollision) => {
                ("GAME OVER", "Ran into yourself", Color::Red)
            }
            GameStatus::GameOver(CollisionType::Obstacle) => ("GAME OVER", "Hit a wall", Color::Red),
            GameStatus::Playing => ("", "", Color::White),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    sim.state().score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        Paragraph::new(vec![self.controls_line()]).alignment(Alignment::Center)
    }

    pub fn controls_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart after a game | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Snake};

    fn row_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_head_glyph_follows_rotation() {
        let head = |rotation| SegmentSprite {
            kind: SpriteKind::Head,
            rotation,
            flip_x: false,
            flip_y: false,
        };
        assert_eq!(sprite_glyph(&head(0.0)), '▲');
        assert_eq!(sprite_glyph(&head(-90.0)), '▶');
        assert_eq!(sprite_glyph(&head(180.0)), '▼');
        assert_eq!(sprite_glyph(&head(90.0)), '◀');
    }

    #[test]
    fn test_turn_glyph_follows_flips() {
        let turn = |flip_x, flip_y| SegmentSprite {
            kind: SpriteKind::Turn,
            rotation: 0.0,
            flip_x,
            flip_y,
        };
        assert_eq!(sprite_glyph(&turn(false, false)), '╚');
        assert_eq!(sprite_glyph(&turn(true, false)), '╝');
        assert_eq!(sprite_glyph(&turn(false, true)), '╔');
        assert_eq!(sprite_glyph(&turn(true, true)), '╗');
    }

    #[test]
    fn test_grid_lines_draw_top_row_first() {
        let config = GameConfig {
            grid_width: 4,
            grid_height: 2,
            initial_snake_length: 2,
            walls: vec![Position::new(3, 1)],
            seed: Some(1),
            ..Default::default()
        };
        let mut sim = SnakeSimulation::with_config_walls(config);
        sim.set_layout(
            Snake::from_body(vec![Position::new(1, 0), Position::new(0, 0)]),
            Some(Position::new(0, 1)),
        );

        let lines = Renderer::new().grid_lines(&sim);

        assert_eq!(lines.len(), 2);
        assert_eq!(row_text(&lines[0]), "● · · █ ");
        assert_eq!(row_text(&lines[1]), "╺ ▶ · · ");
    }

    #[test]
    fn test_stats_line_reports_steps() {
        let mut sim = SnakeSimulation::new(GameConfig {
            seed: Some(1),
            ..Default::default()
        });
        sim.step();
        sim.step();

        let text = row_text(&Renderer::new().stats_line(&sim, &GameMetrics::new()));

        assert!(text.contains("Steps: 2"), "{text}");
        assert!(text.contains("Length: "), "{text}");
    }

    #[test]
    fn test_footer_mentions_restart() {
        let text = row_text(&Renderer::new().controls_line());
        assert!(text.contains("R to restart"), "{text}");
        assert!(text.contains("Q to quit"), "{text}");
    }
}
