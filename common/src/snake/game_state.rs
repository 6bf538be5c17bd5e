use crate::defaults::{INITIAL_SNAKE_LENGTH, MIN_LEVEL};
use crate::session_rng::RandomSource;
use super::food::FoodGenerator;
use super::power_up::PowerUp;
use super::settings::GameSettings;
use super::entity::Snake;
use super::types::{Direction, GameOverReason, Point, PowerUpType};

pub const INITIAL_DIRECTION: Direction = Direction::Up;

#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: Snake,
    pub food: Point,
    /// Direction applied on the last tick.
    pub direction: Direction,
    /// Direction the next tick will use.
    pub pending_direction: Direction,
    /// Base tick interval in milliseconds, before power-up modifiers.
    pub speed: u32,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// A paused game with the snake centred and heading up.
    pub fn initial(settings: &GameSettings, rng: &mut impl RandomSource) -> Self {
        let center = (settings.grid_size / 2) as i32;
        let snake = Snake::new(Point::new(center, center), INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH);
        let food = FoodGenerator::generate(settings.grid_size, &snake, rng);

        Self {
            snake,
            food,
            direction: INITIAL_DIRECTION,
            pending_direction: INITIAL_DIRECTION,
            speed: settings.initial_speed,
            score: 0,
            level: MIN_LEVEL,
            game_over: false,
            paused: true,
            game_over_reason: None,
        }
    }
}

/// Read-only copy of the state handed to renderers after each commit.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub food: Point,
    pub power_up: Option<PowerUp>,
    pub active_effect: Option<PowerUpType>,
    pub direction: Direction,
    pub score: u32,
    pub level: u32,
    pub speed: u32,
    pub game_over: bool,
    pub is_paused: bool,
    pub grid_size: u32,
}

impl GameSnapshot {
    /// Text rendering, one row per line: `@` head, `o` body, `*` food, `+` power-up.
    pub fn render_ascii(&self) -> String {
        let size = self.grid_size as i32;
        let mut out = String::with_capacity((self.grid_size as usize + 1) * self.grid_size as usize);
        for y in 0..size {
            for x in 0..size {
                let cell = Point::new(x, y);
                let glyph = if self.snake.first() == Some(&cell) {
                    '@'
                } else if self.snake.contains(&cell) {
                    'o'
                } else if self.food == cell {
                    '*'
                } else if self.power_up.as_ref().is_some_and(|p| !p.active && p.position == cell) {
                    '+'
                } else {
                    '.'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
