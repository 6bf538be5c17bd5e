use std::time::Duration;

use crate::{log, log_warn};
use crate::config::Validate;
use crate::defaults::FOOD_POINTS;
use crate::session_rng::{RandomSource, SessionRng};
use crate::validation::{is_valid_direction_change, is_valid_point, validate_game_state};
use super::events::{GameEvent, GameEventSink, StatsRecorder};
use super::food::FoodGenerator;
use super::game_state::{GameSnapshot, GameState};
use super::power_up::{PowerUpManager, PowerUpNotice};
use super::progression::{effective_speed, level_from_score, speed_after_food, speed_after_level_up};
use super::settings::GameSettings;
use super::entity::Snake;
use super::types::{Direction, GameOverReason, GamePhase, Point, PowerUpType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was paused or already over.
    Skipped,
    Moved {
        ate_food: bool,
        collected: Option<PowerUpType>,
    },
    GameOver(GameOverReason),
}

/// Owns the game state and advances it one tick at a time.
///
/// The engine has no timer of its own. A driver calls [`GameEngine::tick`]
/// every [`GameEngine::tick_interval`]; each call moves the session clock
/// forward by the interval that was in force, which is also the clock the
/// power-up timers run on.
pub struct GameEngine<R: RandomSource = SessionRng> {
    settings: GameSettings,
    state: GameState,
    power_ups: PowerUpManager,
    rng: R,
    events: Box<dyn GameEventSink>,
    stats: Box<dyn StatsRecorder>,
    clock_ms: u64,
    ticks: u64,
    // Set while an invincible snake has passed through its own body.
    overlap_tolerated: bool,
}

impl<R: RandomSource> GameEngine<R> {
    pub fn new(
        settings: GameSettings,
        mut rng: R,
        events: Box<dyn GameEventSink>,
        stats: Box<dyn StatsRecorder>,
    ) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log_warn!("Invalid settings ({}), using defaults", e);
                GameSettings::default()
            }
        };
        let state = GameState::initial(&settings, &mut rng);

        Self {
            settings,
            state,
            power_ups: PowerUpManager::new(),
            rng,
            events,
            stats,
            clock_ms: 0,
            ticks: 0,
            overlap_tolerated: false,
        }
    }

    /// Cancels every power-up timer, then starts a fresh paused game.
    pub fn reset(&mut self) {
        self.power_ups.clear();
        self.state = GameState::initial(&self.settings, &mut self.rng);
        self.clock_ms = 0;
        self.ticks = 0;
        self.overlap_tolerated = false;
        log!(
            "New game on {0}x{0} grid, speed {1}ms",
            self.settings.grid_size,
            self.state.speed
        );
    }

    /// Settings only take effect through a full reset.
    pub fn apply_settings(&mut self, settings: GameSettings) -> Result<(), String> {
        settings.validate()?;
        self.settings = settings;
        self.reset();
        Ok(())
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn power_ups(&self) -> &PowerUpManager {
        &self.power_ups
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.clock_ms)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> GamePhase {
        if self.state.game_over {
            GamePhase::GameOver
        } else if self.state.paused {
            GamePhase::Idle
        } else {
            GamePhase::Running
        }
    }

    /// Queues `direction` for the next tick. A reversal of the direction
    /// currently travelled is rejected here, not at tick time.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state.game_over || !is_valid_direction_change(self.state.direction, direction) {
            return false;
        }
        self.state.pending_direction = direction;
        true
    }

    pub fn request_direction_str(&mut self, raw: &str) -> bool {
        match raw.parse::<Direction>() {
            Ok(direction) => self.request_direction(direction),
            Err(e) => {
                log_warn!("Ignoring input: {}", e);
                false
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.state.game_over {
            self.state.paused = !self.state.paused;
        }
    }

    pub fn resume(&mut self) {
        if !self.state.game_over {
            self.state.paused = false;
        }
    }

    pub fn pause(&mut self) {
        if !self.state.game_over {
            self.state.paused = true;
        }
    }

    pub fn effective_speed(&self) -> u32 {
        effective_speed(self.state.speed, self.power_ups.speed_percent())
    }

    /// `None` while the tick timer should be disarmed.
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.phase() == GamePhase::Running)
            .then(|| Duration::from_millis(self.effective_speed() as u64))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.state.snake.segments(),
            food: self.state.food,
            power_up: self.power_ups.power_up().cloned(),
            active_effect: self.power_ups.active_effect(),
            direction: self.state.direction,
            score: self.state.score,
            level: self.state.level,
            speed: self.effective_speed(),
            game_over: self.state.game_over,
            is_paused: self.state.paused,
            grid_size: self.settings.grid_size,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase() != GamePhase::Running {
            return TickOutcome::Skipped;
        }

        self.clock_ms += self.effective_speed() as u64;
        self.ticks += 1;
        for notice in self.power_ups.advance(self.clock_ms) {
            self.on_power_up_notice(notice);
        }

        let direction = self.state.pending_direction;
        self.state.direction = direction;
        let grid_size = self.settings.grid_size;
        let invincible = self.power_ups.is_invincible();

        let mut new_head = self.state.snake.head().offset(direction);
        if !is_valid_point(&new_head, grid_size) {
            if !invincible {
                return self.end_game(GameOverReason::WallCollision);
            }
            new_head = new_head.wrapped(grid_size);
        }

        let growing = new_head == self.state.food;
        let passed_through = self.state.snake.occupies_after_move(&new_head, growing);
        if passed_through && !invincible {
            return self.end_game(GameOverReason::SelfCollision);
        }

        let snake = self.state.snake.advanced(new_head, growing);
        let mut score = self.state.score;
        let mut speed = self.state.speed;
        let mut food = self.state.food;
        if growing {
            // Scored before this tick's power-up activation.
            score += FOOD_POINTS * self.power_ups.score_multiplier();
            speed = speed_after_food(speed, self.settings.speed_increment());
            food = FoodGenerator::generate(grid_size, &snake, &mut self.rng);
        }
        let level = level_from_score(score);
        let leveled_up = level != self.state.level;
        if leveled_up {
            speed = speed_after_level_up(speed);
        }

        // Nothing is committed or announced unless the candidate state holds.
        let overlap_tolerated = snake.has_overlap() && (passed_through || self.overlap_tolerated);
        if let Err(errors) = check_invariants(&snake, &food, grid_size, score, speed, level, overlap_tolerated) {
            log_warn!("State check failed on tick {}: {}", self.ticks, errors.join("; "));
            return self.end_game(GameOverReason::InvalidState);
        }

        let collected = if self.power_ups.is_collision(&new_head) {
            self.power_ups.activate(self.clock_ms)
        } else {
            None
        };

        let score_changed = score != self.state.score;
        self.state.snake = snake;
        self.state.food = food;
        self.state.score = score;
        self.state.speed = speed;
        self.state.level = level;
        self.overlap_tolerated = overlap_tolerated;

        if growing {
            self.emit(GameEvent::AteFood { score });
        }
        if let Some(kind) = collected {
            log!("Collected {:?} power-up at {}", kind, new_head);
            self.emit(GameEvent::CollectedPowerUp { kind });
        }
        if leveled_up {
            log!("Level {} reached, speed {}ms", level, speed);
            self.emit(GameEvent::LeveledUp { level });
        }
        if score_changed {
            self.try_spawn_power_up();
        }

        TickOutcome::Moved {
            ate_food: growing,
            collected,
        }
    }

    fn try_spawn_power_up(&mut self) {
        let spawned = self
            .power_ups
            .try_spawn(
                self.state.score,
                self.settings.grid_size,
                &self.state.snake,
                &self.state.food,
                self.clock_ms,
                &mut self.rng,
            )
            .map(|p| (p.kind, p.position));
        if let Some((kind, position)) = spawned {
            log!("{:?} power-up spawned at {}", kind, position);
            self.emit(GameEvent::PowerUpSpawned { kind, position });
        }
    }

    fn on_power_up_notice(&mut self, notice: PowerUpNotice) {
        let event = match notice {
            PowerUpNotice::Expired(kind) => GameEvent::PowerUpExpired { kind },
            PowerUpNotice::Despawned(kind) => GameEvent::PowerUpDespawned { kind },
        };
        self.emit(event);
    }

    fn end_game(&mut self, reason: GameOverReason) -> TickOutcome {
        self.state.game_over = true;
        self.state.game_over_reason = Some(reason);

        let final_score = self.state.score;
        let play_time = self.elapsed();
        log!(
            "Game over ({:?}) with score {} after {} ticks",
            reason,
            final_score,
            self.ticks
        );
        self.emit(GameEvent::GameOver {
            final_score,
            play_time,
            reason,
        });
        self.stats.record_game(final_score, play_time);
        TickOutcome::GameOver(reason)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.on_event(&event);
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn power_ups_mut(&mut self) -> &mut PowerUpManager {
        &mut self.power_ups
    }

    #[cfg(test)]
    pub(crate) fn clock_ms(&self) -> u64 {
        self.clock_ms
    }
}

/// Post-tick state check. While an invincible snake overlaps its own body
/// only bounds and the food cell are checked.
fn check_invariants(
    snake: &Snake,
    food: &Point,
    grid_size: u32,
    score: u32,
    speed: u32,
    level: u32,
    overlap_tolerated: bool,
) -> Result<(), Vec<String>> {
    if !overlap_tolerated {
        return validate_game_state(snake, food, grid_size, score, speed, level);
    }

    let mut errors = Vec::new();
    if !snake.iter().all(|segment| is_valid_point(segment, grid_size)) {
        errors.push("Snake segment out of bounds".to_string());
    }
    if snake.contains(food) {
        errors.push(format!("Food spawned on snake at {}", food));
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
