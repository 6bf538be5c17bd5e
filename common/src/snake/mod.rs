mod engine;
mod entity;
mod events;
mod food;
mod game_state;
mod power_up;
mod progression;
mod settings;
mod timers;
mod types;

pub use engine::{GameEngine, TickOutcome};
pub use entity::Snake;
pub use events::{GameEvent, GameEventSink, NullSink, RecordingSink, StatsRecorder};
pub use food::FoodGenerator;
pub use game_state::{GameSnapshot, GameState, INITIAL_DIRECTION};
pub use power_up::{PowerUp, PowerUpManager, PowerUpNotice};
pub use progression::{
    effective_speed, level_from_score, speed_after_food, speed_after_level_up, speed_from_level,
};
pub use settings::{Difficulty, DifficultyPreset, GameSettings};
pub use timers::OneShotTimers;
pub use types::{Direction, GameOverReason, GamePhase, Point, PowerUpType};
