use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::types::{GameOverReason, Point, PowerUpType};

/// Notifications for the shell (sound, haptics, announcements).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    AteFood { score: u32 },
    LeveledUp { level: u32 },
    PowerUpSpawned { kind: PowerUpType, position: Point },
    CollectedPowerUp { kind: PowerUpType },
    PowerUpExpired { kind: PowerUpType },
    PowerUpDespawned { kind: PowerUpType },
    GameOver {
        final_score: u32,
        play_time: Duration,
        reason: GameOverReason,
    },
}

pub trait GameEventSink: Send {
    fn on_event(&mut self, event: &GameEvent);
}

/// Receives the result of every finished game for lifetime statistics.
pub trait StatsRecorder: Send {
    fn record_game(&mut self, final_score: u32, play_time: Duration);
}

pub struct NullSink;

impl GameEventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

impl StatsRecorder for NullSink {
    fn record_game(&mut self, _final_score: u32, _play_time: Duration) {}
}

/// Collects events in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<GameEvent>>>,
    games: Arc<Mutex<Vec<(u32, Duration)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn recorded_games(&self) -> Vec<(u32, Duration)> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl GameEventSink for RecordingSink {
    fn on_event(&mut self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

impl StatsRecorder for RecordingSink {
    fn record_game(&mut self, final_score: u32, play_time: Duration) {
        self.games
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((final_score, play_time));
    }
}
