use snake_common::log;
use snake_common::snake::{GameEvent, GameEventSink, GameOverReason};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Eat,
    GameOver,
    LevelUp,
    PowerUp,
}

/// What the shell plays, vibrates and announces for one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    pub sound: Option<Sound>,
    /// Vibration pattern in milliseconds, alternating on and off.
    pub vibration: &'static [u32],
    pub announcement: String,
}

pub fn cue_for(event: &GameEvent) -> Cue {
    match event {
        GameEvent::AteFood { score } => Cue {
            sound: Some(Sound::Eat),
            vibration: &[100],
            announcement: format!("Score: {}", score),
        },
        GameEvent::LeveledUp { level } => Cue {
            sound: Some(Sound::LevelUp),
            vibration: &[50, 50, 50, 50, 100],
            announcement: format!("Level up! Now at level {}", level),
        },
        GameEvent::PowerUpSpawned { kind, position } => Cue {
            sound: None,
            vibration: &[],
            announcement: format!("{:?} power-up appeared at {}", kind, position),
        },
        GameEvent::CollectedPowerUp { kind } => Cue {
            sound: Some(Sound::PowerUp),
            vibration: &[30, 30, 30],
            announcement: format!("{:?} power-up active", kind),
        },
        GameEvent::PowerUpExpired { kind } => Cue {
            sound: None,
            vibration: &[],
            announcement: format!("{:?} power-up wore off", kind),
        },
        GameEvent::PowerUpDespawned { kind } => Cue {
            sound: None,
            vibration: &[],
            announcement: format!("{:?} power-up vanished", kind),
        },
        GameEvent::GameOver { final_score, reason, .. } => Cue {
            sound: Some(Sound::GameOver),
            vibration: if *reason == GameOverReason::InvalidState { &[50] } else { &[200] },
            announcement: format!("Game over! Final score: {}", final_score),
        },
    }
}

/// Logs the cue for each event. Sounds are dropped when disabled.
pub struct FeedbackSink {
    sound_enabled: bool,
    cues: u64,
}

impl FeedbackSink {
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            sound_enabled,
            cues: 0,
        }
    }
}

impl GameEventSink for FeedbackSink {
    fn on_event(&mut self, event: &GameEvent) {
        let cue = cue_for(event);
        self.cues += 1;
        match cue.sound.filter(|_| self.sound_enabled) {
            Some(sound) => log!("[#{}][{:?}] {}", self.cues, sound, cue.announcement),
            None => log!("[#{}] {}", self.cues, cue.announcement),
        }
    }
}
