use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::defaults::{DEFAULT_GRID_SIZE, MAX_SPEED_MS, MIN_SPEED_MS};
use crate::validation::{is_valid_grid_size, is_valid_speed, sanitize_grid_size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyPreset {
    pub initial_speed: u32,
    /// Milliseconds taken off the tick interval per food eaten.
    pub speed_increment: u32,
}

impl Difficulty {
    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                initial_speed: 200,
                speed_increment: 1,
            },
            Difficulty::Medium => DifficultyPreset {
                initial_speed: 150,
                speed_increment: 2,
            },
            Difficulty::Hard => DifficultyPreset {
                initial_speed: 100,
                speed_increment: 3,
            },
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

/// Session settings. Applied at (re)start only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSettings")]
pub struct GameSettings {
    pub grid_size: u32,
    pub difficulty: Difficulty,
    pub initial_speed: u32,
    pub sound_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            difficulty: Difficulty::Medium,
            initial_speed: Difficulty::Medium.preset().initial_speed,
            sound_enabled: true,
        }
    }
}

/// On-disk form. A missing `initial_speed` follows the stored difficulty.
#[derive(Deserialize)]
#[serde(default)]
struct StoredSettings {
    grid_size: u32,
    difficulty: Difficulty,
    initial_speed: Option<u32>,
    sound_enabled: bool,
}

impl Default for StoredSettings {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            grid_size: settings.grid_size,
            difficulty: settings.difficulty,
            initial_speed: None,
            sound_enabled: settings.sound_enabled,
        }
    }
}

impl From<StoredSettings> for GameSettings {
    fn from(stored: StoredSettings) -> Self {
        Self {
            grid_size: stored.grid_size,
            difficulty: stored.difficulty,
            initial_speed: stored
                .initial_speed
                .unwrap_or_else(|| stored.difficulty.preset().initial_speed),
            sound_enabled: stored.sound_enabled,
        }
    }
}

impl GameSettings {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.set_difficulty(difficulty);
        settings
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.initial_speed = difficulty.preset().initial_speed;
    }

    pub fn set_grid_size(&mut self, grid_size: i64) {
        self.grid_size = sanitize_grid_size(grid_size);
    }

    pub fn speed_increment(&self) -> u32 {
        self.difficulty.preset().speed_increment
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !is_valid_grid_size(self.grid_size as i64) {
            return Err("Grid size must be between 10 and 50".to_string());
        }
        if !is_valid_speed(self.initial_speed as i64) {
            return Err(format!(
                "Initial speed must be between {}ms and {}ms",
                MIN_SPEED_MS, MAX_SPEED_MS
            ));
        }
        Ok(())
    }
}
