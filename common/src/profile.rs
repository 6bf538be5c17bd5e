use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{log, log_warn};
use crate::config::{
    ConfigContentProvider, ConfigManager, FileContentConfigProvider, MemoryContentProvider,
    StorageError, Validate, YamlConfigSerializer,
};
use crate::snake::{GameSettings, StatsRecorder};
use crate::stats::LifetimeStats;
use crate::validation::{sanitize_grid_size, sanitize_speed};

/// Everything kept between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub settings: GameSettings,
    pub stats: LifetimeStats,
    pub high_score: u32,
    pub tutorial_completed: bool,
}

impl Profile {
    /// Only ever raises the stored value.
    pub fn update_high_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }

    /// Clamps out-of-range settings coming from storage.
    pub fn sanitized(mut self) -> Self {
        self.settings.grid_size = sanitize_grid_size(self.settings.grid_size as i64);
        self.settings.initial_speed = sanitize_speed(self.settings.initial_speed as f64);
        self.high_score = self.high_score.max(self.stats.best_score);
        self
    }
}

impl Validate for Profile {
    fn validate(&self) -> Result<(), String> {
        let stats = &self.stats;
        if stats.games_played == 0 && (stats.total_score > 0 || stats.total_play_time_secs > 0) {
            return Err("Stats have totals but no games played".to_string());
        }
        if stats.best_score as u64 > stats.total_score {
            return Err("Best score exceeds total score".to_string());
        }
        Ok(())
    }
}

/// Shared handle over a persisted [`Profile`]. Clones see the same profile.
///
/// Storage failures are logged and never reach the game: the in-memory
/// profile stays current even when it cannot be written.
pub struct ProfileStore<P: ConfigContentProvider> {
    manager: Arc<ConfigManager<P, Profile>>,
    profile: Arc<Mutex<Profile>>,
}

impl<P: ConfigContentProvider> Clone for ProfileStore<P> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            profile: Arc::clone(&self.profile),
        }
    }
}

impl ProfileStore<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::open(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl ProfileStore<MemoryContentProvider> {
    pub fn in_memory() -> Self {
        Self::open(MemoryContentProvider::new())
    }
}

impl<P: ConfigContentProvider> ProfileStore<P> {
    pub fn open(provider: P) -> Self {
        let manager: ConfigManager<P, Profile> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let profile = manager.load_or_default().sanitized();
        Self {
            manager: Arc::new(manager),
            profile: Arc::new(Mutex::new(profile)),
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `change` and writes the result.
    pub fn update(&self, change: impl FnOnce(&mut Profile)) -> Result<(), StorageError> {
        let snapshot = {
            let mut profile = self.profile.lock().unwrap_or_else(PoisonError::into_inner);
            change(&mut profile);
            profile.clone()
        };
        self.manager.set_config(&snapshot)
    }

    pub fn save(&self) -> Result<(), StorageError> {
        self.manager.set_config(&self.profile())
    }

    pub fn set_settings(&self, settings: GameSettings) -> Result<(), StorageError> {
        settings.validate().map_err(StorageError::Invalid)?;
        self.update(|profile| profile.settings = settings)
    }

    pub fn complete_tutorial(&self) -> Result<(), StorageError> {
        self.update(|profile| profile.tutorial_completed = true)
    }

    pub fn reset_stats(&self) -> Result<(), StorageError> {
        self.update(|profile| profile.stats.reset())
    }
}

impl<P: ConfigContentProvider + Send + Sync> StatsRecorder for ProfileStore<P> {
    fn record_game(&mut self, final_score: u32, play_time: Duration) {
        let result = self.update(|profile| {
            profile.stats.record_game(final_score, play_time);
            if profile.update_high_score(final_score) {
                log!("New high score: {}", final_score);
            }
        });
        if let Err(e) = result {
            log_warn!("Failed to save profile: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Difficulty;

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_profile_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut profile = Profile::default();
        assert!(profile.update_high_score(30));
        assert!(!profile.update_high_score(20));
        assert!(!profile.update_high_score(30));
        assert_eq!(profile.high_score, 30);
    }

    #[test]
    fn test_empty_store_opens_with_defaults() {
        let store = ProfileStore::in_memory();
        assert_eq!(store.profile(), Profile::default());
    }

    #[test]
    fn test_recorded_game_is_persisted() {
        let provider = MemoryContentProvider::new();
        let mut store = ProfileStore::open(provider.clone());
        store.record_game(70, Duration::from_secs(12));

        let reopened = ProfileStore::open(provider).profile();
        assert_eq!(reopened.high_score, 70);
        assert_eq!(reopened.stats.games_played, 1);
        assert_eq!(reopened.stats.best_streak, 7);
        assert_eq!(reopened.stats.total_play_time_secs, 12);
    }

    #[test]
    fn test_clones_share_profile() {
        let store = ProfileStore::in_memory();
        let mut recorder = store.clone();
        recorder.record_game(10, Duration::ZERO);
        assert_eq!(store.profile().stats.games_played, 1);
    }

    #[test]
    fn test_out_of_range_settings_are_clamped_on_load() {
        let provider = MemoryContentProvider::with_content(
            "settings:\n  grid_size: 99\n  initial_speed: 10\n  difficulty: hard\nhigh_score: 5\n",
        );
        let profile = ProfileStore::open(provider).profile();
        assert_eq!(profile.settings.grid_size, 50);
        assert_eq!(profile.settings.initial_speed, 50);
        assert_eq!(profile.settings.difficulty, Difficulty::Hard);
        assert_eq!(profile.high_score, 5);
    }

    #[test]
    fn test_inconsistent_stats_fall_back_to_defaults() {
        let provider = MemoryContentProvider::with_content(
            "stats:\n  games_played: 0\n  total_score: 500\nhigh_score: 90\n",
        );
        assert_eq!(ProfileStore::open(provider).profile(), Profile::default());
    }

    #[test]
    fn test_invalid_settings_are_not_stored() {
        let store = ProfileStore::in_memory();
        let settings = GameSettings {
            grid_size: 5,
            ..GameSettings::default()
        };
        assert!(matches!(store.set_settings(settings), Err(StorageError::Invalid(_))));
        assert_eq!(store.profile().settings, GameSettings::default());
    }

    #[test]
    fn test_file_store_round_trip() {
        let file_path = get_temp_file_path();
        let store = ProfileStore::from_yaml_file(&file_path);
        store.set_settings(GameSettings::with_difficulty(Difficulty::Easy)).unwrap();
        store.complete_tutorial().unwrap();

        let reopened = ProfileStore::from_yaml_file(&file_path).profile();
        assert_eq!(reopened.settings.difficulty, Difficulty::Easy);
        assert_eq!(reopened.settings.initial_speed, 200);
        assert!(reopened.tutorial_completed);
        std::fs::remove_file(file_path).unwrap();
    }

    #[test]
    fn test_reset_stats_keeps_high_score() {
        let mut store = ProfileStore::in_memory();
        store.record_game(40, Duration::from_secs(1));
        store.reset_stats().unwrap();
        let profile = store.profile();
        assert_eq!(profile.stats, LifetimeStats::default());
        assert_eq!(profile.high_score, 40);
    }
}
