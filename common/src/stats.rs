use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::FOOD_POINTS;

/// Totals across every finished game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub games_played: u32,
    pub total_score: u64,
    pub best_score: u32,
    /// Most food eaten in a single game.
    pub best_streak: u32,
    pub total_play_time_secs: u64,
}

impl LifetimeStats {
    pub fn record_game(&mut self, final_score: u32, play_time: Duration) {
        self.games_played = self.games_played.saturating_add(1);
        self.total_score = self.total_score.saturating_add(final_score as u64);
        self.best_score = self.best_score.max(final_score);
        self.best_streak = self.best_streak.max(final_score / FOOD_POINTS);
        self.total_play_time_secs = self.total_play_time_secs.saturating_add(play_time.as_secs());
    }

    pub fn average_score(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (self.total_score / self.games_played as u64) as u32
    }

    pub fn formatted_play_time(&self) -> String {
        let total = self.total_play_time_secs;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{}h {}m", hours, minutes)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_game_accumulates() {
        let mut stats = LifetimeStats::default();
        stats.record_game(120, Duration::from_millis(65_400));
        stats.record_game(40, Duration::from_secs(10));

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 160);
        assert_eq!(stats.best_score, 120);
        assert_eq!(stats.best_streak, 12);
        assert_eq!(stats.total_play_time_secs, 75);
        assert_eq!(stats.average_score(), 80);
    }

    #[test]
    fn test_average_of_no_games_is_zero() {
        assert_eq!(LifetimeStats::default().average_score(), 0);
    }

    #[test]
    fn test_average_is_floored() {
        let mut stats = LifetimeStats::default();
        stats.record_game(10, Duration::ZERO);
        stats.record_game(10, Duration::ZERO);
        stats.record_game(0, Duration::ZERO);
        assert_eq!(stats.average_score(), 6);
    }

    #[test]
    fn test_formatted_play_time() {
        let mut stats = LifetimeStats::default();
        stats.total_play_time_secs = 5;
        assert_eq!(stats.formatted_play_time(), "5s");
        stats.total_play_time_secs = 184;
        assert_eq!(stats.formatted_play_time(), "3m 4s");
        stats.total_play_time_secs = 3_725;
        assert_eq!(stats.formatted_play_time(), "1h 2m");
    }

    #[test]
    fn test_reset() {
        let mut stats = LifetimeStats::default();
        stats.record_game(30, Duration::from_secs(3));
        stats.reset();
        assert_eq!(stats, LifetimeStats::default());
    }
}
