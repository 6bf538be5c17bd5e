use crate::defaults::{LEVEL_UP_SPEED_BONUS_MS, MAX_LEVEL, MIN_LEVEL, MIN_SPEED_MS, POINTS_PER_LEVEL};

pub fn level_from_score(score: u32) -> u32 {
    (score / POINTS_PER_LEVEL + 1).clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Base tick interval a fresh game at `level` would have reached through level-ups alone.
pub fn speed_from_level(base_speed: u32, level: u32) -> u32 {
    let level_ups = level.clamp(MIN_LEVEL, MAX_LEVEL) - MIN_LEVEL;
    base_speed
        .saturating_sub(level_ups * LEVEL_UP_SPEED_BONUS_MS)
        .max(MIN_SPEED_MS)
}

pub fn speed_after_food(speed: u32, increment: u32) -> u32 {
    speed.saturating_sub(increment).max(MIN_SPEED_MS)
}

pub fn speed_after_level_up(speed: u32) -> u32 {
    speed.saturating_sub(LEVEL_UP_SPEED_BONUS_MS).max(MIN_SPEED_MS)
}

/// `base_speed × percent / 100`, floored to whole milliseconds.
pub fn effective_speed(base_speed: u32, percent: u32) -> u32 {
    (base_speed * percent / 100).max(MIN_SPEED_MS)
}
