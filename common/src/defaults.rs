pub const MIN_GRID_SIZE: u32 = 10;
pub const MAX_GRID_SIZE: u32 = 50;
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Tick interval bounds in milliseconds. Smaller is faster.
pub const MIN_SPEED_MS: u32 = 50;
pub const MAX_SPEED_MS: u32 = 500;
pub const DEFAULT_SPEED_MS: u32 = 150;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 100;
pub const POINTS_PER_LEVEL: u32 = 50;
pub const LEVEL_UP_SPEED_BONUS_MS: u32 = 10;

pub const FOOD_POINTS: u32 = 10;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

pub const POWER_UP_SCORE_STEP: u32 = 50;
pub const POWER_UP_DURATION_MS: u64 = 5_000;
pub const POWER_UP_LIFETIME_MS: u64 = 10_000;
pub const POWER_UP_MAX_SPAWN_ATTEMPTS: usize = 100;
/// Tick interval multipliers in percent.
pub const SPEED_BOOST_PERCENT: u32 = 70;
pub const SLOW_PERCENT: u32 = 150;
pub const SCORE_MULTIPLIER: u32 = 2;
