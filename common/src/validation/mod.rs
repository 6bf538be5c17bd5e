//! Pure checks and clamps over game values.
//!
//! Predicates never fail and sanitizers always produce an in-range value. The
//! caller decides whether a failed check ends the game or is corrected.

mod predicates;
mod sanitize;

pub use predicates::{
    is_valid_direction, is_valid_direction_change, is_valid_food_position, is_valid_grid_size,
    is_valid_level, is_valid_point, is_valid_score, is_valid_snake, is_valid_speed,
    validate_game_state,
};
pub use sanitize::{sanitize_grid_size, sanitize_point, sanitize_score, sanitize_speed};
