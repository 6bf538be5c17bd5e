use std::collections::HashSet;

use crate::defaults::{MAX_GRID_SIZE, MAX_LEVEL, MAX_SPEED_MS, MIN_GRID_SIZE, MIN_LEVEL, MIN_SPEED_MS};
use crate::snake::{Direction, Point, Snake};

pub fn is_valid_point(point: &Point, grid_size: u32) -> bool {
    let size = grid_size as i64;
    (0..size).contains(&(point.x as i64)) && (0..size).contains(&(point.y as i64))
}

pub fn is_valid_direction(raw: &str) -> bool {
    raw.parse::<Direction>().is_ok()
}

/// Only an exact 180° reversal is rejected. Repeating the current direction is fine.
pub fn is_valid_direction_change(current: Direction, next: Direction) -> bool {
    !current.is_opposite(&next)
}

pub fn is_valid_snake<'a, I>(segments: I, grid_size: u32) -> bool
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut seen = HashSet::new();
    let mut count = 0usize;
    for segment in segments {
        if !is_valid_point(segment, grid_size) || !seen.insert(*segment) {
            return false;
        }
        count += 1;
    }
    count > 0
}

pub fn is_valid_speed(speed: i64) -> bool {
    (MIN_SPEED_MS as i64..=MAX_SPEED_MS as i64).contains(&speed)
}

pub fn is_valid_score(score: i64) -> bool {
    score >= 0
}

pub fn is_valid_level(level: i64) -> bool {
    (MIN_LEVEL as i64..=MAX_LEVEL as i64).contains(&level)
}

pub fn is_valid_grid_size(grid_size: i64) -> bool {
    (MIN_GRID_SIZE as i64..=MAX_GRID_SIZE as i64).contains(&grid_size)
}

pub fn is_valid_food_position(food: &Point, snake: &Snake) -> bool {
    !snake.contains(food)
}

/// Collects every violated rule. An empty `Err` is never returned.
pub fn validate_game_state(
    snake: &Snake,
    food: &Point,
    grid_size: u32,
    score: u32,
    speed: u32,
    level: u32,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !is_valid_grid_size(grid_size as i64) {
        errors.push(format!("Invalid grid size: {}", grid_size));
    }
    if !is_valid_snake(snake.iter(), grid_size) {
        errors.push("Invalid snake configuration".to_string());
    }
    if !is_valid_point(food, grid_size) {
        errors.push(format!("Food position out of bounds: {}", food));
    }
    if !is_valid_food_position(food, snake) {
        errors.push(format!("Food spawned on snake at {}", food));
    }
    if !is_valid_score(score as i64) {
        errors.push(format!("Invalid score: {}", score));
    }
    if !is_valid_speed(speed as i64) {
        errors.push(format!("Invalid speed: {}", speed));
    }
    if !is_valid_level(level as i64) {
        errors.push(format!("Invalid level: {}", level));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
