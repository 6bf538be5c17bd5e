use crate::defaults::{DEFAULT_SPEED_MS, MAX_GRID_SIZE, MAX_SPEED_MS, MIN_GRID_SIZE, MIN_SPEED_MS};
use crate::snake::Point;

/// Floors and clamps raw coordinates onto the grid. Non-finite values become 0.
pub fn sanitize_point(x: f64, y: f64, grid_size: u32) -> Point {
    let max = grid_size.saturating_sub(1) as f64;
    let clamp = |value: f64| {
        let value = if value.is_finite() { value.floor() } else { 0.0 };
        value.clamp(0.0, max) as i32
    };
    Point::new(clamp(x), clamp(y))
}

pub fn sanitize_score(raw: f64) -> u32 {
    if raw.is_nan() || raw < 0.0 {
        return 0;
    }
    raw.floor().min(u32::MAX as f64) as u32
}

pub fn sanitize_speed(raw: f64) -> u32 {
    if raw.is_nan() {
        return DEFAULT_SPEED_MS;
    }
    raw.floor().clamp(MIN_SPEED_MS as f64, MAX_SPEED_MS as f64) as u32
}

pub fn sanitize_grid_size(raw: i64) -> u32 {
    raw.clamp(MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64) as u32
}
