use crate::log_warn;
use crate::session_rng::RandomSource;
use crate::validation::is_valid_food_position;
use super::entity::Snake;
use super::types::Point;

pub struct FoodGenerator;

impl FoodGenerator {
    /// Picks a free cell. Random sampling is capped at `grid_size²` attempts,
    /// then a row-major scan takes over.
    pub fn generate(grid_size: u32, snake: &Snake, rng: &mut impl RandomSource) -> Point {
        let max_attempts = grid_size as usize * grid_size as usize;
        for _ in 0..max_attempts {
            let candidate = Self::random_cell(grid_size, rng);
            if is_valid_food_position(&candidate, snake) {
                return candidate;
            }
        }

        if let Some(free) = Self::first_free_cell(grid_size, snake) {
            log_warn!("Food sampling exhausted after {} attempts, using {}", max_attempts, free);
            return free;
        }

        // Only reachable when the snake covers the whole grid.
        let last = grid_size as i32 - 1;
        let corners = [
            Point::new(0, 0),
            Point::new(last, 0),
            Point::new(0, last),
            Point::new(last, last),
        ];
        let fallback = corners
            .into_iter()
            .find(|corner| is_valid_food_position(corner, snake))
            .unwrap_or(Point::new(0, 0));
        log_warn!("No free cell for food, falling back to {}", fallback);
        fallback
    }

    pub fn random_cell(grid_size: u32, rng: &mut impl RandomSource) -> Point {
        let x = rng.next_below(grid_size) as i32;
        let y = rng.next_below(grid_size) as i32;
        Point::new(x, y)
    }

    fn first_free_cell(grid_size: u32, snake: &Snake) -> Option<Point> {
        let size = grid_size as i32;
        (0..size)
            .flat_map(|y| (0..size).map(move |x| Point::new(x, y)))
            .find(|cell| is_valid_food_position(cell, snake))
    }
}
