use clap::ValueEnum;
use snake_common::SessionRng;
use snake_common::snake::{Direction, GameSnapshot, Point};
use snake_common::validation::is_valid_point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    /// Heads for the food along the shortest Manhattan path.
    Greedy,
    /// Any move that does not crash.
    Random,
}

pub struct BotController;

impl BotController {
    pub fn calculate_move(
        bot_kind: BotKind,
        snapshot: &GameSnapshot,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if snapshot.game_over {
            return None;
        }
        match bot_kind {
            BotKind::Greedy => Self::greedy_move(snapshot, rng),
            BotKind::Random => Self::random_valid_move(snapshot, rng),
        }
    }

    fn greedy_move(snapshot: &GameSnapshot, rng: &mut SessionRng) -> Option<Direction> {
        let head = *snapshot.snake.first()?;

        let mut best_dir = None;
        let mut best_distance = u32::MAX;
        for dir in Self::get_valid_directions(snapshot.direction) {
            let next_pos = head.offset(dir);
            if Self::is_safe_position(next_pos, snapshot) {
                let distance = next_pos.manhattan_distance(&snapshot.food);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_valid_move(snapshot, rng))
    }

    fn random_valid_move(snapshot: &GameSnapshot, rng: &mut SessionRng) -> Option<Direction> {
        let head = *snapshot.snake.first()?;
        let safe_directions: Vec<Direction> = Self::get_valid_directions(snapshot.direction)
            .into_iter()
            .filter(|&dir| Self::is_safe_position(head.offset(dir), snapshot))
            .collect();

        if safe_directions.is_empty() {
            Some(snapshot.direction)
        } else {
            let idx = rng.random_range(0..safe_directions.len());
            Some(safe_directions[idx])
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn is_safe_position(pos: Point, snapshot: &GameSnapshot) -> bool {
        if !is_valid_point(&pos, snapshot.grid_size) {
            return false;
        }
        // The tail moves away unless this step eats.
        let tail = snapshot.snake.last().copied();
        let growing = pos == snapshot.food;
        !snapshot
            .snake
            .iter()
            .any(|segment| *segment == pos && (growing || Some(*segment) != tail))
    }
}
