use std::fmt;
use std::str::FromStr;

use crate::defaults::{SCORE_MULTIPLIER, SLOW_PERCENT, SPEED_BOOST_PERCENT};

/// A grid cell. Signed so that a head stepping off the grid is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Maps the point back onto a `grid_size` torus.
    pub fn wrapped(&self, grid_size: u32) -> Self {
        let size = grid_size as i32;
        Self::new(self.x.rem_euclid(size), self.y.rem_euclid(size))
    }

    pub fn manhattan_distance(&self, other: &Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Accepts direction names and the usual keyboard aliases (arrows, WASD).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" => Ok(Direction::Up),
            "down" | "arrowdown" | "s" => Ok(Direction::Down),
            "left" | "arrowleft" | "a" => Ok(Direction::Left),
            "right" | "arrowright" | "d" => Ok(Direction::Right),
            _ => Err(format!("Unknown direction: {:?}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpType {
    Speed,
    Multiplier,
    Invincible,
    Slow,
}

impl PowerUpType {
    pub const ALL: [PowerUpType; 4] = [
        PowerUpType::Speed,
        PowerUpType::Multiplier,
        PowerUpType::Invincible,
        PowerUpType::Slow,
    ];

    /// Tick interval multiplier in percent (70 means 30% faster).
    pub fn speed_percent(&self) -> u32 {
        match self {
            PowerUpType::Speed => SPEED_BOOST_PERCENT,
            PowerUpType::Slow => SLOW_PERCENT,
            PowerUpType::Multiplier | PowerUpType::Invincible => 100,
        }
    }

    pub fn speed_modifier(&self) -> f64 {
        self.speed_percent() as f64 / 100.0
    }

    pub fn score_multiplier(&self) -> u32 {
        match self {
            PowerUpType::Multiplier => SCORE_MULTIPLIER,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// Post-tick validation caught an inconsistent state.
    InvalidState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Up.is_opposite(&Direction::Up));
    }

    #[test]
    fn test_offset_moves_one_cell() {
        let p = Point::new(10, 10);
        assert_eq!(p.offset(Direction::Up), Point::new(10, 9));
        assert_eq!(p.offset(Direction::Down), Point::new(10, 11));
        assert_eq!(p.offset(Direction::Left), Point::new(9, 10));
        assert_eq!(p.offset(Direction::Right), Point::new(11, 10));
    }

    #[test]
    fn test_wrapped_maps_off_grid_points() {
        assert_eq!(Point::new(-1, 5).wrapped(20), Point::new(19, 5));
        assert_eq!(Point::new(20, 0).wrapped(20), Point::new(0, 0));
        assert_eq!(Point::new(3, -1).wrapped(20), Point::new(3, 19));
    }

    #[test]
    fn test_parse_direction_aliases() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("ArrowLeft".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" d ".parse::<Direction>(), Ok(Direction::Right));
        assert!("diagonal".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn test_power_up_modifiers() {
        assert_eq!(PowerUpType::Speed.speed_modifier(), 0.7);
        assert_eq!(PowerUpType::Slow.speed_modifier(), 1.5);
        assert_eq!(PowerUpType::Invincible.speed_modifier(), 1.0);
        assert_eq!(PowerUpType::Multiplier.score_multiplier(), 2);
        assert_eq!(PowerUpType::Speed.score_multiplier(), 1);
    }
}
