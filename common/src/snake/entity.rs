use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Snake body, head first. Never empty.
///
/// A snake is never edited segment by segment: each tick builds a new one
/// with [`Snake::advanced`] and the engine swaps it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    /// Lays `length` segments out behind `head`, opposite to `direction`.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.offset(behind);
            body.push_back(segment);
        }
        Self { body }
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Option<Self> {
        let body: VecDeque<Point> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn segments(&self) -> Vec<Point> {
        self.body.iter().copied().collect()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body.contains(point)
    }

    /// Whether `point` is still covered once the snake has moved. The tail
    /// cell is vacated by the move unless the snake grows.
    pub fn occupies_after_move(&self, point: &Point, growing: bool) -> bool {
        let keep = if growing { self.body.len() } else { self.body.len() - 1 };
        self.body.iter().take(keep).any(|segment| segment == point)
    }

    /// The snake after one step with its head at `new_head`.
    pub fn advanced(&self, new_head: Point, grow: bool) -> Snake {
        let keep = if grow { self.body.len() } else { self.body.len() - 1 };
        let mut body = VecDeque::with_capacity(keep + 1);
        body.push_back(new_head);
        body.extend(self.body.iter().take(keep).copied());
        Snake { body }
    }

    pub fn has_overlap(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|segment| seen.insert(*segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lays_body_behind_head() {
        let snake = Snake::new(Point::new(10, 10), Direction::Up, 3);
        assert_eq!(
            snake.segments(),
            vec![Point::new(10, 10), Point::new(10, 11), Point::new(10, 12)]
        );
        assert_eq!(snake.head(), Point::new(10, 10));
        assert_eq!(snake.tail(), Point::new(10, 12));
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::new()).is_none());
        assert_eq!(Snake::from_segments(vec![Point::new(1, 1)]).unwrap().len(), 1);
    }

    #[test]
    fn test_advanced_without_growth_keeps_length() {
        let snake = Snake::new(Point::new(5, 5), Direction::Right, 3);
        let moved = snake.advanced(Point::new(6, 5), false);
        assert_eq!(moved.segments(), vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_advanced_with_growth_keeps_tail() {
        let snake = Snake::new(Point::new(5, 5), Direction::Right, 3);
        let grown = snake.advanced(Point::new(6, 5), true);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown.tail(), Point::new(3, 5));
    }

    #[test]
    fn test_tail_cell_is_free_after_move_unless_growing() {
        let snake = Snake::new(Point::new(5, 5), Direction::Right, 4);
        let tail = snake.tail();
        assert!(!snake.occupies_after_move(&tail, false));
        assert!(snake.occupies_after_move(&tail, true));
        assert!(snake.occupies_after_move(&Point::new(4, 5), false));
    }

    #[test]
    fn test_has_overlap() {
        let straight = Snake::new(Point::new(5, 5), Direction::Up, 3);
        assert!(!straight.has_overlap());
        let crossed =
            Snake::from_segments(vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 1)]).unwrap();
        assert!(crossed.has_overlap());
    }
}
