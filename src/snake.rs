use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::input::Direction;

/// Grid position in coordinate units; always a multiple of the cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the playable area.
    #[must_use]
    pub fn is_within_bounds(self, config: &GameConfig) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(config.width)
            && self.y < i32::from(config.height)
    }

    /// Returns the position one cell of size `step` away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * step,
            y: self.y + dy * step,
        }
    }

    /// Zero-based (column, row) of the cell this position names.
    #[must_use]
    pub fn cell(self, config: &GameConfig) -> (i32, i32) {
        let step = config.step().max(1);
        (self.x.div_euclid(step), self.y.div_euclid(step))
    }
}

/// Ordered snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Builds the starting snake: a vertical line on column 0 covering rows
    /// `1..=initial_length`, with the head on the lowest of those rows.
    #[must_use]
    pub fn initial(config: &GameConfig) -> Self {
        let step = config.step();
        let body = (1..=i32::from(config.initial_length.max(1)))
            .rev()
            .map(|row| Position::new(0, row * step))
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Prepends a new head segment.
    pub fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
    }

    /// Removes and returns the tail segment, never emptying the body.
    pub fn remove_tail(&mut self) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }
        self.body.pop_back()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn initial_snake_is_vertical_with_head_leading_downwards() {
        let snake = Snake::initial(&GameConfig::default());

        let segments: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(0, 150),
                Position::new(0, 100),
                Position::new(0, 50),
            ]
        );
        assert_eq!(snake.head(), Position::new(0, 150));
        assert_eq!(snake.tail(), Position::new(0, 50));
    }

    #[test]
    fn initial_length_follows_config() {
        let config = GameConfig {
            initial_length: 5,
            ..GameConfig::default()
        };

        let snake = Snake::initial(&config);

        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Position::new(0, 250));
    }

    #[test]
    fn stepping_moves_one_cell_along_one_axis() {
        let origin = Position::new(100, 100);

        assert_eq!(origin.stepped(Direction::Up, 50), Position::new(100, 50));
        assert_eq!(origin.stepped(Direction::Down, 50), Position::new(100, 150));
        assert_eq!(origin.stepped(Direction::Left, 50), Position::new(50, 100));
        assert_eq!(origin.stepped(Direction::Right, 50), Position::new(150, 100));
    }

    #[test]
    fn bounds_are_half_open() {
        let config = GameConfig::default();

        assert!(Position::new(0, 0).is_within_bounds(&config));
        assert!(Position::new(650, 650).is_within_bounds(&config));
        assert!(!Position::new(-50, 0).is_within_bounds(&config));
        assert!(!Position::new(700, 0).is_within_bounds(&config));
        assert!(!Position::new(0, 700).is_within_bounds(&config));
    }

    #[test]
    fn cell_index_divides_by_cell_size() {
        let config = GameConfig::default();

        assert_eq!(Position::new(150, 50).cell(&config), (3, 1));
        assert_eq!(Position::new(-50, 0).cell(&config), (-1, 0));
    }

    #[test]
    fn remove_tail_keeps_the_head() {
        let mut snake = Snake::from_segments(vec![Position::new(0, 0)]);

        assert_eq!(snake.remove_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn head_overlap_ignores_the_head_itself() {
        let straight = Snake::from_segments(vec![
            Position::new(100, 100),
            Position::new(100, 150),
            Position::new(100, 200),
        ]);
        assert!(!straight.head_overlaps_body());

        let looped = Snake::from_segments(vec![
            Position::new(100, 100),
            Position::new(150, 100),
            Position::new(150, 150),
            Position::new(100, 150),
            Position::new(100, 100),
        ]);
        assert!(looped.head_overlaps_body());
    }
}
