use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::food::Food;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Direction the snake faces at the start of every round.
pub const INITIAL_DIRECTION: Direction = Direction::Down;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why the last round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// What a single call to [`GameState::advance_tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed.
    Idle,
    Moved,
    Ate,
    Collided(DeathReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snake: Snake,
    food: Food,
    score: u32,
    direction: Direction,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh state seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a playing state from an explicit board layout.
    #[must_use]
    pub fn from_parts(
        config: GameConfig,
        snake: Snake,
        direction: Direction,
        food: Food,
        seed: u64,
    ) -> Self {
        Self {
            config,
            snake,
            food,
            score: 0,
            direction,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::initial(&config);
        let food = Food::spawn(&mut rng, &config);

        Self {
            config,
            snake,
            food,
            score: 0,
            direction: INITIAL_DIRECTION,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            rng,
        }
    }

    /// Restores the construction-time snake, food, score, direction and
    /// status. The random source carries on rather than being re-seeded.
    pub fn reset(&mut self) {
        self.snake = Snake::initial(&self.config);
        self.food = Food::spawn(&mut self.rng, &self.config);
        self.score = 0;
        self.direction = INITIAL_DIRECTION;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.tick_count = 0;
    }

    /// Requests a new heading. Reversals and requests after game over are
    /// ignored; returns whether the request was accepted.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        if !direction_change_is_valid(self.direction, requested) {
            return false;
        }

        self.direction = requested;
        true
    }

    /// Advances simulation by one gameplay tick.
    pub fn advance_tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;

        let next_head = self.snake.head().stepped(self.direction, self.config.step());
        self.snake.push_head(next_head);

        let ate = next_head == self.food.position;
        if ate {
            self.score += 1;
            self.food = Food::spawn(&mut self.rng, &self.config);
        } else {
            let _ = self.snake.remove_tail();
        }

        if let Some(reason) = self.detect_collision() {
            self.status = GameStatus::GameOver;
            self.death_reason = Some(reason);
            return TickOutcome::Collided(reason);
        }

        if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    fn detect_collision(&self) -> Option<DeathReason> {
        if !self.snake.head().is_within_bounds(&self.config) {
            return Some(DeathReason::WallCollision);
        }

        if self.snake.head_overlaps_body() {
            return Some(DeathReason::SelfCollision);
        }

        None
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Iterates over body segments from head to tail.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.snake.segments()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// False once a collision has ended the round, until the next reset.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Ticks advanced since the last reset.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameState, GameStatus, INITIAL_DIRECTION, TickOutcome};

    fn state_with(snake: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState::from_parts(
            GameConfig::default(),
            Snake::from_segments(snake),
            direction,
            Food::at(food),
            1,
        )
    }

    #[test]
    fn fresh_state_matches_initial_layout() {
        let state = GameState::new_with_seed(GameConfig::default(), 9);

        assert_eq!(state.score(), 0);
        assert_eq!(state.direction(), Direction::Down);
        assert!(state.is_active());
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.head(), Position::new(0, 150));
        assert!(state.food().position.is_within_bounds(state.config()));
    }

    #[test]
    fn tick_moves_head_and_drops_former_tail() {
        let mut state = state_with(
            vec![
                Position::new(100, 100),
                Position::new(100, 50),
                Position::new(100, 0),
            ],
            Direction::Down,
            Position::new(600, 600),
        );

        let outcome = state.advance_tick();

        assert_eq!(outcome, TickOutcome::Moved);
        let body: Vec<Position> = state.body().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(100, 150),
                Position::new(100, 100),
                Position::new(100, 50),
            ]
        );
        assert!(!state.snake().occupies(Position::new(100, 0)));
    }

    #[test]
    fn eating_food_scores_and_keeps_tail() {
        let mut state = state_with(
            vec![Position::new(200, 200), Position::new(150, 200)],
            Direction::Right,
            Position::new(250, 200),
        );

        let outcome = state.advance_tick();

        assert_eq!(outcome, TickOutcome::Ate);
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().tail(), Position::new(150, 200));

        let food = state.food().position;
        assert!(food.is_within_bounds(state.config()));
        assert_eq!(food.x % 50, 0);
        assert_eq!(food.y % 50, 0);
    }

    #[test]
    fn wall_collision_at_left_edge_ends_game() {
        let mut state = state_with(
            vec![Position::new(0, 0), Position::new(50, 0), Position::new(100, 0)],
            Direction::Left,
            Position::new(600, 600),
        );

        let outcome = state.advance_tick();

        assert_eq!(outcome, TickOutcome::Collided(DeathReason::WallCollision));
        assert_eq!(state.head(), Position::new(-50, 0));
        assert!(!state.is_active());
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn wall_collision_at_far_edges_ends_game() {
        let mut down = state_with(
            vec![Position::new(300, 650), Position::new(300, 600)],
            Direction::Down,
            Position::new(0, 0),
        );
        down.advance_tick();
        assert_eq!(down.death_reason(), Some(DeathReason::WallCollision));

        let mut right = state_with(
            vec![Position::new(650, 300), Position::new(600, 300)],
            Direction::Right,
            Position::new(0, 0),
        );
        right.advance_tick();
        assert_eq!(right.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn moving_head_into_body_ends_game() {
        let mut state = state_with(
            vec![
                Position::new(150, 100),
                Position::new(150, 150),
                Position::new(100, 150),
                Position::new(100, 100),
                Position::new(100, 50),
            ],
            Direction::Left,
            Position::new(600, 600),
        );

        let outcome = state.advance_tick();

        assert_eq!(outcome, TickOutcome::Collided(DeathReason::SelfCollision));
        assert_eq!(state.head(), Position::new(100, 100));
        assert!(!state.is_active());
    }

    #[test]
    fn moving_into_the_vacated_tail_cell_is_safe() {
        let mut state = state_with(
            vec![
                Position::new(100, 100),
                Position::new(150, 100),
                Position::new(150, 150),
                Position::new(100, 150),
            ],
            Direction::Down,
            Position::new(600, 600),
        );

        assert_eq!(state.advance_tick(), TickOutcome::Moved);
        assert!(state.is_active());
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut state = state_with(
            vec![Position::new(200, 200), Position::new(150, 200)],
            Direction::Right,
            Position::new(600, 600),
        );

        assert!(!state.change_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);

        assert!(state.change_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn reversal_is_ignored_even_for_single_segment_snake() {
        let mut state = state_with(
            vec![Position::new(200, 200)],
            Direction::Up,
            Position::new(600, 600),
        );

        state.change_direction(Direction::Down);

        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn repeating_current_direction_leaves_state_unchanged() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 5);
        let before_body: Vec<Position> = state.body().copied().collect();
        let before_food = state.food();

        assert!(state.change_direction(Direction::Down));

        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.body().copied().collect::<Vec<_>>(), before_body);
        assert_eq!(state.food(), before_food);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn game_over_freezes_ticks_and_direction_changes() {
        let mut state = state_with(
            vec![Position::new(0, 0), Position::new(50, 0)],
            Direction::Left,
            Position::new(600, 600),
        );
        state.advance_tick();
        let frozen_body: Vec<Position> = state.body().copied().collect();

        assert!(!state.change_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Left);
        assert_eq!(state.advance_tick(), TickOutcome::Idle);
        assert_eq!(state.body().copied().collect::<Vec<_>>(), frozen_body);
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut state = state_with(
            vec![Position::new(200, 200), Position::new(150, 200)],
            Direction::Right,
            Position::new(250, 200),
        );
        state.advance_tick();
        state.change_direction(Direction::Up);
        for _ in 0..10 {
            state.advance_tick();
        }
        assert!(!state.is_active());
        assert!(state.score() >= 1);

        state.reset();

        assert_eq!(state.score(), 0);
        assert_eq!(state.direction(), INITIAL_DIRECTION);
        assert!(state.is_active());
        assert_eq!(state.death_reason(), None);
        assert_eq!(state.tick_count(), 0);
        let body: Vec<Position> = state.body().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(0, 150),
                Position::new(0, 100),
                Position::new(0, 50),
            ]
        );
    }

    #[test]
    fn length_tracks_food_eaten_over_a_run() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 21);
        let turns = [Direction::Right, Direction::Down, Direction::Left, Direction::Down];
        let mut eaten = 0;

        for (tick, turn) in (0..40).zip(turns.iter().cycle()) {
            if tick % 3 == 0 {
                state.change_direction(*turn);
            }
            let length_before = state.snake().len();
            match state.advance_tick() {
                TickOutcome::Ate => {
                    eaten += 1;
                    assert_eq!(state.snake().len(), length_before + 1);
                }
                TickOutcome::Moved => assert_eq!(state.snake().len(), length_before),
                TickOutcome::Collided(_) | TickOutcome::Idle => break,
            }
            assert_eq!(state.snake().len(), 3 + eaten);
            assert_eq!(state.score() as usize, eaten);
        }
    }
}
