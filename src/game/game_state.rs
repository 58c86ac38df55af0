use crate::log;

use super::session_rng::SessionRng;
use super::settings::SimulationSettings;
use super::snake::Snake;
use super::types::{Direction, FieldSize, GameStatus, Point};

/// Retries before food placement falls back to scanning for free cells.
const FOOD_SAMPLE_RETRIES: usize = 100;

/// The deterministic simulation state: one snake on a toroidal grid, one
/// food cell, and the speed/status bookkeeping. Mutated exactly once per
/// tick via [`GameState::advance`].
#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: Snake,
    pub food: Point,
    pub field_size: FieldSize,
    pub speed: f32,
    pub status: GameStatus,
    speed_increment: f32,
    max_speed: f32,
    food_density_threshold: f32,
}

impl GameState {
    pub fn new(settings: &SimulationSettings, rng: &mut SessionRng) -> Self {
        let field_size = FieldSize::new(settings.field_width, settings.field_height);
        let start = Point::new(field_size.width / 2, field_size.height / 2);

        let mut state = Self {
            snake: Snake::new(start, Direction::Right),
            food: start,
            field_size,
            speed: settings.base_speed,
            status: GameStatus::Running,
            speed_increment: settings.speed_increment,
            max_speed: settings.max_speed,
            food_density_threshold: settings.food_density_threshold,
        };
        state.place_food(rng);
        state
    }

    /// Score is derived, not stored: a length-1 snake has eaten nothing.
    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    /// Records the most recent turn request. The request is dropped when it
    /// would reverse the committed direction of travel; the committed
    /// direction is the reference even if another request is already
    /// pending, so two quick turns within one tick cannot fold the snake
    /// onto itself. Ignored entirely once the game is over.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::GameOver {
            return;
        }
        if !direction.is_opposite(&self.snake.direction) {
            self.snake.pending_direction = Some(direction);
        }
    }

    /// One simulation step: commit the pending turn, move the head one cell
    /// with toroidal wrapping, then either die, grow, or slide.
    pub fn advance(&mut self, rng: &mut SessionRng) {
        if self.status == GameStatus::GameOver {
            return;
        }

        if let Some(direction) = self.snake.pending_direction.take() {
            self.snake.direction = direction;
        }

        let next_head = self.next_position(self.snake.head(), self.snake.direction);

        if self.snake.occupies(&next_head) {
            self.status = GameStatus::GameOver;
            log!(
                "snake hit itself at ({}, {}), final score {}",
                next_head.x,
                next_head.y,
                self.score()
            );
            return;
        }

        self.snake.body.push_front(next_head);
        self.snake.body_set.insert(next_head);

        if next_head == self.food {
            self.speed = (self.speed + self.speed_increment).min(self.max_speed);
            log!(
                "ate food at ({}, {}), score {}, speed {:.1}",
                next_head.x,
                next_head.y,
                self.score(),
                self.speed
            );
            self.place_food(rng);
        } else {
            let tail = self
                .snake
                .body
                .pop_back()
                .expect("snake body is never empty");
            self.snake.body_set.remove(&tail);
        }
    }

    /// The neighbouring cell in `direction`, wrapping across field edges.
    pub fn next_position(&self, from: Point, direction: Direction) -> Point {
        match direction {
            Direction::Up => Point::new(from.x, Self::wrapping_dec(from.y, self.field_size.height)),
            Direction::Down => {
                Point::new(from.x, Self::wrapping_inc(from.y, self.field_size.height))
            }
            Direction::Left => {
                Point::new(Self::wrapping_dec(from.x, self.field_size.width), from.y)
            }
            Direction::Right => {
                Point::new(Self::wrapping_inc(from.x, self.field_size.width), from.y)
            }
        }
    }

    pub fn wrapping_inc(value: usize, max: usize) -> usize {
        if value + 1 >= max { 0 } else { value + 1 }
    }

    pub fn wrapping_dec(value: usize, max: usize) -> usize {
        if value == 0 { max - 1 } else { value - 1 }
    }

    /// Moves the food to a uniformly random free cell. On a sparse field
    /// this rejection-samples; past the density threshold it draws from the
    /// explicit set of free cells so termination never depends on luck.
    pub fn place_food(&mut self, rng: &mut SessionRng) {
        let occupancy = self.snake.len() as f32 / self.field_size.cell_count() as f32;

        if occupancy < self.food_density_threshold {
            for _ in 0..FOOD_SAMPLE_RETRIES {
                let candidate = Point::new(
                    rng.random_range(0..self.field_size.width),
                    rng.random_range(0..self.field_size.height),
                );
                if !self.snake.occupies(&candidate) {
                    self.food = candidate;
                    log!("food placed at ({}, {})", candidate.x, candidate.y);
                    return;
                }
            }
        }

        let FieldSize { width, height } = self.field_size;
        let free: Vec<Point> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
            .filter(|cell| !self.snake.occupies(cell))
            .collect();

        if free.is_empty() {
            // Snake covers the whole field; nowhere left to put food.
            log!("field fully occupied, food not moved");
            return;
        }

        self.food = free[rng.random_range(0..free.len())];
        log!("food placed at ({}, {})", self.food.x, self.food.y);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::*;

    fn test_settings(width: usize, height: usize) -> SimulationSettings {
        SimulationSettings {
            field_width: width,
            field_height: height,
            ..SimulationSettings::default()
        }
    }

    fn state_with_snake(
        width: usize,
        height: usize,
        cells: &[(usize, usize)],
        direction: Direction,
    ) -> (GameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&test_settings(width, height), &mut rng);

        let body: VecDeque<Point> = cells.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let body_set: HashSet<Point> = body.iter().copied().collect();
        assert_eq!(body.len(), body_set.len(), "test snake overlaps itself");
        state.snake = Snake {
            body,
            body_set,
            direction,
            pending_direction: None,
        };

        // park the food on a free cell unless a test places it explicitly
        state.food = (0..height)
            .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
            .find(|cell| !state.snake.occupies(cell))
            .expect("test snake fills the field");
        (state, rng)
    }

    #[test]
    fn test_single_cell_snake_moves_right() {
        let (mut state, mut rng) = state_with_snake(10, 10, &[(5, 5)], Direction::Right);
        state.advance(&mut rng);

        assert_eq!(state.snake.body, VecDeque::from([Point::new(6, 5)]));
        assert_eq!(state.score(), 0);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_head_wraps_across_right_edge() {
        let (mut state, mut rng) = state_with_snake(10, 10, &[(9, 5), (8, 5)], Direction::Right);
        state.advance(&mut rng);

        assert_eq!(
            state.snake.body,
            VecDeque::from([Point::new(0, 5), Point::new(9, 5)])
        );
    }

    #[test]
    fn test_head_wraps_across_top_edge() {
        let (mut state, mut rng) = state_with_snake(10, 12, &[(3, 0)], Direction::Up);
        state.advance(&mut rng);

        assert_eq!(state.snake.head(), Point::new(3, 11));
    }

    #[test]
    fn test_wrap_keeps_coordinates_in_bounds() {
        let (mut state, mut rng) = state_with_snake(10, 10, &[(5, 5)], Direction::Left);
        for step in 0..100 {
            if step % 7 == 0 {
                state.request_direction(Direction::Up);
            } else if step % 3 == 0 {
                state.request_direction(Direction::Left);
            }
            state.advance(&mut rng);

            let head = state.snake.head();
            assert!(head.x < state.field_size.width);
            assert!(head.y < state.field_size.height);
            assert_eq!(state.snake.len() as u32, state.score() + 1);
        }
    }

    #[test]
    fn test_opposite_direction_request_is_rejected() {
        let (mut state, mut rng) =
            state_with_snake(10, 10, &[(4, 5), (3, 5), (2, 5)], Direction::Right);

        state.request_direction(Direction::Left);
        assert_eq!(state.snake.pending_direction, None);

        state.advance(&mut rng);
        assert_eq!(state.snake.head(), Point::new(5, 5));
        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_rejection_compares_against_committed_direction() {
        // Up is accepted, then Left is still measured against the committed
        // Right and dropped; the snake cannot fold onto its neck.
        let (mut state, mut rng) = state_with_snake(10, 10, &[(4, 5), (3, 5)], Direction::Right);

        state.request_direction(Direction::Up);
        state.request_direction(Direction::Left);
        assert_eq!(state.snake.pending_direction, Some(Direction::Up));

        state.advance(&mut rng);
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Point::new(4, 4));
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_last_request_between_ticks_wins() {
        let (mut state, mut rng) = state_with_snake(10, 10, &[(4, 5), (3, 5)], Direction::Right);

        state.request_direction(Direction::Up);
        state.request_direction(Direction::Down);
        state.advance(&mut rng);

        assert_eq!(state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_eating_food_grows_by_one_and_speeds_up() {
        let (mut state, mut rng) = state_with_snake(10, 10, &[(5, 5)], Direction::Right);
        state.food = Point::new(6, 5);
        let speed_before = state.speed;

        state.advance(&mut rng);

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score(), 1);
        assert!(state.speed > speed_before);
        assert_ne!(state.food, Point::new(6, 5));
        assert!(!state.snake.occupies(&state.food));

        // next step without food keeps the length
        state.food = Point::new(0, 0);
        state.advance(&mut rng);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_speed_is_capped() {
        let (mut state, mut rng) = state_with_snake(10, 10, &[(5, 5)], Direction::Right);
        state.speed = state.max_speed - 0.1;
        state.food = Point::new(6, 5);

        state.advance(&mut rng);
        assert_eq!(state.speed, state.max_speed);
    }

    #[test]
    fn test_self_collision_ends_game_without_mutation() {
        let (mut state, mut rng) = state_with_snake(
            10,
            10,
            &[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)],
            Direction::Down,
        );
        let body_before = state.snake.body.clone();
        let food_before = state.food;

        state.advance(&mut rng);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.body, body_before);
        assert_eq!(state.food, food_before);
    }

    #[test]
    fn test_moving_into_tail_cell_is_fatal() {
        // The tail would move away this tick, but the rule counts every
        // current body cell.
        let (mut state, mut rng) =
            state_with_snake(10, 10, &[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down);

        state.advance(&mut rng);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let (mut state, mut rng) = state_with_snake(
            10,
            10,
            &[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)],
            Direction::Down,
        );
        state.advance(&mut rng);
        assert_eq!(state.status, GameStatus::GameOver);

        let body = state.snake.body.clone();
        let food = state.food;
        let score = state.score();
        for _ in 0..5 {
            state.advance(&mut rng);
        }
        assert_eq!(state.snake.body, body);
        assert_eq!(state.food, food);
        assert_eq!(state.score(), score);
    }

    #[test]
    fn test_direction_requests_ignored_after_game_over() {
        let (mut state, mut rng) = state_with_snake(
            10,
            10,
            &[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)],
            Direction::Down,
        );
        state.advance(&mut rng);
        assert_eq!(state.status, GameStatus::GameOver);

        state.request_direction(Direction::Up);
        assert_eq!(state.snake.pending_direction, None);
    }

    #[test]
    fn test_new_state_places_food_off_snake() {
        for seed in 0..20 {
            let mut rng = SessionRng::new(seed);
            let state = GameState::new(&test_settings(10, 10), &mut rng);
            assert!(!state.snake.occupies(&state.food));
            assert_eq!(state.snake.len(), 1);
            assert_eq!(state.status, GameStatus::Running);
        }
    }

    #[test]
    fn test_place_food_on_dense_field_finds_a_free_cell() {
        // Fill all but three cells of a 10x10 field, far past the density
        // threshold, so placement must take the complement path.
        let cells: Vec<(usize, usize)> = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .take(97)
            .collect();
        let (mut state, mut rng) = state_with_snake(10, 10, &cells, Direction::Right);

        for _ in 0..10 {
            state.place_food(&mut rng);
            assert!(!state.snake.occupies(&state.food));
        }
    }

    #[test]
    fn test_place_food_on_full_field_leaves_food_alone() {
        let cells: Vec<(usize, usize)> = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .collect();

        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&test_settings(10, 10), &mut rng);
        let body: VecDeque<Point> = cells.iter().map(|&(x, y)| Point::new(x, y)).collect();
        state.snake.body_set = body.iter().copied().collect();
        state.snake.body = body;

        let food_before = state.food;
        state.place_food(&mut rng);
        assert_eq!(state.food, food_before);
    }

    #[test]
    fn test_same_seed_gives_same_food_sequence() {
        let mut first_rng = SessionRng::new(7);
        let mut second_rng = SessionRng::new(7);
        let mut first = GameState::new(&test_settings(20, 20), &mut first_rng);
        let mut second = GameState::new(&test_settings(20, 20), &mut second_rng);
        assert_eq!(first.food, second.food);

        for _ in 0..10 {
            first.place_food(&mut first_rng);
            second.place_food(&mut second_rng);
            assert_eq!(first.food, second.food);
        }
    }
}
