use rand::Rng;

use super::game_state::GameState;
use super::types::{Direction, GameStatus, Point};

/// How the autopilot picks its next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotStrategy {
    /// Chase the food along the shortest toroidal path, avoiding the body.
    Greedy,
    /// Any safe, non-reversing direction.
    Random,
}

/// Autopilot input collaborator: reads the game state and produces turn
/// requests, exactly like a keyboard or gamepad handler would.
pub struct BotController;

impl BotController {
    pub fn calculate_move(strategy: BotStrategy, state: &GameState) -> Option<Direction> {
        if state.status == GameStatus::GameOver {
            return None;
        }
        match strategy {
            BotStrategy::Greedy => Self::greedy_move(state),
            BotStrategy::Random => Self::random_safe_move(state),
        }
    }

    fn greedy_move(state: &GameState) -> Option<Direction> {
        let head = state.snake.head();
        let mut best_direction = None;
        let mut best_distance = usize::MAX;

        for direction in Self::candidate_directions(state.snake.direction) {
            let next = state.next_position(head, direction);
            if state.snake.occupies(&next) {
                continue;
            }
            let distance = Self::toroidal_distance(next, state.food, state);
            if distance < best_distance {
                best_distance = distance;
                best_direction = Some(direction);
            }
        }

        best_direction.or_else(|| Self::random_safe_move(state))
    }

    fn random_safe_move(state: &GameState) -> Option<Direction> {
        let head = state.snake.head();
        let safe: Vec<Direction> = Self::candidate_directions(state.snake.direction)
            .into_iter()
            .filter(|&direction| !state.snake.occupies(&state.next_position(head, direction)))
            .collect();

        if safe.is_empty() {
            // boxed in; keep going and let the collision rule decide
            Some(state.snake.direction)
        } else {
            let mut rng = rand::rng();
            Some(safe[rng.random_range(0..safe.len())])
        }
    }

    fn candidate_directions(current: Direction) -> Vec<Direction> {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter(|d| !d.is_opposite(&current))
        .collect()
    }

    /// Manhattan distance on the torus: each axis takes the shorter way
    /// around.
    fn toroidal_distance(a: Point, b: Point, state: &GameState) -> usize {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        dx.min(state.field_size.width - dx) + dy.min(state.field_size.height - dy)
    }
}
