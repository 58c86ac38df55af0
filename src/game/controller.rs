use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::log;

use super::clock::TickClock;
use super::game_state::GameState;
use super::session_rng::SessionRng;
use super::settings::SimulationSettings;
use super::types::{Direction, FieldSize, GameStatus, Point};

/// Read-only view of the simulation, handed to renderers and score
/// displays. Taking an owned snapshot keeps readers off the live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Body cells, head first.
    pub snake: Vec<Point>,
    pub food: Point,
    pub field_size: FieldSize,
    pub direction: Direction,
    pub score: u32,
    pub speed: f32,
    pub status: GameStatus,
}

/// Result of one frame callback: whether a simulation step ran, and the
/// state to draw either way.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub ticked: bool,
    pub state: StateSnapshot,
}

/// The single owner of the simulation: game state, tick scheduling, tuning
/// and RNG behind one mutation surface. Hosts drive it with `tick` once per
/// animation frame and feed it input through `request_direction`; everyone
/// else reads snapshots.
pub struct SnakeController {
    state: GameState,
    clock: TickClock,
    settings: SimulationSettings,
    rng: SessionRng,
}

impl SnakeController {
    pub fn new(settings: SimulationSettings, mut rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;
        let state = GameState::new(&settings, &mut rng);
        Ok(Self {
            state,
            clock: TickClock::new(),
            settings,
            rng,
        })
    }

    pub fn from_settings(settings: SimulationSettings) -> Result<Self, String> {
        Self::new(settings, SessionRng::from_random())
    }

    /// Input collaborators call this with one of the four unit vectors on
    /// each directional event (key press, touch button, controller edge).
    /// Anything else is ignored.
    pub fn request_direction(&mut self, dx: i32, dy: i32) {
        if let Some(direction) = Direction::from_delta(dx, dy) {
            self.state.request_direction(direction);
        }
    }

    pub fn request_turn(&mut self, direction: Direction) {
        self.state.request_direction(direction);
    }

    /// Drives the scheduler with the frame timestamp and, when a step is
    /// due, advances the simulation. Call once per animation frame; the
    /// returned snapshot is what this frame should draw.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        let ticked = self.clock.frame(now_ms, self.state.speed);
        if ticked {
            self.state.advance(&mut self.rng);
        }
        TickOutcome {
            ticked,
            state: self.snapshot(),
        }
    }

    /// Rebuilds the simulation from the current settings. Nothing of the
    /// previous round survives, including the scheduler's accumulated time.
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.settings, &mut self.rng);
        self.clock.reset();
        log!(
            "game restarted on a {}x{} field",
            self.settings.field_width,
            self.settings.field_height
        );
    }

    /// Viewport-resize hook: records new field dimensions for the next
    /// restart. The running round keeps its grid.
    pub fn set_field_size(&mut self, width: usize, height: usize) -> Result<(), String> {
        let mut updated = self.settings.clone();
        updated.field_width = width;
        updated.field_height = height;
        updated.validate()?;
        self.settings = updated;
        Ok(())
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            snake: self.state.snake.body.iter().copied().collect(),
            food: self.state.food,
            field_size: self.state.field_size,
            direction: self.state.snake.direction,
            score: self.state.score(),
            speed: self.state.speed,
            status: self.state.status,
        }
    }
}
