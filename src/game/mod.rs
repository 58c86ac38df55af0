mod bot_controller;
mod clock;
mod controller;
mod game_state;
mod session_rng;
mod settings;
mod snake;
mod types;

pub use bot_controller::{BotController, BotStrategy};
pub use clock::TickClock;
pub use controller::{SnakeController, StateSnapshot, TickOutcome};
pub use game_state::GameState;
pub use session_rng::SessionRng;
pub use settings::SimulationSettings;
pub use snake::Snake;
pub use types::{Direction, FieldSize, GameStatus, Point};
