pub mod config;
pub mod game;
pub mod logger;
pub mod session;

pub use config::{SettingsStore, Validate};
pub use game::{
    BotController, BotStrategy, Direction, FieldSize, GameState, GameStatus, Point, SessionRng,
    SimulationSettings, Snake, SnakeController, StateSnapshot, TickClock, TickOutcome,
};
pub use session::{GameSummary, SnapshotObserver, run_session};
