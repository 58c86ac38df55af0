use std::time::Duration;

use tokio::time::{Instant, interval};

use crate::game::{BotController, BotStrategy, GameStatus, SnakeController, StateSnapshot};
use crate::log;

/// Receives a read-only snapshot after every frame of a headless session.
/// Renderers, score displays, and test probes all sit behind this seam.
pub trait SnapshotObserver: Send + Sync + 'static {
    fn publish(&self, snapshot: StateSnapshot) -> impl Future<Output = ()> + Send;
}

/// Outcome of a finished session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSummary {
    pub score: u32,
    pub ticks: u64,
    pub final_speed: f32,
}

/// Frame cadence for headless runs; roughly a 60 Hz display.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Drives the controller frame by frame until the game ends, feeding it
/// autopilot input when a strategy is given and publishing every frame's
/// snapshot. The controller's own clock still decides which frames become
/// simulation steps, exactly as under a real render loop.
pub async fn run_session<O: SnapshotObserver>(
    mut controller: SnakeController,
    bot: Option<BotStrategy>,
    observer: O,
) -> GameSummary {
    let started = Instant::now();
    let mut frames = interval(FRAME_INTERVAL);
    let mut ticks = 0u64;

    loop {
        frames.tick().await;

        if let Some(strategy) = bot
            && let Some(direction) = BotController::calculate_move(strategy, controller.state())
        {
            controller.request_turn(direction);
        }

        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = controller.tick(now_ms);
        if outcome.ticked {
            ticks += 1;
        }

        let status = outcome.state.status;
        let score = outcome.state.score;
        let final_speed = outcome.state.speed;
        observer.publish(outcome.state).await;

        if status == GameStatus::GameOver {
            log!("session over after {} ticks, score {}", ticks, score);
            return GameSummary {
                score,
                ticks,
                final_speed,
            };
        }
    }
}
