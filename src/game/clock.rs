/// Turns wall-clock frame callbacks into a fixed-rate stream of simulation
/// ticks, so the snake moves at `speed` steps per second no matter how fast
/// the display refreshes.
///
/// At most one tick fires per frame. When a frame arrives late the excess
/// elapsed time is carried forward instead of dropped, so a stalled frame
/// does not silently slow the game down.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickClock {
    last_tick_ms: Option<f64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether a simulation step is due at `now_ms` for the given
    /// rate. The interval is recomputed from `ticks_per_sec` on every call,
    /// so speed changes take effect immediately rather than at the next
    /// tick boundary.
    ///
    /// The very first frame only records its timestamp and never ticks.
    pub fn frame(&mut self, now_ms: f64, ticks_per_sec: f32) -> bool {
        let Some(last) = self.last_tick_ms else {
            self.last_tick_ms = Some(now_ms);
            return false;
        };

        let interval = 1000.0 / f64::from(ticks_per_sec.max(1.0));
        let elapsed = now_ms - last;
        if elapsed < interval {
            return false;
        }

        self.last_tick_ms = Some(now_ms - elapsed % interval);
        true
    }

    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }
}
