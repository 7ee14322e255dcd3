use std::time::{Duration, Instant};

/// Fixed-rate frame scheduler. The host drives frames while the ticker is
/// started; the session stops it when the game ends.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    started: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started: false,
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Sleep out whatever is left of the frame that began at `frame_start`.
    pub fn wait_for_next_frame(&self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
    }
}
