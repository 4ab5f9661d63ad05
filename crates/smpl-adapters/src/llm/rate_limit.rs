//! Fixed-window request limiter.

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

/// Allows at most `max_requests` per `window`.
///
/// Each client owns its limiter; there is no process-wide state.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<Window>,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub const DEFAULT_MAX_REQUESTS: u32 = 20;
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(Window {
                started: Instant::now(),
                count: 0,
            }),
        }
    }

    /// Take one request slot, or report how long until the window resets.
    pub fn acquire(&self) -> Result<(), Duration> {
        let Ok(mut state) = self.state.lock() else {
            // Poisoned: let the request through.
            return Ok(());
        };

        let elapsed = state.started.elapsed();
        if elapsed >= self.window {
            state.started = Instant::now();
            state.count = 0;
        }

        if state.count >= self.max_requests {
            return Err(self.window.saturating_sub(elapsed));
        }
        state.count += 1;
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_REQUESTS, Self::DEFAULT_WINDOW)
    }
}
