//! Frame-driven animation clock.
//!
//! The loop is driven by redraw requests: [`AnimationLoop::request_frame`]
//! grants at most one outstanding request, and [`AnimationLoop::frame`]
//! consumes it and reads the wall-clock time since the loop started. Orbit
//! positions are a pure function of that time, so a stalled frame moves the
//! planets to where they would have been.

use std::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct AnimationLoop {
    running: bool,
    frame_pending: bool,
    started_at: Option<Instant>,
    elapsed: f64,
    frame_count: u64,
}

impl AnimationLoop {
    /// A stopped loop with the clock at zero.
    pub fn new() -> Self {
        Self {
            running: false,
            frame_pending: false,
            started_at: None,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Reset the clock and start running. Restarting a running loop resets it.
    pub fn start(&mut self) {
        self.running = true;
        self.frame_pending = false;
        self.started_at = Some(Instant::now());
        self.elapsed = 0.0;
        self.frame_count = 0;
        debug!("Animation loop started");
    }

    /// Stop running and drop any outstanding frame request.
    pub fn stop(&mut self) {
        if self.running {
            debug!(
                "Animation loop stopped after {} frames ({:.1}s)",
                self.frame_count, self.elapsed
            );
        }
        self.running = false;
        self.frame_pending = false;
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a frame has been requested and not yet run.
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Claim the next frame request. Returns `false` when the loop is stopped
    /// or a request is already outstanding.
    pub fn request_frame(&mut self) -> bool {
        if !self.running || self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Run one frame: clears the outstanding request and returns the seconds
    /// elapsed since [`start`](Self::start). `None` while stopped.
    pub fn frame(&mut self) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.frame_pending = false;
        Some(self.advance_to(Instant::now()))
    }

    fn advance_to(&mut self, now: Instant) -> f64 {
        if let Some(started_at) = self.started_at {
            self.elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        }
        self.frame_count += 1;
        self.elapsed
    }

    /// Seconds of animation so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}
