//! Overview/focused cross-fade animator
//!
//! Produces the blend factor fed to [`blend`](super::blend::blend). Time is
//! supplied by the caller each frame, so the animator stays deterministic and
//! never reads a clock itself.

use std::time::Duration;

/// View a transition settles on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    Overview,
    Focused,
}

impl ViewTarget {
    /// Blend factor of this view when fully shown
    fn endpoint(self) -> f32 {
        match self {
            ViewTarget::Overview => 0.0,
            ViewTarget::Focused => 1.0,
        }
    }
}

/// Smoothstep easing, symmetric: `ease(1 - x) == 1 - ease(x)`
#[inline]
fn ease(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

#[derive(Debug, Clone)]
pub struct ViewTransition {
    duration: Duration,
    elapsed: Duration,
    target: ViewTarget,
    running: bool,
}

impl ViewTransition {
    /// Idle animator showing the overview
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            target: ViewTarget::Overview,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// View shown once the current transition (if any) completes
    pub fn target(&self) -> ViewTarget {
        self.target
    }

    /// Start fading toward `target`
    ///
    /// Reversing mid-fade continues from the current blend factor instead of
    /// jumping back to an endpoint. Requesting the view already shown is a
    /// no-op.
    pub fn start(&mut self, target: ViewTarget) {
        if target == self.target {
            return;
        }

        self.elapsed = if self.running {
            self.duration.saturating_sub(self.elapsed)
        } else {
            Duration::ZERO
        };
        self.target = target;
        self.running = !self.duration.is_zero();

        log::debug!(
            "ViewTransition: fading to {:?} over {:?}",
            target,
            self.duration.saturating_sub(self.elapsed)
        );
    }

    /// Advance by one frame's elapsed time
    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.running = false;
        }
    }

    /// Blend factor while a fade is in progress, `None` when settled
    pub fn progress(&self) -> Option<f32> {
        if !self.running {
            return None;
        }
        Some(self.blend_factor())
    }

    /// Current blend factor (0.0 = overview, 1.0 = focused), settled or not
    pub fn blend_factor(&self) -> f32 {
        if !self.running {
            return self.target.endpoint();
        }
        let fraction = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        match self.target {
            ViewTarget::Focused => ease(fraction),
            ViewTarget::Overview => 1.0 - ease(fraction),
        }
    }

    /// Settle on the overview without animating
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.target = ViewTarget::Overview;
        self.running = false;
    }
}
