use serde::Deserialize;

use crate::timers::Millis;

/// How scroll notifications are coalesced. The same policy applies to
/// every scroll-derived output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPolicy {
    /// At most one pending update per rendered frame.
    FrameAligned,
    /// Leading run, then at most one trailing run per interval.
    Throttle { interval_ms: Millis },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Run the update immediately.
    RunNow,
    /// Ask the host for an animation frame; run on [`RateLimiter::on_frame`].
    RequestFrame,
    /// Run on [`RateLimiter::on_deadline`] at the given time.
    ScheduleAt(Millis),
    /// An update is already pending and will see the latest metrics.
    Coalesced,
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    policy: ScrollPolicy,
    pending: bool,
    last_run: Option<Millis>,
}

impl RateLimiter {
    pub fn new(policy: ScrollPolicy) -> Self {
        Self {
            policy,
            pending: false,
            last_run: None,
        }
    }

    pub fn admit(&mut self, now: Millis) -> Admission {
        if self.pending {
            return Admission::Coalesced;
        }
        match self.policy {
            ScrollPolicy::FrameAligned => {
                self.pending = true;
                Admission::RequestFrame
            }
            ScrollPolicy::Throttle { interval_ms } => match self.last_run {
                Some(last) if now < last + interval_ms => {
                    self.pending = true;
                    Admission::ScheduleAt(last + interval_ms)
                }
                _ => {
                    self.last_run = Some(now);
                    Admission::RunNow
                }
            },
        }
    }

    /// Returns true when a frame-aligned update was waiting for this frame.
    pub fn on_frame(&mut self) -> bool {
        if self.policy == ScrollPolicy::FrameAligned && self.pending {
            self.pending = false;
            return true;
        }
        false
    }

    /// Returns true when a trailing throttled update is due.
    pub fn on_deadline(&mut self, now: Millis) -> bool {
        if matches!(self.policy, ScrollPolicy::Throttle { .. }) && self.pending {
            self.pending = false;
            self.last_run = Some(now);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_aligned_coalesces_until_frame() {
        let mut limiter = RateLimiter::new(ScrollPolicy::FrameAligned);
        assert_eq!(limiter.admit(0), Admission::RequestFrame);
        assert_eq!(limiter.admit(1), Admission::Coalesced);
        assert_eq!(limiter.admit(2), Admission::Coalesced);
        assert!(limiter.on_frame());
        assert!(!limiter.on_frame());
        assert_eq!(limiter.admit(20), Admission::RequestFrame);
    }

    #[test]
    fn throttle_runs_leading_then_trailing() {
        let mut limiter = RateLimiter::new(ScrollPolicy::Throttle { interval_ms: 100 });
        assert_eq!(limiter.admit(0), Admission::RunNow);
        assert_eq!(limiter.admit(10), Admission::ScheduleAt(100));
        assert_eq!(limiter.admit(50), Admission::Coalesced);
        assert!(limiter.on_deadline(100));
        assert!(!limiter.on_deadline(100));
        assert_eq!(limiter.admit(150), Admission::ScheduleAt(200));
        assert!(limiter.on_deadline(200));
        assert_eq!(limiter.admit(400), Admission::RunNow);
    }

    #[test]
    fn frames_are_ignored_under_throttle() {
        let mut limiter = RateLimiter::new(ScrollPolicy::Throttle { interval_ms: 100 });
        limiter.admit(0);
        limiter.admit(5);
        assert!(!limiter.on_frame());
        assert!(limiter.on_deadline(100));
    }
}
