use thiserror::Error;

use crate::hold::domain::hold_status::HoldStatus;
use crate::shared::constants::DEFAULT_GRACE_PERIOD_SECS;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoldConfigError {
    #[error("target duration must be a positive number of seconds, got {0}")]
    TargetDuration(f64),
    #[error("grace period must be a positive number of seconds, got {0}")]
    GracePeriod(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Holding,
    Done,
}

/// Debounced hold timer for a single pose.
///
/// Counts down from `target_duration` while the pose is detected. Gaps in
/// detection up to `grace_period` seconds are bridged without losing
/// progress; a longer gap throws the attempt away. Once the countdown
/// reaches zero the tracker stays done until [`HoldTracker::reset`].
///
/// Timestamps are seconds on any clock that does not run backwards.
/// `update` must be called on every frame, detected or not: the grace
/// period only expires when the tracker is told the time.
#[derive(Debug, Clone)]
pub struct HoldTracker {
    name: String,
    target_duration: f64,
    grace_period: f64,
    start_time: Option<f64>,
    last_seen_time: f64,
    completed: bool,
}

impl HoldTracker {
    pub fn new(name: impl Into<String>, target_duration: f64) -> Result<Self, HoldConfigError> {
        Self::with_grace_period(name, target_duration, DEFAULT_GRACE_PERIOD_SECS)
    }

    pub fn with_grace_period(
        name: impl Into<String>,
        target_duration: f64,
        grace_period: f64,
    ) -> Result<Self, HoldConfigError> {
        if !(target_duration.is_finite() && target_duration > 0.0) {
            return Err(HoldConfigError::TargetDuration(target_duration));
        }
        if !(grace_period.is_finite() && grace_period > 0.0) {
            return Err(HoldConfigError::GracePeriod(grace_period));
        }
        Ok(Self {
            name: name.into(),
            target_duration,
            grace_period,
            start_time: None,
            last_seen_time: 0.0,
            completed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_duration(&self) -> f64 {
        self.target_duration
    }

    pub fn grace_period(&self) -> f64 {
        self.grace_period
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> HoldState {
        if self.completed {
            HoldState::Done
        } else if self.start_time.is_some() {
            HoldState::Holding
        } else {
            HoldState::Idle
        }
    }

    /// Seconds left on the current attempt, `None` when idle.
    pub fn remaining(&self, now: f64) -> Option<f64> {
        if self.completed {
            return Some(0.0);
        }
        self.start_time.map(|start| {
            let elapsed = (now - start).max(0.0);
            (self.target_duration - elapsed).max(0.0)
        })
    }

    /// Feeds one frame's detection result and returns what to display.
    pub fn update(&mut self, is_detected: bool, now: f64) -> HoldStatus {
        if self.completed {
            return HoldStatus::done(&self.name);
        }

        if is_detected {
            if self.start_time.is_some() && now < self.last_seen_time {
                log::warn!(
                    "{}: timestamp went backwards ({now:.3}s < {:.3}s)",
                    self.name,
                    self.last_seen_time
                );
            }
            self.last_seen_time = now;
            if self.start_time.is_none() {
                log::debug!("{}: hold started at {now:.2}s", self.name);
                self.start_time = Some(now);
            }
        } else if self.start_time.is_some() && self.gap_since_seen(now) > self.grace_period {
            log::debug!(
                "{}: hold broken at {now:.2}s (unseen for {:.2}s)",
                self.name,
                self.gap_since_seen(now)
            );
            self.start_time = None;
        }

        self.status(now)
    }

    /// Re-arms the tracker, dropping any progress or completion.
    pub fn reset(&mut self) {
        self.start_time = None;
        self.last_seen_time = 0.0;
        self.completed = false;
    }

    fn gap_since_seen(&self, now: f64) -> f64 {
        (now - self.last_seen_time).max(0.0)
    }

    fn status(&mut self, now: f64) -> HoldStatus {
        match self.remaining(now) {
            None => HoldStatus::waiting(&self.name),
            Some(remaining) if remaining <= 0.0 => {
                self.completed = true;
                log::info!("{}: held for {:.0}s, done", self.name, self.target_duration);
                HoldStatus::done(&self.name)
            }
            Some(remaining) => HoldStatus::counting(&self.name, remaining),
        }
    }
}
