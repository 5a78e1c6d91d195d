//! Simulated live updates for the funded-amount KPI
//!
//! A `PeriodicTask` is a deadline checked on every tick. `DataUpdates`
//! owns one, rolls the update probability when it fires, and nudges the
//! KPI text by a small random percentage.

use crate::model::kpi::{nudge_amount, KpiBoard, LOAN_AMOUNT_TILE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// A recurring deadline that can be cancelled
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl PeriodicTask {
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            cancelled: false,
        }
    }

    /// Returns true once per elapsed interval; never after `cancel`
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        // Skip missed periods instead of firing a burst
        while self.next_due <= now {
            self.next_due += self.interval;
        }
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Cosmetic jitter on the funded-amount tile
pub struct DataUpdates {
    task: PeriodicTask,
    probability: f64,
    jitter: f64,
    rng: StdRng,
}

impl DataUpdates {
    pub fn start(interval: Duration, probability: f64, jitter: f64, now: Instant) -> Self {
        Self::with_rng(interval, probability, jitter, now, StdRng::from_entropy())
    }

    pub fn with_rng(
        interval: Duration,
        probability: f64,
        jitter: f64,
        now: Instant,
        rng: StdRng,
    ) -> Self {
        Self {
            task: PeriodicTask::start(interval.max(Duration::from_millis(1)), now),
            probability: probability.clamp(0.0, 1.0),
            jitter: jitter.abs(),
            rng,
        }
    }

    /// Poll the task and maybe nudge the KPI; returns true if the text changed
    pub fn tick(&mut self, now: Instant, kpis: &mut KpiBoard) -> bool {
        if !self.task.poll(now) {
            return false;
        }
        if self.rng.gen::<f64>() >= self.probability {
            return false;
        }

        let Some(current) = kpis.value(LOAN_AMOUNT_TILE) else {
            return false;
        };
        let factor = 1.0 + (self.rng.gen::<f64>() - 0.5) * self.jitter;
        match nudge_amount(current, factor) {
            Some(updated) => {
                log::debug!("funded amount {} -> {}", current, updated);
                kpis.set_value(LOAN_AMOUNT_TILE, updated);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.task.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_cancelled()
    }
}
