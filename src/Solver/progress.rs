//! Per-step progress reporting.
//!
//! The integrator calls [`ProgressObserver::step_done`] once after every completed time
//! step. Observers never see the state, so they cannot change the numerical result.
use enum_dispatch::enum_dispatch;
use log::info;

#[enum_dispatch]
pub trait ProgressObserver {
    fn step_done(&mut self);
}

/// Any `FnMut()` closure can observe progress.
impl<F> ProgressObserver for F
where
    F: FnMut(),
{
    fn step_done(&mut self) {
        self()
    }
}

/// Ignores progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressObserver for Silent {
    fn step_done(&mut self) {}
}

/// Counts completed steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepCounter {
    pub steps: usize,
}

impl ProgressObserver for StepCounter {
    fn step_done(&mut self) {
        self.steps += 1;
    }
}

/// Logs progress at fixed percentage increments.
#[derive(Debug, Clone)]
pub struct LogProgress {
    total: usize,
    done: usize,
    increment: usize,
    next_report: usize,
}

impl LogProgress {
    /// `total` steps, one log line every `increment` percent.
    pub fn new(total: usize, increment: usize) -> Self {
        let increment = increment.clamp(1, 100);
        Self {
            total,
            done: 0,
            increment,
            next_report: increment,
        }
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn finished(&self) -> bool {
        self.done >= self.total
    }
}

impl ProgressObserver for LogProgress {
    fn step_done(&mut self) {
        self.done += 1;
        if self.total == 0 {
            return;
        }
        let percent = self.done * 100 / self.total;
        if percent >= self.next_report {
            info!("Solving: {}/{} steps ({}%)", self.done, self.total, percent);
            while self.next_report <= percent {
                self.next_report += self.increment;
            }
        }
    }
}

/// Observers bundled with the crate, chosen at run time.
#[enum_dispatch(ProgressObserver)]
#[derive(Debug, Clone)]
pub enum ProgressReporter {
    Silent,
    StepCounter,
    LogProgress,
}

impl ProgressReporter {
    /// Logs every `increment` percent of a run over `time_points` points, i.e.
    /// `time_points - 1` steps. Silent when there is no step to take.
    pub fn logging(time_points: usize, increment: usize) -> Self {
        match time_points.saturating_sub(1) {
            0 => ProgressReporter::Silent(Silent),
            steps => ProgressReporter::LogProgress(LogProgress::new(steps, increment)),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        ProgressReporter::Silent(Silent)
    }
}
