// THEORY:
// Both scan phases (the boundary profile and the adjacency ranking) cost
// O(width * height) and O(strips^2 * height). `ScanControl` is the cooperative
// cancellation hook around them: it implements `enough::Stop`, so the scanners
// poll `check()` once per column pair and bail out with `StopReason`.
//
// A control can be cancelled from another thread, carry a deadline, or both.
// Scans that don't care pass `enough::Unstoppable`.

use enough::{Stop, StopReason};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct ScanControl {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
}

impl ScanControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// A control that times out `budget` from now. A budget too large to
    /// represent as an `Instant` means no deadline.
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            deadline: Instant::now().checked_add(budget),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Stop for ScanControl {
    fn check(&self) -> Result<(), StopReason> {
        if self.is_cancelled() {
            return Err(StopReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(StopReason::TimedOut),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_control_lets_scans_run() {
        assert!(ScanControl::new().check().is_ok());
        assert!(ScanControl::with_budget(Duration::from_secs(3600)).check().is_ok());
    }

    #[test]
    fn cancel_is_observed() {
        let control = ScanControl::new();
        control.cancel();
        assert!(matches!(control.check(), Err(StopReason::Cancelled)));
    }

    #[test]
    fn unrepresentable_budget_never_expires() {
        let control = ScanControl::with_budget(Duration::MAX);
        assert!(control.check().is_ok());
        assert!(ScanControl::with_budget(Duration::from_secs(u64::MAX)).check().is_ok());
    }

    #[test]
    fn expired_budget_times_out() {
        let control = ScanControl::with_budget(Duration::ZERO);
        assert!(matches!(control.check(), Err(StopReason::TimedOut)));
    }
}
