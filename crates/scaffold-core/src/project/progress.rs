//! Build progress shared between the build runner and the progress display
//!
//! The runner is the only writer. Readers poll on a timer and may see a
//! slightly stale combination of fields; each field is read atomically on its
//! own, so a snapshot never contains a torn value.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct BuildProgress {
    total_dependencies: AtomicUsize,
    processed_dependencies: AtomicUsize,
    vendoring_planned: AtomicBool,
    vendoring_finished: AtomicBool,
    finished: AtomicBool,
    status: Mutex<String>,
}

/// Point-in-time copy of [`BuildProgress`] for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub processed_dependencies: usize,
    pub total_dependencies: usize,
    pub vendoring_finished: bool,
    pub finished: bool,
    pub status: String,
    pub fraction: f64,
}

impl BuildProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed_dependencies(&self) -> usize {
        self.processed_dependencies.load(Ordering::Acquire)
    }

    pub fn total_dependencies(&self) -> usize {
        self.total_dependencies.load(Ordering::Acquire)
    }

    pub fn vendoring_finished(&self) -> bool {
        self.vendoring_finished.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub fn status(&self) -> String {
        self.status_guard().clone()
    }

    /// Completed share of the work in [0, 1]
    ///
    /// Work units are one per dependency plus one for vendoring when requested.
    /// A run with no units reports 0 until it finishes, then 1.
    pub fn fraction(&self) -> f64 {
        let vendoring = self.vendoring_planned.load(Ordering::Acquire);
        let total = self.total_dependencies() + usize::from(vendoring);
        if total == 0 {
            return if self.is_finished() { 1.0 } else { 0.0 };
        }
        let done = self.processed_dependencies().min(self.total_dependencies())
            + usize::from(vendoring && self.vendoring_finished());
        (done as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            processed_dependencies: self.processed_dependencies(),
            total_dependencies: self.total_dependencies(),
            vendoring_finished: self.vendoring_finished(),
            finished: self.is_finished(),
            status: self.status(),
            fraction: self.fraction(),
        }
    }

    pub(crate) fn begin(&self, total_dependencies: usize, vendoring: bool) {
        self.total_dependencies
            .store(total_dependencies, Ordering::Release);
        self.vendoring_planned.store(vendoring, Ordering::Release);
    }

    /// Counts one dependency attempt; never passes the announced total
    pub(crate) fn dependency_processed(&self) {
        let total = self.total_dependencies();
        let _ = self
            .processed_dependencies
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < total).then_some(n + 1)
            });
    }

    pub(crate) fn vendoring_done(&self) {
        self.vendoring_finished.store(true, Ordering::Release);
    }

    pub(crate) fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub(crate) fn set_status(&self, text: impl Into<String>) {
        *self.status_guard() = text.into();
    }

    pub(crate) fn append_status(&self, text: &str) {
        self.status_guard().push_str(text);
    }

    fn status_guard(&self) -> MutexGuard<'_, String> {
        // A panic while holding the lock leaves a complete String behind
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
