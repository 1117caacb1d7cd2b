//! # Transaction Status Reporter
//!
//! Holds the latest pending/success/error notification and schedules its
//! own clearing: 2s after a success, 3s after an error, never while
//! pending. A new transition pre-empts the previous auto-clear timer.

use crate::config::HuntConfig;
use crate::domain::{StatusKind, TransactionStatus};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct StatusCell {
    current: RwLock<Option<TransactionStatus>>,
    generation: AtomicU64,
}

/// Latest-status holder with timer-driven auto-expiry.
///
/// `report` must be called from within a Tokio runtime; the auto-clear
/// timer is a spawned task.
#[derive(Clone)]
pub struct TransactionStatusReporter {
    cell: Arc<StatusCell>,
    success_clear: Duration,
    error_clear: Duration,
}

impl TransactionStatusReporter {
    /// Create a reporter with the configured clear delays.
    pub fn new(config: &HuntConfig) -> Self {
        Self {
            cell: Arc::new(StatusCell {
                current: RwLock::new(None),
                generation: AtomicU64::new(0),
            }),
            success_clear: Duration::from_millis(config.success_clear_ms),
            error_clear: Duration::from_millis(config.error_clear_ms),
        }
    }

    /// Publish a new status, pre-empting any pending auto-clear timer.
    pub fn report(&self, kind: StatusKind, message: impl Into<String>) {
        let generation = self.cell.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.cell.current.write() = Some(TransactionStatus::new(kind, message));

        let delay = match kind {
            StatusKind::Pending => return,
            StatusKind::Success => self.success_clear,
            StatusKind::Error => self.error_clear,
        };

        let cell = Arc::clone(&self.cell);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Only clear if no newer transition pre-empted this timer.
            if cell.generation.load(Ordering::SeqCst) == generation {
                *cell.current.write() = None;
            }
        });
    }

    /// Publish a pending status.
    pub fn pending(&self, message: impl Into<String>) {
        self.report(StatusKind::Pending, message);
    }

    /// Publish a success status.
    pub fn success(&self, message: impl Into<String>) {
        self.report(StatusKind::Success, message);
    }

    /// Publish an error status.
    pub fn error(&self, message: impl Into<String>) {
        self.report(StatusKind::Error, message);
    }

    /// Latest status, if still visible.
    pub fn current(&self) -> Option<TransactionStatus> {
        self.cell.current.read().clone()
    }

    /// Drop the current status immediately.
    pub fn clear(&self) {
        self.cell.generation.fetch_add(1, Ordering::SeqCst);
        *self.cell.current.write() = None;
    }
}
