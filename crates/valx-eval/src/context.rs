//! Evaluation context: the cancellation handle threaded through every
//! evaluation (§5 Concurrency & Resource Model).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::EvalError;

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
}

/// Cheaply cloneable cancellation handle passed to every operator, function
/// invocation, and regex compile. Cloning an `EvalContext` shares the same
/// cancellation flag and deadline with the original.
#[derive(Clone)]
pub struct EvalContext {
    inner: Arc<Inner>,
}

impl EvalContext {
    /// A context that never cancels and has no deadline.
    pub fn background() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                deadline: None,
            }),
        }
    }

    /// A context that is automatically considered cancelled once `timeout`
    /// has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                deadline: Some(Instant::now() + timeout),
            }),
        }
    }

    /// Create a context together with a [`CancelHandle`] that can cancel it
    /// from another thread.
    pub fn cancellable() -> (Self, CancelHandle) {
        let inner = Arc::new(Inner {
            cancelled: AtomicBool::new(false),
            deadline: None,
        });
        let ctx = Self {
            inner: inner.clone(),
        };
        (ctx, CancelHandle { inner })
    }

    /// Must be called at the entry of every operator, function invocation,
    /// and long iteration (regex compile, large sequence scan) per §5.
    pub fn check(&self) -> Result<(), EvalError> {
        if self.inner.cancelled.load(Ordering::Relaxed) {
            return Err(EvalError::Cancelled("cancelled".to_string()));
        }
        if let Some(deadline) = self.inner.deadline {
            if Instant::now() >= deadline {
                return Err(EvalError::Cancelled("deadline exceeded".to_string()));
            }
        }
        Ok(())
    }

    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::background()
    }
}

/// The other half of [`EvalContext::cancellable`]; cancels the paired
/// context from any thread.
pub struct CancelHandle {
    inner: Arc<Inner>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Relaxed);
    }
}
