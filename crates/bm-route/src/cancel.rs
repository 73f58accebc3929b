//! Cooperative cancellation for long searches.
//!
//! A search polls [`Cancellation::is_cancelled`] once per frontier pop and
//! stops with [`RouteError::Cancelled`](crate::RouteError::Cancelled).
//! Nothing is returned on cancellation, not even a partial path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A shared stop flag, a deadline, both, or neither.
///
/// Cheap to clone; clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag:     Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// Never fires.
    pub fn none() -> Self {
        Self::default()
    }

    /// Fires once `flag` is set to `true` by any thread.
    pub fn with_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag: Some(flag), deadline: None }
    }

    /// Fires once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self { flag: None, deadline: Some(deadline) }
    }

    /// Fires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Add (or replace) the deadline.
    pub fn and_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Add (or replace) the stop flag.
    pub fn and_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        if let Some(flag) = &self.flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
