//! Recording call arguments and asserting their shape.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::matcher::matches;
use crate::signature::Signature;
use crate::value::Value;

/// Records the arguments of each call to a stubbed function so tests can
/// ask whether it was called with arguments of a given shape.
///
/// Usable from `&self` and across threads.
#[derive(Debug, Default)]
pub struct CallRecorder {
    calls: Mutex<Vec<Value>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Value>> {
        // A panicking test thread must not hide the calls recorded so far.
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one call. Multiple arguments are usually passed as a list.
    pub fn record(&self, args: impl Into<Value>) {
        self.lock().push(args.into());
    }

    pub fn calls(&self) -> Vec<Value> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    /// True if any recorded call matches `signature`.
    pub fn was_called_with(&self, signature: &Signature) -> bool {
        self.lock().iter().any(|args| matches(args, signature))
    }

    /// True if the `n`th call (1-based) exists and matches `signature`.
    pub fn nth_called_with(&self, n: usize, signature: &Signature) -> bool {
        let calls = self.lock();
        n.checked_sub(1)
            .and_then(|i| calls.get(i))
            .is_some_and(|args| matches(args, signature))
    }

    pub fn last_called_with(&self, signature: &Signature) -> bool {
        self.lock()
            .last()
            .is_some_and(|args| matches(args, signature))
    }
}
