//! Cooperative cancellation for long decodes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::DecodeError;

/// A shared cancellation flag.
///
/// Clones share the flag. A decode that observes the flag fails with
/// [`DecodeError::Cancelled`] and clears it, so the next call on the same
/// token starts clean.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the decode currently using this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns whether a cancellation request is pending.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Consumes a pending cancellation request, failing if there was one.
    pub(crate) fn checkpoint(&self) -> Result<(), DecodeError> {
        // Plain load first: the flag is almost never set.
        if self.flag.load(Ordering::Relaxed) && self.flag.swap(false, Ordering::SeqCst) {
            return Err(DecodeError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_consumes_request() {
        let token = CancelToken::new();
        assert!(token.checkpoint().is_ok());

        let caller = token.clone();
        caller.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.checkpoint(), Err(DecodeError::Cancelled));

        // Consumed: the next checkpoint passes.
        assert!(!caller.is_cancelled());
        assert!(token.checkpoint().is_ok());
    }
}
