//! Async Operations
//!
//! Image work (decode, dimension probe, encode) runs off the main loop on
//! background threads. Each operation hands back an `AsyncOp` that is polled
//! once per frame; all state changes happen on the main loop when it resolves.

use crate::error::ImageError;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// Result type for async operations
pub type AsyncResult<T> = Result<T, ImageError>;

/// A handle to a pending async operation that can be polled
#[cfg(not(target_arch = "wasm32"))]
pub struct AsyncOp<T> {
    receiver: Receiver<AsyncResult<T>>,
    result: Option<AsyncResult<T>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + 'static> AsyncOp<T> {
    /// Run `job` on a background thread
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> AsyncResult<T> + Send + 'static,
    {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            let _ = sender.send(job());
        });
        Self {
            receiver,
            result: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> AsyncOp<T> {
    /// Check if the operation has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Thread panicked or dropped sender
                self.result = Some(Err(ImageError::Disconnected));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<AsyncResult<T>> {
        if self.result.is_none() {
            // Try one more time
            if let Ok(result) = self.receiver.try_recv() {
                self.result = Some(result);
            }
        }
        self.result
    }

    /// Block until the job finishes. Only for tests and shutdown paths.
    pub fn wait(self) -> AsyncResult<T> {
        match self.result {
            Some(result) => result,
            None => self.receiver.recv().unwrap_or(Err(ImageError::Disconnected)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WASM (no threads: operations complete immediately)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
pub struct AsyncOp<T> {
    result: Option<AsyncResult<T>>,
}

#[cfg(target_arch = "wasm32")]
impl<T: Send + 'static> AsyncOp<T> {
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> AsyncResult<T> + Send + 'static,
    {
        Self { result: Some(job()) }
    }
}

#[cfg(target_arch = "wasm32")]
impl<T> AsyncOp<T> {
    pub fn is_complete(&mut self) -> bool {
        true
    }

    pub fn take(self) -> Option<AsyncResult<T>> {
        self.result
    }

    pub fn wait(self) -> AsyncResult<T> {
        self.result.unwrap_or(Err(ImageError::Disconnected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawned_job_resolves() {
        let op = AsyncOp::spawn(|| Ok(21 * 2));
        assert_eq!(op.wait(), Ok(42));
    }

    #[test]
    fn test_error_is_carried_through() {
        let mut op: AsyncOp<u32> = AsyncOp::spawn(|| Err(ImageError::Decode("bad header".into())));
        while !op.is_complete() {
            std::thread::yield_now();
        }
        assert_eq!(op.take(), Some(Err(ImageError::Decode("bad header".into()))));
    }

    #[test]
    fn test_panicking_job_reports_disconnected() {
        let mut op: AsyncOp<u32> = AsyncOp::spawn(|| panic!("worker died"));
        while !op.is_complete() {
            std::thread::yield_now();
        }
        assert_eq!(op.take(), Some(Err(ImageError::Disconnected)));
    }
}
