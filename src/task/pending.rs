use crate::core::candidate::Candidate;
use crate::core::error::LookupError;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

pub type LookupResult = Result<Vec<Candidate>, LookupError>;

/// A lookup whose candidates arrive later.
///
/// Polled from the widget's tick. Dropping it discards the eventual result;
/// the producing side is never told.
#[derive(Debug)]
pub struct PendingLookup {
    rx: Receiver<LookupResult>,
}

/// Producer side of [`PendingLookup::channel`].
#[derive(Debug)]
pub struct LookupHandle {
    tx: Sender<LookupResult>,
}

impl LookupHandle {
    pub fn resolve(self, candidates: Vec<Candidate>) {
        let _ = self.tx.send(Ok(candidates));
    }

    pub fn reject(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(LookupError::Rejected(reason.into())));
    }
}

impl PendingLookup {
    pub fn channel() -> (LookupHandle, Self) {
        let (tx, rx) = mpsc::channel::<LookupResult>();
        (LookupHandle { tx }, Self { rx })
    }

    /// Runs `work` on a worker thread.
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> LookupResult + Send + 'static,
    {
        let (handle, pending) = Self::channel();
        std::thread::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(work)).unwrap_or(Err(LookupError::Panicked));
            let _ = handle.tx.send(result);
        });
        pending
    }

    pub fn settled(result: LookupResult) -> Self {
        let (handle, pending) = Self::channel();
        let _ = handle.tx.send(result);
        pending
    }

    /// Returns the outcome once the lookup has settled.
    pub fn try_settle(&self) -> Option<LookupResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LookupError::Disconnected)),
        }
    }
}
