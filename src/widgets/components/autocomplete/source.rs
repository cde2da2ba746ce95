use crate::core::candidate::Candidate;
use crate::task::PendingLookup;
use std::fmt;

/// What a lookup function answers for one text.
#[derive(Debug)]
pub enum LookupResponse {
    Ready(Vec<Candidate>),
    Pending(PendingLookup),
    /// No usable answer; the visible list is left as is.
    Nothing,
}

impl From<Vec<Candidate>> for LookupResponse {
    fn from(value: Vec<Candidate>) -> Self {
        Self::Ready(value)
    }
}

impl From<PendingLookup> for LookupResponse {
    fn from(value: PendingLookup) -> Self {
        Self::Pending(value)
    }
}

/// A function of the current text producing candidates.
pub trait SuggestionLookup: Send {
    fn lookup(&mut self, text: &str) -> LookupResponse;
}

impl<F> SuggestionLookup for F
where
    F: FnMut(&str) -> LookupResponse + Send,
{
    fn lookup(&mut self, text: &str) -> LookupResponse {
        self(text)
    }
}

pub enum SuggestionSource {
    List(Vec<Candidate>),
    Lookup(Box<dyn SuggestionLookup>),
}

impl SuggestionSource {
    pub fn list(candidates: Vec<Candidate>) -> Self {
        Self::List(candidates)
    }

    pub fn lookup(lookup: impl SuggestionLookup + 'static) -> Self {
        Self::Lookup(Box::new(lookup))
    }
}

impl From<Vec<Candidate>> for SuggestionSource {
    fn from(value: Vec<Candidate>) -> Self {
        Self::List(value)
    }
}

impl fmt::Debug for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => f.debug_tuple("List").field(&items.len()).finish(),
            Self::Lookup(_) => f.write_str("Lookup(..)"),
        }
    }
}
