/// Identifies one suggestion resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Last-writer-wins bookkeeping for suggestion fetches.
///
/// Starting a fetch supersedes whatever was current; only the current token
/// may apply results.
#[derive(Debug, Clone, Default)]
pub struct FetchRunState {
    sequence: u64,
    current: Option<FetchToken>,
}

impl FetchRunState {
    pub fn begin(&mut self) -> FetchToken {
        self.sequence = self.sequence.saturating_add(1);
        let token = FetchToken(self.sequence);
        self.current = Some(token);
        token
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        self.current == Some(token)
    }

    /// Marks `token` finished. Returns false for stale tokens.
    pub fn finish(&mut self, token: FetchToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.current = None;
        true
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }
}
