use super::source::{LookupResponse, SuggestionSource};
use crate::core::candidate::Candidate;
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::task::{FetchRunState, FetchToken, PendingLookup};
use std::time::{Duration, Instant};

const LOOKUP_KEY: &str = "suggestions.lookup";
const PENDING_POLL_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Clone)]
struct LookupRequest {
    token: FetchToken,
    text: String,
}

#[derive(Debug)]
struct InFlight {
    token: FetchToken,
    pending: PendingLookup,
    since: Instant,
}

/// Turns the current text into candidate lists.
///
/// Lists resolve on request. Lookups are debounced and may settle later;
/// only the most recent request may deliver candidates.
#[derive(Debug)]
pub struct SuggestionResolver {
    source: SuggestionSource,
    debounce: Duration,
    scheduler: Scheduler<LookupRequest>,
    runs: FetchRunState,
    in_flight: Option<InFlight>,
}

impl SuggestionResolver {
    pub fn new(source: SuggestionSource, debounce: Duration) -> Self {
        Self {
            source,
            debounce,
            scheduler: Scheduler::new(),
            runs: FetchRunState::default(),
            in_flight: None,
        }
    }

    pub fn set_source(&mut self, source: SuggestionSource) {
        self.cancel();
        self.source = source;
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn loading_since(&self) -> Option<Instant> {
        self.in_flight.as_ref().map(|in_flight| in_flight.since)
    }

    /// Starts a resolution for `text`, superseding any earlier one.
    ///
    /// Returns candidates when they are available immediately. `chosen_label`
    /// is the label of the chosen candidate; a lookup is skipped when it
    /// already equals the text.
    pub fn request(
        &mut self,
        text: &str,
        chosen_label: Option<&str>,
        now: Instant,
    ) -> Option<Vec<Candidate>> {
        self.cancel();
        let token = self.runs.begin();

        match &self.source {
            SuggestionSource::List(items) => {
                let items = items.clone();
                self.runs.finish(token);
                Some(items)
            }
            SuggestionSource::Lookup(_) => {
                if chosen_label == Some(text) {
                    tracing::debug!(text, "chosen candidate matches text, lookup skipped");
                    self.runs.finish(token);
                    return None;
                }
                let event = LookupRequest {
                    token,
                    text: text.to_string(),
                };
                // Undebounced requests still wait for the next tick; stale
                // ones are filtered by token when drained.
                let command = if self.debounce.is_zero() {
                    SchedulerCommand::EmitNow(event)
                } else {
                    SchedulerCommand::Debounce {
                        key: LOOKUP_KEY.to_string(),
                        delay: self.debounce,
                        event,
                    }
                };
                self.scheduler.schedule(command, now);
                None
            }
        }
    }

    /// Fires due lookups and collects settled ones.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<Candidate>> {
        let mut delivered = None;

        for request in self.scheduler.drain_ready(now) {
            if !self.runs.is_current(request.token) {
                continue;
            }
            if let Some(candidates) = self.invoke(request, now) {
                delivered = Some(candidates);
            }
        }

        if let Some(candidates) = self.poll_in_flight() {
            delivered = Some(candidates);
        }

        delivered
    }

    /// Drops any debounced or pending lookup without notifying the source.
    pub fn cancel(&mut self) {
        self.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: LOOKUP_KEY.to_string(),
            },
            Instant::now(),
        );
        if self.in_flight.take().is_some() {
            tracing::debug!("pending lookup superseded");
        }
        self.runs.cancel();
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let timeout = self.scheduler.poll_timeout(now, default_timeout);
        if self.in_flight.is_some() {
            return timeout.min(PENDING_POLL_INTERVAL);
        }
        timeout
    }

    fn invoke(&mut self, request: LookupRequest, now: Instant) -> Option<Vec<Candidate>> {
        let SuggestionSource::Lookup(lookup) = &mut self.source else {
            return None;
        };

        tracing::debug!(text = %request.text, token = request.token.get(), "invoking lookup");
        match lookup.lookup(&request.text) {
            LookupResponse::Ready(candidates) => {
                self.runs.finish(request.token);
                Some(candidates)
            }
            LookupResponse::Pending(pending) => {
                self.in_flight = Some(InFlight {
                    token: request.token,
                    pending,
                    since: now,
                });
                None
            }
            LookupResponse::Nothing => {
                tracing::debug!(text = %request.text, "lookup answered nothing");
                self.runs.finish(request.token);
                None
            }
        }
    }

    fn poll_in_flight(&mut self) -> Option<Vec<Candidate>> {
        let result = self.in_flight.as_ref()?.pending.try_settle()?;
        let in_flight = self.in_flight.take()?;

        if !self.runs.finish(in_flight.token) {
            tracing::debug!(token = in_flight.token.get(), "stale lookup result discarded");
            return None;
        }

        match result {
            Ok(candidates) => Some(candidates),
            Err(err) => {
                tracing::warn!(%err, "suggestion lookup failed");
                None
            }
        }
    }
}
