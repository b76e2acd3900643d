use uuid::Uuid;

use crate::error::ApiError;

/// Parameters of one availability lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub barber_id: Uuid,
    pub date: String,
    pub duration_minutes: u32,
}

/// Handed out for every issued query. Only the ticket with the latest
/// sequence number may write its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    seq: u64,
    pub query: AvailabilityQuery,
}

impl QueryTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AvailabilityState {
    /// Barber, date or services still missing; nothing was asked.
    #[default]
    Idle,
    Loading,
    /// An empty list means the barber is fully booked for that day.
    Ready(Vec<String>),
    Failed(String),
}

impl AvailabilityState {
    pub fn slots(&self) -> &[String] {
        match self {
            AvailabilityState::Ready(slots) => slots,
            _ => &[],
        }
    }

    pub fn is_fully_booked(&self) -> bool {
        matches!(self, AvailabilityState::Ready(slots) if slots.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityTracker {
    latest: u64,
    current: Option<AvailabilityQuery>,
    state: AvailabilityState,
}

impl AvailabilityTracker {
    pub fn state(&self) -> &AvailabilityState {
        &self.state
    }

    pub fn current_query(&self) -> Option<&AvailabilityQuery> {
        self.current.as_ref()
    }

    /// Starts a new query, superseding whatever is still in flight. The old
    /// slot list is cleared right away.
    pub fn begin(&mut self, query: AvailabilityQuery) -> QueryTicket {
        self.latest += 1;
        self.current = Some(query.clone());
        self.state = AvailabilityState::Loading;
        tracing::debug!(seq = self.latest, ?query, "availability query issued");
        QueryTicket {
            seq: self.latest,
            query,
        }
    }

    /// Back to idle. Bumps the sequence so in-flight responses are dropped.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.current = None;
        self.state = AvailabilityState::Idle;
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Applies a response if `ticket` is still the latest one. Returns
    /// whether the state changed.
    pub fn apply(&mut self, ticket: &QueryTicket, result: Result<Vec<String>, ApiError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest,
                "dropping stale availability response"
            );
            return false;
        }

        self.state = match result {
            Ok(slots) => AvailabilityState::Ready(slots),
            Err(e) => {
                tracing::warn!(error = %e, "availability query failed");
                AvailabilityState::Failed(e.user_message())
            }
        };
        true
    }

    /// Re-issues the current parameters, e.g. after a failure.
    pub fn retry(&mut self) -> Option<QueryTicket> {
        let query = self.current.clone()?;
        Some(self.begin(query))
    }
}
