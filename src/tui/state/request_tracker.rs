//! Liveness and ordering guards for asynchronous responses.
//!
//! Every mounted view carries a [`SessionId`]; messages addressed to a
//! session that is no longer mounted are ignored. Within a session, each
//! resource owns a [`RequestTracker`] that numbers outgoing requests so a
//! response can be applied only when no newer request has been issued.

/// Identifies one mount of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a session identifier from a raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the session that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Sequence number attached to one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues monotonically increasing tickets for a single resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    /// Creates a tracker that has not issued any ticket yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub const fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        Ticket(self.latest)
    }

    /// Returns `true` when `ticket` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidates every ticket issued so far.
    ///
    /// Used when a response obtained outside the tracker (such as a crawler
    /// toggle result) is newer than anything still in flight.
    pub const fn supersede(&mut self) {
        self.latest = self.latest.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{RequestTracker, SessionId};

    #[rstest]
    fn latest_ticket_is_current() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[rstest]
    fn supersede_invalidates_in_flight_tickets() {
        let mut tracker = RequestTracker::new();
        let in_flight = tracker.issue();

        tracker.supersede();

        assert!(!tracker.is_current(in_flight));
        let fresh = tracker.issue();
        assert!(tracker.is_current(fresh));
    }

    #[rstest]
    fn sessions_advance() {
        let first = SessionId::new(1);
        assert_ne!(first, first.next());
        assert_eq!(first.next(), SessionId::new(2));
    }
}
