//! Generation tokens that tie a response to the request that asked for it.
//!
//! Each kind of request owns a [`RequestSlot`]. Issuing a new request bumps
//! the slot's generation, so a response carrying an older token is stale
//! and gets dropped.

/// Opaque token handed out with a ticket.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

#[derive(Clone, Debug, Default)]
pub struct RequestSlot {
    current: u64,
}

impl RequestSlot {
    /// Start a new request, superseding any in flight.
    pub fn issue(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }

    /// Invalidate whatever is in flight without starting anything new.
    pub fn cancel(&mut self) {
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut slot = RequestSlot::default();
        let first = slot.issue();
        let second = slot.issue();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
        slot.cancel();
        assert!(!slot.is_current(second));
    }
}
