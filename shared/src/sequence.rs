/// Hands out submission tickets so only the newest in-flight request may render.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestSequence {
    latest: u64,
    settled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        self.settled = false;
        Ticket(self.latest)
    }

    /// Claim the right to render for `ticket`. True once, and only for the newest ticket.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.settled || !self.is_current(ticket) {
            return false;
        }
        self.settled = true;
        true
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::RequestSequence;

    #[test]
    fn newest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn tickets_are_distinct() {
        let mut seq = RequestSequence::default();
        let a = seq.issue();
        let b = seq.issue();
        assert_ne!(a, b);
    }

    #[test]
    fn only_the_newest_ticket_settles_and_only_once() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.settle(first));
        assert!(seq.settle(second));
        assert!(!seq.settle(second));

        let third = seq.issue();
        assert!(seq.settle(third));
    }
}
