/// Stamp carried by a fetch and echoed back with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic ticket source; only the most recently issued ticket is current.
#[derive(Debug, Default)]
pub struct RequestSequence {
    last: u64,
    live: bool,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTicket {
        self.last += 1;
        self.live = true;
        RequestTicket(self.last)
    }

    /// Retire whatever is outstanding without issuing a replacement.
    pub fn invalidate(&mut self) {
        self.live = false;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.live && ticket.0 == self.last
    }

    /// Accept a response at most once.
    pub fn complete(&mut self, ticket: RequestTicket) -> bool {
        if self.is_current(ticket) {
            self.live = false;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> bool {
        self.live
    }
}
