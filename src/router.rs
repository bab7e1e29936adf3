//! Navigation collaborator: asks the host view to re-read store state.

/// Something that can re-synchronise displayed data with the store.
pub trait Navigator {
    fn refresh(&mut self);
}

/// Queues refresh requests for the event loop to act on after the handler returns.
#[derive(Debug, Default)]
pub struct RefreshRequest {
    pending: usize,
}

impl RefreshRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refreshes requested since the last `take`.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Drain pending requests, returning whether any were queued.
    pub fn take(&mut self) -> bool {
        let any = self.pending > 0;
        self.pending = 0;
        any
    }
}

impl Navigator for RefreshRequest {
    fn refresh(&mut self) {
        self.pending += 1;
    }
}
