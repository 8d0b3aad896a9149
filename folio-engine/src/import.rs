//! Bookkeeping for asynchronous imports: only the latest read may land.

use tracing::debug;

/// Identifies one started import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportTicket(u64);

/// Hands out tickets for file reads and decides which completion wins.
#[derive(Debug, Default)]
pub struct ImportSlot {
    issued: u64,
    pending: Option<ImportTicket>,
}

impl ImportSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an import, superseding any import still in flight.
    pub fn begin(&mut self) -> ImportTicket {
        self.issued += 1;
        let ticket = ImportTicket(self.issued);
        if let Some(previous) = self.pending.replace(ticket) {
            debug!("Import {:?} superseded by {:?}", previous, ticket);
        }
        ticket
    }

    /// Claims the slot for a finished read. Returns false if the ticket is
    /// stale or was abandoned.
    pub fn complete(&mut self, ticket: ImportTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Gives up on an import (no file chosen).
    pub fn abandon(&mut self, ticket: ImportTicket) {
        if self.pending == Some(ticket) {
            self.pending = None;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_import_wins() {
        let mut slot = ImportSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.complete(first));
        assert!(slot.is_pending());
        assert!(slot.complete(second));
        assert!(!slot.is_pending());
        assert!(!slot.complete(second));
    }

    #[test]
    fn abandoned_import_cannot_complete() {
        let mut slot = ImportSlot::new();
        let ticket = slot.begin();
        slot.abandon(ticket);
        assert!(!slot.is_pending());
        assert!(!slot.complete(ticket));
    }

    #[test]
    fn abandoning_a_stale_ticket_keeps_the_latest() {
        let mut slot = ImportSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        slot.abandon(first);
        assert!(slot.complete(second));
    }
}
