//! Latest-wins bookkeeping for consultations that may complete out of order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

/// Generation number handed out when a consultation is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Applied {
    generation: u64,
    text: Option<String>,
}

/// Keeps only the answer to the most recently issued consultation.
///
/// Every new request takes a [`Ticket`] from [`begin`](Self::begin). When an
/// answer arrives, [`complete`](Self::complete) stores it only if no newer
/// ticket has been issued in the meantime; older answers are dropped.
#[derive(Debug, Default)]
pub struct ConsultationTracker {
    issued: AtomicU64,
    applied: Mutex<Applied>,
}

impl ConsultationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Applied> {
        self.applied.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a ticket for a new consultation, superseding all earlier ones.
    pub fn begin(&self) -> Ticket {
        let ticket = Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        debug!(generation = ticket.0, "consultation issued");
        ticket
    }

    /// Records the answer for `ticket`. Returns `true` if it was applied,
    /// `false` if a newer consultation has been issued since.
    pub fn complete(&self, ticket: Ticket, text: String) -> bool {
        let mut applied = self.lock();
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket.0 != latest {
            warn!(
                generation = ticket.0,
                latest, "discarding stale consultation response"
            );
            return false;
        }
        applied.generation = ticket.0;
        applied.text = Some(text);
        true
    }

    /// The most recently applied answer, if any.
    pub fn latest(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Whether the most recently issued consultation is still unanswered.
    pub fn is_pending(&self) -> bool {
        self.lock().generation < self.issued.load(Ordering::SeqCst)
    }
}
