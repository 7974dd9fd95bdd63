use std::sync::atomic::{AtomicU64, Ordering};

/// Tags issued requests with increasing sequence numbers so that a completion can be checked against the most recently issued request.
#[derive(Debug, Default)]
pub struct RequestSequencer {
	latest: AtomicU64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestSequencer {
	pub fn new() -> RequestSequencer {
		RequestSequencer::default()
	}

	pub fn issue(&self) -> Ticket {
		Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
	}

	/// Whether no request was issued after the one holding `ticket`.
	pub fn is_latest(&self, ticket: Ticket) -> bool {
		self.latest.load(Ordering::SeqCst) == ticket.0
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_only_latest_ticket_is_accepted() {
		let sequencer = RequestSequencer::new();
		let first = sequencer.issue();
		assert!(sequencer.is_latest(first));
		let second = sequencer.issue();
		assert!(!sequencer.is_latest(first));
		assert!(sequencer.is_latest(second));
		assert!(first < second);
	}
}
