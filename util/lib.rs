pub mod polling;
pub mod sequence;
pub mod serve;

pub use self::polling::{PollingManager, TimerId, DEFAULT_POLL_INTERVAL};
pub use self::sequence::{RequestSequencer, Ticket};
