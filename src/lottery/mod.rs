//! The weighted, vetoable lottery.
//!
//! Each active candidate gets tickets from its aggregated tally: five per
//! "want this", three per "could do this", and never fewer than one. Any
//! "not this round" vote removes the candidate from the draw, unless every
//! candidate has been vetoed, in which case one is chosen uniformly.

mod draw;
mod pool;
mod source;

pub use draw::{draw_pick, DrawKind, Lottery, LotteryOutcome, Pick};
pub use pool::{PoolEntry, Ticket, TicketPool, TicketRules};
pub use source::RandomSource;
