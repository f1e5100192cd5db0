//! # Squares pool
//!
//! Core of a "squares" betting-pool grid: participants buy boxes, the
//! 100 boxes are assigned randomly over a 10×10 grid with independently
//! shuffled row/column digit headers, and the pot is split across the
//! four quarters.
//!
//! The crate covers the pieces that carry actual logic:
//!
//! - pool and payout arithmetic ([`pool`]),
//! - the randomized assignment engine ([`grid`]),
//! - the persistence/restore contract ([`storage`]),
//! - the state machine tying them together ([`game`]).
//!
//! Rendering, currency formatting and theming stay outside; the crate
//! hands a renderer everything it needs (breakdowns, grid state, hint
//! strings, first-seen name order for stable colors).

pub mod config;
pub mod errors;
pub mod essential;
pub mod game;
pub mod grid;
pub mod pool;
pub mod storage;

pub use config::{ConfigRecord, SquaresConfig};
pub use errors::{HandleError, HandleResult, StorageError};
pub use essential::{GameEvent, GridState, Participant, ParticipantLedger, PayoutSplit};
pub use game::{Effect, Squares};
pub use pool::{PayoutLine, PoolBreakdown};
pub use storage::PersistenceGateway;
