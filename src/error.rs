//! Typed rule-violation errors shared across the engine.
//!
//! Every fallible operation returns one of these kinds; nothing is retried
//! internally and the core never panics on an expected rule violation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Structurally impossible request (off-board shot, exhausted pin
    /// budget, starting a game that is already running).
    #[error("invalid request: {0}")]
    Invalid(String),

    /// Well-formed request that violates a rule in the current state
    /// (occupied cell, diagonal touch, wrong turn, wrong phase).
    #[error("illegal action: {0}")]
    Illegal(String),

    /// Preconditions are not met yet (pins left to place, game not started).
    #[error("not ready: {0}")]
    NotReady(String),

    /// A referenced player, game or ship does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An internal invariant expected exactly one match but found several.
    /// Signals a data-integrity problem and should not be retried.
    #[error("ambiguous result: {0}")]
    Ambiguous(String),
}
