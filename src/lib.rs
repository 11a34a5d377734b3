//! Pin-based battleship adjudicator.
//!
//! Players assemble their fleet one pin at a time on a private 10×10
//! grid: an isolated pin founds a new ship, a connected pin merges the
//! ships around it, and a recovered pin shrinks or splits the ship it
//! leaves. Once both fleets are complete the game alternates attacks
//! until one fleet is fully destroyed.
//!
//! The engine is a synchronous state machine; callers serialize access
//! per game. Persistence and presentation are collaborators behind the
//! [`Storage`] trait and the [`Api`] facade.

mod api;
mod board;
mod error;
mod fleet;
mod game;
mod grid;
mod logging;
mod setup;
mod ship;
mod storage;

pub use api::*;
pub use board::*;
pub use error::*;
pub use fleet::*;
pub use game::*;
pub use grid::*;
pub use logging::init_logging;
pub use setup::random_fleet;
pub use ship::*;
pub use storage::*;
