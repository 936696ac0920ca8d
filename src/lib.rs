//! Logistics network cost evaluation.
//!
//! Assigns demand points to their nearest distribution center and prices the
//! resulting network (transport, inventory, fixed cost), either once at mean
//! demand or across a Monte Carlo sample of demand draws per scenario.

pub mod cost;
pub mod demand;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;

pub use error::{NetworkError, Result};
