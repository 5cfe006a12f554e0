//! Implied volatility extraction from option prices.
//!
//! - [`no_arb_bounds`] — static price band a quote must lie in
//! - [`BlackImpliedVol`] — configurable bracketed-bisection solver
//! - [`implied_vol`] — one-shot solve with default settings
//!
//! A price that no non-negative volatility can reproduce is reported as
//! `Ok(None)`; solver failures are errors.

pub mod black;
pub mod bounds;

pub use black::{implied_vol, BlackImpliedVol};
pub use bounds::no_arb_bounds;
