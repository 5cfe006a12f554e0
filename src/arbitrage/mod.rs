//! Static-arbitrage diagnostics on price surfaces.
//!
//! Butterfly arbitrage occurs when call prices are not convex in strike, so
//! the risk-neutral density implied by the surface goes negative.
//!
//! # References
//! - Breeden, D.T. & Litzenberger, R.H. "Prices of State-Contingent Claims
//!   Implicit in Option Prices" (1978)

pub mod butterfly;

pub use butterfly::{check_butterfly, second_derivative_nonuniform, ButterflyReport};
