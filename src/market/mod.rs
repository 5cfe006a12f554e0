//! Market data preparation: surface grids and synthetic smile surfaces.
//!
//! These build the inputs the pricer and the arbitrage checks consume:
//! a maturity × log-moneyness [`SurfaceGrid`], per-maturity strike rows, and
//! vol/price matrices from a parametric [`SmileParams`] smile.

pub mod grid;
pub mod synthetic;

pub use grid::{default_grid, SurfaceGrid, DEFAULT_MATURITIES};
pub use synthetic::{build_price_surface, build_strike_surface, build_vol_surface, SmileParams};
