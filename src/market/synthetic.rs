//! Synthetic smile surfaces for testing the pricer and the arbitrage checks.
//!
//! The smile is a quadratic in log-moneyness plus a square-root term
//! structure:
//!
//! ```text
//! σ(k, T) = σ₀ + skew·k + curvature·k² + term_alpha·√T,   floored at 1e-4
//! ```

use serde::{Deserialize, Serialize};

use crate::error;
use crate::pricer::{forward, price, OptionQuote};
use crate::types::OptionType;

use super::grid::SurfaceGrid;

/// Floor applied to synthetic vols so the pricer never sees `σ ≤ 0`.
pub const MIN_SMILE_VOL: f64 = 1e-4;

/// Parameters of the synthetic smile.
///
/// The defaults are mild enough that the resulting call surface is convex in
/// strike on the standard grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmileParams {
    /// ATM vol level.
    pub sigma0: f64,
    /// Linear slope in log-moneyness.
    pub skew: f64,
    /// Quadratic coefficient in log-moneyness.
    pub curvature: f64,
    /// Coefficient on `√T`.
    pub term_alpha: f64,
}

impl Default for SmileParams {
    fn default() -> Self {
        Self {
            sigma0: 0.2,
            skew: -0.2,
            curvature: 0.4,
            term_alpha: 0.0,
        }
    }
}

impl SmileParams {
    /// Smile vol at log-moneyness `k` and maturity `ttm`.
    pub fn vol(&self, k: f64, ttm: f64) -> f64 {
        let vol = self.sigma0
            + self.skew * k
            + self.curvature * k * k
            + self.term_alpha * ttm.sqrt();
        vol.max(MIN_SMILE_VOL)
    }
}

/// `vol[i][j] = σ(k_j, T_i)` over the grid.
pub fn build_vol_surface(grid: &SurfaceGrid, params: &SmileParams) -> Vec<Vec<f64>> {
    grid.maturities()
        .iter()
        .map(|&t| grid.k_grid().iter().map(|&k| params.vol(k, t)).collect())
        .collect()
}

/// `strike[i][j] = F(T_i)·exp(k_j)`, aligned with [`build_price_surface`].
///
/// # Errors
/// Returns [`BsVolError::InvalidInput`](crate::BsVolError::InvalidInput) if
/// the forward at any maturity is not positive and finite.
pub fn build_strike_surface(
    grid: &SurfaceGrid,
    spot: f64,
    rate: f64,
    div: f64,
) -> error::Result<Vec<Vec<f64>>> {
    grid.maturities()
        .iter()
        .map(|&t| grid.strikes_from_forward(forward(spot, rate, div, t)))
        .collect()
}

/// `price[i][j]` = Black-Scholes call at `(T_i, K_ij)` with smile vol `σ(k_j, T_i)`.
///
/// # Errors
/// Returns [`BsVolError::InvalidInput`](crate::BsVolError::InvalidInput) for a
/// non-positive spot or non-finite rate/dividend yield, and propagates pricer
/// errors.
pub fn build_price_surface(
    grid: &SurfaceGrid,
    spot: f64,
    rate: f64,
    div: f64,
    params: &SmileParams,
) -> error::Result<Vec<Vec<f64>>> {
    let strikes = build_strike_surface(grid, spot, rate, div)?;
    grid.maturities()
        .iter()
        .zip(strikes.iter())
        .map(|(&t, row)| {
            grid.k_grid()
                .iter()
                .zip(row.iter())
                .map(|(&k, &strike)| {
                    let quote = OptionQuote::new(spot, strike, t, rate, div, params.vol(k, t))?;
                    price(quote, OptionType::Call)
                })
                .collect()
        })
        .collect()
}
