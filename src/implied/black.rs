//! Black-Scholes implied volatility by bracketed bisection.
//!
//! The Black-Scholes price is non-decreasing in `σ`, so
//! `f(σ) = price(σ) − market_price` has at most one sign change. The solver
//! screens the target against the static no-arbitrage band, widens the
//! initial bracket if needed, then halves it until the half-width drops
//! below `tol`.

use serde::{Deserialize, Serialize};

use crate::error::{self, BsVolError};
use crate::pricer::{price, OptionQuote};
use crate::types::{OptionType, Vol};
use crate::validate::validate_positive;

use super::bounds::no_arb_bounds;

/// Number of times `vol_high` is doubled while looking for a sign change.
const MAX_BRACKET_EXPANSIONS: usize = 10;

/// Configured Black-Scholes implied-vol solver.
///
/// Defaults: `vol_low = 1e-6`, `vol_high = 5.0`, `tol = 1e-8`, `max_iter = 200`.
///
/// # Examples
/// ```
/// use bsvol::implied::BlackImpliedVol;
/// use bsvol::pricer::{price, OptionQuote};
/// use bsvol::OptionType;
///
/// let quote = OptionQuote::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2)?;
/// let target = price(quote, OptionType::Call)?;
///
/// let solver = BlackImpliedVol::default().with_tolerance(1e-10)?;
/// let iv = solver.solve(target, quote, OptionType::Call)?.unwrap();
/// assert!((iv.0 - 0.2).abs() < 1e-8);
/// # Ok::<(), bsvol::BsVolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlackImpliedVolRaw", into = "BlackImpliedVolRaw")]
pub struct BlackImpliedVol {
    vol_low: f64,
    vol_high: f64,
    tol: f64,
    max_iter: usize,
}

#[derive(Serialize, Deserialize)]
struct BlackImpliedVolRaw {
    vol_low: f64,
    vol_high: f64,
    tol: f64,
    max_iter: usize,
}

impl TryFrom<BlackImpliedVolRaw> for BlackImpliedVol {
    type Error = BsVolError;
    fn try_from(raw: BlackImpliedVolRaw) -> Result<Self, Self::Error> {
        Self::default()
            .with_bounds(raw.vol_low, raw.vol_high)?
            .with_tolerance(raw.tol)?
            .with_max_iter(raw.max_iter)
    }
}

impl From<BlackImpliedVol> for BlackImpliedVolRaw {
    fn from(s: BlackImpliedVol) -> Self {
        Self {
            vol_low: s.vol_low,
            vol_high: s.vol_high,
            tol: s.tol,
            max_iter: s.max_iter,
        }
    }
}

impl Default for BlackImpliedVol {
    fn default() -> Self {
        Self {
            vol_low: 1e-6,
            vol_high: 5.0,
            tol: 1e-8,
            max_iter: 200,
        }
    }
}

impl BlackImpliedVol {
    /// Override the initial search bracket `[vol_low, vol_high]`.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] unless `0 < vol_low < vol_high`
    /// and both are finite.
    pub fn with_bounds(mut self, vol_low: f64, vol_high: f64) -> error::Result<Self> {
        validate_positive(vol_low, "vol_low")?;
        validate_positive(vol_high, "vol_high")?;
        if vol_high <= vol_low {
            return Err(BsVolError::InvalidInput {
                message: format!("vol_high must exceed vol_low, got [{vol_low}, {vol_high}]"),
            });
        }
        self.vol_low = vol_low;
        self.vol_high = vol_high;
        Ok(self)
    }

    /// Override the bracket half-width tolerance.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if `tol` is zero, negative, NaN, or infinite.
    pub fn with_tolerance(mut self, tol: f64) -> error::Result<Self> {
        validate_positive(tol, "tol")?;
        self.tol = tol;
        Ok(self)
    }

    /// Override the bisection iteration budget.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if `max_iter` is zero.
    pub fn with_max_iter(mut self, max_iter: usize) -> error::Result<Self> {
        if max_iter == 0 {
            return Err(BsVolError::InvalidInput {
                message: "max_iter must be at least 1".into(),
            });
        }
        self.max_iter = max_iter;
        Ok(self)
    }

    /// Lower end of the initial bracket.
    pub fn vol_low(&self) -> f64 {
        self.vol_low
    }

    /// Upper end of the initial bracket, before any doubling.
    pub fn vol_high(&self) -> f64 {
        self.vol_high
    }

    /// Band slack and bracket half-width tolerance.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Bisection iteration budget.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Solve for the volatility that reproduces `market_price`.
    ///
    /// The volatility stored in `quote` is ignored; only spot, strike,
    /// maturity, rate and dividend yield are used.
    ///
    /// Returns:
    /// - `Ok(None)` if `market_price < 0` or lies outside the no-arbitrage
    ///   band widened by `tol`;
    /// - `Ok(Some(Vol(0.0)))` if `ttm = 0`, where no vol is identifiable;
    /// - `Ok(Some(σ))` otherwise. If `max_iter` runs out before the bracket
    ///   half-width drops below `tol`, the midpoint of the final bracket is
    ///   returned.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if `market_price` is NaN, and
    /// [`BsVolError::BracketingError`] if no sign change is found after
    /// doubling `vol_high` ten times.
    pub fn solve(
        &self,
        market_price: f64,
        quote: OptionQuote,
        option_type: OptionType,
    ) -> error::Result<Option<Vol>> {
        if market_price.is_nan() {
            return Err(BsVolError::InvalidInput {
                message: "market price must not be NaN".into(),
            });
        }
        if market_price < 0.0 {
            return Ok(None);
        }
        if quote.ttm() == 0.0 {
            return Ok(Some(Vol(0.0)));
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            market_price,
            strike = quote.strike(),
            ttm = quote.ttm(),
            %option_type,
            "implied vol solve started"
        );

        let (lower, upper) =
            no_arb_bounds(quote.forward(), quote.strike(), quote.discount(), option_type);
        if market_price < lower - self.tol || market_price > upper + self.tol {
            #[cfg(feature = "logging")]
            tracing::debug!(lower, upper, market_price, "market price outside no-arbitrage band");
            return Ok(None);
        }

        let objective = |vol: f64| -> error::Result<f64> {
            Ok(price(quote.with_vol(vol)?, option_type)? - market_price)
        };

        let (mut a, mut b) = (self.vol_low, self.vol_high);
        let mut fa = objective(a)?;
        let mut fb = objective(b)?;

        let mut tries = 0;
        while fa * fb > 0.0 && tries < MAX_BRACKET_EXPANSIONS {
            b *= 2.0;
            fb = objective(b)?;
            tries += 1;
            #[cfg(feature = "logging")]
            tracing::debug!(vol_high = b, attempt = tries, "widened implied vol bracket");
        }
        if fa * fb > 0.0 {
            return Err(BsVolError::BracketingError {
                message: format!(
                    "price residuals at both ends of the bracket share a sign \
                     (f(low)={fa}, f(high)={fb})"
                ),
                vol_low: a,
                vol_high: b,
            });
        }
        if fa == 0.0 {
            return Ok(Some(Vol(a)));
        }
        if fb == 0.0 {
            return Ok(Some(Vol(b)));
        }

        for _iter in 0..self.max_iter {
            let m = 0.5 * (a + b);
            let fm = objective(m)?;

            if fm == 0.0 || 0.5 * (b - a) < self.tol {
                #[cfg(feature = "logging")]
                tracing::debug!(vol = m, iterations = _iter + 1, "implied vol converged");
                return Ok(Some(Vol(m)));
            }

            if fa * fm < 0.0 {
                b = m;
            } else {
                a = m;
                fa = fm;
            }
        }

        #[cfg(feature = "logging")]
        tracing::warn!(
            max_iter = self.max_iter,
            width = b - a,
            "implied vol bisection hit iteration limit, returning bracket midpoint"
        );
        Ok(Some(Vol(0.5 * (a + b))))
    }
}

/// Implied volatility with the default solver settings.
///
/// See [`BlackImpliedVol::solve`] for the result contract.
///
/// # Errors
/// Same as [`BlackImpliedVol::solve`].
pub fn implied_vol(
    market_price: f64,
    quote: OptionQuote,
    option_type: OptionType,
) -> error::Result<Option<Vol>> {
    BlackImpliedVol::default().solve(market_price, quote, option_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn atm_quote(vol: f64) -> OptionQuote {
        OptionQuote::new(100.0, 100.0, 1.0, 0.05, 0.0, vol).unwrap()
    }

    #[test]
    fn default_config() {
        let s = BlackImpliedVol::default();
        assert_eq!(s.vol_low(), 1e-6);
        assert_eq!(s.vol_high(), 5.0);
        assert_eq!(s.tol(), 1e-8);
        assert_eq!(s.max_iter(), 200);
    }

    #[test]
    fn config_rejects_invalid_values() {
        let s = BlackImpliedVol::default();
        assert!(s.with_bounds(0.0, 1.0).is_err());
        assert!(s.with_bounds(0.5, 0.5).is_err());
        assert!(s.with_bounds(0.1, f64::INFINITY).is_err());
        assert!(s.with_tolerance(0.0).is_err());
        assert!(s.with_tolerance(f64::NAN).is_err());
        assert!(s.with_max_iter(0).is_err());
    }

    #[test]
    fn round_trip_from_different_starting_vol() {
        let target = price(atm_quote(0.2), OptionType::Call).unwrap();
        // The quote's own vol is only a placeholder.
        let iv = implied_vol(target, atm_quote(0.3), OptionType::Call)
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(iv.0, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn round_trip_put_with_dividend() {
        let q = OptionQuote::new(100.0, 90.0, 0.5, 0.03, 0.02, 0.45).unwrap();
        let target = price(q, OptionType::Put).unwrap();
        let iv = implied_vol(target, q, OptionType::Put).unwrap().unwrap();
        assert_abs_diff_eq!(iv.0, 0.45, epsilon = 1e-6);
    }

    #[test]
    fn negative_price_has_no_solution() {
        assert!(implied_vol(-1.0, atm_quote(0.2), OptionType::Call)
            .unwrap()
            .is_none());
    }

    #[test]
    fn nan_price_is_invalid_input() {
        let err = implied_vol(f64::NAN, atm_quote(0.2), OptionType::Call).unwrap_err();
        assert!(matches!(err, BsVolError::InvalidInput { .. }));
    }

    #[test]
    fn price_above_upper_bound_has_no_solution() {
        let q = atm_quote(0.2);
        let upper = q.discount() * q.forward();
        assert!(implied_vol(upper + 1.0, q, OptionType::Call).unwrap().is_none());
        assert!(implied_vol(q.discount() * q.strike() + 1.0, q, OptionType::Put)
            .unwrap()
            .is_none());
    }

    #[test]
    fn price_below_intrinsic_has_no_solution() {
        let q = OptionQuote::new(100.0, 80.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        let lower = q.discount() * (q.forward() - 80.0);
        assert!(implied_vol(lower - 0.5, q, OptionType::Call).unwrap().is_none());
    }

    #[test]
    fn zero_maturity_returns_zero_vol() {
        let q = OptionQuote::new(100.0, 100.0, 0.0, 0.05, 0.0, 0.2).unwrap();
        let iv = implied_vol(3.0, q, OptionType::Call).unwrap().unwrap();
        assert_eq!(iv.0, 0.0);
    }

    #[test]
    fn bracket_expands_for_high_vol() {
        // True vol 7.0 lies above the default vol_high = 5.0.
        let q = OptionQuote::new(100.0, 100.0, 0.1, 0.0, 0.0, 7.0).unwrap();
        let target = price(q, OptionType::Call).unwrap();
        let iv = implied_vol(target, q, OptionType::Call).unwrap().unwrap();
        assert_abs_diff_eq!(iv.0, 7.0, epsilon = 1e-6);
    }

    #[test]
    fn bracketing_failure_is_an_error() {
        // Price below the zero-vol floor but within tol of it: passes the band
        // screen, yet every σ in the bracket overprices.
        let q = OptionQuote::new(100.0, 50.0, 1.0, 0.0, 0.0, 0.2).unwrap();
        let solver = BlackImpliedVol::default().with_tolerance(1.0).unwrap();
        let err = solver.solve(49.5, q, OptionType::Call).unwrap_err();
        match err {
            BsVolError::BracketingError { vol_high, .. } => {
                assert_abs_diff_eq!(vol_high, 5.0 * 1024.0, epsilon = 1e-9);
            }
            other => panic!("expected bracketing error, got {other}"),
        }
    }

    #[test]
    fn root_on_bracket_edge_returns_that_edge() {
        // Far OTM: at vol_low the price underflows to exactly zero.
        let otm = OptionQuote::new(100.0, 150.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        let iv = implied_vol(0.0, otm, OptionType::Call).unwrap().unwrap();
        assert_eq!(iv.0, BlackImpliedVol::default().vol_low());

        let target = price(atm_quote(0.3), OptionType::Call).unwrap();
        let solver = BlackImpliedVol::default().with_bounds(0.1, 0.3).unwrap();
        let iv = solver
            .solve(target, atm_quote(0.2), OptionType::Call)
            .unwrap()
            .unwrap();
        assert_eq!(iv.0, 0.3);
    }

    #[test]
    fn iteration_limit_returns_bracket_midpoint() {
        let target = price(atm_quote(0.2), OptionType::Call).unwrap();
        let solver = BlackImpliedVol::default().with_max_iter(3).unwrap();
        let iv = solver
            .solve(target, atm_quote(0.2), OptionType::Call)
            .unwrap()
            .unwrap();
        // Three halvings of [1e-6, 5] leave a bracket of width 0.625 around 0.2.
        assert!(iv.0 > 0.0 && iv.0 < 0.7, "got {}", iv.0);
        assert!((iv.0 - 0.2).abs() <= 0.3125 + 1e-6);
    }

    #[test]
    fn serde_round_trip() {
        let s = BlackImpliedVol::default().with_max_iter(50).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let s2: BlackImpliedVol = serde_json::from_str(&json).unwrap();
        assert_eq!(s, s2);
    }

    #[test]
    fn serde_rejects_inverted_bounds() {
        let json = r#"{"vol_low":2.0,"vol_high":1.0,"tol":1e-8,"max_iter":200}"#;
        assert!(serde_json::from_str::<BlackImpliedVol>(json).is_err());
    }
}
