//! Discrete butterfly (strike-convexity) check on a call price surface.
//!
//! For every maturity row `i` and interior strike `j`, `∂²C/∂K²` is estimated
//! with the three-point formula on a non-uniform grid:
//!
//! ```text
//! left  = (C_j − C_{j−1}) / (K_j − K_{j−1})
//! right = (C_{j+1} − C_j) / (K_{j+1} − K_j)
//! C''   ≈ 2·(right − left) / (K_{j+1} − K_{j−1})
//! ```
//!
//! A cell is a violation when `C''` is finite and `C'' < −eps`.
//!
//! # Limitations
//! The estimate is on undiscounted prices as given: it omits the
//! discount-factor scaling a full static-arbitrage test applies across
//! maturities. Since the discount factor is positive the sign of `C''` is
//! unaffected within a row, but `worst_value` is not comparable across rows
//! with different discounting.
//!
//! Strike rows must be strictly increasing. This is not checked; equal
//! adjacent strikes produce a non-finite estimate, which is skipped.

use serde::{Deserialize, Serialize};

use crate::error::{self, BsVolError};
use crate::validate::validate_non_negative;

/// Result of a butterfly scan over a price surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButterflyReport {
    /// Number of interior cells with `C'' < −eps`.
    pub n_violations: usize,
    /// Most negative `C''` among violations, or `0.0` if there are none.
    pub worst_value: f64,
    /// `(maturity index, strike index)` of `worst_value`; the first one found
    /// on ties.
    pub worst_location: Option<(usize, usize)>,
}

impl ButterflyReport {
    /// A report with no violations.
    pub fn clean() -> Self {
        Self {
            n_violations: 0,
            worst_value: 0.0,
            worst_location: None,
        }
    }

    /// Whether the scan found no violation.
    pub fn is_free(&self) -> bool {
        self.n_violations == 0
    }
}

/// Second derivative of `C(K)` through three points on a non-uniform grid.
///
/// # Examples
/// ```
/// use bsvol::arbitrage::second_derivative_nonuniform;
///
/// // C(K) = K² has C'' = 2 everywhere
/// let c2 = second_derivative_nonuniform((1.0, 1.0), (2.0, 4.0), (4.0, 16.0));
/// assert!((c2 - 2.0).abs() < 1e-12);
/// ```
pub fn second_derivative_nonuniform(
    (k_m, c_m): (f64, f64),
    (k, c): (f64, f64),
    (k_p, c_p): (f64, f64),
) -> f64 {
    let left = (c - c_m) / (k - k_m);
    let right = (c_p - c) / (k_p - k);
    2.0 * (right - left) / (k_p - k_m)
}

/// Scan a call price surface for butterfly arbitrage.
///
/// `price_surface[i][j]` is the call price at maturity `i` and strike
/// `strike_surface[i][j]`. Rows are maturities, columns strikes in
/// increasing order. `eps ≥ 0` is the tolerance below zero that is still
/// accepted; `eps = 0` is strict.
///
/// Rows with fewer than three strikes have no interior point and contribute
/// nothing.
///
/// # Errors
/// Returns [`BsVolError::InvalidInput`] if `eps` is negative or not finite,
/// if the price rows differ in length, or if the strike surface does not have
/// the same shape as the price surface.
///
/// # Examples
/// ```
/// use bsvol::arbitrage::check_butterfly;
///
/// let strikes = [[90.0, 100.0, 110.0]];
/// let convex = [[12.0, 5.0, 1.0]];
/// assert!(check_butterfly(&convex, &strikes, 0.0)?.is_free());
///
/// let concave = [[12.0, 8.0, 1.0]];
/// let report = check_butterfly(&concave, &strikes, 0.0)?;
/// assert_eq!(report.n_violations, 1);
/// assert_eq!(report.worst_location, Some((0, 1)));
/// # Ok::<(), bsvol::BsVolError>(())
/// ```
pub fn check_butterfly<P, K>(
    price_surface: &[P],
    strike_surface: &[K],
    eps: f64,
) -> error::Result<ButterflyReport>
where
    P: AsRef<[f64]>,
    K: AsRef<[f64]>,
{
    validate_non_negative(eps, "eps")?;
    validate_shape(price_surface, strike_surface)?;

    let mut report = ButterflyReport::clean();

    for (i, (prices, strikes)) in price_surface.iter().zip(strike_surface).enumerate() {
        let (cs, ks) = (prices.as_ref(), strikes.as_ref());
        for j in 1..cs.len().saturating_sub(1) {
            let c2 = second_derivative_nonuniform(
                (ks[j - 1], cs[j - 1]),
                (ks[j], cs[j]),
                (ks[j + 1], cs[j + 1]),
            );
            if c2.is_finite() && c2 < -eps {
                report.n_violations += 1;
                if c2 < report.worst_value {
                    report.worst_value = c2;
                    report.worst_location = Some((i, j));
                }
            }
        }
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        n_violations = report.n_violations,
        worst_value = report.worst_value,
        worst_location = ?report.worst_location,
        "butterfly scan complete"
    );

    Ok(report)
}

fn validate_shape<P, K>(price_surface: &[P], strike_surface: &[K]) -> error::Result<()>
where
    P: AsRef<[f64]>,
    K: AsRef<[f64]>,
{
    if price_surface.len() != strike_surface.len() {
        return Err(BsVolError::InvalidInput {
            message: format!(
                "price surface has {} maturities but strike surface has {}",
                price_surface.len(),
                strike_surface.len()
            ),
        });
    }
    let n_k = price_surface.first().map_or(0, |row| row.as_ref().len());
    for (i, (prices, strikes)) in price_surface.iter().zip(strike_surface).enumerate() {
        let (cs, ks) = (prices.as_ref(), strikes.as_ref());
        if cs.len() != n_k {
            return Err(BsVolError::InvalidInput {
                message: format!(
                    "price surface is not rectangular: row {i} has {} strikes, expected {n_k}",
                    cs.len()
                ),
            });
        }
        if ks.len() != cs.len() {
            return Err(BsVolError::InvalidInput {
                message: format!(
                    "strike row {i} has {} entries but price row has {}",
                    ks.len(),
                    cs.len()
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn second_derivative_exact_for_quadratics_on_uneven_grid() {
        let c = |k: f64| 3.0 * k * k - 2.0 * k + 1.0;
        let (a, b, d) = (95.0, 100.0, 112.0);
        let c2 = second_derivative_nonuniform((a, c(a)), (b, c(b)), (d, c(d)));
        assert_abs_diff_eq!(c2, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_prices_have_zero_curvature() {
        let strikes = vec![vec![80.0, 90.0, 100.0, 110.0]];
        let prices = vec![vec![20.0, 15.0, 10.0, 5.0]];
        let report = check_butterfly(&prices, &strikes, 0.0).unwrap();
        assert!(report.is_free());
        assert_eq!(report.worst_value, 0.0);
        assert_eq!(report.worst_location, None);
    }

    #[test]
    fn counts_all_violations_and_tracks_worst() {
        let strikes = vec![
            vec![80.0, 90.0, 100.0, 110.0, 120.0],
            vec![80.0, 90.0, 100.0, 110.0, 120.0],
        ];
        let prices = vec![
            // kink at j=2 only
            vec![20.0, 12.0, 8.0, 3.0, 1.0],
            // strong kink at j=1, mild at j=3
            vec![25.0, 22.0, 10.0, 6.5, 1.0],
        ];
        let report = check_butterfly(&prices, &strikes, 0.0).unwrap();
        // row 0: j=2 -> 2*(-0.5+0.4)/20 = -0.01
        // row 1: j=1 -> 2*(-1.2+0.3)/20 = -0.09, j=3 -> 2*(-0.55+0.35)/20 = -0.02
        assert_eq!(report.n_violations, 3);
        assert_abs_diff_eq!(report.worst_value, -0.09, epsilon = 1e-12);
        assert_eq!(report.worst_location, Some((1, 1)));
    }

    #[test]
    fn ties_keep_first_location() {
        let strikes = vec![vec![90.0, 100.0, 110.0], vec![90.0, 100.0, 110.0]];
        let prices = vec![vec![10.0, 8.0, 1.0], vec![10.0, 8.0, 1.0]];
        let report = check_butterfly(&prices, &strikes, 0.0).unwrap();
        assert_eq!(report.n_violations, 2);
        assert_eq!(report.worst_location, Some((0, 1)));
    }

    #[test]
    fn eps_absorbs_small_negative_curvature() {
        let strikes = vec![vec![90.0, 100.0, 110.0]];
        // C'' = 2*(-0.5005 + 0.5)/20 = -5e-5
        let prices = vec![vec![10.0, 5.0, -0.005]];
        assert_eq!(check_butterfly(&prices, &strikes, 0.0).unwrap().n_violations, 1);
        assert!(check_butterfly(&prices, &strikes, 1e-4).unwrap().is_free());
    }

    #[test]
    fn non_uniform_strikes_per_row() {
        let strikes = vec![vec![95.0, 100.0, 115.0]];
        // convex function sampled on the uneven grid
        let prices: Vec<Vec<f64>> = vec![strikes[0]
            .iter()
            .map(|&k: &f64| (105.0 - k).max(0.0) + 0.01 * (k - 100.0).powi(2))
            .collect()];
        assert!(check_butterfly(&prices, &strikes, 0.0).unwrap().is_free());
    }

    #[test]
    fn too_few_strikes_has_no_interior() {
        let strikes = vec![vec![90.0, 110.0]];
        let prices = vec![vec![1.0, 20.0]];
        assert!(check_butterfly(&prices, &strikes, 0.0).unwrap().is_free());
        let empty: Vec<Vec<f64>> = vec![];
        assert!(check_butterfly(&empty, &empty, 0.0).unwrap().is_free());
    }

    #[test]
    fn repeated_strike_is_skipped() {
        let strikes = vec![vec![90.0, 100.0, 100.0]];
        let prices = vec![vec![10.0, 5.0, 4.0]];
        let report = check_butterfly(&prices, &strikes, 0.0).unwrap();
        assert_eq!(report, ButterflyReport::clean());

        let json = serde_json::to_string(&report).unwrap();
        let back: ButterflyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn rejects_ragged_price_surface() {
        let strikes = vec![vec![90.0, 100.0, 110.0], vec![90.0, 100.0]];
        let prices = vec![vec![10.0, 5.0, 1.0], vec![10.0, 5.0]];
        let err = check_butterfly(&prices, &strikes, 0.0).unwrap_err();
        assert!(format!("{err}").contains("not rectangular"));
    }

    #[test]
    fn rejects_mismatched_strike_surface() {
        let prices = vec![vec![10.0, 5.0, 1.0]];
        let short_row = vec![vec![90.0, 100.0]];
        assert!(check_butterfly(&prices, &short_row, 0.0).is_err());
        let extra_row = vec![vec![90.0, 100.0, 110.0], vec![90.0, 100.0, 110.0]];
        assert!(check_butterfly(&prices, &extra_row, 0.0).is_err());
    }

    #[test]
    fn rejects_invalid_eps() {
        let prices = vec![vec![10.0, 5.0, 1.0]];
        let strikes = vec![vec![90.0, 100.0, 110.0]];
        assert!(check_butterfly(&prices, &strikes, -1e-6).is_err());
        assert!(check_butterfly(&prices, &strikes, f64::NAN).is_err());
    }

    #[test]
    fn inputs_are_not_modified() {
        let prices = vec![vec![10.0, 8.0, 1.0]];
        let strikes = vec![vec![90.0, 100.0, 110.0]];
        let before = (prices.clone(), strikes.clone());
        let _ = check_butterfly(&prices, &strikes, 0.0).unwrap();
        assert_eq!((prices, strikes), before);
    }

    #[test]
    fn report_serde_round_trip() {
        let report = ButterflyReport {
            n_violations: 2,
            worst_value: -0.03,
            worst_location: Some((1, 4)),
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: ButterflyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
