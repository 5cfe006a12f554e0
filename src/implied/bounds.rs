//! Static no-arbitrage price band for European options.

use crate::types::OptionType;

/// No-arbitrage `(lower, upper)` band for an option price under the forward measure.
///
/// ```text
/// call:  D·max(F − K, 0) ≤ C ≤ D·F
/// put:   D·max(K − F, 0) ≤ P ≤ D·K
/// ```
///
/// The lower edge is the zero-vol price, the upper edge the infinite-vol
/// limit, so any price inside the band is reachable by some `σ ≥ 0`.
///
/// # Examples
/// ```
/// use bsvol::implied::no_arb_bounds;
/// use bsvol::OptionType;
///
/// let (lo, hi) = no_arb_bounds(105.0, 100.0, 0.95, OptionType::Call);
/// assert!((lo - 0.95 * 5.0).abs() < 1e-12);
/// assert!((hi - 0.95 * 105.0).abs() < 1e-12);
/// ```
pub fn no_arb_bounds(
    forward: f64,
    strike: f64,
    discount: f64,
    option_type: OptionType,
) -> (f64, f64) {
    match option_type {
        OptionType::Call => (discount * (forward - strike).max(0.0), discount * forward),
        OptionType::Put => (discount * (strike - forward).max(0.0), discount * strike),
    }
}
