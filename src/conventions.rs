//! Moneyness conventions.
//!
//! Surfaces in this crate are laid out in log-moneyness `k = ln(K / F)`, so a
//! fixed `k` grid maps to a different strike row at every maturity.

/// Convert a log-moneyness to a strike: K = F · exp(k).
pub fn strike_from_log_moneyness(log_moneyness: f64, forward: f64) -> f64 {
    forward * log_moneyness.exp()
}
