//! Black-Scholes pricing under the forward measure.
//!
//! ```text
//! F = S·exp((r − q)T)          D = exp(−(r − q)T)
//! d1 = [ln(F/K) + ½σ²T] / (σ√T)    d2 = d1 − σ√T
//! C = D·(F·N(d1) − K·N(d2))
//! P = D·(K·N(−d2) − F·N(−d1))
//! ```
//!
//! The discount factor is taken on the carry `r − q`, so `D·F = S` for every
//! maturity. Put-call parity reads `C − P = D·(F − K)`.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::error::{self, BsVolError};
use crate::types::OptionType;

use super::quote::OptionQuote;

/// Forward price `F = S·exp((r − q)T)`.
///
/// Arguments are always `(spot, rate, div, ttm)`.
pub fn forward(spot: f64, rate: f64, div: f64, ttm: f64) -> f64 {
    spot * ((rate - div) * ttm).exp()
}

/// Discount factor `D = exp(−(r − q)T)`.
///
/// Arguments are always `(rate, div, ttm)`.
pub fn discount(rate: f64, div: f64, ttm: f64) -> f64 {
    (-(rate - div) * ttm).exp()
}

/// Standard normal CDF, `Φ(x) = ½(1 + erf(x/√2))`.
///
/// Evaluated as `½·erfc(−x/√2)` so the lower tail does not cancel the way
/// `1 + erf` does. Accuracy is that of `statrs::function::erf::erfc`, about
/// 1e-10 relative.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal density, `φ(x) = exp(−x²/2)/√(2π)`.
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// `(d1, d2)` for forward `F`, strike `K`, vol `σ` and maturity `T`.
///
/// Returns a `(NaN, NaN)` pair when `T ≤ 0`: there is no diffusion left and
/// callers price the terminal case directly.
///
/// # Errors
/// Returns [`BsVolError::InvalidInput`] if `F ≤ 0`, `K ≤ 0`, or (for `T > 0`)
/// `σ ≤ 0`.
pub fn d1_d2(forward: f64, strike: f64, vol: f64, ttm: f64) -> error::Result<(f64, f64)> {
    if forward <= 0.0 || forward.is_nan() || strike <= 0.0 || strike.is_nan() {
        return Err(BsVolError::InvalidInput {
            message: format!("forward and strike must be > 0, got F={forward}, K={strike}"),
        });
    }
    if ttm <= 0.0 {
        return Ok((f64::NAN, f64::NAN));
    }
    if vol <= 0.0 || vol.is_nan() {
        return Err(BsVolError::InvalidInput {
            message: format!("vol must be > 0, got {vol}"),
        });
    }
    let srt = vol * ttm.sqrt();
    let d1 = ((forward / strike).ln() + 0.5 * vol * vol * ttm) / srt;
    Ok((d1, d1 - srt))
}

/// Black-Scholes price of a European option.
///
/// - `T = 0`: intrinsic value on spot, `max(S − K, 0)` / `max(K − S, 0)`.
/// - `σ = 0`: deterministic forward payoff, `D·max(F − K, 0)` / `D·max(K − F, 0)`.
/// - otherwise the closed form above.
///
/// # Errors
/// Returns [`BsVolError::NumericalError`] if the closed form produces a
/// non-finite value (e.g. from overflowing rate·maturity).
///
/// # Examples
/// ```
/// use bsvol::pricer::{price, OptionQuote};
/// use bsvol::OptionType;
///
/// let quote = OptionQuote::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2)?;
/// let call = price(quote, OptionType::Call)?;
/// assert!((call - 10.4506).abs() < 1e-4);
/// # Ok::<(), bsvol::BsVolError>(())
/// ```
pub fn price(quote: OptionQuote, option_type: OptionType) -> error::Result<f64> {
    let (s, k, t) = (quote.spot(), quote.strike(), quote.ttm());

    if t == 0.0 {
        return Ok(match option_type {
            OptionType::Call => (s - k).max(0.0),
            OptionType::Put => (k - s).max(0.0),
        });
    }

    let d = quote.discount();
    let f = quote.forward();
    let sig = quote.vol();

    let value = if sig == 0.0 {
        match option_type {
            OptionType::Call => d * (f - k).max(0.0),
            OptionType::Put => d * (k - f).max(0.0),
        }
    } else {
        let (d1, d2) = d1_d2(f, k, sig, t)?;
        match option_type {
            OptionType::Call => d * (f * norm_cdf(d1) - k * norm_cdf(d2)),
            OptionType::Put => d * (k * norm_cdf(-d2) - f * norm_cdf(-d1)),
        }
    };

    if !value.is_finite() {
        return Err(BsVolError::NumericalError {
            message: format!("non-finite {option_type} price for {quote}"),
        });
    }
    Ok(value)
}

/// Vega `∂V/∂σ = D·F·φ(d1)·√T`, identical for calls and puts.
///
/// Zero in the degenerate region `T ≤ 0` or `σ ≤ 0`.
///
/// # Errors
/// Returns [`BsVolError::NumericalError`] if the result is not finite.
pub fn vega(quote: OptionQuote) -> error::Result<f64> {
    let (t, sig) = (quote.ttm(), quote.vol());
    if t <= 0.0 || sig <= 0.0 {
        return Ok(0.0);
    }
    let d = quote.discount();
    let f = quote.forward();
    let (d1, _) = d1_d2(f, quote.strike(), sig, t)?;
    let value = d * f * norm_pdf(d1) * t.sqrt();
    if !value.is_finite() {
        return Err(BsVolError::NumericalError {
            message: format!("non-finite vega for {quote}"),
        });
    }
    Ok(value)
}
