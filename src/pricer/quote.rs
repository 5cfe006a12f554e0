//! Validated option quote.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{self, BsVolError};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

use super::black_scholes::{discount, forward};

/// Inputs to the Black-Scholes pricer for a single European option.
///
/// Invariants, checked at construction and on deserialization:
/// - `spot > 0`, `strike > 0`
/// - `ttm ≥ 0` (zero is the terminal case, priced at intrinsic)
/// - `vol ≥ 0` (zero is the deterministic-forward case)
/// - `rate` and `div` finite
///
/// # Examples
/// ```
/// use bsvol::pricer::OptionQuote;
///
/// let quote = OptionQuote::new(100.0, 100.0, 1.0, 0.05, 0.02, 0.2)?;
/// assert_eq!(quote.div(), 0.02);
/// assert!(OptionQuote::new(-1.0, 100.0, 1.0, 0.05, 0.0, 0.2).is_err());
/// # Ok::<(), bsvol::BsVolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionQuoteRaw", into = "OptionQuoteRaw")]
pub struct OptionQuote {
    spot: f64,
    strike: f64,
    /// Time to maturity in years.
    ttm: f64,
    /// Continuously compounded risk-free rate.
    rate: f64,
    /// Continuous dividend / carry yield.
    div: f64,
    vol: f64,
}

#[derive(Serialize, Deserialize)]
struct OptionQuoteRaw {
    spot: f64,
    strike: f64,
    ttm: f64,
    rate: f64,
    div: f64,
    vol: f64,
}

impl TryFrom<OptionQuoteRaw> for OptionQuote {
    type Error = BsVolError;
    fn try_from(raw: OptionQuoteRaw) -> Result<Self, Self::Error> {
        Self::new(raw.spot, raw.strike, raw.ttm, raw.rate, raw.div, raw.vol)
    }
}

impl From<OptionQuote> for OptionQuoteRaw {
    fn from(q: OptionQuote) -> Self {
        Self {
            spot: q.spot,
            strike: q.strike,
            ttm: q.ttm,
            rate: q.rate,
            div: q.div,
            vol: q.vol,
        }
    }
}

impl OptionQuote {
    /// Create a quote from spot, strike, time to maturity, rate, dividend yield and vol.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if spot or strike is not strictly
    /// positive, if `ttm` or `vol` is negative, or if any input is NaN/Inf.
    pub fn new(
        spot: f64,
        strike: f64,
        ttm: f64,
        rate: f64,
        div: f64,
        vol: f64,
    ) -> error::Result<Self> {
        validate_positive(spot, "spot")?;
        validate_positive(strike, "strike")?;
        validate_non_negative(ttm, "ttm")?;
        validate_finite(rate, "rate")?;
        validate_finite(div, "div")?;
        validate_non_negative(vol, "vol")?;
        Ok(Self {
            spot,
            strike,
            ttm,
            rate,
            div,
            vol,
        })
    }

    /// Copy of this quote with a different volatility.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if `vol` is negative or not finite.
    pub fn with_vol(self, vol: f64) -> error::Result<Self> {
        validate_non_negative(vol, "vol")?;
        Ok(Self { vol, ..self })
    }

    /// Spot price `S`.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike `K`.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity `T` in years.
    pub fn ttm(&self) -> f64 {
        self.ttm
    }

    /// Continuously compounded risk-free rate `r`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield `q`.
    pub fn div(&self) -> f64 {
        self.div
    }

    /// Volatility `σ`.
    pub fn vol(&self) -> f64 {
        self.vol
    }

    /// Forward `F = S·exp((r − q)T)` implied by this quote.
    pub fn forward(&self) -> f64 {
        forward(self.spot, self.rate, self.div, self.ttm)
    }

    /// Discount factor `D = exp(−(r − q)T)` implied by this quote.
    pub fn discount(&self) -> f64 {
        discount(self.rate, self.div, self.ttm)
    }
}

impl fmt::Display for OptionQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptionQuote(spot = {}, strike = {}, ttm = {}, rate = {}, div = {}, vol = {})",
            self.spot, self.strike, self.ttm, self.rate, self.div, self.vol
        )
    }
}
