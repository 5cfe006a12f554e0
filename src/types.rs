//! Core domain types.
//!
//! Outputs that are easy to confuse with other scalars are wrapped in
//! newtypes ([`Vol`]); inputs stay bare `f64` and are validated where they
//! enter the library (e.g. [`OptionQuote::new`](crate::pricer::OptionQuote::new)).
//!
//! These types wrap `f64`, which is not `Eq`/`Ord` because of `NaN`. Only
//! `PartialEq` and `PartialOrd` are derived.

use serde::{Deserialize, Serialize};

/// Implied volatility `σ`, measured as annualized standard deviation.
///
/// A vol of 0.20 represents 20% annualized volatility.
///
/// # Examples
/// ```
/// use bsvol::types::Vol;
/// let vol = Vol(0.20);
/// assert_eq!(vol.0, 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Option type: call or put.
///
/// Selects the payoff branch in pricing and the no-arbitrage band used by the
/// implied-vol solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at strike price.
    Call,
    /// Right to sell at strike price.
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OptionType::Call).unwrap(), "\"call\"");
        let put: OptionType = serde_json::from_str("\"put\"").unwrap();
        assert_eq!(put, OptionType::Put);
    }

    #[test]
    fn option_type_display() {
        assert_eq!(OptionType::Call.to_string(), "call");
        assert_eq!(OptionType::Put.to_string(), "put");
    }

    #[test]
    fn vol_is_transparent_newtype() {
        let json = serde_json::to_string(&Vol(0.25)).unwrap();
        assert_eq!(json, "0.25");
    }
}
