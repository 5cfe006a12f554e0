//! Closed-form Black-Scholes pricing under the forward measure.
//!
//! - [`OptionQuote`] — validated spot/strike/maturity/rate/dividend/vol inputs
//! - [`forward`], [`discount`] — `F = S·e^{(r−q)T}`, `D = e^{−(r−q)T}`
//! - [`price`], [`vega`] — European call/put value and vol sensitivity

pub mod black_scholes;
pub mod quote;

pub use black_scholes::{d1_d2, discount, forward, norm_cdf, norm_pdf, price, vega};
pub use quote::OptionQuote;
