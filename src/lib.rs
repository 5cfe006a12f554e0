//! # bsvol
//!
//! A small analytic pricing kernel for European options with a static
//! arbitrage check on price surfaces.
//!
//! ## Architecture
//!
//! - **`pricer`** — Black-Scholes price and vega under the forward measure
//! - **`implied`** — Implied volatility by bracketed bisection, with a
//!   no-arbitrage pre-screen
//! - **`arbitrage`** — Butterfly (strike-convexity) scan over a maturity ×
//!   strike price surface
//! - **`market`** — Grids and synthetic smile surfaces that feed the above
//!
//! ## Design
//!
//! - **Pure functions.** Every operation is synchronous and side-effect free;
//!   nothing is cached or shared, so all calls are safe from any thread.
//! - **No panics.** Every fallible operation returns [`Result`]. Library code
//!   never calls `unwrap()` or `expect()`.
//! - **Errors vs. no answer.** Bad inputs are errors. A market price no
//!   volatility can reproduce is `Ok(None)`.
//! - **Serializable.** Value types implement Serde `Serialize` /
//!   `Deserialize`, validating on deserialization where invariants exist.
//!
//! ## Example
//!
//! ```
//! use bsvol::arbitrage::check_butterfly;
//! use bsvol::implied::implied_vol;
//! use bsvol::market::{build_price_surface, build_strike_surface, SmileParams, SurfaceGrid};
//! use bsvol::pricer::{price, OptionQuote};
//! use bsvol::OptionType;
//!
//! let quote = OptionQuote::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2)?;
//! let call = price(quote, OptionType::Call)?;
//! let iv = implied_vol(call, quote, OptionType::Call)?.expect("price is in band");
//! assert!((iv.0 - 0.2).abs() < 1e-6);
//!
//! let grid = SurfaceGrid::standard();
//! let prices = build_price_surface(&grid, 100.0, 0.05, 0.02, &SmileParams::default())?;
//! let strikes = build_strike_surface(&grid, 100.0, 0.05, 0.02)?;
//! assert!(check_butterfly(&prices, &strikes, 1e-10)?.is_free());
//! # Ok::<(), bsvol::BsVolError>(())
//! ```

pub mod arbitrage;
pub mod conventions;
pub mod error;
pub mod implied;
pub mod market;
pub mod pricer;
pub mod types;
mod validate;

#[doc(inline)]
pub use arbitrage::{check_butterfly, ButterflyReport};
#[doc(inline)]
pub use error::{BsVolError, Result};
#[doc(inline)]
pub use implied::{implied_vol, BlackImpliedVol};
#[doc(inline)]
pub use pricer::{discount, forward, price, vega, OptionQuote};
#[doc(inline)]
pub use types::{OptionType, Vol};
