//! Build a synthetic surface, certify it, and invert a price.
//!
//! Shows how to:
//!   - Build the standard maturity × log-moneyness grid
//!   - Generate call prices from a parametric smile
//!   - Run the butterfly check on the price surface
//!   - Price an ATM option and recover its implied vol
//!
//! Run with: `cargo run --example butterfly_check`

use bsvol::arbitrage::check_butterfly;
use bsvol::implied::implied_vol;
use bsvol::market::{build_price_surface, build_strike_surface, SmileParams, SurfaceGrid};
use bsvol::pricer::{price, vega, OptionQuote};
use bsvol::OptionType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (spot, rate, div) = (100.0, 0.05, 0.02);

    // ---------------------------------------------------------------
    // 1. Grid and synthetic surface
    // ---------------------------------------------------------------

    let grid = SurfaceGrid::standard();
    let params = SmileParams::default();
    println!(
        "Grid: {} maturities, {} log-moneyness points (k in [{:.2}, {:.2}])",
        grid.maturities().len(),
        grid.k_grid().len(),
        grid.k_grid()[0],
        grid.k_grid()[grid.k_grid().len() - 1],
    );

    let prices = build_price_surface(&grid, spot, rate, div, &params)?;
    let strikes = build_strike_surface(&grid, spot, rate, div)?;

    // ---------------------------------------------------------------
    // 2. Butterfly check
    // ---------------------------------------------------------------

    let report = check_butterfly(&prices, &strikes, 1e-12)?;
    println!("\nButterfly check (eps = 1e-12)");
    println!("  Violations:     {}", report.n_violations);
    println!("  Worst C''(K):   {:.3e}", report.worst_value);
    match report.worst_location {
        Some((i, j)) => println!(
            "  Worst location: T={:.4}, K={:.4}",
            grid.maturities()[i],
            strikes[i][j]
        ),
        None => println!("  Worst location: none"),
    }

    // ---------------------------------------------------------------
    // 3. Price and invert an ATM option
    // ---------------------------------------------------------------

    let quote = OptionQuote::new(spot, spot, 1.0, rate, 0.0, 0.2)?;
    let call = price(quote, OptionType::Call)?;
    let put = price(quote, OptionType::Put)?;
    let parity = (call - put) - quote.discount() * (quote.forward() - quote.strike());

    println!("\n{quote}");
    println!("  Call price:   {call:.6}");
    println!("  Put price:    {put:.6}");
    println!("  Vega:         {:.6}", vega(quote)?);
    println!("  Parity error: {parity:.2e}");

    match implied_vol(call, quote.with_vol(0.3)?, OptionType::Call)? {
        Some(iv) => println!("  Implied vol:  {:.10}", iv.0),
        None => println!("  Implied vol:  none (price outside no-arbitrage band)"),
    }

    Ok(())
}
