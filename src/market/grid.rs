//! Maturity × log-moneyness grid for equity index surfaces.

use serde::{Deserialize, Serialize};

use crate::conventions::strike_from_log_moneyness;
use crate::error::{self, BsVolError};
use crate::validate::{validate_finite, validate_positive, validate_sorted};

/// Weekly, monthly, 2M, 3M, 6M, 1Y and 2Y maturities (in years).
pub const DEFAULT_MATURITIES: [f64; 7] = [
    1.0 / 52.0,
    1.0 / 12.0,
    2.0 / 12.0,
    3.0 / 12.0,
    6.0 / 12.0,
    1.0,
    2.0,
];

/// Default lower log-moneyness bound.
pub const DEFAULT_K_MIN: f64 = -0.3;
/// Default upper log-moneyness bound.
pub const DEFAULT_K_MAX: f64 = 0.3;
/// Default number of log-moneyness points (1% spacing on the default range).
pub const DEFAULT_N_K: usize = 61;

/// Rectangular surface grid: increasing maturities × increasing log-moneyness
/// `k = ln(K/F)`.
///
/// Because `k` is measured against each maturity's own forward, the same
/// column maps to a different strike on every row; see
/// [`strikes_from_forward`](SurfaceGrid::strikes_from_forward).
///
/// # Examples
/// ```
/// use bsvol::market::SurfaceGrid;
///
/// let grid = SurfaceGrid::standard();
/// assert_eq!(grid.maturities().len(), 7);
/// assert_eq!(grid.k_grid().len(), 61);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceGridRaw", into = "SurfaceGridRaw")]
pub struct SurfaceGrid {
    maturities: Vec<f64>,
    k_grid: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct SurfaceGridRaw {
    maturities: Vec<f64>,
    k_grid: Vec<f64>,
}

impl TryFrom<SurfaceGridRaw> for SurfaceGrid {
    type Error = BsVolError;
    fn try_from(raw: SurfaceGridRaw) -> Result<Self, Self::Error> {
        Self::new(raw.maturities, raw.k_grid)
    }
}

impl From<SurfaceGrid> for SurfaceGridRaw {
    fn from(g: SurfaceGrid) -> Self {
        Self {
            maturities: g.maturities,
            k_grid: g.k_grid,
        }
    }
}

impl SurfaceGrid {
    /// Create a grid from explicit maturities and log-moneyness points.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if there are no maturities, any
    /// maturity is non-positive, fewer than two `k` points are given, any
    /// point is NaN/Inf, or either axis is out of order.
    pub fn new(maturities: Vec<f64>, k_grid: Vec<f64>) -> error::Result<Self> {
        if maturities.is_empty() {
            return Err(BsVolError::InvalidInput {
                message: "grid needs at least one maturity".into(),
            });
        }
        for &t in &maturities {
            validate_positive(t, "maturity")?;
        }
        validate_sorted(&maturities, "maturities")?;

        if k_grid.len() < 2 {
            return Err(BsVolError::InvalidInput {
                message: format!("k_grid must have at least two points, got {}", k_grid.len()),
            });
        }
        for &k in &k_grid {
            validate_finite(k, "log-moneyness")?;
        }
        validate_sorted(&k_grid, "k_grid")?;

        Ok(Self { maturities, k_grid })
    }

    /// The default equity grid: [`DEFAULT_MATURITIES`] × 61 points on `[-0.3, 0.3]`.
    pub fn standard() -> Self {
        let step = (DEFAULT_K_MAX - DEFAULT_K_MIN) / (DEFAULT_N_K - 1) as f64;
        Self {
            maturities: DEFAULT_MATURITIES.to_vec(),
            k_grid: (0..DEFAULT_N_K)
                .map(|i| DEFAULT_K_MIN + i as f64 * step)
                .collect(),
        }
    }

    /// Maturities in years, non-decreasing.
    pub fn maturities(&self) -> &[f64] {
        &self.maturities
    }

    /// Log-moneyness columns, non-decreasing.
    pub fn k_grid(&self) -> &[f64] {
        &self.k_grid
    }

    /// Strikes `K_j = F·exp(k_j)` for every grid column.
    ///
    /// # Errors
    /// Returns [`BsVolError::InvalidInput`] if `forward` is not positive and finite.
    pub fn strikes_from_forward(&self, forward: f64) -> error::Result<Vec<f64>> {
        validate_positive(forward, "forward")?;
        Ok(self
            .k_grid
            .iter()
            .map(|&k| strike_from_log_moneyness(k, forward))
            .collect())
    }
}

/// Build a uniform log-moneyness grid.
///
/// `maturities` defaults to [`DEFAULT_MATURITIES`] when `None`. The `k` axis
/// has `n_k` points spaced `(k_max − k_min)/(n_k − 1)` apart.
///
/// # Errors
/// Returns [`BsVolError::InvalidInput`] if `n_k < 2`, `k_max ≤ k_min`, or the
/// maturities fail [`SurfaceGrid::new`] validation.
///
/// # Examples
/// ```
/// use bsvol::market::default_grid;
///
/// let grid = default_grid(Some(&[0.5, 1.0]), -0.2, 0.2, 5)?;
/// assert_eq!(grid.k_grid().len(), 5);
/// assert!((grid.k_grid()[1] + 0.1).abs() < 1e-12);
/// assert!((grid.k_grid()[4] - 0.2).abs() < 1e-12);
/// # Ok::<(), bsvol::BsVolError>(())
/// ```
pub fn default_grid(
    maturities: Option<&[f64]>,
    k_min: f64,
    k_max: f64,
    n_k: usize,
) -> error::Result<SurfaceGrid> {
    if n_k < 2 {
        return Err(BsVolError::InvalidInput {
            message: format!("n_k must be >= 2, got {n_k}"),
        });
    }
    validate_finite(k_min, "k_min")?;
    validate_finite(k_max, "k_max")?;
    if k_max <= k_min {
        return Err(BsVolError::InvalidInput {
            message: format!("k_max must be > k_min, got [{k_min}, {k_max}]"),
        });
    }

    let step = (k_max - k_min) / (n_k - 1) as f64;
    let k_grid = (0..n_k).map(|i| k_min + i as f64 * step).collect();
    let maturities = maturities.map_or_else(|| DEFAULT_MATURITIES.to_vec(), <[f64]>::to_vec);

    SurfaceGrid::new(maturities, k_grid)
}
