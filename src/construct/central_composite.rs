//! Central composite response-surface designs.
//!
//! A central composite design is the vertical union of four blocks:
//!
//! 1. the 2ⁿ factorial cube,
//! 2. `center.0` center runs attached to the cube,
//! 3. 2n axial (star) runs at distance α along each axis,
//! 4. `center.1` center runs attached to the star.
//!
//! The cube and the star form separate experimental blocks, which is why
//! each carries its own center runs.
//!
//! ## Star distance
//!
//! - **Orthogonal**: α = √(n (1 + n₀ₐ / nₐ) / (1 + n₀꜀ / n꜀)) with n꜀ = 2ⁿ cube
//!   runs, nₐ = 2n star runs and n₀꜀, n₀ₐ their center runs
//! - **Rotatable**: α = n꜀^¼
//!
//! ## Geometry
//!
//! - **Circumscribed**: cube at ±1, star at ±α
//! - **Inscribed**: cube shrunk to ±1/α, star at ±1
//! - **Faced**: cube at ±1, star at ±1 regardless of the alpha mode

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{two_level_factorial, Design};
use crate::error::{Error, Result};
use crate::matrix::{center_block, scale, union, CodedMatrix};

/// Variance property that determines the star distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alpha {
    /// Balance the variance contribution of cube and star blocks.
    Orthogonal,
    /// Prediction variance depends only on the distance from the center.
    Rotatable,
}

impl Default for Alpha {
    fn default() -> Self {
        Self::Orthogonal
    }
}

impl FromStr for Alpha {
    type Err = Error;

    /// Accepts `"orthogonal"`/`"o"` and `"rotatable"`/`"r"`, any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "orthogonal" | "o" => Ok(Self::Orthogonal),
            "rotatable" | "r" => Ok(Self::Rotatable),
            _ => Err(Error::invalid_parameter(format!(
                "invalid alpha {s:?}, expected orthogonal/o or rotatable/r"
            ))),
        }
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Orthogonal => "orthogonal",
            Self::Rotatable => "rotatable",
        })
    }
}

/// Placement of the star points relative to the factorial cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    /// Star points beyond the cube (CCC).
    Circumscribed,
    /// Star points on the supplied range, cube scaled inside it (CCI).
    Inscribed,
    /// Star points on the cube faces (CCF).
    Faced,
}

impl Default for Face {
    fn default() -> Self {
        Self::Circumscribed
    }
}

impl FromStr for Face {
    type Err = Error;

    /// Accepts `"circumscribed"`/`"ccc"`, `"inscribed"`/`"cci"` and
    /// `"faced"`/`"ccf"`, any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "circumscribed" | "ccc" => Ok(Self::Circumscribed),
            "inscribed" | "cci" => Ok(Self::Inscribed),
            "faced" | "ccf" => Ok(Self::Faced),
            _ => Err(Error::invalid_parameter(format!(
                "invalid face {s:?}, expected circumscribed/ccc, inscribed/cci or faced/ccf"
            ))),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Circumscribed => "circumscribed",
            Self::Inscribed => "inscribed",
            Self::Faced => "faced",
        })
    }
}

/// Options of a central composite design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompositeOptions {
    /// Center runs attached to the cube and to the star block.
    pub center: (usize, usize),
    /// Star distance rule.
    pub alpha: Alpha,
    /// Star placement.
    pub face: Face,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            center: (4, 4),
            alpha: Alpha::Orthogonal,
            face: Face::Circumscribed,
        }
    }
}

/// Interpret a center-count sequence, which must hold exactly two entries.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for any other length.
///
/// # Example
///
/// ```
/// use doegen::construct::center_pair;
///
/// assert_eq!(center_pair(&[2, 3]).unwrap(), (2, 3));
/// assert!(center_pair(&[4]).is_err());
/// ```
pub fn center_pair(counts: &[usize]) -> Result<(usize, usize)> {
    match *counts {
        [cube, star] => Ok((cube, star)),
        _ => Err(Error::invalid_parameter(format!(
            "center needs 2 values (cube, star), got {}",
            counts.len()
        ))),
    }
}

/// Star distance α for `factors` factors.
///
/// `center` only matters for the orthogonal rule. Zero factors have no star
/// runs and give 0.
///
/// # Example
///
/// ```
/// use doegen::construct::{star_distance, Alpha};
///
/// let a = star_distance(2, Alpha::Orthogonal, (4, 4));
/// assert!((a - 2f64.sqrt()).abs() < 1e-12);
///
/// let r = star_distance(4, Alpha::Rotatable, (0, 0));
/// assert!((r - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn star_distance(factors: usize, alpha: Alpha, center: (usize, usize)) -> f64 {
    if factors == 0 {
        return 0.0;
    }
    let n = factors as f64;
    let cube = 2f64.powf(n);
    match alpha {
        Alpha::Orthogonal => {
            let star = 2.0 * n;
            let (cube_center, star_center) = (center.0 as f64, center.1 as f64);
            (n * (1.0 + star_center / star) / (1.0 + cube_center / cube)).sqrt()
        }
        Alpha::Rotatable => cube.powf(0.25),
    }
}

/// The 2n axial runs: run `2i` is −α and run `2i + 1` is +α in column `i`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `distance` is not finite.
pub fn star_block(factors: usize, distance: f64) -> Result<CodedMatrix> {
    if !distance.is_finite() {
        return Err(Error::invalid_parameter(format!(
            "star distance must be finite, got {distance}"
        )));
    }
    let mut data = Array2::zeros((2 * factors, factors));
    for i in 0..factors {
        data[[2 * i, i]] = -distance;
        data[[2 * i + 1, i]] = distance;
    }
    Ok(CodedMatrix::new(data))
}

/// Central composite design on two or more factors.
///
/// # Example
///
/// ```
/// use doegen::construct::{CentralComposite, CompositeOptions, Design};
///
/// let ccd = CentralComposite::new(3, CompositeOptions::default()).unwrap();
/// let m = ccd.build().unwrap();
///
/// assert_eq!(m.runs(), 8 + 4 + 6 + 4);
/// assert!((m.get(12, 0) + 1.825_741_858_350_553_8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralComposite {
    factors: usize,
    options: CompositeOptions,
}

impl CentralComposite {
    /// Create a central composite design.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors < 2`.
    pub fn new(factors: usize, options: CompositeOptions) -> Result<Self> {
        if factors < 2 {
            return Err(Error::InvalidFactorCount {
                design: "CentralComposite",
                factors,
                min: 2,
            });
        }
        Ok(Self { factors, options })
    }

    /// The design options.
    #[must_use]
    pub fn options(&self) -> &CompositeOptions {
        &self.options
    }

    /// α from the alpha rule, before the face geometry is applied.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        star_distance(self.factors, self.options.alpha, self.options.center)
    }

    /// Coded distance of the star runs after the face geometry is applied.
    #[must_use]
    pub fn star_distance(&self) -> f64 {
        match self.options.face {
            Face::Circumscribed => self.alpha(),
            Face::Inscribed | Face::Faced => 1.0,
        }
    }

    fn cube(&self) -> Result<CodedMatrix> {
        let cube = two_level_factorial(self.factors)?;
        match self.options.face {
            Face::Inscribed => scale(&cube, 1.0 / self.alpha()),
            Face::Circumscribed | Face::Faced => Ok(cube),
        }
    }
}

impl Design for CentralComposite {
    fn name(&self) -> &'static str {
        "CentralComposite"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        let (cube_center, star_center) = self.options.center;
        u32::try_from(self.factors)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .and_then(|cube| cube.checked_add(2 * self.factors))
            .and_then(|r| r.checked_add(cube_center))
            .and_then(|r| r.checked_add(star_center))
            .unwrap_or(usize::MAX)
    }

    fn build(&self) -> Result<CodedMatrix> {
        let n = self.factors;
        let (cube_center, star_center) = self.options.center;
        let distance = self.star_distance();
        debug!(
            factors = n,
            alpha = %self.options.alpha,
            face = %self.options.face,
            distance,
            cube_center,
            star_center,
            "building central composite design"
        );

        let cube = union(&self.cube()?, &center_block(n, cube_center))?;
        let star = union(&star_block(n, distance)?, &center_block(n, star_center))?;
        union(&cube, &star)
    }
}
