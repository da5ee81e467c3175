//! Factor specifications and level encoding.
//!
//! A [`FactorSpec`] is the ordered name → levels mapping supplied by the
//! caller. Factor order fixes the column order of every design built from
//! it. A spec is validated once on construction, so the design engines
//! and the decoder can rely on every factor having at least two distinct,
//! finite levels.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single named experimental factor and its observed levels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factor {
    /// Factor name, used as the output column header.
    pub name: String,
    /// Levels in the order they were supplied.
    pub levels: Vec<f64>,
}

impl Factor {
    /// Create a factor from a name and its levels.
    pub fn new(name: impl Into<String>, levels: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            levels: levels.into(),
        }
    }

    /// Smallest and largest level.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        self.levels
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_factor_spec("factor names must not be empty"));
        }
        if self.levels.len() < 2 {
            return Err(Error::invalid_factor_spec(format!(
                "factor '{}' needs at least 2 levels, got {}",
                self.name,
                self.levels.len()
            )));
        }
        if let Some(bad) = self.levels.iter().find(|v| !v.is_finite()) {
            return Err(Error::invalid_factor_spec(format!(
                "factor '{}' has non-finite level {bad}",
                self.name
            )));
        }
        let (lo, hi) = self.bounds();
        if lo == hi {
            return Err(Error::invalid_factor_spec(format!(
                "factor '{}' needs two distinct levels, all are {lo}",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered mapping from factor name to its levels.
///
/// # Example
///
/// ```
/// use doegen::FactorSpec;
///
/// let spec = FactorSpec::new(vec![
///     ("Pressure", vec![50.0, 60.0, 70.0]),
///     ("Temperature", vec![290.0, 350.0]),
/// ])
/// .unwrap();
///
/// assert_eq!(spec.len(), 2);
/// assert_eq!(spec.level_counts(), vec![3, 2]);
/// assert_eq!(spec.bounds(1), (290.0, 350.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "FactorSpecRepr")
)]
pub struct FactorSpec {
    factors: Vec<Factor>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct FactorSpecRepr {
    factors: Vec<Factor>,
}

#[cfg(feature = "serde")]
impl TryFrom<FactorSpecRepr> for FactorSpec {
    type Error = Error;

    fn try_from(repr: FactorSpecRepr) -> Result<Self> {
        Self::from_factors(repr.factors)
    }
}

impl FactorSpec {
    /// Build a validated spec from `(name, levels)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorSpec`] if the spec is empty, a name is
    /// empty or repeated, or a factor has fewer than two distinct finite
    /// levels.
    pub fn new<N, L>(entries: impl IntoIterator<Item = (N, L)>) -> Result<Self>
    where
        N: Into<String>,
        L: Into<Vec<f64>>,
    {
        let factors = entries
            .into_iter()
            .map(|(name, levels)| Factor::new(name, levels))
            .collect();
        Self::from_factors(factors)
    }

    /// Build a validated spec from already assembled factors.
    ///
    /// # Errors
    ///
    /// See [`FactorSpec::new`].
    pub fn from_factors(factors: Vec<Factor>) -> Result<Self> {
        if factors.is_empty() {
            return Err(Error::invalid_factor_spec("at least one factor is required"));
        }
        for (i, factor) in factors.iter().enumerate() {
            factor.validate()?;
            if factors[..i].iter().any(|f| f.name == factor.name) {
                return Err(Error::invalid_factor_spec(format!(
                    "duplicate factor name '{}'",
                    factor.name
                )));
            }
        }
        Ok(Self { factors })
    }

    /// Number of factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Always `false`: a validated spec holds at least one factor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// The factors in column order.
    #[must_use]
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Factor names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|f| f.name.as_str())
    }

    /// Number of supplied levels per factor, the input to a full factorial.
    #[must_use]
    pub fn level_counts(&self) -> Vec<usize> {
        self.factors.iter().map(|f| f.levels.len()).collect()
    }

    /// `(min, max)` of the levels of factor `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        self.factors[index].bounds()
    }

    /// Levels of factor `index` as supplied; coded index `k` selects entry `k`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn level_table(&self, index: usize) -> Vec<f64> {
        self.factors[index].levels.clone()
    }

    /// Low, middle and high level of factor `index`.
    ///
    /// Exactly three supplied levels are used as given (sorted). Otherwise
    /// the extremes are kept and the middle level is their arithmetic mean.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn three_level_table(&self, index: usize) -> Vec<f64> {
        let factor = &self.factors[index];
        if factor.levels.len() == 3 {
            let mut levels = factor.levels.clone();
            levels.sort_by(f64::total_cmp);
            return levels;
        }
        let (lo, hi) = factor.bounds();
        vec![lo, (lo + hi) / 2.0, hi]
    }
}

impl fmt::Display for FactorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for factor in &self.factors {
            let levels: Vec<String> = factor.levels.iter().map(ToString::to_string).collect();
            writeln!(f, "{}: [{}]", factor.name, levels.join(", "))?;
        }
        Ok(())
    }
}
