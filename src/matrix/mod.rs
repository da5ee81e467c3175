//! Coded design matrices and block algebra.
//!
//! This module provides the fundamental data structure shared by every
//! design engine.
//!
//! ## Overview
//!
//! - [`CodedMatrix`]: rows = runs, columns = factors, values in a small
//!   coded alphabet (−1/0/+1, a star distance ±α, or 0..k−1 level indices),
//!   or anywhere in `[-1, 1]` for sampling designs
//! - [`center_block`], [`union`], [`scale`]: the block primitives composite
//!   designs are assembled from
//! - [`verify_strength`], [`compute_strength`]: balance checks over column
//!   projections

mod blocks;
mod verify;

pub use blocks::{center_block, scale, union};
pub use verify::{compute_strength, verify_strength, VerificationIssue, VerificationResult};

use ndarray::{Array2, ArrayView1};
use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A coded design matrix.
///
/// Values are never NaN; the column count always equals the number of
/// factors the design was built for.
#[derive(Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "CodedMatrixRepr")
)]
pub struct CodedMatrix {
    /// The coded data, shape (runs, factors).
    data: Array2<f64>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CodedMatrixRepr {
    data: Array2<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<CodedMatrixRepr> for CodedMatrix {
    type Error = Error;

    fn try_from(repr: CodedMatrixRepr) -> Result<Self> {
        Self::try_new(repr.data)
    }
}

impl CodedMatrix {
    /// Wrap an array of coded values.
    ///
    /// # Panics
    ///
    /// Panics if any value is NaN.
    #[must_use]
    pub fn new(data: Array2<f64>) -> Self {
        assert!(
            data.iter().all(|v| !v.is_nan()),
            "coded matrices must not contain NaN"
        );
        Self { data }
    }

    /// Wrap an array of coded values, rejecting NaN entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any value is NaN.
    pub fn try_new(data: Array2<f64>) -> Result<Self> {
        if let Some(((row, col), _)) = data.indexed_iter().find(|(_, v)| v.is_nan()) {
            return Err(Error::invalid_parameter(format!(
                "coded value at row {row}, column {col} is NaN"
            )));
        }
        Ok(Self { data })
    }

    /// Build from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the rows have different lengths,
    /// or [`Error::InvalidParameter`] on NaN values.
    pub fn from_rows(rows: &[Vec<f64>], factors: usize) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.len() != factors) {
            return Err(Error::ShapeMismatch {
                expected: factors,
                actual: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((rows.len(), factors), flat)
            .map_err(|e| Error::invalid_parameter(e.to_string()))?;
        Self::try_new(data)
    }

    /// Number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.data.nrows()
    }

    /// Number of factors (columns).
    #[must_use]
    pub fn factors(&self) -> usize {
        self.data.ncols()
    }

    /// Get a reference to the underlying data.
    #[must_use]
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Consume the matrix and return the underlying data.
    #[must_use]
    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// Get the value at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// Get a row of the matrix.
    #[must_use]
    pub fn row(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.data.row(idx)
    }

    /// Get a column of the matrix.
    #[must_use]
    pub fn column(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.data.column(idx)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.data.rows().into_iter()
    }

    /// Rows as owned vectors, convenient for comparisons.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Distinct values of column `idx`, ascending.
    #[must_use]
    pub fn column_levels(&self, idx: usize) -> Vec<f64> {
        // `+ 0.0` folds -0.0 into 0.0
        let mut levels: Vec<f64> = self.column(idx).iter().map(|v| v + 0.0).collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        levels
    }

    /// Highest strength t (up to `factors`) for which every t-column
    /// projection is balanced.
    ///
    /// Checks every column subset up to the answer, which grows like 2ⁿ
    /// for n balanced columns. [`CodedMatrix::resolution`] is bounded for
    /// two-level designs.
    #[must_use]
    pub fn strength(&self) -> usize {
        compute_strength(self, self.factors())
    }

    /// Resolution of a two-level design: its strength plus one.
    ///
    /// Returns `None` if some column does not take exactly two values.
    ///
    /// A two-level design of strength t has at least 2ᵗ runs, so only
    /// projections up to ⌊log₂ runs⌋ columns are checked. A design whose
    /// runs are the 2ⁿ distinct sign patterns is a full factorial and
    /// reports n + 1 without any projection check.
    ///
    /// # Example
    ///
    /// ```
    /// use doegen::construct::{Design, FractionalFactorial};
    ///
    /// let design = FractionalFactorial::parse("a b c abc").unwrap().build().unwrap();
    /// assert_eq!(design.resolution(), Some(4));
    /// ```
    #[must_use]
    pub fn resolution(&self) -> Option<usize> {
        let n = self.factors();
        if !(0..n).all(|c| self.column_levels(c).len() == 2) {
            return None;
        }
        if self.is_full_two_level() {
            return Some(n + 1);
        }
        let cap = (usize::BITS - 1 - self.runs().leading_zeros()) as usize;
        Some(compute_strength(self, cap.min(n)) + 1)
    }

    /// Whether the runs are exactly the 2ⁿ distinct level patterns.
    fn is_full_two_level(&self) -> bool {
        let full = u32::try_from(self.factors())
            .ok()
            .and_then(|n| 1usize.checked_shl(n));
        if full != Some(self.runs()) {
            return false;
        }
        let patterns: HashSet<Vec<u64>> = self
            .rows()
            .map(|row| row.iter().map(|v| (v + 0.0).to_bits()).collect())
            .collect();
        patterns.len() == self.runs()
    }
}

impl From<CodedMatrix> for Array2<f64> {
    fn from(matrix: CodedMatrix) -> Self {
        matrix.data
    }
}

impl fmt::Debug for CodedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CodedMatrix({} x {}) {:?}",
            self.runs(),
            self.factors(),
            self.data
        )
    }
}

impl fmt::Display for CodedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CodedMatrix({} runs, {} factors)", self.runs(), self.factors())?;
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>8.4}")).collect();
            writeln!(f, "  {}", cells.join(" "))?;
        }
        Ok(())
    }
}
