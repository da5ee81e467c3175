//! Full factorial designs.
//!
//! Runs enumerate every combination of level indices as a mixed-radix
//! counter whose least-significant digit is the first factor, so the first
//! column cycles fastest.

use ndarray::Array2;

use super::Design;
use crate::error::{Error, Result};
use crate::matrix::CodedMatrix;

/// General full factorial over arbitrary level counts.
///
/// Coded values are level indices `0..levels[i]`.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, FullFactorial};
///
/// let ff = FullFactorial::new(vec![2, 3]).unwrap();
/// let m = ff.build().unwrap();
///
/// assert_eq!(m.runs(), 6);
/// assert_eq!(m.row(1).to_vec(), vec![1.0, 0.0]);
/// assert_eq!(m.row(2).to_vec(), vec![0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullFactorial {
    levels: Vec<usize>,
    runs: usize,
}

impl FullFactorial {
    /// Create a full factorial over the given level counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a level count is zero or the
    /// run count overflows `usize`.
    pub fn new(levels: Vec<usize>) -> Result<Self> {
        if let Some(i) = levels.iter().position(|&l| l == 0) {
            return Err(Error::invalid_parameter(format!(
                "level count for factor {i} must be positive"
            )));
        }
        let runs = levels
            .iter()
            .try_fold(1usize, |acc, &l| acc.checked_mul(l))
            .ok_or_else(|| {
                Error::invalid_parameter(format!("full factorial over {levels:?} is too large"))
            })?;
        Ok(Self { levels, runs })
    }

    /// Level count per factor.
    #[must_use]
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }
}

impl Design for FullFactorial {
    fn name(&self) -> &'static str {
        "FullFactorial"
    }

    fn factors(&self) -> usize {
        self.levels.len()
    }

    fn runs(&self) -> usize {
        self.runs
    }

    fn build(&self) -> Result<CodedMatrix> {
        // stride[i] = product of the level counts before factor i
        let strides: Vec<usize> = self
            .levels
            .iter()
            .scan(1usize, |acc, &l| {
                let stride = *acc;
                *acc *= l;
                Some(stride)
            })
            .collect();

        let data = Array2::from_shape_fn((self.runs, self.levels.len()), |(row, col)| {
            ((row / strides[col]) % self.levels[col]) as f64
        });
        Ok(CodedMatrix::new(data))
    }
}

/// Two-level full factorial in the symmetric alphabet {−1, +1}.
///
/// Equivalent to a [`FullFactorial`] over `[2; n]` with index 0 mapped to −1
/// and index 1 to +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoLevelFactorial {
    factors: usize,
}

impl TwoLevelFactorial {
    /// Create a 2ⁿ design.
    #[must_use]
    pub fn new(factors: usize) -> Self {
        Self { factors }
    }
}

impl Design for TwoLevelFactorial {
    fn name(&self) -> &'static str {
        "TwoLevelFactorial"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        u32::try_from(self.factors)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .unwrap_or(usize::MAX)
    }

    fn build(&self) -> Result<CodedMatrix> {
        if self.factors >= usize::BITS as usize {
            return Err(Error::invalid_parameter(format!(
                "2^{} runs is too large",
                self.factors
            )));
        }
        let data = Array2::from_shape_fn((self.runs(), self.factors), |(row, col)| {
            if (row >> col) & 1 == 1 {
                1.0
            } else {
                -1.0
            }
        });
        Ok(CodedMatrix::new(data))
    }
}

/// Build a general full factorial over `levels`.
///
/// # Errors
///
/// See [`FullFactorial::new`].
pub fn full_factorial(levels: &[usize]) -> Result<CodedMatrix> {
    FullFactorial::new(levels.to_vec())?.build()
}

/// Build the two-level full factorial over `factors` factors.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if 2ⁿ does not fit in `usize`.
///
/// # Example
///
/// ```
/// use doegen::construct::two_level_factorial;
///
/// let m = two_level_factorial(2).unwrap();
/// assert_eq!(
///     m.to_rows(),
///     vec![vec![-1.0, -1.0], vec![1.0, -1.0], vec![-1.0, 1.0], vec![1.0, 1.0]]
/// );
/// ```
pub fn two_level_factorial(factors: usize) -> Result<CodedMatrix> {
    TwoLevelFactorial::new(factors).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_factorial_order() {
        // first factor cycles fastest
        let m = full_factorial(&[2, 4, 3]).unwrap();
        assert_eq!(m.runs(), 24);
        assert_eq!(m.row(0).to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(m.row(1).to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(m.row(2).to_vec(), vec![0.0, 1.0, 0.0]);
        assert_eq!(m.row(7).to_vec(), vec![1.0, 3.0, 0.0]);
        assert_eq!(m.row(8).to_vec(), vec![0.0, 0.0, 1.0]);
        assert_eq!(m.row(23).to_vec(), vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_full_factorial_unique_rows() {
        let m = full_factorial(&[3, 3, 2]).unwrap();
        let rows: HashSet<Vec<u64>> = m
            .rows()
            .map(|r| r.iter().map(|v| v.to_bits()).collect())
            .collect();
        assert_eq!(rows.len(), 18);
        assert_eq!(m.column_levels(0), vec![0.0, 1.0, 2.0]);
        assert_eq!(m.column_levels(2), vec![0.0, 1.0]);
    }

    #[test]
    fn test_full_factorial_invalid() {
        assert!(matches!(
            FullFactorial::new(vec![2, 0]),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(FullFactorial::new(vec![usize::MAX, 2]).is_err());
    }

    #[test]
    fn test_single_level_factor() {
        let m = full_factorial(&[1, 2]).unwrap();
        assert_eq!(m.to_rows(), vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_two_level_factorial() {
        let m = two_level_factorial(3).unwrap();
        assert_eq!(m.runs(), 8);
        assert!(m.data().iter().all(|&v| v == 1.0 || v == -1.0));
        assert_eq!(m.row(0).to_vec(), vec![-1.0, -1.0, -1.0]);
        assert_eq!(m.row(5).to_vec(), vec![1.0, -1.0, 1.0]);
        assert_eq!(m.strength(), 3);
    }

    #[test]
    fn test_two_level_matches_full_factorial() {
        let two = two_level_factorial(4).unwrap();
        let full = full_factorial(&[2; 4]).unwrap();
        let rescaled = full.data().mapv(|v| 2.0 * v - 1.0);
        assert_eq!(two.data(), &rescaled);
    }

    #[test]
    fn test_zero_factors() {
        let m = two_level_factorial(0).unwrap();
        assert_eq!(m.runs(), 1);
        assert_eq!(m.factors(), 0);
        assert!(TwoLevelFactorial::new(64).build().is_err());
        assert_eq!(TwoLevelFactorial::new(200).runs(), usize::MAX);
    }
}
