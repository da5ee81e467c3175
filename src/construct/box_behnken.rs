//! Box-Behnken three-level response-surface designs.
//!
//! For every pair of factors `(i, j)` with `i < j` the design contains a
//! 2² factorial block in columns `i` and `j` with every other column held at
//! its center level. Blocks are stacked in pair order (outer `i`, inner
//! `j`) and followed by the center runs.

use ndarray::Array2;

use super::{two_level_factorial, Design};
use crate::error::{Error, Result};
use crate::matrix::{center_block, union, CodedMatrix};

/// Default number of center runs, indexed by factor count (n ≤ 16).
pub const DEFAULT_CENTER_POINTS: [usize; 17] =
    [0, 0, 0, 3, 3, 6, 6, 6, 8, 9, 10, 12, 12, 13, 14, 15, 16];

/// Default center runs for `factors` factors; beyond the table it is `factors`.
///
/// # Example
///
/// ```
/// use doegen::construct::default_center_points;
///
/// assert_eq!(default_center_points(3), 3);
/// assert_eq!(default_center_points(10), 10);
/// assert_eq!(default_center_points(20), 20);
/// ```
#[must_use]
pub fn default_center_points(factors: usize) -> usize {
    DEFAULT_CENTER_POINTS
        .get(factors)
        .copied()
        .unwrap_or(factors)
}

/// Box-Behnken design on three or more factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxBehnken {
    factors: usize,
    center: usize,
}

impl BoxBehnken {
    /// Create a Box-Behnken design with the tabulated default center runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors < 3`.
    pub fn new(factors: usize) -> Result<Self> {
        if factors < 3 {
            return Err(Error::InvalidFactorCount {
                design: "BoxBehnken",
                factors,
                min: 3,
            });
        }
        Ok(Self {
            factors,
            center: default_center_points(factors),
        })
    }

    /// Override the number of center runs.
    #[must_use]
    pub fn with_center(mut self, center: usize) -> Self {
        self.center = center;
        self
    }

    /// Number of center runs.
    #[must_use]
    pub fn center(&self) -> usize {
        self.center
    }

    fn edge_runs(&self) -> usize {
        2 * self.factors * (self.factors - 1)
    }
}

impl Design for BoxBehnken {
    fn name(&self) -> &'static str {
        "BoxBehnken"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        self.edge_runs() + self.center
    }

    fn build(&self) -> Result<CodedMatrix> {
        let pair = two_level_factorial(2)?;
        let block_len = pair.runs();
        let n = self.factors;

        let mut edges = Array2::zeros((self.edge_runs(), n));
        let mut offset = 0;
        for i in 0..n - 1 {
            for j in i + 1..n {
                for (k, run) in pair.rows().enumerate() {
                    edges[[offset + k, i]] = run[0];
                    edges[[offset + k, j]] = run[1];
                }
                offset += block_len;
            }
        }

        union(&CodedMatrix::new(edges), &center_block(n, self.center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_factors() {
        let m = BoxBehnken::new(3).unwrap().build().unwrap();
        assert_eq!(m.runs(), 15);
        assert_eq!(m.row(0).to_vec(), vec![-1.0, -1.0, 0.0]);
        assert_eq!(m.row(3).to_vec(), vec![1.0, 1.0, 0.0]);
        assert_eq!(m.row(4).to_vec(), vec![-1.0, 0.0, -1.0]);
        assert_eq!(m.row(9).to_vec(), vec![0.0, 1.0, -1.0]);
        assert!(m.rows().skip(12).all(|r| r.iter().all(|&v| v == 0.0)));
    }

    #[test]
    fn test_single_center_run() {
        let bb = BoxBehnken::new(3).unwrap().with_center(1);
        assert_eq!(bb.runs(), 13);
        assert_eq!(bb.build().unwrap().runs(), 13);
    }

    #[test]
    fn test_inactive_columns_are_centered() {
        let m = BoxBehnken::new(5).unwrap().with_center(0).build().unwrap();
        assert_eq!(m.runs(), 40);
        for row in m.rows() {
            let active = row.iter().filter(|&&v| v != 0.0).count();
            assert_eq!(active, 2);
        }
        for col in 0..5 {
            assert_eq!(m.column_levels(col), vec![-1.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_default_centers() {
        assert_eq!(BoxBehnken::new(4).unwrap().center(), 3);
        assert_eq!(BoxBehnken::new(7).unwrap().center(), 6);
        assert_eq!(BoxBehnken::new(16).unwrap().center(), 16);
        assert_eq!(BoxBehnken::new(17).unwrap().center(), 17);
    }

    #[test]
    fn test_too_few_factors() {
        assert_eq!(
            BoxBehnken::new(2).unwrap_err(),
            Error::InvalidFactorCount {
                design: "BoxBehnken",
                factors: 2,
                min: 3
            }
        );
    }
}
