//! Balance verification for coded matrices.
//!
//! A design has strength t when every selection of t columns contains each
//! combination of that column's levels equally often. For two-level
//! fractional factorials the strength is one less than the resolution, so
//! these checks measure the resolution a fraction actually reaches.

use std::collections::HashMap;

use super::CodedMatrix;
use crate::utils::combinations;

/// Result of verifying the strength of a coded matrix.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Whether the matrix reaches the claimed strength.
    pub is_valid: bool,
    /// The claimed strength.
    pub claimed_strength: usize,
    /// The highest t for which the matrix is balanced, capped at the claim.
    pub actual_strength: usize,
    /// Details about any imbalance found.
    pub issues: Vec<VerificationIssue>,
}

/// A specific issue found during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationIssue {
    /// Some level combination of these columns is missing or over-represented.
    ImbalancedProjection {
        /// The columns of the projection.
        columns: Vec<usize>,
        /// How often each combination should appear (0 if the run count
        /// is not divisible by the number of combinations).
        expected_count: usize,
        /// Number of distinct combinations observed.
        observed_combinations: usize,
    },
}

/// Verify that `matrix` has at least the given strength.
///
/// Column levels are the distinct values observed in each column.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, TwoLevelFactorial};
/// use doegen::matrix::verify_strength;
///
/// let full = TwoLevelFactorial::new(3).build().unwrap();
/// assert!(verify_strength(&full, 3).is_valid);
/// ```
#[must_use]
pub fn verify_strength(matrix: &CodedMatrix, strength: usize) -> VerificationResult {
    let symbols = symbolize(matrix);
    let level_counts: Vec<usize> = (0..matrix.factors())
        .map(|c| matrix.column_levels(c).len())
        .collect();
    let runs = matrix.runs();

    let mut issues = Vec::new();
    let mut verified = 0;

    for t in 1..=strength.min(matrix.factors()) {
        let before = issues.len();
        for columns in combinations(matrix.factors(), t) {
            let combos: usize = columns.iter().map(|&c| level_counts[c]).product();
            let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
            for row in &symbols {
                let key: Vec<usize> = columns.iter().map(|&c| row[c]).collect();
                *counts.entry(key).or_insert(0) += 1;
            }

            let expected_count = if runs % combos == 0 { runs / combos } else { 0 };
            let balanced = expected_count > 0
                && counts.len() == combos
                && counts.values().all(|&n| n == expected_count);
            if !balanced {
                issues.push(VerificationIssue::ImbalancedProjection {
                    columns,
                    expected_count,
                    observed_combinations: counts.len(),
                });
            }
        }
        if issues.len() > before {
            break;
        }
        verified = t;
    }

    VerificationResult {
        is_valid: issues.is_empty() && verified >= strength.min(matrix.factors()),
        claimed_strength: strength,
        actual_strength: verified,
        issues,
    }
}

/// Highest strength up to `max_check` that `matrix` satisfies.
#[must_use]
pub fn compute_strength(matrix: &CodedMatrix, max_check: usize) -> usize {
    verify_strength(matrix, max_check).actual_strength
}

/// Replace each coded value by the index of its level within its column.
fn symbolize(matrix: &CodedMatrix) -> Vec<Vec<usize>> {
    let levels: Vec<Vec<f64>> = (0..matrix.factors())
        .map(|c| matrix.column_levels(c))
        .collect();
    matrix
        .rows()
        .map(|row| {
            row.iter()
                .zip(&levels)
                .map(|(v, lv)| {
                    let v = v + 0.0;
                    lv.binary_search_by(|x| x.total_cmp(&v))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}
