//! Plackett-Burman two-level screening designs.
//!
//! A Plackett-Burman design for n factors uses N = 4(⌊n/4⌋ + 1) runs, the
//! smallest multiple of four strictly greater than n. Its columns are
//! columns `1..=n` of a normalized Hadamard matrix of order N, with the
//! row order reversed so the design opens on a low-heavy run.
//!
//! ## Hadamard orders
//!
//! An order-N matrix is produced by Sylvester doubling,
//! H₂ₘ = \[\[Hₘ, Hₘ\], \[Hₘ, −Hₘ\]\], applied to a seed of order m:
//!
//! - m = 1 when N is a power of two
//! - m = p + 1 for a prime p ≡ 3 (mod 4), from the Paley construction
//!
//! Orders that factor neither way (28 or 36, for example) are rejected.

use ndarray::{s, Array2};
use tracing::debug;

use super::Design;
use crate::error::{Error, Result};
use crate::matrix::CodedMatrix;
use crate::utils::{is_prime, mod_pow};

/// Normalized Hadamard matrix of `order`: first row and column all +1 and
/// `H Hᵀ = order · I`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if no seed is available for `order`.
///
/// # Example
///
/// ```
/// use doegen::construct::hadamard;
///
/// let h = hadamard(12).unwrap();
/// assert_eq!(h.dim(), (12, 12));
/// assert!(h.row(0).iter().all(|&v| v == 1));
/// assert!(hadamard(28).is_err());
/// ```
pub fn hadamard(order: usize) -> Result<Array2<i8>> {
    let (seed, doublings) = seed_for(order).ok_or_else(|| {
        Error::invalid_parameter(format!("no Hadamard matrix construction for order {order}"))
    })?;
    let mut h = seed;
    for _ in 0..doublings {
        h = sylvester_double(&h);
    }
    Ok(h)
}

/// Pick the largest seed whose order times a power of two gives `order`.
fn seed_for(order: usize) -> Option<(Array2<i8>, u32)> {
    if order == 0 {
        return None;
    }
    (0..=order.trailing_zeros()).find_map(|e| {
        let m = order >> e;
        if m.is_power_of_two() {
            // doubling from [1] to m first, then e more times
            Some((Array2::from_elem((1, 1), 1), m.trailing_zeros() + e))
        } else if m >= 4 && m % 4 == 0 && is_prime(m as u64 - 1) {
            Some((paley(m as u64 - 1), e))
        } else {
            None
        }
    })
}

fn sylvester_double(h: &Array2<i8>) -> Array2<i8> {
    let n = h.nrows();
    let mut out = Array2::zeros((2 * n, 2 * n));
    out.slice_mut(s![..n, ..n]).assign(h);
    out.slice_mut(s![..n, n..]).assign(h);
    out.slice_mut(s![n.., ..n]).assign(h);
    out.slice_mut(s![n.., n..]).assign(&h.mapv(|v| -v));
    out
}

/// Legendre symbol (a/p) by Euler's criterion.
fn legendre(a: u64, p: u64) -> i8 {
    let a = a % p;
    if a == 0 {
        0
    } else if mod_pow(a, (p - 1) / 2, p) == 1 {
        1
    } else {
        -1
    }
}

/// Paley type I matrix of order p + 1 for a prime p ≡ 3 (mod 4), normalized.
fn paley(p: u64) -> Array2<i8> {
    let n = p as usize + 1;
    let mut h = Array2::from_elem((n, n), 1i8);

    for i in 1..n {
        h[[i, 0]] = -1;
        for j in 1..n {
            if i != j {
                let diff = (j as u64 + p - i as u64) % p;
                h[[i, j]] = legendre(diff, p);
            }
        }
    }

    // negate rows, then columns, that start with -1
    for i in 0..n {
        if h[[i, 0]] == -1 {
            h.row_mut(i).mapv_inplace(|v| -v);
        }
    }
    for j in 0..n {
        if h[[0, j]] == -1 {
            h.column_mut(j).mapv_inplace(|v| -v);
        }
    }
    h
}

/// Plackett-Burman screening design.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, PlackettBurman};
///
/// let pb = PlackettBurman::new(5).unwrap();
/// assert_eq!(pb.runs(), 8);
///
/// let m = pb.build().unwrap();
/// assert_eq!(m.factors(), 5);
/// assert_eq!(m.strength(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlackettBurman {
    factors: usize,
}

impl PlackettBurman {
    /// Create a screening design for `factors` factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors` is zero.
    pub fn new(factors: usize) -> Result<Self> {
        if factors == 0 {
            return Err(Error::InvalidFactorCount {
                design: "PlackettBurman",
                factors,
                min: 1,
            });
        }
        Ok(Self { factors })
    }
}

impl Design for PlackettBurman {
    fn name(&self) -> &'static str {
        "PlackettBurman"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        4 * (self.factors / 4 + 1)
    }

    fn build(&self) -> Result<CodedMatrix> {
        let order = self.runs();
        let h = hadamard(order).map_err(|_| Error::DesignNotPossible {
            factors: self.factors,
            resolution: 3,
        })?;
        debug!(factors = self.factors, runs = order, "building Plackett-Burman design");

        let data = h
            .slice(s![..;-1, 1..=self.factors])
            .mapv(f64::from);
        Ok(CodedMatrix::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_hadamard(h: &Array2<i8>) {
        let n = h.nrows();
        let gram = h.mapv(i32::from).dot(&h.t().mapv(i32::from));
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { n as i32 } else { 0 };
                assert_eq!(gram[[i, j]], expected, "order {n}, entry ({i}, {j})");
            }
        }
        assert!(h.row(0).iter().all(|&v| v == 1));
        assert!(h.column(0).iter().all(|&v| v == 1));
    }

    #[test]
    fn test_hadamard_orders() {
        for order in [1, 2, 4, 8, 12, 16, 20, 24, 32, 40, 44, 48] {
            assert_hadamard(&hadamard(order).unwrap());
        }
    }

    #[test]
    fn test_unsupported_orders() {
        assert!(hadamard(0).is_err());
        assert!(hadamard(28).is_err());
        assert!(hadamard(36).is_err());
    }

    #[test]
    fn test_legendre_symbol() {
        // residues mod 7: 1, 2, 4
        let symbols: Vec<i8> = (0..7).map(|a| legendre(a, 7)).collect();
        assert_eq!(symbols, vec![0, 1, 1, -1, 1, -1, -1]);
    }

    #[test]
    fn test_four_runs() {
        let m = PlackettBurman::new(3).unwrap().build().unwrap();
        assert_eq!(
            m.to_rows(),
            vec![
                vec![-1.0, -1.0, 1.0],
                vec![1.0, -1.0, -1.0],
                vec![-1.0, 1.0, -1.0],
                vec![1.0, 1.0, 1.0],
            ]
        );
    }

    #[test]
    fn test_run_counts() {
        let runs = |n| PlackettBurman::new(n).unwrap().runs();
        assert_eq!(runs(1), 4);
        assert_eq!(runs(3), 4);
        assert_eq!(runs(4), 8);
        assert_eq!(runs(7), 8);
        assert_eq!(runs(11), 12);
        assert_eq!(runs(19), 20);
    }

    #[test]
    fn test_columns_balanced_and_orthogonal() {
        for n in [5, 10, 11, 17, 23] {
            let m = PlackettBurman::new(n).unwrap().build().unwrap();
            let data = m.data();
            for a in 0..n {
                assert_eq!(data.column(a).sum(), 0.0, "column {a} of {n}");
                for b in a + 1..n {
                    assert_eq!(data.column(a).dot(&data.column(b)), 0.0);
                }
            }
            assert_eq!(m.strength(), 2);
        }
    }

    #[test]
    fn test_unsupported_run_count() {
        // 27 factors need 28 runs
        let err = PlackettBurman::new(27).unwrap().build().unwrap_err();
        assert_eq!(
            err,
            Error::DesignNotPossible {
                factors: 27,
                resolution: 3
            }
        );
        assert!(PlackettBurman::new(0).is_err());
    }
}
