//! Minimal fractional factorials for a target resolution.
//!
//! With `b` base factors, a resolution-`res` design can carry the `b` main
//! factors plus one derived factor per subset of base factors whose size is
//! at least `res - 1` and below `b`:
//!
//! ```text
//! capacity(b, res) = b + Σ C(b, r)   for r in res-1 .. b-1
//! ```
//!
//! The search picks the smallest `b` whose capacity reaches the requested
//! factor count, then fills the generator with derived words in increasing
//! subset size, lexicographic within a size. Capacity is non-decreasing in
//! `b` and reaches `n` below `b = n` exactly when `res <= n - 1`, so
//! feasibility is decided before any search.
//!
//! Words are picked by length alone. Two derived words sharing most of
//! their letters multiply to a short defining word, so above resolution 4
//! the achieved resolution can fall short of the target (7 factors at
//! resolution 5 reach only 4). [`CodedMatrix::resolution`] measures what a
//! built design achieves.

use tracing::debug;

use super::{Design, FractionalFactorial, Generator, Word, MAX_BASE_FACTORS};
use crate::error::{Error, Result};
use crate::matrix::CodedMatrix;
use crate::utils::{binomial, combinations};

/// Number of factors a resolution-`resolution` design on `base` base
/// factors can hold. Saturates at `u64::MAX`.
///
/// # Example
///
/// ```
/// use doegen::construct::factors_at_resolution;
///
/// assert_eq!(factors_at_resolution(3, 3), 6);  // a b c ab ac bc
/// assert_eq!(factors_at_resolution(4, 4), 8);  // a b c d abc abd acd bcd
/// assert_eq!(factors_at_resolution(4, 5), 4);
/// ```
#[must_use]
pub fn factors_at_resolution(base: usize, resolution: usize) -> u64 {
    let lowest = resolution.saturating_sub(1);
    (lowest..base).fold(base as u64, |acc, r| {
        let count = binomial(base as u64, r as u64).unwrap_or(u64::MAX);
        acc.saturating_add(count)
    })
}

/// Smallest base-factor count that holds `factors` factors at `resolution`.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `resolution < 3`
/// - [`Error::DesignNotPossible`] if no base count below `factors` works,
///   which happens exactly when `resolution > factors - 1`
/// - [`Error::TooManyFactors`] if more than [`MAX_BASE_FACTORS`] base
///   factors would be required
pub fn minimal_base_factors(factors: usize, resolution: usize) -> Result<usize> {
    if resolution < 3 {
        return Err(Error::invalid_parameter(format!(
            "resolution must be at least 3, got {resolution}"
        )));
    }
    if factors < 2 || resolution > factors - 1 {
        return Err(Error::DesignNotPossible {
            factors,
            resolution,
        });
    }

    let first = resolution - 1;
    let last = (factors - 1).min(MAX_BASE_FACTORS);
    (first..=last)
        .find(|&b| factors_at_resolution(b, resolution) >= factors as u64)
        .ok_or(Error::TooManyFactors {
            required: first.max(last + 1),
            max: MAX_BASE_FACTORS,
        })
}

/// Generator of the smallest resolution-`resolution` design on `factors`
/// factors.
///
/// # Errors
///
/// See [`minimal_base_factors`].
///
/// # Example
///
/// ```
/// use doegen::construct::minimal_generator;
///
/// let g = minimal_generator(5, 3).unwrap();
/// assert_eq!(g.to_string(), "a b c ab ac");
/// assert_eq!(g.base_factors(), 3);
/// ```
pub fn minimal_generator(factors: usize, resolution: usize) -> Result<Generator> {
    let base = minimal_base_factors(factors, resolution)?;

    let mut words: Vec<Word> = (0..base).map(Word::main).collect();
    words.extend(
        (resolution - 1..base)
            .flat_map(|size| combinations(base, size))
            .take(factors - base)
            .map(Word::product),
    );

    let generator = Generator::new(base, words)?;
    debug!(
        factors,
        resolution,
        base,
        generator = %generator,
        "selected minimal fractional factorial"
    );
    Ok(generator)
}

/// Two-level fractional factorial with the fewest runs for a resolution.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, FractionalByResolution};
///
/// let design = FractionalByResolution::new(6, 3);
/// let m = design.build().unwrap();
///
/// assert_eq!(m.runs(), 8);
/// assert_eq!(m.factors(), 6);
/// assert!(m.resolution().unwrap() >= 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionalByResolution {
    factors: usize,
    resolution: usize,
}

impl FractionalByResolution {
    /// Describe a design on `factors` factors at `resolution`.
    #[must_use]
    pub fn new(factors: usize, resolution: usize) -> Self {
        Self {
            factors,
            resolution,
        }
    }

    /// Requested resolution.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The generator this design is built from.
    ///
    /// # Errors
    ///
    /// See [`minimal_base_factors`].
    pub fn generator(&self) -> Result<Generator> {
        minimal_generator(self.factors, self.resolution)
    }
}

impl Design for FractionalByResolution {
    fn name(&self) -> &'static str {
        "FractionalByResolution"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    /// Zero when the design is not possible.
    fn runs(&self) -> usize {
        minimal_base_factors(self.factors, self.resolution).map_or(0, |b| 1usize << b)
    }

    fn build(&self) -> Result<CodedMatrix> {
        FractionalFactorial::new(self.generator()?).build()
    }
}
