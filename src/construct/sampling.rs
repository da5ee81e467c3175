//! Space-filling and random sampling designs.
//!
//! These designs spread runs through the interior of the factor ranges
//! instead of placing them on a fixed level grid. Every coded value lies in
//! `[-1, 1]`, so [`crate::decode::decode`] maps a sample onto the factor
//! ranges the same way it maps a two-level design.
//!
//! | Design | Runs | Randomness |
//! |--------|------|------------|
//! | [`Sukharev`] | mⁿ for m points per axis | none |
//! | [`Halton`] | samples | none |
//! | [`LatinHypercube`] | samples | seeded |
//! | [`UniformRandom`] | samples | seeded |
//!
//! Random designs draw from [`StdRng`]. A fixed seed makes the design
//! reproducible; without one the generator is seeded from system entropy.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{Design, FullFactorial};
use crate::error::{Error, Result};
use crate::matrix::CodedMatrix;
use crate::utils::is_prime;

/// Candidate hypercubes compared by a space-filling Latin hypercube.
pub const DEFAULT_MAXIMIN_ITERATIONS: usize = 5;

fn check_factors(design: &'static str, factors: usize) -> Result<()> {
    if factors == 0 {
        return Err(Error::InvalidFactorCount {
            design,
            factors,
            min: 1,
        });
    }
    Ok(())
}

fn check_samples(design: &str, samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(Error::invalid_parameter(format!(
            "{design} needs at least one sample"
        )));
    }
    Ok(())
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Map a unit-interval value onto the coded range `[-1, 1]`.
fn coded(u: f64) -> f64 {
    2.0 * u - 1.0
}

/// Sukharev grid: the centroids of an m × … × m partition of the range.
///
/// No run touches the boundary of the range. The grid is optimal for the
/// covering radius under the max-norm.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, Sukharev};
///
/// let grid = Sukharev::new(2, 2).unwrap();
/// let m = grid.build().unwrap();
///
/// assert_eq!(m.runs(), 4);
/// assert_eq!(m.row(0).to_vec(), vec![-0.5, -0.5]);
/// assert_eq!(m.row(3).to_vec(), vec![0.5, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sukharev {
    factors: usize,
    per_axis: usize,
}

impl Sukharev {
    /// Grid with `per_axis` points along each of `factors` axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors` is zero, or
    /// [`Error::InvalidParameter`] if `per_axis` is zero.
    pub fn new(factors: usize, per_axis: usize) -> Result<Self> {
        check_factors("Sukharev", factors)?;
        check_samples("Sukharev", per_axis)?;
        Ok(Self { factors, per_axis })
    }

    /// Points along each axis.
    #[must_use]
    pub fn per_axis(&self) -> usize {
        self.per_axis
    }
}

impl Design for Sukharev {
    fn name(&self) -> &'static str {
        "Sukharev"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        u32::try_from(self.factors)
            .ok()
            .and_then(|n| self.per_axis.checked_pow(n))
            .unwrap_or(usize::MAX)
    }

    fn build(&self) -> Result<CodedMatrix> {
        let cells = FullFactorial::new(vec![self.per_axis; self.factors])?.build()?;
        let m = self.per_axis as f64;
        // cell k spans [k/m, (k+1)/m]
        Ok(CodedMatrix::new(
            cells.data().mapv(|k| coded((2.0 * k + 1.0) / (2.0 * m))),
        ))
    }
}

/// `index` written in `base` and mirrored about the radix point.
fn radical_inverse(mut index: u64, base: u64) -> f64 {
    let inv = 1.0 / base as f64;
    let mut scale = inv;
    let mut value = 0.0;
    while index > 0 {
        value += (index % base) as f64 * scale;
        index /= base;
        scale *= inv;
    }
    value
}

/// Halton quasi-random sequence, one prime base per factor (2, 3, 5, …).
///
/// Run `i` is point `i + 1` of the sequence; point 0 would sit on the
/// lower corner of the range.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, Halton};
///
/// let m = Halton::new(2, 3).unwrap().build().unwrap();
///
/// // bases 2 and 3: (1/2, 1/3), (1/4, 2/3), (3/4, 1/9)
/// assert_eq!(m.get(0, 0), 0.0);
/// assert_eq!(m.get(1, 0), -0.5);
/// assert!((m.get(1, 1) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halton {
    factors: usize,
    samples: usize,
}

impl Halton {
    /// `samples` points of the sequence over `factors` factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors` is zero, or
    /// [`Error::InvalidParameter`] if `samples` is zero.
    pub fn new(factors: usize, samples: usize) -> Result<Self> {
        check_factors("Halton", factors)?;
        check_samples("Halton", samples)?;
        Ok(Self { factors, samples })
    }
}

impl Design for Halton {
    fn name(&self) -> &'static str {
        "Halton"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        self.samples
    }

    fn build(&self) -> Result<CodedMatrix> {
        let bases: Vec<u64> = (2u64..).filter(|&n| is_prime(n)).take(self.factors).collect();
        let data = Array2::from_shape_fn((self.samples, self.factors), |(run, col)| {
            coded(radical_inverse(run as u64 + 1, bases[col]))
        });
        Ok(CodedMatrix::new(data))
    }
}

/// Latin hypercube sample.
///
/// Each factor's range is cut into `samples` equal strata and every stratum
/// holds exactly one run, at a random position inside it. With
/// [`LatinHypercube::maximin`] several hypercubes are drawn and the one whose
/// closest pair of runs is farthest apart is kept.
///
/// # Example
///
/// ```
/// use doegen::construct::{Design, LatinHypercube};
///
/// let lhs = LatinHypercube::new(3, 10).unwrap().with_seed(7);
/// let m = lhs.build().unwrap();
///
/// assert_eq!(m.runs(), 10);
/// assert_eq!(m, lhs.build().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatinHypercube {
    factors: usize,
    samples: usize,
    iterations: usize,
    seed: Option<u64>,
}

impl LatinHypercube {
    /// `samples` runs over `factors` factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors` is zero, or
    /// [`Error::InvalidParameter`] if `samples` is zero.
    pub fn new(factors: usize, samples: usize) -> Result<Self> {
        check_factors("LatinHypercube", factors)?;
        check_samples("LatinHypercube", samples)?;
        Ok(Self {
            factors,
            samples,
            iterations: 1,
            seed: None,
        })
    }

    /// Keep the best of `iterations` hypercubes by minimum run distance.
    #[must_use]
    pub fn maximin(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Draw from a generator seeded with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn draw(&self, rng: &mut StdRng) -> Array2<f64> {
        let n = self.samples as f64;
        let mut data = Array2::zeros((self.samples, self.factors));
        let mut strata: Vec<usize> = (0..self.samples).collect();
        for mut column in data.columns_mut() {
            strata.shuffle(rng);
            for (value, &stratum) in column.iter_mut().zip(&strata) {
                *value = coded((stratum as f64 + rng.gen::<f64>()) / n);
            }
        }
        data
    }
}

/// Smallest squared Euclidean distance between two runs.
fn min_pair_distance(data: &Array2<f64>) -> f64 {
    let rows: Vec<_> = data.rows().into_iter().collect();
    let mut best = f64::INFINITY;
    for (i, a) in rows.iter().enumerate() {
        for b in &rows[i + 1..] {
            let d: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
            best = best.min(d);
        }
    }
    best
}

impl Design for LatinHypercube {
    fn name(&self) -> &'static str {
        "LatinHypercube"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        self.samples
    }

    fn build(&self) -> Result<CodedMatrix> {
        debug!(
            factors = self.factors,
            samples = self.samples,
            iterations = self.iterations,
            seed = ?self.seed,
            "drawing Latin hypercube"
        );
        let mut rng = rng_for(self.seed);
        let mut best = self.draw(&mut rng);
        let mut best_distance = min_pair_distance(&best);
        for _ in 1..self.iterations {
            let candidate = self.draw(&mut rng);
            let distance = min_pair_distance(&candidate);
            if distance > best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        Ok(CodedMatrix::new(best))
    }
}

/// Runs drawn independently and uniformly over the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformRandom {
    factors: usize,
    samples: usize,
    seed: Option<u64>,
}

impl UniformRandom {
    /// `samples` runs over `factors` factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFactorCount`] if `factors` is zero, or
    /// [`Error::InvalidParameter`] if `samples` is zero.
    pub fn new(factors: usize, samples: usize) -> Result<Self> {
        check_factors("UniformRandom", factors)?;
        check_samples("UniformRandom", samples)?;
        Ok(Self {
            factors,
            samples,
            seed: None,
        })
    }

    /// Draw from a generator seeded with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Design for UniformRandom {
    fn name(&self) -> &'static str {
        "UniformRandom"
    }

    fn factors(&self) -> usize {
        self.factors
    }

    fn runs(&self) -> usize {
        self.samples
    }

    fn build(&self) -> Result<CodedMatrix> {
        debug!(
            factors = self.factors,
            samples = self.samples,
            seed = ?self.seed,
            "drawing uniform random design"
        );
        let mut rng = rng_for(self.seed);
        let data = Array2::from_shape_simple_fn((self.samples, self.factors), || {
            rng.gen_range(-1.0..=1.0)
        });
        Ok(CodedMatrix::new(data))
    }
}
