//! Builder pattern for constructing designs in physical units.
//!
//! The builder takes a [`FactorSpec`], picks the design engine, builds the
//! coded matrix and decodes it onto the factor levels in one step.
//!
//! # Example
//!
//! ```
//! use doegen::{DesignBuilder, DesignKind, FactorSpec};
//!
//! let spec = FactorSpec::new(vec![
//!     ("Pressure", vec![50.0, 70.0]),
//!     ("Temperature", vec![290.0, 350.0]),
//!     ("Flow rate", vec![0.9, 1.0]),
//! ])
//! .unwrap();
//!
//! let design = DesignBuilder::new(DesignKind::BoxBehnken)
//!     .center(&[1])
//!     .build(&spec)
//!     .unwrap();
//!
//! assert_eq!(design.runs(), 13);
//! assert_eq!(design.names(), &["Pressure", "Temperature", "Flow rate"]);
//! ```
//!
//! # Defaults
//!
//! - Box-Behnken: one center run
//! - Central composite: `(2, 2)` center runs, orthogonal α, circumscribed
//! - Fractional factorial by resolution: half the factor count, at least 3
//! - Sukharev grid: two points per axis
//! - Latin hypercube, Halton and uniform random: one sample per factor,
//!   unseeded
//! - Space-filling Latin hypercube: best of
//!   [`DEFAULT_MAXIMIN_ITERATIONS`] hypercubes
//!
//! The convenience functions [`full_fact`], [`frac_fact_res`],
//! [`plackett_burman`], [`box_behnken`], [`central_composite`],
//! [`sukharev`], [`lhs`], [`space_filling_lhs`], [`halton`] and
//! [`uniform_random`] build each design with these defaults.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::construct::{
    center_pair, Alpha, BoxBehnken, CentralComposite, CompositeOptions, Design, Face,
    FractionalByResolution, FractionalFactorial, FullFactorial, Halton, LatinHypercube,
    PlackettBurman, Sukharev, TwoLevelFactorial, UniformRandom, DEFAULT_MAXIMIN_ITERATIONS,
};
use crate::decode::{decode, decode_indexed, DesignMatrix};
use crate::error::{Error, Result};
use crate::factors::FactorSpec;
use crate::matrix::CodedMatrix;

/// Center runs of a Box-Behnken design built through the builder.
pub const BOX_BEHNKEN_CENTER: usize = 1;

/// Center runs `(cube, star)` of a central composite built through the builder.
pub const COMPOSITE_CENTER: (usize, usize) = (2, 2);

/// Points per axis of a Sukharev grid built through the builder.
pub const SUKHAREV_PER_AXIS: usize = 2;

/// The design families the builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DesignKind {
    /// Every combination of the supplied levels.
    FullFactorial,
    /// Every combination of the extreme levels.
    TwoLevelFactorial,
    /// Two-level fraction from an explicit generator.
    Fractional,
    /// Smallest two-level fraction reaching a resolution.
    FractionalByResolution,
    /// Plackett-Burman screening design.
    PlackettBurman,
    /// Box-Behnken three-level design.
    BoxBehnken,
    /// Central composite design.
    CentralComposite,
    /// Centroids of a regular grid of cells.
    Sukharev,
    /// Latin hypercube sample.
    LatinHypercube,
    /// Latin hypercube chosen for the largest minimum run distance.
    SpaceFillingLatinHypercube,
    /// Halton quasi-random sequence.
    Halton,
    /// Independent uniform draws.
    UniformRandom,
}

impl DesignKind {
    /// Whether the design takes a sample count.
    #[must_use]
    pub fn is_sampling(self) -> bool {
        matches!(
            self,
            Self::Sukharev
                | Self::LatinHypercube
                | Self::SpaceFillingLatinHypercube
                | Self::Halton
                | Self::UniformRandom
        )
    }
}

impl FromStr for DesignKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(|c: char| c == '-' || c == ' ', "_").as_str() {
            "full_factorial" | "full_fact" => Ok(Self::FullFactorial),
            "two_level_factorial" | "ff2n" => Ok(Self::TwoLevelFactorial),
            "fractional" | "frac_fact" => Ok(Self::Fractional),
            "fractional_by_resolution" | "frac_fact_res" => Ok(Self::FractionalByResolution),
            "plackett_burman" | "pb" => Ok(Self::PlackettBurman),
            "box_behnken" | "bb" => Ok(Self::BoxBehnken),
            "central_composite" | "ccd" => Ok(Self::CentralComposite),
            "sukharev" => Ok(Self::Sukharev),
            "latin_hypercube" | "lhs" => Ok(Self::LatinHypercube),
            "space_filling_latin_hypercube" | "space_filling_lhs" => {
                Ok(Self::SpaceFillingLatinHypercube)
            }
            "halton" => Ok(Self::Halton),
            "uniform_random" => Ok(Self::UniformRandom),
            _ => Err(Error::invalid_parameter(format!("unknown design kind {s:?}"))),
        }
    }
}

impl fmt::Display for DesignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FullFactorial => "full_factorial",
            Self::TwoLevelFactorial => "two_level_factorial",
            Self::Fractional => "fractional",
            Self::FractionalByResolution => "fractional_by_resolution",
            Self::PlackettBurman => "plackett_burman",
            Self::BoxBehnken => "box_behnken",
            Self::CentralComposite => "central_composite",
            Self::Sukharev => "sukharev",
            Self::LatinHypercube => "latin_hypercube",
            Self::SpaceFillingLatinHypercube => "space_filling_latin_hypercube",
            Self::Halton => "halton",
            Self::UniformRandom => "uniform_random",
        })
    }
}

/// Builder for designs over a [`FactorSpec`].
///
/// Options that do not apply to the selected kind are ignored. Options are
/// validated when the design is built.
///
/// # Example
///
/// ```
/// use doegen::{DesignBuilder, DesignKind, FactorSpec};
/// use doegen::construct::{Alpha, Face};
///
/// let spec = FactorSpec::new(vec![("x", vec![-1.0, 1.0]), ("y", vec![0.0, 10.0])]).unwrap();
///
/// let design = DesignBuilder::new(DesignKind::CentralComposite)
///     .center(&[1, 1])
///     .alpha(Alpha::Rotatable)
///     .face(Face::Faced)
///     .build(&spec)
///     .unwrap();
///
/// assert_eq!(design.runs(), 4 + 1 + 4 + 1);
/// // star runs sit on the faces of the range
/// assert_eq!(design.column("y").unwrap()[7], 0.0);
/// assert_eq!(design.column("y").unwrap()[8], 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignBuilder {
    kind: DesignKind,
    generator: Option<String>,
    resolution: Option<usize>,
    center: Option<Vec<usize>>,
    alpha: Alpha,
    face: Face,
    samples: Option<usize>,
    seed: Option<u64>,
}

impl DesignBuilder {
    /// Create a builder for `kind` with default options.
    #[must_use]
    pub fn new(kind: DesignKind) -> Self {
        Self {
            kind,
            generator: None,
            resolution: None,
            center: None,
            alpha: Alpha::default(),
            face: Face::default(),
            samples: None,
            seed: None,
        }
    }

    /// Generator string of a [`DesignKind::Fractional`] design.
    #[must_use]
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Target resolution of a [`DesignKind::FractionalByResolution`] design.
    #[must_use]
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Center runs: one count for Box-Behnken, `(cube, star)` for a
    /// central composite.
    #[must_use]
    pub fn center(mut self, counts: &[usize]) -> Self {
        self.center = Some(counts.to_vec());
        self
    }

    /// Star distance rule of a central composite.
    #[must_use]
    pub fn alpha(mut self, alpha: Alpha) -> Self {
        self.alpha = alpha;
        self
    }

    /// Star placement of a central composite.
    #[must_use]
    pub fn face(mut self, face: Face) -> Self {
        self.face = face;
        self
    }

    /// Sample count of a sampling design: points per axis for a Sukharev
    /// grid, total runs otherwise.
    #[must_use]
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Seed for the random designs, making them reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The selected design kind.
    #[must_use]
    pub fn kind(&self) -> DesignKind {
        self.kind
    }

    /// Resolution used when none is set: half the factor count, at least 3.
    #[must_use]
    pub fn default_resolution(factors: usize) -> usize {
        (factors / 2).max(3)
    }

    /// Build the coded matrix for `spec`.
    ///
    /// Full factorial columns hold level indices; Box-Behnken columns hold
    /// −1/0/+1.
    ///
    /// # Errors
    ///
    /// Returns any error of the selected engine, plus
    /// [`Error::InvalidParameter`] for a missing generator or a center
    /// count of the wrong length, and [`Error::ShapeMismatch`] if a
    /// generator's column count differs from the number of factors.
    pub fn build_coded(&self, spec: &FactorSpec) -> Result<CodedMatrix> {
        let n = spec.len();
        match self.kind {
            DesignKind::FullFactorial => FullFactorial::new(spec.level_counts())?.build(),
            DesignKind::TwoLevelFactorial => TwoLevelFactorial::new(n).build(),
            DesignKind::Fractional => {
                let generator = self.generator.as_deref().ok_or_else(|| {
                    Error::invalid_parameter("fractional design requires a generator")
                })?;
                let design = FractionalFactorial::parse(generator)?;
                if design.factors() != n {
                    return Err(Error::ShapeMismatch {
                        expected: n,
                        actual: design.factors(),
                    });
                }
                design.build()
            }
            DesignKind::FractionalByResolution => {
                let resolution = self
                    .resolution
                    .unwrap_or_else(|| Self::default_resolution(n));
                FractionalByResolution::new(n, resolution).build()
            }
            DesignKind::PlackettBurman => PlackettBurman::new(n)?.build(),
            DesignKind::BoxBehnken => {
                let center = match self.center.as_deref() {
                    None => BOX_BEHNKEN_CENTER,
                    Some(&[count]) => count,
                    Some(other) => {
                        return Err(Error::invalid_parameter(format!(
                            "Box-Behnken takes 1 center count, got {}",
                            other.len()
                        )))
                    }
                };
                BoxBehnken::new(n)?.with_center(center).build()
            }
            DesignKind::CentralComposite => {
                let center = match self.center.as_deref() {
                    None => COMPOSITE_CENTER,
                    Some(counts) => center_pair(counts)?,
                };
                let options = CompositeOptions {
                    center,
                    alpha: self.alpha,
                    face: self.face,
                };
                CentralComposite::new(n, options)?.build()
            }
            DesignKind::Sukharev => {
                Sukharev::new(n, self.samples.unwrap_or(SUKHAREV_PER_AXIS))?.build()
            }
            DesignKind::LatinHypercube | DesignKind::SpaceFillingLatinHypercube => {
                let mut design = LatinHypercube::new(n, self.samples.unwrap_or(n))?;
                if self.kind == DesignKind::SpaceFillingLatinHypercube {
                    design = design.maximin(DEFAULT_MAXIMIN_ITERATIONS);
                }
                if let Some(seed) = self.seed {
                    design = design.with_seed(seed);
                }
                design.build()
            }
            DesignKind::Halton => Halton::new(n, self.samples.unwrap_or(n))?.build(),
            DesignKind::UniformRandom => {
                let mut design = UniformRandom::new(n, self.samples.unwrap_or(n))?;
                if let Some(seed) = self.seed {
                    design = design.with_seed(seed);
                }
                design.build()
            }
        }
    }

    /// Build the design and decode it onto the levels of `spec`.
    ///
    /// Full factorial runs use the supplied levels as given. Box-Behnken
    /// runs use each factor's three-level table, so a supplied middle level
    /// is kept even when it is not the midpoint. Every other design is
    /// rescaled linearly between the extreme levels.
    ///
    /// # Errors
    ///
    /// See [`DesignBuilder::build_coded`].
    pub fn build(&self, spec: &FactorSpec) -> Result<DesignMatrix> {
        let coded = self.build_coded(spec)?;
        match self.kind {
            DesignKind::FullFactorial => {
                let tables: Vec<Vec<f64>> = (0..spec.len()).map(|i| spec.level_table(i)).collect();
                decode_indexed(&coded, spec, &tables)
            }
            DesignKind::BoxBehnken => {
                let tables: Vec<Vec<f64>> =
                    (0..spec.len()).map(|i| spec.three_level_table(i)).collect();
                let indices = CodedMatrix::new(coded.data().mapv(|c| c + 1.0));
                decode_indexed(&indices, spec, &tables)
            }
            _ => decode(&coded, spec),
        }
    }
}

/// Full factorial over every supplied level.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the run count overflows.
///
/// # Example
///
/// ```
/// use doegen::{full_fact, FactorSpec};
///
/// let spec = FactorSpec::new(vec![
///     ("Pressure", vec![50.0, 60.0, 70.0]),
///     ("Flow rate", vec![0.09, 0.1]),
/// ])
/// .unwrap();
///
/// let design = full_fact(&spec).unwrap();
/// assert_eq!(design.runs(), 6);
/// assert_eq!(design.to_rows()[4], vec![60.0, 0.1]);
/// ```
pub fn full_fact(spec: &FactorSpec) -> Result<DesignMatrix> {
    DesignBuilder::new(DesignKind::FullFactorial).build(spec)
}

/// Smallest two-level fraction at `resolution`, or at the default
/// resolution when `None`.
///
/// # Errors
///
/// Returns [`Error::DesignNotPossible`] if the resolution exceeds the
/// factor count minus one, or [`Error::InvalidParameter`] below 3.
pub fn frac_fact_res(spec: &FactorSpec, resolution: Option<usize>) -> Result<DesignMatrix> {
    let builder = DesignBuilder::new(DesignKind::FractionalByResolution);
    match resolution {
        Some(res) => builder.resolution(res).build(spec),
        None => builder.build(spec),
    }
}

/// Plackett-Burman screening design between the extreme levels.
///
/// # Errors
///
/// Returns [`Error::DesignNotPossible`] if no Hadamard matrix of the
/// required order can be built.
pub fn plackett_burman(spec: &FactorSpec) -> Result<DesignMatrix> {
    DesignBuilder::new(DesignKind::PlackettBurman).build(spec)
}

/// Box-Behnken design with a single center run.
///
/// # Errors
///
/// Returns [`Error::InvalidFactorCount`] for fewer than three factors.
pub fn box_behnken(spec: &FactorSpec) -> Result<DesignMatrix> {
    DesignBuilder::new(DesignKind::BoxBehnken).build(spec)
}

/// Orthogonal, circumscribed central composite with `(2, 2)` center runs.
///
/// # Errors
///
/// Returns [`Error::InvalidFactorCount`] for fewer than two factors.
pub fn central_composite(spec: &FactorSpec) -> Result<DesignMatrix> {
    DesignBuilder::new(DesignKind::CentralComposite).build(spec)
}

fn sampled(kind: DesignKind, spec: &FactorSpec, samples: Option<usize>) -> Result<DesignMatrix> {
    let builder = DesignBuilder::new(kind);
    match samples {
        Some(samples) => builder.samples(samples).build(spec),
        None => builder.build(spec),
    }
}

/// Sukharev grid with `per_axis` points along each factor (two when `None`).
///
/// Every run lies strictly inside the factor ranges.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for zero points per axis or a grid
/// too large to enumerate.
///
/// # Example
///
/// ```
/// use doegen::{sukharev, FactorSpec};
///
/// let spec = FactorSpec::new(vec![("x", vec![0.0, 8.0]), ("y", vec![0.0, 1.0])]).unwrap();
/// let design = sukharev(&spec, Some(2)).unwrap();
///
/// assert_eq!(design.runs(), 4);
/// assert_eq!(design.to_rows()[0], vec![2.0, 0.25]);
/// ```
pub fn sukharev(spec: &FactorSpec, per_axis: Option<usize>) -> Result<DesignMatrix> {
    sampled(DesignKind::Sukharev, spec, per_axis)
}

/// Latin hypercube with `samples` runs (one per factor when `None`).
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for zero samples.
pub fn lhs(spec: &FactorSpec, samples: Option<usize>) -> Result<DesignMatrix> {
    sampled(DesignKind::LatinHypercube, spec, samples)
}

/// Latin hypercube kept for the largest minimum distance between runs.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for zero samples.
pub fn space_filling_lhs(spec: &FactorSpec, samples: Option<usize>) -> Result<DesignMatrix> {
    sampled(DesignKind::SpaceFillingLatinHypercube, spec, samples)
}

/// Halton sequence with `samples` runs (one per factor when `None`).
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for zero samples.
pub fn halton(spec: &FactorSpec, samples: Option<usize>) -> Result<DesignMatrix> {
    sampled(DesignKind::Halton, spec, samples)
}

/// Uniform random sample with `samples` runs (one per factor when `None`).
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for zero samples.
pub fn uniform_random(spec: &FactorSpec, samples: Option<usize>) -> Result<DesignMatrix> {
    sampled(DesignKind::UniformRandom, spec, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn distinct(design: &DesignMatrix, name: &str) -> BTreeSet<u64> {
        design
            .column(name)
            .unwrap()
            .iter()
            .map(|v| (v + 0.0).to_bits())
            .collect()
    }

    fn bits(values: &[f64]) -> BTreeSet<u64> {
        values.iter().map(|v| v.to_bits()).collect()
    }

    #[test]
    fn test_full_fact_uses_supplied_levels() {
        let spec = FactorSpec::new(vec![
            ("Pressure", vec![50.0, 60.0, 70.0]),
            ("Temperature", vec![290.0, 320.0, 350.0]),
            ("Flow rate", vec![0.09, 0.1]),
        ])
        .unwrap();
        let design = full_fact(&spec).unwrap();
        assert_eq!(design.runs(), 18);
        assert_eq!(distinct(&design, "Pressure"), bits(&[50.0, 60.0, 70.0]));
        assert_eq!(distinct(&design, "Flow rate"), bits(&[0.09, 0.1]));
    }

    #[test]
    fn test_frac_fact_res() {
        let spec = FactorSpec::new(vec![
            ("A", vec![1.0, 5.0]),
            ("B", vec![0.3, 0.7]),
            ("C", vec![10.0, 15.0]),
            ("D", vec![3.0, 7.0]),
            ("E", vec![-2.0, -1.0]),
        ])
        .unwrap();
        let design = frac_fact_res(&spec, Some(3)).unwrap();
        assert_eq!(design.runs(), 8);
        assert_eq!(distinct(&design, "B"), bits(&[0.3, 0.7]));
        assert_eq!(distinct(&design, "E"), bits(&[-2.0, -1.0]));

        assert!(matches!(
            frac_fact_res(&spec, Some(5)),
            Err(Error::DesignNotPossible { .. })
        ));
        // default resolution is 3 for five factors
        assert_eq!(frac_fact_res(&spec, None).unwrap(), design);
    }

    #[test]
    fn test_plackett_burman() {
        let spec = FactorSpec::new(vec![
            ("Pressure", vec![50.0, 70.0]),
            ("Temperature", vec![290.0, 350.0]),
            ("Flow rate", vec![0.9, 1.0]),
        ])
        .unwrap();
        let design = plackett_burman(&spec).unwrap();
        assert_eq!(design.runs(), 4);
        assert_eq!(distinct(&design, "Temperature"), bits(&[290.0, 350.0]));
    }

    #[test]
    fn test_box_behnken_levels() {
        let spec = FactorSpec::new(vec![
            ("Pressure", vec![50.0, 60.0, 70.0]),
            ("Temperature", vec![290.0, 320.0, 350.0]),
            ("Flow rate", vec![0.9, 1.0, 1.1]),
        ])
        .unwrap();
        let design = box_behnken(&spec).unwrap();
        assert_eq!(design.runs(), 13);
        assert_eq!(distinct(&design, "Flow rate"), bits(&[0.9, 1.0, 1.1]));

        let more = DesignBuilder::new(DesignKind::BoxBehnken)
            .center(&[4])
            .build(&spec)
            .unwrap();
        assert_eq!(more.runs(), 16);
    }

    #[test]
    fn test_box_behnken_adds_mid_level() {
        let spec = FactorSpec::new(vec![
            ("Pressure", vec![50.0, 70.0]),
            ("Temperature", vec![290.0, 350.0]),
            ("Flow rate", vec![0.5, 1.5]),
        ])
        .unwrap();
        let design = box_behnken(&spec).unwrap();
        assert_eq!(distinct(&design, "Pressure"), bits(&[50.0, 60.0, 70.0]));
        assert_eq!(distinct(&design, "Flow rate"), bits(&[0.5, 1.0, 1.5]));
    }

    #[test]
    fn test_box_behnken_keeps_uneven_middle() {
        let spec = FactorSpec::new(vec![
            ("a", vec![0.0, 1.0, 10.0]),
            ("b", vec![0.0, 1.0]),
            ("c", vec![0.0, 1.0]),
        ])
        .unwrap();
        let design = box_behnken(&spec).unwrap();
        assert_eq!(distinct(&design, "a"), bits(&[0.0, 1.0, 10.0]));
    }

    #[test]
    fn test_central_composite_defaults() {
        let spec = FactorSpec::new(vec![
            ("Pressure", vec![50.0, 70.0]),
            ("Temperature", vec![-10.0, 10.0]),
        ])
        .unwrap();
        let design = central_composite(&spec).unwrap();
        assert_eq!(design.runs(), 12);

        let r2 = std::f64::consts::SQRT_2;
        let pressure = design.column("Pressure").unwrap();
        assert!(pressure.iter().any(|&v| (v - (60.0 + 10.0 * r2)).abs() < 1e-9));
        assert!(pressure.iter().any(|&v| (v - (60.0 - 10.0 * r2)).abs() < 1e-9));
        assert_eq!(design.column("Temperature").unwrap()[4], 0.0);
    }

    #[test]
    fn test_builder_generator() {
        let spec = FactorSpec::new(vec![
            ("a", vec![0.0, 1.0]),
            ("b", vec![0.0, 1.0]),
            ("c", vec![0.0, 1.0]),
        ])
        .unwrap();
        let design = DesignBuilder::new(DesignKind::Fractional)
            .generator("a b ab")
            .build(&spec)
            .unwrap();
        assert_eq!(design.to_rows()[0], vec![0.0, 0.0, 1.0]);

        let missing = DesignBuilder::new(DesignKind::Fractional).build(&spec);
        assert!(matches!(missing, Err(Error::InvalidParameter { .. })));

        let wide = DesignBuilder::new(DesignKind::Fractional)
            .generator("a b c abc")
            .build(&spec);
        assert_eq!(
            wide.unwrap_err(),
            Error::ShapeMismatch {
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_builder_rejects_bad_center() {
        let spec = FactorSpec::new(vec![
            ("a", vec![0.0, 1.0]),
            ("b", vec![0.0, 1.0]),
            ("c", vec![0.0, 1.0]),
        ])
        .unwrap();
        let ccd = DesignBuilder::new(DesignKind::CentralComposite).center(&[3]);
        assert!(matches!(ccd.build(&spec), Err(Error::InvalidParameter { .. })));
        let bb = DesignBuilder::new(DesignKind::BoxBehnken).center(&[1, 1]);
        assert!(matches!(bb.build(&spec), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn test_too_few_factors() {
        let spec = FactorSpec::new(vec![("a", vec![0.0, 1.0])]).unwrap();
        assert!(matches!(
            central_composite(&spec),
            Err(Error::InvalidFactorCount { min: 2, .. })
        ));
        assert!(matches!(
            box_behnken(&spec),
            Err(Error::InvalidFactorCount { min: 3, .. })
        ));
    }

    fn three_ranges() -> FactorSpec {
        FactorSpec::new(vec![
            ("Pressure", vec![50.0, 70.0]),
            ("Temperature", vec![290.0, 350.0]),
            ("Flow rate", vec![0.9, 1.0]),
        ])
        .unwrap()
    }

    fn inside(design: &DesignMatrix, spec: &FactorSpec, strict: bool) -> bool {
        spec.names().enumerate().all(|(i, name)| {
            let (lo, hi) = spec.bounds(i);
            let eps = if strict { 0.0 } else { 1e-12 * (hi - lo) };
            design
                .column(name)
                .unwrap()
                .iter()
                .all(|&v| if strict { lo < v && v < hi } else { lo - eps <= v && v <= hi + eps })
        })
    }

    #[test]
    fn test_sukharev_stays_inside_ranges() {
        let spec = three_ranges();
        let design = sukharev(&spec, Some(2)).unwrap();
        assert_eq!(design.runs(), 8);
        assert!(inside(&design, &spec, true));
        assert_eq!(distinct(&design, "Pressure"), bits(&[55.0, 65.0]));

        assert_eq!(sukharev(&spec, Some(3)).unwrap().runs(), 27);
        assert_eq!(sukharev(&spec, None).unwrap().runs(), 8);
        assert!(matches!(
            sukharev(&spec, Some(0)),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_random_samples_within_ranges() {
        let spec = three_ranges();
        for design in [
            lhs(&spec, Some(20)).unwrap(),
            space_filling_lhs(&spec, Some(20)).unwrap(),
            uniform_random(&spec, Some(20)).unwrap(),
            halton(&spec, Some(20)).unwrap(),
        ] {
            assert_eq!(design.runs(), 20);
            assert!(inside(&design, &spec, false));
        }
        assert_eq!(lhs(&spec, None).unwrap().runs(), 3);
        assert!(lhs(&spec, Some(0)).is_err());
    }

    #[test]
    fn test_seeded_samples_repeat() {
        let spec = three_ranges();
        for kind in [DesignKind::LatinHypercube, DesignKind::UniformRandom] {
            let builder = DesignBuilder::new(kind).samples(12).seed(42);
            assert_eq!(builder.build(&spec).unwrap(), builder.build(&spec).unwrap());
        }
        assert!(DesignKind::Halton.is_sampling());
        assert!(!DesignKind::BoxBehnken.is_sampling());
    }

    #[test]
    fn test_design_kind_parse() {
        assert_eq!("box-behnken".parse::<DesignKind>().unwrap(), DesignKind::BoxBehnken);
        assert_eq!("CCD".parse::<DesignKind>().unwrap(), DesignKind::CentralComposite);
        assert_eq!(
            DesignKind::FractionalByResolution.to_string().parse::<DesignKind>().unwrap(),
            DesignKind::FractionalByResolution
        );
        assert_eq!("LHS".parse::<DesignKind>().unwrap(), DesignKind::LatinHypercube);
        assert_eq!(
            "space-filling lhs".parse::<DesignKind>().unwrap(),
            DesignKind::SpaceFillingLatinHypercube
        );
        assert!("maximin".parse::<DesignKind>().is_err());
        assert_eq!(DesignBuilder::default_resolution(8), 4);
        assert_eq!(DesignBuilder::default_resolution(4), 3);
    }
}
