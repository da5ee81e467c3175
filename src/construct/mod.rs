//! Design-matrix construction engines.
//!
//! Each engine builds a coded matrix for one design family. Coded values
//! are independent of physical units; [`crate::decode`] maps them onto a
//! factor specification afterwards.
//!
//! ## Available Designs
//!
//! | Design | Runs | Requirements |
//! |--------|------|--------------|
//! | [`FullFactorial`] | ∏ lᵢ | every level count ≥ 1 |
//! | [`TwoLevelFactorial`] | 2ⁿ | none |
//! | [`FractionalFactorial`] | 2ᵇ for b main factors | b ≤ 26 |
//! | [`FractionalByResolution`] | 2ᵇ, b minimal | 3 ≤ res ≤ n − 1 |
//! | [`PlackettBurman`] | 4(⌊n/4⌋ + 1) | Hadamard order available |
//! | [`BoxBehnken`] | 4·C(n, 2) + centers | n ≥ 3 |
//! | [`CentralComposite`] | 2ⁿ + 2n + centers | n ≥ 2 |
//! | [`Sukharev`] | mⁿ for m points per axis | m ≥ 1 |
//! | [`Halton`], [`LatinHypercube`], [`UniformRandom`] | samples | samples ≥ 1 |
//!
//! ## Usage
//!
//! All engines implement the [`Design`] trait:
//!
//! ```
//! use doegen::construct::{BoxBehnken, Design};
//!
//! let bb = BoxBehnken::new(3).unwrap().with_center(1);
//! assert_eq!(bb.runs(), 13);
//!
//! let coded = bb.build().unwrap();
//! assert_eq!(coded.runs(), 13);
//! assert_eq!(coded.factors(), 3);
//! ```

mod box_behnken;
mod central_composite;
mod factorial;
mod fractional;
mod plackett_burman;
mod resolution;
mod sampling;

pub use box_behnken::{default_center_points, BoxBehnken, DEFAULT_CENTER_POINTS};
pub use central_composite::{
    center_pair, star_block, star_distance, Alpha, CentralComposite, CompositeOptions, Face,
};
pub use factorial::{full_factorial, two_level_factorial, FullFactorial, TwoLevelFactorial};
pub use fractional::{FractionalFactorial, Generator, Word, MAX_BASE_FACTORS};
pub use plackett_burman::{hadamard, PlackettBurman};
pub use resolution::{
    factors_at_resolution, minimal_base_factors, minimal_generator, FractionalByResolution,
};
pub use sampling::{
    Halton, LatinHypercube, Sukharev, UniformRandom, DEFAULT_MAXIMIN_ITERATIONS,
};

use crate::error::Result;
use crate::matrix::CodedMatrix;

/// Trait for design-matrix construction algorithms.
///
/// All engines implement this trait, so a caller can size a design before
/// paying for its construction. Engines are plain parameter values and can
/// be shared across threads.
pub trait Design: Send + Sync {
    /// Get the name of this design family.
    fn name(&self) -> &'static str;

    /// Number of factor columns the design produces.
    fn factors(&self) -> usize;

    /// Number of runs the design produces.
    ///
    /// Saturates at `usize::MAX` for designs too large to build.
    fn runs(&self) -> usize;

    /// Construct the coded design matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the design cannot be constructed with the
    /// engine's parameters.
    fn build(&self) -> Result<CodedMatrix>;
}
