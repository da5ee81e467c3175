//! # doegen
//!
//! Design-of-experiments matrix generation.
//!
//! ## Overview
//!
//! A design is a table whose rows are experimental runs and whose columns
//! are factors. This library builds designs in two steps:
//!
//! 1. a construction engine produces a [`CodedMatrix`] whose values live in
//!    a small coded alphabet (−1/0/+1, ±α, or level indices 0..k−1)
//! 2. a decoder maps the coded values onto the levels of a [`FactorSpec`],
//!    giving a [`DesignMatrix`] in physical units
//!
//! Available designs:
//!
//! - General and two-level full factorials
//! - Two-level fractional factorials from generator strings such as
//!   `"a b -ab c"`, or the smallest fraction reaching a target resolution
//! - Plackett-Burman screening designs
//! - Box-Behnken and central composite response-surface designs
//! - Sukharev grids, Halton sequences, Latin hypercubes and uniform random
//!   samples that spread runs through the interior of the ranges
//!
//! ## Quick Start
//!
//! ```rust
//! use doegen::{box_behnken, FactorSpec};
//!
//! let spec = FactorSpec::new(vec![
//!     ("Pressure", vec![50.0, 60.0, 70.0]),
//!     ("Temperature", vec![290.0, 320.0, 350.0]),
//!     ("Flow rate", vec![0.9, 1.0, 1.1]),
//! ])
//! .unwrap();
//!
//! let design = box_behnken(&spec).unwrap();
//! assert_eq!(design.runs(), 13);
//! assert_eq!(design.to_rows()[0], vec![50.0, 290.0, 1.0]);
//! ```
//!
//! Or use an engine directly and decode afterwards:
//!
//! ```rust
//! use doegen::construct::{Design, FractionalByResolution};
//! use doegen::{decode, FactorSpec};
//!
//! let design = FractionalByResolution::new(5, 3);
//! assert_eq!(design.generator().unwrap().to_string(), "a b c ab ac");
//!
//! let coded = design.build().unwrap();
//! assert_eq!(coded.runs(), 8);
//! assert_eq!(coded.resolution(), Some(3));
//!
//! let spec = FactorSpec::new((1..=5).map(|i| (format!("x{i}"), vec![0.0, 10.0]))).unwrap();
//! let physical = decode(&coded, &spec).unwrap();
//! assert_eq!(physical.to_rows()[0], vec![0.0, 0.0, 0.0, 10.0, 10.0]);
//! ```
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of designs and options
//! - `csv`: Enable reading factor specifications from and writing designs to CSV

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod builder;
pub mod construct;
pub mod decode;
pub mod error;
pub mod factors;
#[cfg(feature = "csv")]
pub mod io;
pub mod matrix;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{
        box_behnken, central_composite, frac_fact_res, full_fact, halton, lhs, plackett_burman,
        space_filling_lhs, sukharev, uniform_random, DesignBuilder, DesignKind,
    };
    pub use crate::construct::{
        Alpha, BoxBehnken, CentralComposite, CompositeOptions, Design, Face,
        FractionalByResolution, FractionalFactorial, FullFactorial, Generator, Halton,
        LatinHypercube, PlackettBurman, Sukharev, TwoLevelFactorial, UniformRandom,
    };
    pub use crate::decode::{decode, decode_indexed, encode, DesignMatrix};
    pub use crate::error::{Error, Result};
    pub use crate::factors::{Factor, FactorSpec};
    pub use crate::matrix::{compute_strength, verify_strength, CodedMatrix};

    #[cfg(feature = "csv")]
    pub use crate::io::{read_factor_spec, write_design, WriteOptions};
}

// Re-export commonly used items at crate root
pub use builder::{
    box_behnken, central_composite, frac_fact_res, full_fact, halton, lhs, plackett_burman,
    space_filling_lhs, sukharev, uniform_random, DesignBuilder, DesignKind,
};
pub use decode::{decode, decode_indexed, encode, DesignMatrix};
pub use error::{Error, Result};
pub use factors::{Factor, FactorSpec};
pub use matrix::{compute_strength, verify_strength, CodedMatrix};
