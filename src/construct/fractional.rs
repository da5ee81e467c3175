//! Two-level fractional factorial designs from generators.
//!
//! A generator lists the design columns as words over a set of base (main)
//! factors. A one-letter word is a main factor; a longer word is a derived
//! factor whose column is the elementwise product of its main-factor
//! columns, negated when the word carries a `-` sign.
//!
//! Internally a word is a list of base-factor indices. Letters only appear
//! at the string boundary: `"a b -ab c"` parses to base factors `a, b, c`
//! (indices 0, 1, 2 in order of first appearance) and the words
//! `[0]`, `[1]`, `-[0, 1]`, `[2]`.
//!
//! ## Example
//!
//! ```
//! use doegen::construct::{Design, FractionalFactorial};
//!
//! let design = FractionalFactorial::parse("a b ab").unwrap();
//! let m = design.build().unwrap();
//!
//! assert_eq!(
//!     m.to_rows(),
//!     vec![
//!         vec![-1.0, -1.0, 1.0],
//!         vec![1.0, -1.0, -1.0],
//!         vec![-1.0, 1.0, -1.0],
//!         vec![1.0, 1.0, 1.0],
//!     ]
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{two_level_factorial, Design};
use crate::error::{Error, Result};
use crate::matrix::CodedMatrix;

/// Number of letters available for base factors in generator strings.
pub const MAX_BASE_FACTORS: usize = 26;

/// One design column: a signed product of base factors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Word {
    negated: bool,
    factors: Vec<usize>,
}

impl Word {
    /// The column of base factor `index` itself.
    #[must_use]
    pub fn main(index: usize) -> Self {
        Self {
            negated: false,
            factors: vec![index],
        }
    }

    /// The product of the given base factors.
    #[must_use]
    pub fn product(factors: Vec<usize>) -> Self {
        Self {
            negated: false,
            factors,
        }
    }

    /// The same word with its sign flipped.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Whether the column is sign-negated.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Base-factor indices multiplied together.
    #[must_use]
    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    /// Whether this word is a single base factor.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.factors.len() == 1
    }
}

/// An ordered list of words over `base` main factors.
///
/// Deserialization goes through [`Generator::new`], so a decoded generator
/// never names a base factor it does not have.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GeneratorRepr")
)]
pub struct Generator {
    base: usize,
    words: Vec<Word>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GeneratorRepr {
    base: usize,
    words: Vec<Word>,
}

#[cfg(feature = "serde")]
impl TryFrom<GeneratorRepr> for Generator {
    type Error = Error;

    fn try_from(repr: GeneratorRepr) -> Result<Self> {
        Self::new(repr.base, repr.words)
    }
}

impl Generator {
    /// Create a generator over `base` main factors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyFactors`] if `base` exceeds
    /// [`MAX_BASE_FACTORS`], or [`Error::InvalidGenerator`] if a word is
    /// empty or names a factor index `>= base`.
    pub fn new(base: usize, words: Vec<Word>) -> Result<Self> {
        if base > MAX_BASE_FACTORS {
            return Err(Error::TooManyFactors {
                required: base,
                max: MAX_BASE_FACTORS,
            });
        }
        for (i, word) in words.iter().enumerate() {
            if word.factors.is_empty() {
                return Err(Error::invalid_generator(
                    format!("word {i}"),
                    "words must name at least one base factor",
                ));
            }
            if let Some(&bad) = word.factors.iter().find(|&&f| f >= base) {
                return Err(Error::invalid_generator(
                    format!("word {i}"),
                    format!("base factor {bad} out of range for {base} base factors"),
                ));
            }
        }
        Ok(Self { base, words })
    }

    /// Number of base (main) factors; the design has 2^base runs.
    #[must_use]
    pub fn base_factors(&self) -> usize {
        self.base
    }

    /// The words, in output column order.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of design columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the generator has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromStr for Generator {
    type Err = Error;

    /// Parse a whitespace-separated generator such as `"a b -ab c +abc"`.
    ///
    /// Letters are case-insensitive. Base factors are the distinct
    /// one-letter words in order of first appearance; every letter of a
    /// longer word must be one of them.
    fn from_str(text: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        for token in text.split_whitespace() {
            let (negated, letters) = match token.as_bytes()[0] {
                b'-' => (true, &token[1..]),
                b'+' => (false, &token[1..]),
                _ => (false, token),
            };
            if letters.is_empty() {
                return Err(Error::invalid_generator(text, "sign without factor letters"));
            }
            if let Some(bad) = letters.chars().find(|c| !c.is_ascii_alphabetic()) {
                return Err(Error::invalid_generator(
                    text,
                    format!("unexpected character '{bad}' in '{token}'"),
                ));
            }
            tokens.push((negated, letters.to_ascii_lowercase()));
        }
        if tokens.is_empty() {
            return Err(Error::invalid_generator(text, "no factors given"));
        }

        let mut mains: Vec<char> = Vec::new();
        for (_, letters) in &tokens {
            let mut chars = letters.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if !mains.contains(&c) {
                    mains.push(c);
                }
            }
        }

        let words = tokens
            .iter()
            .map(|(negated, letters)| {
                let factors = letters
                    .chars()
                    .map(|c| {
                        mains.iter().position(|&m| m == c).ok_or_else(|| {
                            Error::invalid_generator(text, format!("unknown main factor '{c}'"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Word {
                    negated: *negated,
                    factors,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(mains.len(), words)
    }
}

impl fmt::Display for Generator {
    /// Render with letters `a..z` standing for base factors `0..26`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if word.negated {
                f.write_str("-")?;
            }
            for &factor in &word.factors {
                // base <= 26 is enforced on construction
                write!(f, "{}", char::from(b'a' + factor as u8))?;
            }
        }
        Ok(())
    }
}

/// Two-level fractional factorial built from a [`Generator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractionalFactorial {
    generator: Generator,
}

impl FractionalFactorial {
    /// Create the design for a generator.
    #[must_use]
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    /// Parse a generator string and create its design.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGenerator`] if the string does not parse.
    pub fn parse(generator: &str) -> Result<Self> {
        Ok(Self::new(generator.parse()?))
    }

    /// The generator behind this design.
    #[must_use]
    pub fn generator(&self) -> &Generator {
        &self.generator
    }
}

impl Design for FractionalFactorial {
    fn name(&self) -> &'static str {
        "FractionalFactorial"
    }

    fn factors(&self) -> usize {
        self.generator.len()
    }

    fn runs(&self) -> usize {
        1usize << self.generator.base
    }

    fn build(&self) -> Result<CodedMatrix> {
        let base = two_level_factorial(self.generator.base)?;
        let base = base.data();
        let words = &self.generator.words;

        let data = Array2::from_shape_fn((base.nrows(), words.len()), |(row, col)| {
            let word = &words[col];
            let product: f64 = word.factors.iter().map(|&f| base[[row, f]]).product();
            if word.negated {
                -product
            } else {
                product
            }
        });
        Ok(CodedMatrix::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signs_and_case() {
        let g: Generator = "A b -AB +c".parse().unwrap();
        assert_eq!(g.base_factors(), 3);
        assert_eq!(g.len(), 4);
        assert!(g.words()[2].is_negated());
        assert_eq!(g.words()[2].factors(), &[0, 1]);
        assert_eq!(g.words()[3], Word::main(2));
        assert_eq!(g.to_string(), "a b -ab c");
    }

    #[test]
    fn test_main_order_is_first_appearance() {
        let g: Generator = "b a ab".parse().unwrap();
        assert_eq!(g.words()[0], Word::main(0));
        assert_eq!(g.words()[2].factors(), &[1, 0]);
        assert_eq!(g.to_string(), "a b ba");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "a b ac".parse::<Generator>(),
            Err(Error::InvalidGenerator { .. })
        ));
        assert!("".parse::<Generator>().is_err());
        assert!("a - b".parse::<Generator>().is_err());
        assert!("a b a1".parse::<Generator>().is_err());
    }

    #[test]
    fn test_new_validates_indices() {
        assert!(Generator::new(2, vec![Word::main(0), Word::product(vec![0, 2])]).is_err());
        assert!(Generator::new(1, vec![Word::product(vec![])]).is_err());
        assert!(matches!(
            Generator::new(27, vec![Word::main(0)]),
            Err(Error::TooManyFactors {
                required: 27,
                max: 26
            })
        ));
    }

    #[test]
    fn test_signed_generator() {
        let m = FractionalFactorial::parse("a b -ab c +abc")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(m.runs(), 8);
        assert_eq!(m.row(0).to_vec(), vec![-1.0, -1.0, -1.0, -1.0, -1.0]);
        assert_eq!(m.row(1).to_vec(), vec![1.0, -1.0, 1.0, -1.0, 1.0]);
        assert_eq!(m.row(7).to_vec(), vec![1.0, 1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_column_order_follows_generator() {
        // derived word between main factors
        let m = FractionalFactorial::parse("a b ab c").unwrap().build().unwrap();
        assert_eq!(m.factors(), 4);
        assert_eq!(m.runs(), 8);
        assert_eq!(m.row(4).to_vec(), vec![-1.0, -1.0, 1.0, 1.0]);
        assert_eq!(m.resolution(), Some(3));
    }

    #[test]
    fn test_half_fraction_resolution() {
        let m = FractionalFactorial::parse("a b c d abcd")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(m.runs(), 16);
        assert_eq!(m.resolution(), Some(5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let g: Generator = "a b -ab".parse().unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(serde_json::from_str::<Generator>(&json).unwrap(), g);

        // word [5] over 2 base factors
        let bad = r#"{"base":2,"words":[{"negated":false,"factors":[0]},{"negated":false,"factors":[5]}]}"#;
        assert!(serde_json::from_str::<Generator>(bad).is_err());

        let empty_word = r#"{"base":1,"words":[{"negated":false,"factors":[]}]}"#;
        assert!(serde_json::from_str::<Generator>(empty_word).is_err());

        let too_wide = r#"{"base":30,"words":[{"negated":false,"factors":[29]}]}"#;
        assert!(serde_json::from_str::<Generator>(too_wide).is_err());
    }
}
