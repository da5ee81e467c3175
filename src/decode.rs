//! Mapping coded matrices onto physical factor values.
//!
//! Two decodings are available:
//!
//! - [`decode`]: the linear map `mid + c * half` per column, where `lo` and
//!   `hi` are the extreme levels of the factor, `mid = (lo + hi) / 2` and
//!   `half = (hi - lo) / 2`. Coded ±1 land on the extremes and 0 on the
//!   midpoint; star points beyond ±1 extrapolate past the supplied range.
//! - [`decode_indexed`]: coded values are level indices into a per-factor
//!   table, so supplied levels are reproduced exactly even when they are
//!   not evenly spaced.
//!
//! [`encode`] inverts [`decode`].

use std::fmt;

use ndarray::{Array2, ArrayView1, Zip};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factors::FactorSpec;
use crate::matrix::CodedMatrix;

/// A design in physical units: one named column per factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "DesignMatrixRepr")
)]
pub struct DesignMatrix {
    names: Vec<String>,
    data: Array2<f64>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DesignMatrixRepr {
    names: Vec<String>,
    data: Array2<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<DesignMatrixRepr> for DesignMatrix {
    type Error = Error;

    fn try_from(repr: DesignMatrixRepr) -> Result<Self> {
        Self::new(repr.names, repr.data)
    }
}

impl DesignMatrix {
    /// Pair column names with data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the name count differs from the
    /// column count, or [`Error::InvalidParameter`] if a value is NaN.
    pub fn new(names: Vec<String>, data: Array2<f64>) -> Result<Self> {
        if names.len() != data.ncols() {
            return Err(Error::ShapeMismatch {
                expected: data.ncols(),
                actual: names.len(),
            });
        }
        if let Some(((row, col), _)) = data.indexed_iter().find(|(_, v)| v.is_nan()) {
            return Err(Error::invalid_parameter(format!(
                "value at row {row}, column '{}' is NaN",
                names[col]
            )));
        }
        Ok(Self { names, data })
    }

    /// Column names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.data.nrows()
    }

    /// Number of factors (columns).
    #[must_use]
    pub fn factors(&self) -> usize {
        self.data.ncols()
    }

    /// The values, shape (runs, factors).
    #[must_use]
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Consume the matrix and return the underlying data.
    #[must_use]
    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// The column of factor `name`, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.data.column(idx))
    }

    /// Iterate over runs.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.data.rows().into_iter()
    }

    /// Runs as owned vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Copy with every value rounded to `precision` decimal places.
    ///
    /// # Example
    ///
    /// ```
    /// use doegen::{decode, FactorSpec};
    /// use doegen::construct::star_block;
    ///
    /// let spec = FactorSpec::new(vec![("x", vec![0.0, 1.0])]).unwrap();
    /// let coded = star_block(1, 2f64.sqrt()).unwrap();
    /// let design = decode(&coded, &spec).unwrap().rounded(2);
    ///
    /// assert_eq!(design.column("x").unwrap().to_vec(), vec![-0.21, 1.21]);
    /// ```
    #[must_use]
    pub fn rounded(&self, precision: u32) -> Self {
        let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
        let data = if scale.is_finite() {
            self.data.mapv(|v| {
                let r = (v * scale).round() / scale;
                // keep values too large to scale as they are
                if r.is_finite() {
                    r + 0.0
                } else {
                    v
                }
            })
        } else {
            self.data.clone()
        };
        Self {
            names: self.names.clone(),
            data,
        }
    }
}

impl fmt::Display for DesignMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.names.join("\t"))?;
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

fn check_columns(coded: &CodedMatrix, spec: &FactorSpec) -> Result<()> {
    if coded.factors() != spec.len() {
        return Err(Error::ShapeMismatch {
            expected: spec.len(),
            actual: coded.factors(),
        });
    }
    Ok(())
}

fn names(spec: &FactorSpec) -> Vec<String> {
    spec.names().map(str::to_owned).collect()
}

/// Rescale a coded matrix linearly onto the ranges of `spec`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the column count differs from the
/// number of factors in `spec`.
///
/// # Example
///
/// ```
/// use doegen::{decode, FactorSpec};
/// use doegen::construct::two_level_factorial;
///
/// let spec = FactorSpec::new(vec![
///     ("Pressure", vec![40.0, 55.0, 70.0]),
///     ("Temperature", vec![290.0, 350.0]),
/// ])
/// .unwrap();
///
/// let design = decode(&two_level_factorial(2).unwrap(), &spec).unwrap();
/// assert_eq!(design.to_rows()[0], vec![40.0, 290.0]);
/// assert_eq!(design.to_rows()[3], vec![70.0, 350.0]);
/// ```
pub fn decode(coded: &CodedMatrix, spec: &FactorSpec) -> Result<DesignMatrix> {
    check_columns(coded, spec)?;
    let mut data = coded.data().clone();
    for (i, mut column) in data.columns_mut().into_iter().enumerate() {
        let (lo, hi) = spec.bounds(i);
        // mid + c * half, written so that -1, 0 and +1 land exactly
        column.mapv_inplace(|c| {
            let t = (c + 1.0) / 2.0;
            (1.0 - t) * lo + t * hi
        });
    }
    DesignMatrix::new(names(spec), data)
}

/// Map a physical design back to coded units, the inverse of [`decode`].
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the column count differs from the
/// number of factors in `spec`.
pub fn encode(design: &DesignMatrix, spec: &FactorSpec) -> Result<CodedMatrix> {
    if design.factors() != spec.len() {
        return Err(Error::ShapeMismatch {
            expected: spec.len(),
            actual: design.factors(),
        });
    }
    let mut data = design.data().clone();
    for (i, mut column) in data.columns_mut().into_iter().enumerate() {
        let (lo, hi) = spec.bounds(i);
        // hi > lo for every validated factor
        column.mapv_inplace(|v| 2.0 * (v - lo) / (hi - lo) - 1.0);
    }
    CodedMatrix::try_new(data)
}

/// Replace level indices by entries of per-factor level tables.
///
/// Coded value `k` in column `i` becomes `tables[i][k]`.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if the column count differs from the number
///   of factors in `spec`, or `tables` has a different length
/// - [`Error::InvalidParameter`] if a coded value is not an index into its
///   table
///
/// # Example
///
/// ```
/// use doegen::{decode_indexed, FactorSpec};
/// use doegen::construct::full_factorial;
///
/// let spec = FactorSpec::new(vec![("Flow", vec![0.9, 1.0, 1.3])]).unwrap();
/// let tables = vec![spec.level_table(0)];
///
/// let design = decode_indexed(&full_factorial(&[3]).unwrap(), &spec, &tables).unwrap();
/// assert_eq!(design.column("Flow").unwrap().to_vec(), vec![0.9, 1.0, 1.3]);
/// ```
pub fn decode_indexed(
    coded: &CodedMatrix,
    spec: &FactorSpec,
    tables: &[Vec<f64>],
) -> Result<DesignMatrix> {
    check_columns(coded, spec)?;
    if tables.len() != spec.len() {
        return Err(Error::ShapeMismatch {
            expected: spec.len(),
            actual: tables.len(),
        });
    }

    let mut data = Array2::zeros((coded.runs(), coded.factors()));
    let mut failure = None;
    Zip::indexed(&mut data)
        .and(coded.data())
        .for_each(|(_, col), out, &c| {
            if failure.is_some() {
                return;
            }
            let table = &tables[col];
            let index = c.round();
            let valid = (c - index).abs() < 1e-9 && index >= 0.0 && (index as usize) < table.len();
            if valid {
                *out = table[index as usize];
            } else {
                failure = Some((col, c, table.len()));
            }
        });

    if let Some((col, c, len)) = failure {
        return Err(Error::invalid_parameter(format!(
            "coded value {c} in column {col} is not a level index below {len}"
        )));
    }
    DesignMatrix::new(names(spec), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{full_factorial, two_level_factorial};
    use crate::matrix::{center_block, union};

    fn spec() -> FactorSpec {
        FactorSpec::new(vec![
            ("Pressure", vec![40.0, 55.0, 70.0]),
            ("Temperature", vec![350.0, 290.0]),
            ("Flow", vec![0.2, 0.4, 0.9]),
        ])
        .unwrap()
    }

    #[test]
    fn test_decode_extremes_and_center() {
        let coded = union(&two_level_factorial(3).unwrap(), &center_block(3, 1)).unwrap();
        let design = decode(&coded, &spec()).unwrap();

        assert_eq!(design.to_rows()[0], vec![40.0, 290.0, 0.2]);
        assert_eq!(design.to_rows()[7], vec![70.0, 350.0, 0.9]);
        assert_eq!(design.to_rows()[8], vec![55.0, 320.0, 0.55]);
    }

    #[test]
    fn test_decode_extrapolates_star_points() {
        let coded = CodedMatrix::from_rows(&[vec![-2.0, 0.0, 0.0]], 3).unwrap();
        let design = decode(&coded, &spec()).unwrap();
        assert_eq!(design.to_rows()[0], vec![25.0, 320.0, 0.55]);
    }

    #[test]
    fn test_encode_inverts_decode() {
        let coded = CodedMatrix::from_rows(
            &[vec![-1.0, 0.5, 1.0], vec![1.5, -1.0, 0.0]],
            3,
        )
        .unwrap();
        let spec = spec();
        let back = encode(&decode(&coded, &spec).unwrap(), &spec).unwrap();
        for (a, b) in back.data().iter().zip(coded.data()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let coded = two_level_factorial(2).unwrap();
        assert_eq!(
            decode(&coded, &spec()).unwrap_err(),
            Error::ShapeMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_decode_indexed() {
        let spec = spec();
        let tables: Vec<Vec<f64>> = (0..3).map(|i| spec.level_table(i)).collect();
        let coded = full_factorial(&spec.level_counts()).unwrap();
        let design = decode_indexed(&coded, &spec, &tables).unwrap();

        assert_eq!(design.runs(), 18);
        assert_eq!(design.to_rows()[1], vec![55.0, 350.0, 0.2]);
        // supplied order is kept
        assert_eq!(design.to_rows()[3], vec![40.0, 290.0, 0.2]);
    }

    #[test]
    fn test_decode_indexed_rejects_bad_index() {
        let spec = spec();
        let tables: Vec<Vec<f64>> = (0..3).map(|i| spec.level_table(i)).collect();
        let coded = CodedMatrix::from_rows(&[vec![0.0, 2.0, 0.0]], 3).unwrap();
        assert!(matches!(
            decode_indexed(&coded, &spec, &tables),
            Err(Error::InvalidParameter { .. })
        ));
        let coded = CodedMatrix::from_rows(&[vec![0.5, 0.0, 0.0]], 3).unwrap();
        assert!(decode_indexed(&coded, &spec, &tables).is_err());
        assert!(decode_indexed(&coded, &spec, &tables[..2]).is_err());
    }

    #[test]
    fn test_rounded_and_columns() {
        let data = Array2::from_shape_vec((2, 2), vec![1.23456, -0.004, 2.5, 10.0]).unwrap();
        let design = DesignMatrix::new(vec!["a".into(), "b".into()], data).unwrap();
        let rounded = design.rounded(2);

        assert_eq!(rounded.to_rows(), vec![vec![1.23, 0.0], vec![2.5, 10.0]]);
        assert_eq!(rounded.column("b").unwrap().to_vec(), vec![0.0, 10.0]);
        assert!(rounded.column("c").is_none());
        assert_eq!(rounded.to_string(), "a\tb\n1.23\t0\n2.5\t10\n");
    }

    #[test]
    fn test_names_must_match_columns() {
        let data = Array2::zeros((1, 2));
        assert!(DesignMatrix::new(vec!["a".into()], data).is_err());

        let nan = Array2::from_elem((1, 1), f64::NAN);
        assert!(matches!(
            DesignMatrix::new(vec!["a".into()], nan),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let design = decode(&two_level_factorial(3).unwrap(), &spec()).unwrap();
        let json = serde_json::to_string(&design).unwrap();
        assert_eq!(serde_json::from_str::<DesignMatrix>(&json).unwrap(), design);

        let short = r#"{"names":["a"],"data":{"v":1,"dim":[1,2],"data":[0.0,1.0]}}"#;
        assert!(serde_json::from_str::<DesignMatrix>(short).is_err());
    }
}
