//! Block primitives for composite designs.
//!
//! Composite designs are vertical unions of structural blocks (factorial
//! cube, star points, center repeats). Blocks are never joined column-wise,
//! so every block of one design shares the same factor count.

use ndarray::{concatenate, Array2, Axis};

use super::CodedMatrix;
use crate::error::{Error, Result};

/// All-zero block of `repeats` center runs over `factors` columns.
///
/// # Example
///
/// ```
/// use doegen::matrix::center_block;
///
/// let c = center_block(3, 2);
/// assert_eq!(c.runs(), 2);
/// assert!(c.data().iter().all(|&v| v == 0.0));
/// ```
#[must_use]
pub fn center_block(factors: usize, repeats: usize) -> CodedMatrix {
    CodedMatrix::new(Array2::zeros((repeats, factors)))
}

/// Stack `bottom` below `top`, keeping row order.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the column counts differ.
pub fn union(top: &CodedMatrix, bottom: &CodedMatrix) -> Result<CodedMatrix> {
    if top.factors() != bottom.factors() {
        return Err(Error::ShapeMismatch {
            expected: top.factors(),
            actual: bottom.factors(),
        });
    }
    let data = concatenate(Axis(0), &[top.data().view(), bottom.data().view()])
        .map_err(|e| Error::invalid_parameter(e.to_string()))?;
    Ok(CodedMatrix::new(data))
}

/// Multiply every coded value by `factor`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `factor` is not finite.
pub fn scale(block: &CodedMatrix, factor: f64) -> Result<CodedMatrix> {
    if !factor.is_finite() {
        return Err(Error::invalid_parameter(format!(
            "scale factor must be finite, got {factor}"
        )));
    }
    Ok(CodedMatrix::new(block.data() * factor))
}
