//! CSV input and output.
//!
//! Factor specifications are read column-wise: the header row names the
//! factors and each column lists that factor's levels. Columns may have
//! different lengths; blank cells are skipped.
//!
//! ```text
//! Pressure,Temperature,Flow rate
//! 50,290,0.9
//! 70,350,1.0
//! 60,,
//! ```
//!
//! Designs are written as a header of factor names followed by one row per
//! run, rounded to [`WriteOptions::precision`] decimals.

use std::ffi::OsString;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use crate::decode::DesignMatrix;
use crate::error::{Error, Result};
use crate::factors::{Factor, FactorSpec};

/// Options for [`write_design`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Decimal places kept in every value.
    pub precision: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

fn wrap_csv(label: &str, err: csv::Error) -> Error {
    Error::io(label, err)
}

/// Read a factor specification from CSV data.
///
/// `label` names the source in error messages.
///
/// # Errors
///
/// Returns [`Error::Io`] on malformed CSV or a cell that is not a number,
/// and [`Error::InvalidFactorSpec`] if the columns do not form a valid
/// specification.
///
/// # Example
///
/// ```
/// use doegen::io::read_factor_spec_from;
///
/// let data = "Pressure,Temperature\n50,290\n70,350\n60,\n";
/// let spec = read_factor_spec_from(data.as_bytes(), "inline").unwrap();
///
/// assert_eq!(spec.level_counts(), vec![3, 2]);
/// assert_eq!(spec.bounds(0), (50.0, 70.0));
/// ```
pub fn read_factor_spec_from<R: Read>(reader: R, label: &str) -> Result<FactorSpec> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()
        .map_err(|err| wrap_csv(label, err))?
        .iter()
        .map(str::to_owned)
        .collect();
    let mut levels: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|err| wrap_csv(label, err))?;
        for (column, cell) in record.iter().enumerate().take(names.len()) {
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| {
                Error::io(
                    label,
                    format!(
                        "row {}: '{cell}' in column '{}' is not a number",
                        line + 2,
                        names[column]
                    ),
                )
            })?;
            levels[column].push(value);
        }
    }

    debug!(source = label, factors = names.len(), "read factor specification");
    FactorSpec::from_factors(
        names
            .into_iter()
            .zip(levels)
            .map(|(name, levels)| Factor::new(name, levels))
            .collect(),
    )
}

/// Read a factor specification from a CSV file.
///
/// # Errors
///
/// See [`read_factor_spec_from`]; a missing or unreadable file is
/// [`Error::Io`].
pub fn read_factor_spec(path: impl AsRef<Path>) -> Result<FactorSpec> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let file = File::open(path).map_err(|err| Error::io(&label, err))?;
    read_factor_spec_from(file, &label)
}

/// Write a design as CSV to any writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
///
/// # Example
///
/// ```
/// use doegen::io::{write_design_to, WriteOptions};
/// use doegen::DesignMatrix;
/// use ndarray::array;
///
/// let design = DesignMatrix::new(
///     vec!["x".into(), "y".into()],
///     array![[0.123, 10.0], [1.0 / 3.0, -2.5]],
/// )
/// .unwrap();
///
/// let mut out = Vec::new();
/// write_design_to(&design, &mut out, WriteOptions::default()).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "x,y\n0.12,10\n0.33,-2.5\n");
/// ```
pub fn write_design_to<W: Write>(
    design: &DesignMatrix,
    writer: W,
    options: WriteOptions,
) -> Result<()> {
    let label = "design output";
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer
        .write_record(design.names())
        .map_err(|err| wrap_csv(label, err))?;

    let rounded = design.rounded(options.precision);
    for row in rounded.rows() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|err| wrap_csv(label, err))?;
    }
    writer.flush().map_err(|err| Error::io(label, err))
}

/// `path` with `.csv` appended unless it already ends in `.csv`.
///
/// # Example
///
/// ```
/// use doegen::io::csv_path;
/// use std::path::Path;
///
/// assert_eq!(csv_path("plan"), Path::new("plan.csv"));
/// assert_eq!(csv_path("out/plan.CSV"), Path::new("out/plan.CSV"));
/// assert_eq!(csv_path("plan.v2"), Path::new("plan.v2.csv"));
/// ```
#[must_use]
pub fn csv_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let has_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if has_csv {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".csv");
    PathBuf::from(name)
}

/// Write a design to a CSV file and return the path actually written.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_design(
    design: &DesignMatrix,
    path: impl AsRef<Path>,
    options: WriteOptions,
) -> Result<PathBuf> {
    let path = csv_path(path);
    let label = path.display().to_string();
    let file = File::create(&path).map_err(|err| Error::io(&label, err))?;
    write_design_to(design, file, options)?;
    debug!(
        path = %label,
        runs = design.runs(),
        factors = design.factors(),
        precision = options.precision,
        "wrote design"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::box_behnken;

    #[test]
    fn test_read_ragged_columns() {
        let data = "Pressure, Temperature ,Flow rate\n50,290,0.9\n70,350,1.0\n60,320,\n";
        let spec = read_factor_spec_from(data.as_bytes(), "test").unwrap();
        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, vec!["Pressure", "Temperature", "Flow rate"]);
        assert_eq!(spec.level_table(0), vec![50.0, 70.0, 60.0]);
        assert_eq!(spec.level_table(2), vec![0.9, 1.0]);
    }

    #[test]
    fn test_read_rejects_text_cells() {
        let data = "a,b\n1,2\nhigh,3\n";
        let err = read_factor_spec_from(data.as_bytes(), "test").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("high"));
    }

    #[test]
    fn test_read_validates_spec() {
        let data = "a,b\n1,2\n";
        assert!(matches!(
            read_factor_spec_from(data.as_bytes(), "test"),
            Err(Error::InvalidFactorSpec { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_factor_spec("/nonexistent/doegen/levels.csv").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_write_box_behnken() {
        let data = "x,y,z\n0,0,0\n1,1,1\n";
        let spec = read_factor_spec_from(data.as_bytes(), "test").unwrap();
        let design = box_behnken(&spec).unwrap();

        let mut out = Vec::new();
        write_design_to(&design, &mut out, WriteOptions { precision: 1 }).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "x,y,z");
        assert_eq!(lines[1], "0,0,0.5");
        assert_eq!(lines[13], "0.5,0.5,0.5");
    }

    #[test]
    fn test_csv_path() {
        assert_eq!(csv_path("design"), PathBuf::from("design.csv"));
        assert_eq!(csv_path("design.csv"), PathBuf::from("design.csv"));
    }

    #[test]
    fn test_write_design_file() {
        let spec = read_factor_spec_from("x,y,z\n0,0,0\n1,1,1\n".as_bytes(), "test").unwrap();
        let design = box_behnken(&spec).unwrap();
        let stem = std::env::temp_dir().join(format!("doegen-write-{}", std::process::id()));

        let written = write_design(&design, &stem, WriteOptions::default()).unwrap();
        assert_eq!(written.extension().unwrap(), "csv");
        let back = std::fs::read_to_string(&written).unwrap();
        assert!(back.starts_with("x,y,z\n"));
        std::fs::remove_file(written).unwrap();
    }
}
