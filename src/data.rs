//! The three cars shown in the sketch, and where they come from.
//!
//! [`acquire`] never fails: whatever goes wrong while reading the table,
//! the caller gets [`Dataset::builtin`] instead.

use std::{ops::Index, path::Path};

use ndarray::Array2;
use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use tracing::debug;

use crate::error::DataError;

/// Column holding the car names.
pub const NAME_COLUMN: &str = "Name";

/// One car.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub horsepower: f64,
    pub city_mpg: f64,
    pub engine_size: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, horsepower: f64, city_mpg: f64,
               engine_size: f64) -> Self {
        Record { name: name.into(), horsepower, city_mpg, engine_size }
    }
}

/// A numeric attribute of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Horsepower,
    CityMpg,
    EngineSize,
}

impl Attribute {
    /// Header of the table column holding this attribute.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::Horsepower => "Horsepower(HP)",
            Attribute::CityMpg => "City Miles Per Gallon",
            Attribute::EngineSize => "Engine Size (l)",
        }
    }

    /// Text shown on the diagonal and along the axes.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Horsepower => "Horsepower\n(HP)",
            Attribute::CityMpg => "City MPG",
            Attribute::EngineSize => "Engine Size\n(liters)",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Attribute::Horsepower => record.horsepower,
            Attribute::CityMpg => record.city_mpg,
            Attribute::EngineSize => record.engine_size,
        }
    }
}

/// The ordered attributes spanning the matrix.  Index `i` is both row
/// `i` and column `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSet([Attribute; 3]);

impl AttributeSet {
    pub fn new(attributes: [Attribute; 3]) -> Self {
        AttributeSet(attributes)
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.0.iter().copied()
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        AttributeSet([Attribute::Horsepower, Attribute::CityMpg,
                      Attribute::EngineSize])
    }
}

impl Index<usize> for AttributeSet {
    type Output = Attribute;

    fn index(&self, i: usize) -> &Attribute {
        &self.0[i]
    }
}

/// Exactly three records, in legend order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: [Record; 3],
}

impl Dataset {
    pub fn new(records: [Record; 3]) -> Self {
        Dataset { records }
    }

    /// The records used when no table can be read.
    pub fn builtin() -> Self {
        Dataset::new([
            Record::new("Acura MDX", 265., 17., 3.5),
            Record::new("BMW M3", 333., 16., 3.2),
            Record::new("Toyota Prius", 110., 48., 1.5),
        ])
    }

    pub fn records(&self) -> &[Record; 3] {
        &self.records
    }

    pub fn names(&self) -> [&str; 3] {
        let [a, b, c] = &self.records;
        [&a.name, &b.name, &c.name]
    }

    /// `records × attributes` matrix: entry `[k, a]` is attribute `a` of
    /// record `k`.
    pub fn matrix(&self, attributes: &AttributeSet) -> Array2<f64> {
        Array2::from_shape_fn((3, 3), |(k, a)| {
            attributes[a].value(&self.records[k])
        })
    }
}

/// Which path produced a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Every target name was found in the table.
    Matched,
    /// Some target was missing; the fixed rows were used.
    FixedRows,
    /// The table could not be used at all.
    BuiltIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Acquisition {
    pub dataset: Dataset,
    pub source: DataSource,
}

/// Load three records from the CSV table at `path`, or fall back to
/// [`Dataset::builtin`] on any failure.
pub fn acquire(path: &Path, targets: &[String; 3], fixed_rows: [usize; 3])
               -> Acquisition {
    match load(path, targets, fixed_rows) {
        Ok((dataset, source)) => {
            debug!(path = %path.display(), ?source, "records selected from table");
            Acquisition { dataset, source }
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "using built-in records");
            Acquisition { dataset: Dataset::builtin(), source: DataSource::BuiltIn }
        }
    }
}

/// Same as [`acquire`] but report the failure instead of falling back.
pub fn load(path: &Path, targets: &[String; 3], fixed_rows: [usize; 3])
            -> Result<(Dataset, DataSource), DataError> {
    let df = read_table(path)?;
    let (rows, source) = select_rows(&df, targets, fixed_rows)?;
    let records = records_at(&df, rows)?;
    Ok((Dataset::new(records), source))
}

/// Read the whole CSV table.  Column types are inferred from every row,
/// so a stray non-numeric cell turns its column into strings instead of
/// failing the read.
pub fn read_table(path: &Path) -> Result<DataFrame, DataError> {
    let df = CsvReader::from_path(path)?
        .has_header(true)
        .infer_schema(None)
        .finish()?;
    Ok(df)
}

/// Lowercased first word of `target`, the part matched against names.
fn needle(target: &str) -> Option<String> {
    target.split_whitespace().next().map(str::to_lowercase)
}

/// Rows of the first name containing each target's first word
/// (case-insensitively).  If any target has no match, `fixed_rows`.
pub fn select_rows(df: &DataFrame, targets: &[String; 3], fixed_rows: [usize; 3])
                   -> Result<([usize; 3], DataSource), DataError> {
    let names = df.column(NAME_COLUMN)?.str()?;
    let mut matched = Vec::with_capacity(3);
    for (index, target) in targets.iter().enumerate() {
        let needle = needle(target).ok_or(DataError::EmptyTarget { index })?;
        let found = names.into_iter().position(|name| {
            name.is_some_and(|n| n.to_lowercase().contains(&needle))
        });
        if let Some(row) = found {
            matched.push(row);
        }
    }
    match matched[..] {
        [a, b, c] => Ok(([a, b, c], DataSource::Matched)),
        _ => Ok((fixed_rows, DataSource::FixedRows)),
    }
}

/// Build the records stored at `rows`.
pub fn records_at(df: &DataFrame, rows: [usize; 3])
                  -> Result<[Record; 3], DataError> {
    let height = df.height();
    if let Some(&row) = rows.iter().find(|&&row| row >= height) {
        return Err(DataError::RowOutOfRange { row, height });
    }
    let names = df.column(NAME_COLUMN)?.str()?;
    let numeric = |attribute: Attribute| -> Result<Vec<Option<f64>>, DataError> {
        let series = df.column(attribute.column())?.cast(&DataType::Float64)?;
        let values = series.f64()?;
        Ok(rows.iter().map(|&row| values.get(row)).collect())
    };
    let hp = numeric(Attribute::Horsepower)?;
    let mpg = numeric(Attribute::CityMpg)?;
    let engine = numeric(Attribute::EngineSize)?;

    let record = |k: usize| -> Result<Record, DataError> {
        let row = rows[k];
        let missing = |column| DataError::MissingValue { column, row };
        Ok(Record {
            name: names.get(row).ok_or(missing(NAME_COLUMN))?.to_string(),
            horsepower: hp[k].ok_or(missing(Attribute::Horsepower.column()))?,
            city_mpg: mpg[k].ok_or(missing(Attribute::CityMpg.column()))?,
            engine_size: engine[k].ok_or(missing(Attribute::EngineSize.column()))?,
        })
    };
    Ok([record(0)?, record(1)?, record(2)?])
}
