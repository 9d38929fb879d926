use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::{DatasetError, DatasetResult};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const EMAIL: &str = "email";
pub const SCORE: &str = "score";

/// The five graded questions, in order.
pub const GRADE_COLUMNS: [&str; 5] = ["q1", "q2", "q3", "q4", "q5"];

/// Columns every questionnaire dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [AGE, GENDER, EMAIL, "q1", "q2", "q3", "q4", "q5"];

// ---------------------------------------------------------------------------
// Score – nullable unsigned 8-bit per-subject aggregate
// ---------------------------------------------------------------------------

/// A subject's score: a truncated mean grade, or explicitly missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Present(u8),
    Missing,
}

impl Score {
    /// Truncate a mean grade toward zero.
    ///
    /// An undefined mean (NaN) is `Missing`; a mean whose truncation falls
    /// outside `0..=255` is rejected and handed back as the error value.
    pub fn from_mean(mean: f64) -> Result<Self, f64> {
        if mean.is_nan() {
            return Ok(Score::Missing);
        }
        let truncated = mean.trunc();
        if (0.0..=255.0).contains(&truncated) {
            Ok(Score::Present(truncated as u8))
        } else {
            Err(mean)
        }
    }

    pub fn value(self) -> Option<u8> {
        match self {
            Score::Present(v) => Some(v),
            Score::Missing => None,
        }
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a questionnaire table uses.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    /// May hold NaN: imputation leaves NaN in rows with no grades at all.
    Float(f64),
    Bool(bool),
    Score(Score),
    Null,
}

static NULL: CellValue = CellValue::Null;

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            CellValue::Float(v) => write!(f, "{v:.1}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Score(Score::Present(v)) => write!(f, "{v}"),
            CellValue::Score(Score::Missing) => write!(f, "<NA>"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. Booleans count as 0/1; null, NaN, text and
    /// missing scores have no numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Score(score) => score.value().map(f64::from),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell counts as missing for aggregation purposes.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null | CellValue::Score(Score::Missing) => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one survey participant
// ---------------------------------------------------------------------------

/// A single participant (one record of the source file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// column_name → value. Columns absent from the record read as null.
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.cells.insert(column.to_string(), value);
    }

    /// The five grades, `None` where the answer is missing.
    pub fn grades(&self) -> [Option<f64>; 5] {
        GRADE_COLUMNS.map(|col| self.get(col).as_f64())
    }

    pub fn missing_grades(&self) -> usize {
        self.grades().iter().filter(|g| g.is_none()).count()
    }

    /// Mean of the present grades, NaN when all five are missing.
    pub fn grade_mean(&self) -> f64 {
        mean(self.grades().iter().flatten().copied())
    }
}

/// Arithmetic mean, NaN for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The questionnaire table. Row identity is positional: the index of a row
/// in `rows` is its ordinal index, so removing rows renumbers the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Row>,
    /// Sorted list of column names present in at least one row.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build the column index from the loaded rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let column_names: BTreeSet<String> = rows
            .iter()
            .flat_map(|row| row.cells.keys().cloned())
            .collect();
        Dataset {
            rows,
            column_names: column_names.into_iter().collect(),
        }
    }

    /// A new table holding the selected rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            column_names: self.column_names.clone(),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Register a derived column so it shows up in `column_names`.
    pub fn add_column(&mut self, column: &str) {
        if let Err(pos) = self.column_names.binary_search_by(|c| c.as_str().cmp(column)) {
            self.column_names.insert(pos, column.to_string());
        }
    }

    pub fn require_columns(&self, columns: &[&str]) -> DatasetResult<()> {
        match columns.iter().find(|col| !self.has_column(col)) {
            Some(col) => Err(DatasetError::MissingColumn(col.to_string())),
            None => Ok(()),
        }
    }

    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        Row {
            cells: cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn score_truncates_toward_zero() {
        assert_eq!(Score::from_mean(79.99), Ok(Score::Present(79)));
        assert_eq!(Score::from_mean(0.4), Ok(Score::Present(0)));
        assert_eq!(Score::from_mean(255.7), Ok(Score::Present(255)));
    }

    #[test]
    fn score_rejects_out_of_range_means() {
        assert_eq!(Score::from_mean(256.0), Err(256.0));
        assert_eq!(Score::from_mean(-3.0), Err(-3.0));
    }

    #[test]
    fn score_of_undefined_mean_is_missing() {
        assert_eq!(Score::from_mean(f64::NAN), Ok(Score::Missing));
    }

    #[test]
    fn score_cells_read_as_numbers_only_when_present() {
        assert_eq!(Score::Present(42).value(), Some(42));
        assert_eq!(Score::Missing.value(), None);
        assert_eq!(CellValue::Score(Score::Present(42)).as_f64(), Some(42.0));
        assert_eq!(CellValue::Score(Score::Missing).as_f64(), None);
        assert!(CellValue::Score(Score::Missing).is_missing());
    }

    #[test]
    fn grades_treat_null_and_nan_as_missing() {
        let r = row(&[
            ("q1", CellValue::Integer(80)),
            ("q2", CellValue::Null),
            ("q3", CellValue::Float(f64::NAN)),
            ("q4", CellValue::Float(70.5)),
        ]);
        assert_eq!(r.grades(), [Some(80.0), None, None, Some(70.5), None]);
        assert_eq!(r.missing_grades(), 3);
        assert!((r.grade_mean() - 75.25).abs() < 1e-9);
    }

    #[test]
    fn mean_of_nothing_is_nan() {
        assert!(mean(std::iter::empty()).is_nan());
    }

    #[test]
    fn columns_are_sorted_and_deduplicated() {
        let ds = Dataset::from_rows(vec![
            row(&[("q1", CellValue::Null), ("age", CellValue::Integer(3))]),
            row(&[("email", CellValue::String("a@b.co".into()))]),
        ]);
        assert_eq!(ds.column_names, vec!["age", "email", "q1"]);
        assert!(ds.require_columns(&["age", "q1"]).is_ok());
        assert!(matches!(
            ds.require_columns(&["age", "gender"]),
            Err(DatasetError::MissingColumn(c)) if c == "gender"
        ));
    }

    #[test]
    fn add_column_keeps_order() {
        let mut ds = Dataset::from_rows(vec![row(&[
            ("age", CellValue::Null),
            ("q5", CellValue::Null),
        ])]);
        ds.add_column(SCORE);
        ds.add_column(SCORE);
        assert_eq!(ds.column_names, vec!["age", "q5", "score"]);
    }

    #[test]
    fn absent_cells_read_as_null() {
        let r = Row::default();
        assert_eq!(r.get(AGE), &CellValue::Null);
        assert!(r.get(AGE).is_missing());
    }
}
