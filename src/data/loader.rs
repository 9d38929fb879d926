use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::error::{DatasetError, DatasetResult};
use super::model::{CellValue, Dataset, Row, AGE, GRADE_COLUMNS, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// QuestionnaireAnalysis – resolved handle on a questionnaire file
// ---------------------------------------------------------------------------

/// A questionnaire results file whose path has been resolved and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireAnalysis {
    data_fname: PathBuf,
}

impl QuestionnaireAnalysis {
    /// Resolve `data_fname` to an absolute path to an existing regular file.
    pub fn new(data_fname: impl AsRef<Path>) -> DatasetResult<Self> {
        resolve_data_path(data_fname.as_ref()).map(|data_fname| Self { data_fname })
    }

    /// The resolved absolute path.
    pub fn data_fname(&self) -> &Path {
        &self.data_fname
    }

    /// Read the file into a fresh in-memory table.
    pub fn read_data(&self) -> DatasetResult<Dataset> {
        load_file(&self.data_fname)
    }
}

fn resolve_data_path(path: &Path) -> DatasetResult<PathBuf> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(DatasetError::InvalidArgument("empty path".into()));
    }
    if raw.as_encoded_bytes().contains(&0) {
        return Err(DatasetError::InvalidArgument(format!(
            "path contains a NUL byte: {}",
            path.display()
        )));
    }

    let absolute = std::path::absolute(path)
        .map_err(|e| DatasetError::InvalidArgument(format!("{}: {e}", path.display())))?;
    if !absolute.is_file() {
        return Err(DatasetError::NotFound(absolute));
    }
    absolute
        .canonicalize()
        .map_err(|_| DatasetError::NotFound(absolute))
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a questionnaire dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, empty cells are null
/// * anything else is read as JSON: `[{ "age": 31, "gender": "F", ... }, ...]`
///
/// The table must provide `age`, `gender`, `email` and `q1`..`q5`; `age` and
/// the grades must be numeric or null. Extra columns are kept as-is.
pub fn load_file(path: &Path) -> DatasetResult<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "csv" => load_csv(path),
        _ => load_json(path),
    };
    let dataset = loaded.map_err(|e| DatasetError::Load {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })?;

    validate(&dataset)?;
    log::info!(
        "Loaded {} participants from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.column_names
    );
    Ok(dataset)
}

/// Parse a JSON document holding an array of participant records.
pub fn parse_json(text: &str) -> DatasetResult<Dataset> {
    let root: JsonValue = serde_json::from_str(text).map_err(|e| DatasetError::Load {
        path: PathBuf::from("<inline>"),
        message: e.to_string(),
    })?;
    let dataset = records_to_dataset(&root).map_err(|e| DatasetError::Load {
        path: PathBuf::from("<inline>"),
        message: format!("{e:#}"),
    })?;
    validate(&dataset)?;
    Ok(dataset)
}

fn validate(dataset: &Dataset) -> DatasetResult<()> {
    dataset.require_columns(&REQUIRED_COLUMNS)?;

    for (i, row) in dataset.rows.iter().enumerate() {
        for col in std::iter::once(AGE).chain(GRADE_COLUMNS) {
            match row.get(col) {
                CellValue::Null | CellValue::Integer(_) | CellValue::Float(_) => {}
                other => {
                    return Err(DatasetError::InvalidValue {
                        row: i,
                        column: col.to_string(),
                        message: format!("expected a number or null, got '{other}'"),
                    })
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "age": 41, "gender": "F", "email": "a@b.com",
///     "q1": 80, "q2": null, "q3": 90, "q4": 75, "q5": 70 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    records_to_dataset(&root)
}

fn records_to_dataset(root: &JsonValue) -> Result<Dataset> {
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let cells: BTreeMap<String, CellValue> = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        rows.push(Row { cells });
    }

    Ok(Dataset::from_rows(rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one participant per line.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(Row { cells });
    }

    // A header-only file still declares its columns.
    let mut dataset = Dataset::from_rows(rows);
    for col in &headers {
        dataset.add_column(col);
    }
    Ok(dataset)
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}
