use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::{MatrixRow, SkillsField};

/// Error raised when an import payload cannot replace the row set.
/// Imports are all-or-nothing; the caller's state is untouched on error.
#[derive(Debug, thiserror::Error)]
pub enum MatrixImportError {
    #[error("invalid matrix JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("matrix payload must be an array of row records")]
    NotAnArray,
    #[error("matrix row {index} is not a record")]
    NotARecord { index: usize },
    #[error("invalid matrix CSV data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MatrixExportError {
    #[error("failed to encode matrix CSV: {0}")]
    Csv(String),
    #[error("failed to encode matrix JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed export schema for the decision matrix. Column titles are part of
/// the external contract and must not drift.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Career Option")]
    career_option: String,
    #[serde(rename = "Interest (1-5)")]
    interest: i64,
    #[serde(rename = "Skills Match (1-5)")]
    skills: i64,
    #[serde(rename = "Job Demand (1-5)")]
    demand: i64,
    #[serde(rename = "Qualification")]
    qualification: String,
    #[serde(rename = "Funding")]
    funding: String,
    #[serde(rename = "Total")]
    total: i64,
}

impl From<&MatrixRow> for CsvRow {
    fn from(row: &MatrixRow) -> Self {
        Self {
            career_option: row.name.clone(),
            interest: row.interest,
            skills: row.skills.points(),
            demand: row.demand,
            qualification: row.qualification.clone(),
            funding: row.funding.clone(),
            total: row.total,
        }
    }
}

impl From<CsvRow> for MatrixRow {
    fn from(row: CsvRow) -> Self {
        Self {
            id: String::new(),
            name: row.career_option,
            interest: row.interest,
            skills: SkillsField::Score(row.skills as f64),
            demand: row.demand,
            qualification: row.qualification,
            funding: row.funding,
            total: row.total,
        }
    }
}

pub(crate) fn rows_to_csv(rows: &[MatrixRow]) -> Result<String, MatrixExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(CsvRow::from(row))
            .map_err(|err| MatrixExportError::Csv(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| MatrixExportError::Csv(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| MatrixExportError::Csv(err.to_string()))
}

pub(crate) fn rows_from_csv(text: &str) -> Result<Vec<MatrixRow>, MatrixImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        rows.push(MatrixRow::from(record?));
    }
    Ok(rows)
}

pub(crate) fn rows_to_json(rows: &[MatrixRow]) -> Result<String, MatrixExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Decode a JSON payload into rows, coercing noisy fields the way the
/// forms do. Anything that is not an array of records is rejected.
pub(crate) fn rows_from_json(text: &str) -> Result<Vec<MatrixRow>, MatrixImportError> {
    let payload: Value = serde_json::from_str(text)?;
    let Value::Array(items) = payload else {
        return Err(MatrixImportError::NotAnArray);
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(record) = item else {
            return Err(MatrixImportError::NotARecord { index });
        };
        rows.push(row_from_record(&record));
    }
    Ok(rows)
}

fn row_from_record(record: &Map<String, Value>) -> MatrixRow {
    MatrixRow {
        id: string_field(record, "id"),
        name: string_field(record, "name"),
        interest: integer_field(record, "interest"),
        skills: skills_field(record.get("skills")),
        demand: integer_field(record, "demand"),
        qualification: string_field(record, "qualification"),
        funding: string_field(record, "funding"),
        // Recomputed by the caller; imported totals are never trusted.
        total: 0,
    }
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn integer_field(record: &Map<String, Value>, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.round() as i64))
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse::<f64>().map(|value| value.round() as i64).unwrap_or(0),
        _ => 0,
    }
}

fn skills_field(value: Option<&Value>) -> SkillsField {
    match value {
        Some(Value::Number(number)) => SkillsField::Score(number.as_f64().unwrap_or(0.0)),
        Some(Value::String(text)) => SkillsField::FreeText(text.clone()),
        _ => SkillsField::default(),
    }
}
