//! Career decision matrix: a small weighted-scoring table with sorting,
//! filtering, and CSV/JSON round-tripping.

mod codec;
mod domain;

pub use codec::{MatrixExportError, MatrixImportError};
pub use domain::{embedded_number, MatrixRow, RowPatch, SkillsField};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::store::StoreHandle;

const NS: &str = "matrix";
const ROWS_KEY: &str = "rows";

static ROW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_row_id() -> String {
    let id = ROW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("row-{id:06}")
}

/// Error enumeration for row-level operations.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("row '{0}' not found")]
    RowNotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Total,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    All,
    TopScoreOnly,
}

/// Service owning the row set and its write-through persistence.
pub struct DecisionMatrix {
    store: StoreHandle,
    rows: Vec<MatrixRow>,
}

impl DecisionMatrix {
    /// Attach to the store, restoring any previously persisted rows and
    /// bringing their totals up to date.
    pub fn attach(store: StoreHandle) -> Self {
        let rows: Vec<MatrixRow> = store.get(NS, ROWS_KEY, Vec::new());
        let mut matrix = Self { store, rows };
        if !matrix.rows.is_empty() {
            matrix.recalculate();
        }
        matrix
    }

    /// Attach and seed the example rows when nothing is stored yet.
    pub fn attach_or_seed(store: StoreHandle) -> Self {
        let mut matrix = Self::attach(store);
        if matrix.rows.is_empty() {
            matrix.rows = example_rows();
            matrix.recalculate();
        }
        matrix
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    /// Recompute every derived total, then persist. Idempotent until the
    /// next edit.
    pub fn recalculate(&mut self) {
        for row in &mut self.rows {
            row.total = row.computed_total();
        }
        self.persist();
    }

    /// Append a blank row. The fresh row stays at total 0 until its first
    /// edit recomputes it.
    pub fn add_row(&mut self) -> &MatrixRow {
        self.rows.push(MatrixRow::blank(next_row_id()));
        self.persist();
        self.rows.last().expect("row just appended")
    }

    pub fn remove_row(&mut self, id: &str) -> Result<(), MatrixError> {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        if self.rows.len() == before {
            return Err(MatrixError::RowNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// Patch one row and recompute its total.
    pub fn update_row(&mut self, id: &str, patch: RowPatch) -> Result<&MatrixRow, MatrixError> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| MatrixError::RowNotFound(id.to_string()))?;
        let row = &mut self.rows[index];
        patch.apply(row);
        row.total = row.computed_total();
        self.persist();
        Ok(&self.rows[index])
    }

    /// Remove every row. The empty set is persisted, matching the clear
    /// button rather than a namespace wipe.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.persist();
    }

    /// Reset to the worked examples shown on first visit.
    pub fn reset_examples(&mut self) {
        self.rows = example_rows();
        self.recalculate();
    }

    pub fn sorted_view(&self, key: SortKey, direction: SortDirection) -> Vec<MatrixRow> {
        let mut view = self.rows.clone();
        view.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Total => a.total.cmp(&b.total),
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            };
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        view
    }

    /// All rows, or only those tied for the best total.
    pub fn filtered_view(&self, mode: FilterMode) -> Vec<MatrixRow> {
        match mode {
            FilterMode::All => self.rows.clone(),
            FilterMode::TopScoreOnly => {
                let Some(max) = self.rows.iter().map(|row| row.total).max() else {
                    return Vec::new();
                };
                self.rows
                    .iter()
                    .filter(|row| row.total == max)
                    .cloned()
                    .collect()
            }
        }
    }

    pub fn export_csv(&self) -> Result<String, MatrixExportError> {
        codec::rows_to_csv(&self.rows)
    }

    pub fn export_json(&self) -> Result<String, MatrixExportError> {
        codec::rows_to_json(&self.rows)
    }

    /// Replace the entire row set from a JSON payload. Rejection leaves
    /// the current rows untouched.
    pub fn import_json(&mut self, payload: &str) -> Result<usize, MatrixImportError> {
        let rows = codec::rows_from_json(payload)?;
        self.replace_rows(rows);
        Ok(self.rows.len())
    }

    /// Replace the entire row set from CSV text with the export header.
    pub fn import_csv(&mut self, payload: &str) -> Result<usize, MatrixImportError> {
        let rows = codec::rows_from_csv(payload)?;
        self.replace_rows(rows);
        Ok(self.rows.len())
    }

    fn replace_rows(&mut self, mut rows: Vec<MatrixRow>) {
        for row in &mut rows {
            if row.id.is_empty() {
                row.id = next_row_id();
            }
        }
        self.rows = rows;
        self.recalculate();
    }

    fn persist(&self) {
        self.store.set(NS, ROWS_KEY, &self.rows);
    }
}

/// The two worked examples from the printed matrix.
pub fn example_rows() -> Vec<MatrixRow> {
    vec![
        MatrixRow {
            id: "ex-1".to_string(),
            name: "Foundation Phase Teacher".to_string(),
            interest: 4,
            skills: SkillsField::FreeText("4 (Languages)".to_string()),
            demand: 5,
            qualification: "B.Ed Degree".to_string(),
            funding: "Funza Lushaka".to_string(),
            total: 0,
        },
        MatrixRow {
            id: "ex-2".to_string(),
            name: "Human Resources Officer".to_string(),
            interest: 3,
            skills: SkillsField::FreeText("3 (People Skills)".to_string()),
            demand: 4,
            qualification: "Diploma/Degree".to_string(),
            funding: "NSFAS".to_string(),
            total: 0,
        },
    ]
}
