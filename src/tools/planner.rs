//! Weekly study planner: a 7x6 grid of free-text study blocks with fill
//! templates, persisted cell-by-cell under the planner namespace.

use std::collections::BTreeMap;

use crate::store::StoreHandle;

const NS: &str = "planner";
const GRID_KEY: &str = "grid";

pub const DAY_COUNT: usize = 7;
pub const SLOT_COUNT: usize = 6;
pub const DAY_LABELS: [&str; DAY_COUNT] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("day {day}, slot {slot} is outside the weekly grid")]
    OutOfRange { day: usize, slot: usize },
}

/// Preset week shapes for different phases of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerTemplate {
    Balanced,
    Exam,
    Light,
}

impl PlannerTemplate {
    pub const fn label(self) -> &'static str {
        match self {
            PlannerTemplate::Balanced => "balanced",
            PlannerTemplate::Exam => "exam",
            PlannerTemplate::Light => "light",
        }
    }
}

fn grid_key(day: usize, slot: usize) -> String {
    format!("{day}:{slot}")
}

fn blank_grid() -> BTreeMap<String, String> {
    let mut grid = BTreeMap::new();
    for day in 0..DAY_COUNT {
        for slot in 0..SLOT_COUNT {
            grid.insert(grid_key(day, slot), String::new());
        }
    }
    grid
}

/// Planner service owning the grid and its write-through persistence.
pub struct WeeklyPlanner {
    store: StoreHandle,
    grid: BTreeMap<String, String>,
}

impl WeeklyPlanner {
    pub fn attach(store: StoreHandle) -> Self {
        let grid = store.get(NS, GRID_KEY, blank_grid());
        Self { store, grid }
    }

    fn check_bounds(day: usize, slot: usize) -> Result<(), PlannerError> {
        if day >= DAY_COUNT || slot >= SLOT_COUNT {
            return Err(PlannerError::OutOfRange { day, slot });
        }
        Ok(())
    }

    pub fn entry(&self, day: usize, slot: usize) -> Result<&str, PlannerError> {
        Self::check_bounds(day, slot)?;
        Ok(self
            .grid
            .get(&grid_key(day, slot))
            .map(String::as_str)
            .unwrap_or(""))
    }

    pub fn set_entry(&mut self, day: usize, slot: usize, text: &str) -> Result<(), PlannerError> {
        Self::check_bounds(day, slot)?;
        self.grid.insert(grid_key(day, slot), text.to_string());
        self.persist();
        Ok(())
    }

    /// Replace the whole grid with a preset week.
    pub fn apply_template(&mut self, template: PlannerTemplate) {
        let mut grid = blank_grid();
        for (day, slot, text) in template_blocks(template) {
            grid.insert(grid_key(*day, *slot), (*text).to_string());
        }
        self.grid = grid;
        self.persist();
    }

    pub fn clear_week(&mut self) {
        self.grid = blank_grid();
        self.persist();
    }

    /// Row-major view of the week for rendering.
    pub fn matrix(&self) -> Vec<Vec<String>> {
        (0..DAY_COUNT)
            .map(|day| {
                (0..SLOT_COUNT)
                    .map(|slot| {
                        self.grid
                            .get(&grid_key(day, slot))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    fn persist(&self) {
        self.store.set(NS, GRID_KEY, &self.grid);
    }
}

fn template_blocks(template: PlannerTemplate) -> &'static [(usize, usize, &'static str)] {
    match template {
        PlannerTemplate::Exam => &[
            (0, 0, "Accounting: Past Paper 1 (Timed)"),
            (0, 1, "English HL: Essay planning"),
            (1, 0, "Math Lit: Functions practice (Siyavula)"),
            (1, 1, "Accounting: Corrections"),
            (2, 0, "Business Studies: Definitions + Mindmaps"),
            (2, 1, "Zulu FAL: Comprehension"),
            (3, 0, "Accounting: Past Paper 2 (Timed)"),
            (3, 1, "English HL: Literature revision"),
            (4, 0, "Math Lit: Data handling (Siyavula)"),
            (4, 1, "Business Studies: Case study"),
            (5, 0, "Study group: Teach-back session"),
            (6, 0, "Accountability check + plan adjustments"),
        ],
        PlannerTemplate::Light => &[
            (0, 0, "English HL: Summary practice"),
            (1, 0, "Zulu FAL: Language exercises"),
            (2, 0, "Math Lit: Basic revision"),
            (3, 0, "Business: Reading + notes"),
            (4, 0, "Accounting: Concepts recap"),
            (6, 0, "Plan next week"),
        ],
        PlannerTemplate::Balanced => &[
            (0, 0, "Math Lit: Worksheets (Siyavula)"),
            (0, 1, "English HL: Past paper Qs"),
            (1, 0, "Accounting: Ledger basics"),
            (1, 1, "Business: Essay plan"),
            (2, 0, "Zulu FAL: Grammar drills"),
            (2, 1, "LO: Portfolio tasks"),
            (3, 0, "Accounting: Past Paper (untimed)"),
            (4, 0, "Business: Key terms revision"),
            (4, 1, "English HL: Literature"),
            (5, 0, "Group call: peer marking"),
            (6, 0, "Weekly review + prep"),
        ],
    }
}
