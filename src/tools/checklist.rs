//! Persistent application checklist with completion stats and an
//! at-a-glance readiness tier.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::store::StoreHandle;

const NS: &str = "checklist";

static ITEM_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_item_id() -> String {
    let id = ITEM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("item-{id:06}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistStats {
    pub total: usize,
    pub done: usize,
    pub open: usize,
    pub percent: u8,
}

/// Coarse progress bands surfaced next to the checklist title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    NotReady,
    InProgress,
    AlmostThere,
    Ready,
}

impl ReadinessTier {
    pub const fn label(self) -> &'static str {
        match self {
            ReadinessTier::NotReady => "Not ready",
            ReadinessTier::InProgress => "In progress",
            ReadinessTier::AlmostThere => "Almost there",
            ReadinessTier::Ready => "Ready to apply",
        }
    }

    pub fn from_percent(percent: u8) -> Self {
        match percent {
            100..=u8::MAX => Self::Ready,
            60..=99 => Self::AlmostThere,
            30..=59 => Self::InProgress,
            _ => Self::NotReady,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    Open,
    Done,
}

/// One named checklist persisted under its own key, so several lists
/// (general prep, NSFAS readiness) can coexist in the namespace.
pub struct Checklist {
    store: StoreHandle,
    list_key: String,
    defaults: Vec<ChecklistItem>,
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Attach to the store, restoring saved items or falling back to the
    /// provided defaults.
    pub fn attach(
        store: StoreHandle,
        list_key: impl Into<String>,
        defaults: Vec<ChecklistItem>,
    ) -> Self {
        let list_key = list_key.into();
        let items = store.get(NS, &list_key, defaults.clone());
        Self {
            store,
            list_key,
            defaults,
            items,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn view(&self, filter: ItemFilter) -> Vec<ChecklistItem> {
        self.items
            .iter()
            .filter(|item| match filter {
                ItemFilter::All => true,
                ItemFilter::Open => !item.checked,
                ItemFilter::Done => item.checked,
            })
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> ChecklistStats {
        let total = self.items.len();
        let done = self.items.iter().filter(|item| item.checked).count();
        let percent = if total == 0 {
            0
        } else {
            ((done as f64 / total as f64) * 100.0).round() as u8
        };
        ChecklistStats {
            total,
            done,
            open: total - done,
            percent,
        }
    }

    pub fn readiness(&self) -> ReadinessTier {
        ReadinessTier::from_percent(self.stats().percent)
    }

    /// Flip one item's checked state. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.checked = !item.checked;
            self.persist();
        }
    }

    /// Append a new open item. Blank labels are ignored.
    pub fn add(&mut self, label: &str) -> Option<&ChecklistItem> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        self.items.push(ChecklistItem::new(next_item_id(), label));
        self.persist();
        self.items.last()
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    pub fn clear_completed(&mut self) {
        self.items.retain(|item| !item.checked);
        self.persist();
    }

    pub fn mark_all(&mut self) {
        for item in &mut self.items {
            item.checked = true;
        }
        self.persist();
    }

    pub fn reset_to_defaults(&mut self) {
        self.items = self.defaults.clone();
        self.persist();
    }

    fn persist(&self) {
        self.store.set(NS, &self.list_key, &self.items);
    }
}

/// Default items for the NSFAS readiness check.
pub fn nsfas_readiness_defaults() -> Vec<ChecklistItem> {
    [
        ("r1", "Create myNSFAS account and verify email/phone"),
        ("r2", "SA ID or birth certificate (certified copy)"),
        ("r3", "Parent/guardian ID (certified copy)"),
        (
            "r4",
            "Proof of household income (salary slip / SASSA letter / affidavit)",
        ),
        ("r5", "Completed and signed NSFAS consent form"),
        (
            "r6",
            "Proof of application/acceptance to a public institution (if available)",
        ),
        (
            "r7",
            "Scan/photograph documents clearly (no cut-off edges, readable)",
        ),
        (
            "r8",
            "Apply as soon as the window opens (Sep/Oct for 2026 intake)",
        ),
        (
            "r9",
            "Keep a single folder for PDFs/screenshots to re-upload quickly",
        ),
    ]
    .into_iter()
    .map(|(id, label)| ChecklistItem::new(id, label))
    .collect()
}
