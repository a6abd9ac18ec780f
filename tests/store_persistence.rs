//! Integration specifications for the namespaced store and its file-backed
//! substrate.
//!
//! Scenarios run whole tools against shared backends to check namespace
//! isolation, and against `FileBackend` to check the write-through image
//! on disk.

mod common {
    use std::sync::Arc;

    use roadmap_tools::store::{MemoryBackend, StoreHandle};

    pub(super) fn memory_store() -> StoreHandle {
        StoreHandle::new(Arc::new(MemoryBackend::default()))
    }
}

mod namespacing {
    use super::common::*;
    use roadmap_tools::tools::matrix::{DecisionMatrix, RowPatch, SkillsField};
    use roadmap_tools::tools::planner::WeeklyPlanner;

    #[test]
    fn clearing_one_tool_leaves_the_others_intact() {
        let store = memory_store();

        let mut matrix = DecisionMatrix::attach(store.clone());
        let id = matrix.add_row().id.clone();
        matrix
            .update_row(
                &id,
                RowPatch {
                    name: Some("Keep separate".to_string()),
                    skills: Some(SkillsField::Score(3.0)),
                    ..RowPatch::default()
                },
            )
            .expect("row exists");

        let mut planner = WeeklyPlanner::attach(store.clone());
        planner
            .set_entry(0, 0, "Math revision")
            .expect("slot in range");

        store.clear_namespace("matrix");

        assert!(store.export_namespace("matrix").is_empty());
        let planner = WeeklyPlanner::attach(store);
        assert_eq!(planner.entry(0, 0).expect("slot in range"), "Math revision");
    }

    #[test]
    fn export_all_collects_every_tool_namespace() {
        let store = memory_store();

        DecisionMatrix::attach_or_seed(store.clone());
        let mut planner = WeeklyPlanner::attach(store.clone());
        planner.set_entry(1, 2, "English essay").expect("in range");

        let exported = store.export_all();
        assert!(exported.contains_key("matrix"));
        assert!(exported.contains_key("planner"));
        assert!(exported["matrix"]["rows"].is_array());
    }
}

mod file_backend {
    use std::sync::Arc;

    use roadmap_tools::store::{FileBackend, StoreHandle};
    use roadmap_tools::tools::matrix::{DecisionMatrix, RowPatch, SkillsField};

    fn file_store(path: &std::path::Path) -> StoreHandle {
        StoreHandle::new(Arc::new(FileBackend::open(path)))
    }

    #[test]
    fn writes_are_visible_through_a_reopened_backend() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roadmap-data.json");

        let store = file_store(&path);
        store.set("aps", "last", &serde_json::json!({"total": 28}));

        let reopened = file_store(&path);
        let value: serde_json::Value = reopened.get("aps", "last", serde_json::Value::Null);
        assert_eq!(value["total"], 28);
    }

    #[test]
    fn a_whole_tool_round_trips_through_the_file_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roadmap-data.json");

        let mut matrix = DecisionMatrix::attach(file_store(&path));
        let id = matrix.add_row().id.clone();
        matrix
            .update_row(
                &id,
                RowPatch {
                    name: Some("Durable".to_string()),
                    interest: Some(4),
                    skills: Some(SkillsField::FreeText("4 (Languages)".to_string())),
                    demand: Some(5),
                    ..RowPatch::default()
                },
            )
            .expect("row exists");
        drop(matrix);

        let restored = DecisionMatrix::attach(file_store(&path));
        assert_eq!(restored.rows().len(), 1);
        assert_eq!(restored.rows()[0].name, "Durable");
        assert_eq!(restored.rows()[0].total, 13);
    }

    #[test]
    fn a_corrupt_file_degrades_to_an_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roadmap-data.json");
        std::fs::write(&path, "{ not json at all").expect("write corrupt image");

        let store = file_store(&path);
        let fallback: Vec<i32> = store.get("matrix", "rows", vec![7]);
        assert_eq!(fallback, vec![7]);

        // The store recovers: subsequent writes produce a fresh image.
        store.set("matrix", "rows", &vec![1, 2]);
        let reopened = file_store(&path);
        let rows: Vec<i32> = reopened.get("matrix", "rows", Vec::new());
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn removals_are_written_through() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roadmap-data.json");

        let store = file_store(&path);
        store.set("wizard", "answers", &serde_json::json!({"citizenship": true}));
        store.remove("wizard", "answers");

        let reopened = file_store(&path);
        let value: serde_json::Value =
            reopened.get("wizard", "answers", serde_json::Value::Null);
        assert!(value.is_null());
    }
}
