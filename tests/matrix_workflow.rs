//! Integration specifications for the career decision matrix.
//!
//! Scenarios exercise the scoring, view, and import/export behavior through
//! the public service facade over an in-memory store, the same way the site
//! drives it.

mod common {
    use std::sync::Arc;

    use roadmap_tools::store::{MemoryBackend, StoreHandle};
    use roadmap_tools::tools::matrix::{DecisionMatrix, RowPatch, SkillsField};

    pub(super) fn store() -> StoreHandle {
        StoreHandle::new(Arc::new(MemoryBackend::default()))
    }

    pub(super) fn push_row(
        matrix: &mut DecisionMatrix,
        name: &str,
        interest: i64,
        skills: SkillsField,
        demand: i64,
    ) -> String {
        let id = matrix.add_row().id.clone();
        matrix
            .update_row(
                &id,
                RowPatch {
                    name: Some(name.to_string()),
                    interest: Some(interest),
                    skills: Some(skills),
                    demand: Some(demand),
                    ..RowPatch::default()
                },
            )
            .expect("row just added");
        id
    }
}

mod scoring {
    use super::common::*;
    use roadmap_tools::tools::matrix::{DecisionMatrix, MatrixError, RowPatch, SkillsField};

    #[test]
    fn total_is_derived_from_the_three_axes() {
        let mut matrix = DecisionMatrix::attach(store());
        let id = push_row(
            &mut matrix,
            "Foundation Phase Teacher",
            4,
            SkillsField::FreeText("4 (Languages)".to_string()),
            5,
        );

        let row = matrix
            .rows()
            .iter()
            .find(|row| row.id == id)
            .expect("row present");
        assert_eq!(row.total, 13);
    }

    #[test]
    fn out_of_band_scores_clamp_before_summing() {
        let mut matrix = DecisionMatrix::attach(store());
        push_row(&mut matrix, "Clamped", 9, SkillsField::Score(0.0), -3);

        // 9 -> 5, score 0 -> 1, -3 -> 1
        assert_eq!(matrix.rows()[0].total, 7);
    }

    #[test]
    fn free_text_without_a_number_contributes_zero() {
        let mut matrix = DecisionMatrix::attach(store());
        push_row(
            &mut matrix,
            "Vague",
            3,
            SkillsField::FreeText("strong writer".to_string()),
            3,
        );

        assert_eq!(matrix.rows()[0].total, 6);
    }

    #[test]
    fn recalculate_is_idempotent() {
        let mut matrix = DecisionMatrix::attach(store());
        push_row(&mut matrix, "A", 4, SkillsField::Score(3.0), 2);
        push_row(
            &mut matrix,
            "B",
            2,
            SkillsField::FreeText("about 3.5 or so".to_string()),
            5,
        );

        matrix.recalculate();
        let first: Vec<i64> = matrix.rows().iter().map(|row| row.total).collect();
        matrix.recalculate();
        let second: Vec<i64> = matrix.rows().iter().map(|row| row.total).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn blank_rows_start_at_total_zero() {
        let mut matrix = DecisionMatrix::attach(store());
        let row = matrix.add_row();
        assert_eq!(row.total, 0);
        assert!(row.name.is_empty());
    }

    #[test]
    fn updating_a_missing_row_is_an_error() {
        let mut matrix = DecisionMatrix::attach(store());
        let result = matrix.update_row("row-999999", RowPatch::default());
        assert!(matches!(result, Err(MatrixError::RowNotFound(_))));
        assert!(matches!(
            matrix.remove_row("row-999999"),
            Err(MatrixError::RowNotFound(_))
        ));
    }
}

mod views {
    use super::common::*;
    use roadmap_tools::tools::matrix::{
        DecisionMatrix, FilterMode, SkillsField, SortDirection, SortKey,
    };

    fn sample_matrix() -> DecisionMatrix {
        let mut matrix = DecisionMatrix::attach(store());
        push_row(&mut matrix, "teaching", 4, SkillsField::Score(4.0), 5); // 13
        push_row(&mut matrix, "Nursing", 5, SkillsField::Score(4.0), 4); // 13
        push_row(&mut matrix, "admin", 2, SkillsField::Score(2.0), 3); // 7
        matrix
    }

    #[test]
    fn sorted_by_total_descending_puts_best_first() {
        let matrix = sample_matrix();
        let view = matrix.sorted_view(SortKey::Total, SortDirection::Desc);
        assert_eq!(view.first().expect("rows present").total, 13);
        assert_eq!(view.last().expect("rows present").name, "admin");
    }

    #[test]
    fn name_sort_ignores_case() {
        let matrix = sample_matrix();
        let view = matrix.sorted_view(SortKey::Name, SortDirection::Asc);
        let names: Vec<&str> = view.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["admin", "Nursing", "teaching"]);
    }

    #[test]
    fn top_score_filter_keeps_all_ties() {
        let matrix = sample_matrix();
        let top = matrix.filtered_view(FilterMode::TopScoreOnly);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|row| row.total == 13));
    }

    #[test]
    fn top_score_filter_on_empty_set_is_empty() {
        let matrix = DecisionMatrix::attach(store());
        assert!(matrix.filtered_view(FilterMode::TopScoreOnly).is_empty());
    }

    #[test]
    fn views_do_not_reorder_the_stored_rows() {
        let matrix = sample_matrix();
        let _ = matrix.sorted_view(SortKey::Total, SortDirection::Asc);
        let names: Vec<&str> = matrix.rows().iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["teaching", "Nursing", "admin"]);
    }
}

mod round_trip {
    use super::common::*;
    use roadmap_tools::tools::matrix::{DecisionMatrix, MatrixImportError, SkillsField};

    #[test]
    fn csv_round_trip_preserves_comma_names() {
        let mut source = DecisionMatrix::attach(store());
        push_row(
            &mut source,
            "Teacher, Foundation Phase",
            4,
            SkillsField::Score(4.0),
            5,
        );
        let csv = source.export_csv().expect("csv encodes");

        let mut target = DecisionMatrix::attach(store());
        let imported = target.import_csv(&csv).expect("csv imports");

        assert_eq!(imported, 1);
        assert_eq!(target.rows()[0].name, "Teacher, Foundation Phase");
        assert_eq!(target.rows()[0].total, 13);
    }

    #[test]
    fn json_round_trip_preserves_free_text_skills() {
        let mut source = DecisionMatrix::attach(store());
        push_row(
            &mut source,
            "HR Officer",
            3,
            SkillsField::FreeText("3 (People Skills)".to_string()),
            4,
        );
        let json = source.export_json().expect("json encodes");

        let mut target = DecisionMatrix::attach(store());
        target.import_json(&json).expect("json imports");

        assert_eq!(
            target.rows()[0].skills,
            SkillsField::FreeText("3 (People Skills)".to_string())
        );
        assert_eq!(target.rows()[0].total, 10);
    }

    #[test]
    fn import_recomputes_totals_rather_than_trusting_them() {
        let mut matrix = DecisionMatrix::attach(store());
        matrix
            .import_json(r#"[{"name":"Inflated","interest":1,"skills":1,"demand":1,"total":999}]"#)
            .expect("json imports");
        assert_eq!(matrix.rows()[0].total, 3);
    }

    #[test]
    fn rejected_import_leaves_state_untouched() {
        let mut matrix = DecisionMatrix::attach(store());
        push_row(&mut matrix, "Keep me", 3, SkillsField::Score(3.0), 3);

        assert!(matches!(
            matrix.import_json(r#"{"rows":[]}"#),
            Err(MatrixImportError::NotAnArray)
        ));
        assert!(matches!(
            matrix.import_json("[42]"),
            Err(MatrixImportError::NotARecord { index: 0 })
        ));
        assert!(matrix.import_csv("not,a,matrix\n1,2").is_err());

        assert_eq!(matrix.rows().len(), 1);
        assert_eq!(matrix.rows()[0].name, "Keep me");
    }

    #[test]
    fn imported_rows_without_ids_get_fresh_ones() {
        let mut matrix = DecisionMatrix::attach(store());
        matrix
            .import_json(r#"[{"name":"A"},{"id":"keep-1","name":"B"}]"#)
            .expect("json imports");
        assert!(!matrix.rows()[0].id.is_empty());
        assert_eq!(matrix.rows()[1].id, "keep-1");
    }
}

mod persistence {
    use super::common::*;
    use roadmap_tools::tools::matrix::{DecisionMatrix, SkillsField};

    #[test]
    fn rows_survive_a_reattach() {
        let store = store();
        let mut matrix = DecisionMatrix::attach(store.clone());
        push_row(&mut matrix, "Persisted", 4, SkillsField::Score(5.0), 4);
        drop(matrix);

        let restored = DecisionMatrix::attach(store);
        assert_eq!(restored.rows().len(), 1);
        assert_eq!(restored.rows()[0].name, "Persisted");
        assert_eq!(restored.rows()[0].total, 13);
    }

    #[test]
    fn attach_or_seed_provides_the_worked_examples() {
        let matrix = DecisionMatrix::attach_or_seed(store());
        assert_eq!(matrix.rows().len(), 2);
        assert_eq!(matrix.rows()[0].name, "Foundation Phase Teacher");
        // 4 + 4 (from "4 (Languages)") + 5
        assert_eq!(matrix.rows()[0].total, 13);
    }

    #[test]
    fn attach_or_seed_respects_existing_rows() {
        let store = store();
        let mut matrix = DecisionMatrix::attach(store.clone());
        push_row(&mut matrix, "Mine", 1, SkillsField::Score(1.0), 1);
        drop(matrix);

        let reattached = DecisionMatrix::attach_or_seed(store);
        assert_eq!(reattached.rows().len(), 1);
        assert_eq!(reattached.rows()[0].name, "Mine");
    }

    #[test]
    fn clear_persists_the_empty_set() {
        let store = store();
        let mut matrix = DecisionMatrix::attach_or_seed(store.clone());
        matrix.clear();
        drop(matrix);

        let restored = DecisionMatrix::attach(store);
        assert!(restored.rows().is_empty());
    }
}
