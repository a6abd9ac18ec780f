//! Integration specifications for the APS calculator and pass advisor.
//!
//! Scenarios cover banding, tier evaluation, the persisted last outcome,
//! and the best-effort clipboard summary.

mod common {
    use std::sync::{Arc, Mutex};

    use roadmap_tools::clipboard::ClipboardSink;
    use roadmap_tools::store::{MemoryBackend, StoreHandle};
    use roadmap_tools::tools::aps::{ApsCalculator, SubjectMarks};

    pub(super) fn store() -> StoreHandle {
        StoreHandle::new(Arc::new(MemoryBackend::default()))
    }

    pub(super) fn calculator() -> ApsCalculator {
        ApsCalculator::attach(store())
    }

    pub(super) fn marks(raw: [&str; 7]) -> SubjectMarks {
        SubjectMarks::from_raw(raw)
    }

    #[derive(Default)]
    pub(super) struct BufferSink {
        captured: Mutex<Vec<String>>,
    }

    impl BufferSink {
        pub(super) fn captured(&self) -> Vec<String> {
            self.captured.lock().expect("lock").clone()
        }
    }

    impl ClipboardSink for BufferSink {
        fn write(&self, text: &str) -> bool {
            self.captured.lock().expect("lock").push(text.to_string());
            true
        }
    }

    pub(super) struct FailingSink;

    impl ClipboardSink for FailingSink {
        fn write(&self, _text: &str) -> bool {
            false
        }
    }
}

mod calculation {
    use super::common::*;
    use roadmap_tools::tools::aps::PassTier;

    #[test]
    fn straight_fifties_meet_every_tier() {
        let outcome = calculator().calculate(marks(["50"; 7]));

        assert_eq!(outcome.marks, [50; 7]);
        assert_eq!(outcome.points, [4; 7]);
        assert_eq!(outcome.total_aps, 28);
        assert_eq!(outcome.pass.tier, PassTier::Bachelors);
        assert!(outcome.pass.bachelors && outcome.pass.diploma && outcome.pass.higher_cert);
        assert!(outcome.pass.advice.is_empty());
    }

    #[test]
    fn banding_floors_at_one_point() {
        let outcome = calculator().calculate(marks(["0", "29", "30", "79", "80", "100", "55"]));
        assert_eq!(outcome.points, [1, 1, 2, 6, 7, 7, 4]);
    }

    #[test]
    fn noisy_input_coerces_to_zero_not_an_error() {
        let outcome = calculator().calculate(marks(["abc", "", "-10", "150", "66", "66", "66"]));
        assert_eq!(outcome.marks, [0, 0, 0, 100, 66, 66, 66]);
    }

    #[test]
    fn weak_home_language_yields_no_tier() {
        let outcome = calculator().calculate(marks(["39"; 7]));
        assert_eq!(outcome.pass.tier, PassTier::None);
        assert!(outcome
            .pass
            .advice
            .iter()
            .any(|line| line.contains("Home Language")));
    }

    #[test]
    fn advice_addresses_only_the_next_tier() {
        // Higher Certificate holds; Diploma needs four subjects at 40%+.
        let outcome = calculator().calculate(marks(["45", "45", "35", "35", "35", "35", "20"]));
        assert_eq!(outcome.pass.tier, PassTier::HigherCertificate);
        assert_eq!(outcome.pass.advice.len(), 1);
        assert!(outcome.pass.advice[0].contains("40%+"));
    }
}

mod summary {
    use super::common::*;

    #[test]
    fn summary_lines_follow_the_export_shape() {
        let outcome = calculator().calculate(marks(["50"; 7]));
        let lines = outcome.summary_lines();

        assert_eq!(lines[0], "APS total: 28");
        assert_eq!(lines[1], "Best eligible pass level: Bachelor's");
        assert_eq!(lines[2], "Meets Bachelor's: Yes");
        assert_eq!(lines[3], "Meets Diploma: Yes");
        assert_eq!(lines[4], "Meets Higher Certificate: Yes");
        assert!(!lines.iter().any(|line| line == "Next steps:"));
    }

    #[test]
    fn summary_appends_next_steps_when_advice_exists() {
        let outcome = calculator().calculate(marks(["39"; 7]));
        let lines = outcome.summary_lines();

        let next_steps = lines
            .iter()
            .position(|line| line == "Next steps:")
            .expect("advice section present");
        assert!(lines[next_steps + 1].starts_with("- "));
    }
}

mod clipboard {
    use super::common::*;
    use roadmap_tools::tools::aps::ApsCalculator;

    #[test]
    fn copy_publishes_the_joined_summary() {
        let store = store();
        let calculator = ApsCalculator::attach(store);
        calculator.calculate(marks(["50"; 7]));

        let sink = BufferSink::default();
        assert!(calculator.copy_summary(&sink));

        let captured = sink.captured();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].starts_with("APS total: 28\n"));
    }

    #[test]
    fn failed_sink_reports_false_without_erroring() {
        let calculator = calculator();
        calculator.calculate(marks(["50"; 7]));
        assert!(!calculator.copy_summary(&FailingSink));
    }

    #[test]
    fn copy_without_an_outcome_reports_false() {
        let sink = BufferSink::default();
        assert!(!calculator().copy_summary(&sink));
        assert!(sink.captured().is_empty());
    }
}

mod persistence {
    use super::common::*;
    use roadmap_tools::tools::aps::ApsCalculator;

    #[test]
    fn last_outcome_survives_a_reattach() {
        let store = store();
        let outcome = ApsCalculator::attach(store.clone()).calculate(marks(["66", "72", "55", "60", "48", "80", "35"]));

        let restored = ApsCalculator::attach(store)
            .last()
            .expect("outcome persisted");
        assert_eq!(restored, outcome);
        assert_eq!(restored.total_aps, 32);
    }

    #[test]
    fn clear_forgets_the_stored_outcome() {
        let store = store();
        let calculator = ApsCalculator::attach(store.clone());
        calculator.calculate(marks(["50"; 7]));
        calculator.clear();

        assert!(ApsCalculator::attach(store).last().is_none());
    }
}
