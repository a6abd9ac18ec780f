use serde::{Deserialize, Serialize};

pub const SUBJECT_COUNT: usize = 7;

/// Coerce a raw form value to an integer percentage. Non-numeric and
/// negative input collapses to 0; anything above 100 clamps down.
pub fn percent(raw: &str) -> u8 {
    let parsed = raw.trim().parse::<f64>().unwrap_or(0.0);
    if !parsed.is_finite() {
        return 0;
    }
    parsed.round().clamp(0.0, 100.0) as u8
}

/// NSC rating scale: percentage mark to APS points. The floor is 1, so a
/// written subject always contributes.
pub fn mark_to_points(mark: u8) -> u8 {
    match mark {
        80..=u8::MAX => 7,
        70..=79 => 6,
        60..=69 => 5,
        50..=59 => 4,
        40..=49 => 3,
        30..=39 => 2,
        _ => 1,
    }
}

/// Ordered qualification outcomes, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassTier {
    None,
    HigherCertificate,
    Diploma,
    Bachelors,
}

impl PassTier {
    pub const fn label(self) -> &'static str {
        match self {
            PassTier::None => "None",
            PassTier::HigherCertificate => "Higher Certificate",
            PassTier::Diploma => "Diploma",
            PassTier::Bachelors => "Bachelor's",
        }
    }
}

/// Outcome of the pass-level rules over one set of marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassEvaluation {
    pub tier: PassTier,
    pub bachelors: bool,
    pub diploma: bool,
    pub higher_cert: bool,
    pub advice: Vec<String>,
}

/// Evaluate the NSC pass-level criteria. The three tier predicates are
/// checked independently against the marks; the reported tier is the
/// highest one that holds.
///
/// Advice is progressive: only the first unmet tier is addressed, so a
/// learner is nudged toward the next milestone rather than the full gap
/// to a Bachelor's pass.
pub fn evaluate_pass_levels(marks: &[u8; SUBJECT_COUNT]) -> PassEvaluation {
    let count_ge = |threshold: u8| marks.iter().filter(|mark| **mark >= threshold).count();

    let pass_6_of_7 = count_ge(30) >= 6;
    let home_language_ok = marks[0] >= 40;

    let ge50 = count_ge(50);
    let ge40 = count_ge(40);
    let ge30 = count_ge(30);

    let bachelors = pass_6_of_7 && home_language_ok && ge50 >= 4 && ge30 >= 6;
    let diploma = pass_6_of_7 && home_language_ok && ge40 >= 4 && ge30 >= 6;
    let higher_cert = pass_6_of_7 && home_language_ok && ge40 >= 2 && ge30 >= 5;

    let mut tier = PassTier::None;
    if higher_cert {
        tier = PassTier::HigherCertificate;
    }
    if diploma {
        tier = PassTier::Diploma;
    }
    if bachelors {
        tier = PassTier::Bachelors;
    }

    let mut advice = Vec::new();
    if !higher_cert {
        if !home_language_ok {
            advice.push("Raise Home Language to at least 40%".to_string());
        }
        if ge40 < 2 {
            advice.push(format!(
                "Have at least 2 subjects at 40%+ (currently {ge40})"
            ));
        }
        if !pass_6_of_7 {
            advice.push("Ensure at least 6 of 7 subjects are 30%+".to_string());
        }
    } else if !diploma {
        if ge40 < 4 {
            advice.push(format!(
                "Increase subjects at 40%+ to at least 4 (currently {ge40})"
            ));
        }
    } else if !bachelors && ge50 < 4 {
        advice.push(format!(
            "Increase subjects at 50%+ to at least 4 (currently {ge50})"
        ));
    }

    PassEvaluation {
        tier,
        bachelors,
        diploma,
        higher_cert,
        advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banding_is_a_step_function() {
        assert_eq!(mark_to_points(0), 1);
        assert_eq!(mark_to_points(29), 1);
        assert_eq!(mark_to_points(30), 2);
        assert_eq!(mark_to_points(79), 6);
        assert_eq!(mark_to_points(80), 7);
        assert_eq!(mark_to_points(100), 7);
    }

    #[test]
    fn percent_coerces_noise_to_safe_values() {
        assert_eq!(percent("66"), 66);
        assert_eq!(percent("  72.6 "), 73);
        assert_eq!(percent("abc"), 0);
        assert_eq!(percent("-5"), 0);
        assert_eq!(percent("150"), 100);
        assert_eq!(percent(""), 0);
    }

    #[test]
    fn straight_fifties_reach_bachelors() {
        let outcome = evaluate_pass_levels(&[50; SUBJECT_COUNT]);
        assert!(outcome.bachelors && outcome.diploma && outcome.higher_cert);
        assert_eq!(outcome.tier, PassTier::Bachelors);
        assert!(outcome.advice.is_empty());
    }

    #[test]
    fn weak_home_language_blocks_every_tier() {
        let outcome = evaluate_pass_levels(&[39; SUBJECT_COUNT]);
        assert_eq!(outcome.tier, PassTier::None);
        assert!(outcome
            .advice
            .iter()
            .any(|line| line.contains("Raise Home Language")));
    }

    #[test]
    fn advice_targets_only_the_next_tier() {
        // Higher Certificate holds (2 subjects at 40%+), Diploma does not.
        let outcome = evaluate_pass_levels(&[45, 45, 35, 35, 35, 35, 20]);
        assert_eq!(outcome.tier, PassTier::HigherCertificate);
        assert_eq!(outcome.advice.len(), 1);
        assert!(outcome.advice[0].contains("40%+ to at least 4"));
    }
}
