use serde::{Deserialize, Serialize};

pub(crate) const MIN_SCORE: i64 = 1;
pub(crate) const MAX_SCORE: i64 = 5;

pub(crate) fn clamp_score(value: i64) -> i64 {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Skills rating as captured from the form: either a bounded score or
/// free text carrying an embedded number ("4 (Languages)").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    Score(f64),
    FreeText(String),
}

impl SkillsField {
    /// Points this field contributes to the row total. A score clamps to
    /// the 1-5 band; free text yields its first embedded number, 0 when
    /// none is present.
    pub fn points(&self) -> i64 {
        match self {
            SkillsField::Score(value) => clamp_score(value.round() as i64),
            SkillsField::FreeText(text) => embedded_number(text).round() as i64,
        }
    }
}

impl Default for SkillsField {
    fn default() -> Self {
        SkillsField::FreeText(String::new())
    }
}

/// First signed integer or decimal embedded in the text, 0 when absent.
pub fn embedded_number(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let digit_here = bytes[i].is_ascii_digit();
        let signed_digit = bytes[i] == b'-'
            && bytes
                .get(i + 1)
                .map_or(false, |next| next.is_ascii_digit());
        if digit_here || signed_digit {
            let start = i;
            if bytes[i] == b'-' {
                i += 1;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len()
                && bytes[i] == b'.'
                && bytes
                    .get(i + 1)
                    .map_or(false, |next| next.is_ascii_digit())
            {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            return text[start..i].parse().unwrap_or(0.0);
        }
        i += 1;
    }
    0.0
}

/// One scoreable career option in the decision matrix.
///
/// `total` is derived; every mutation path recomputes it and nothing else
/// may write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub interest: i64,
    #[serde(default)]
    pub skills: SkillsField,
    #[serde(default)]
    pub demand: i64,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub funding: String,
    #[serde(default)]
    pub total: i64,
}

impl MatrixRow {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            interest: 0,
            skills: SkillsField::default(),
            demand: 0,
            qualification: String::new(),
            funding: String::new(),
            total: 0,
        }
    }

    pub fn computed_total(&self) -> i64 {
        clamp_score(self.interest) + self.skills.points() + clamp_score(self.demand)
    }
}

/// Partial update applied to one row; untouched fields stay as stored.
#[derive(Debug, Default, Clone)]
pub struct RowPatch {
    pub name: Option<String>,
    pub interest: Option<i64>,
    pub skills: Option<SkillsField>,
    pub demand: Option<i64>,
    pub qualification: Option<String>,
    pub funding: Option<String>,
}

impl RowPatch {
    pub(crate) fn apply(self, row: &mut MatrixRow) {
        if let Some(name) = self.name {
            row.name = name;
        }
        if let Some(interest) = self.interest {
            row.interest = interest;
        }
        if let Some(skills) = self.skills {
            row.skills = skills;
        }
        if let Some(demand) = self.demand {
            row.demand = demand;
        }
        if let Some(qualification) = self.qualification {
            row.qualification = qualification;
        }
        if let Some(funding) = self.funding {
            row.funding = funding;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_number_finds_first_match() {
        assert_eq!(embedded_number("4 (Languages)"), 4.0);
        assert_eq!(embedded_number("about 3.5 or so"), 3.5);
        assert_eq!(embedded_number("minus -2 allowed"), -2.0);
        assert_eq!(embedded_number("no digits here"), 0.0);
        assert_eq!(embedded_number(""), 0.0);
    }

    #[test]
    fn score_points_clamp_to_band() {
        assert_eq!(SkillsField::Score(9.0).points(), 5);
        assert_eq!(SkillsField::Score(0.0).points(), 1);
        assert_eq!(SkillsField::Score(3.4).points(), 3);
    }

    #[test]
    fn free_text_points_are_unclamped() {
        assert_eq!(SkillsField::FreeText("8 (all of them)".into()).points(), 8);
        assert_eq!(SkillsField::FreeText("strong writer".into()).points(), 0);
    }
}
