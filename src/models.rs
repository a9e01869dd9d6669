use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::taxonomy::{self, AgeGroup, Dimension, Gender, RiskFlag, Status};

pub const NOTE_LIMIT: usize = 100;
pub const DEFAULT_SCORE: u8 = 3;
pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 5;
pub const OUTCOME_SLOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub athlete_name: String,
    pub gender: Gender,
    pub age_group: AgeGroup,
    pub weight_class: String,
    pub bootcamp_name: String,
    pub bootcamp_date: NaiveDate,
}

/// The three "key outcomes" lists. Slots keep their position even when
/// empty so exports line up column for column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOutcomes {
    pub achievements: [String; OUTCOME_SLOTS],
    pub improvements: [String; OUTCOME_SLOTS],
    pub next_actions: [String; OUTCOME_SLOTS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOutcome {
    Stored,
    Truncated { original_len: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub profile: AthleteProfile,
    pub status: Status,
    pub outcomes: KeyOutcomes,
    scores: [i64; Dimension::COUNT],
    notes: [String; Dimension::COUNT],
    risk_flags: BTreeSet<RiskFlag>,
    other_risk: Option<String>,
    created_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn new(profile: AthleteProfile, status: Status, outcomes: KeyOutcomes) -> Self {
        Self::new_at(profile, status, outcomes, Utc::now())
    }

    pub fn new_at(
        profile: AthleteProfile,
        status: Status,
        outcomes: KeyOutcomes,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            profile,
            status,
            outcomes,
            scores: [i64::from(DEFAULT_SCORE); Dimension::COUNT],
            notes: Default::default(),
            risk_flags: BTreeSet::new(),
            other_risk: None,
            created_at,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_unnamed(&self) -> bool {
        self.profile.athlete_name.trim().is_empty()
    }

    pub fn score(&self, dimension: Dimension) -> i64 {
        self.scores[dimension.index()]
    }

    /// Scores in canonical dimension order.
    pub fn scores(&self) -> impl Iterator<Item = (Dimension, i64)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.score(dimension)))
    }

    pub fn note(&self, dimension: Dimension) -> &str {
        &self.notes[dimension.index()]
    }

    pub fn set_score(&mut self, dimension: Dimension, value: i64) -> Result<(), ValidationError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::OutOfRange { dimension, value });
        }
        self.scores[dimension.index()] = value;
        Ok(())
    }

    /// Stores a coach note, cutting it to the first 100 characters if it
    /// runs over. The form widget caps input the same way.
    pub fn set_note(&mut self, dimension: Dimension, text: &str) -> NoteOutcome {
        let original_len = text.chars().count();
        if original_len <= NOTE_LIMIT {
            self.notes[dimension.index()] = text.to_string();
            return NoteOutcome::Stored;
        }

        tracing::warn!(
            dimension = dimension.key(),
            original_len,
            limit = NOTE_LIMIT,
            "note truncated"
        );
        self.notes[dimension.index()] = text.chars().take(NOTE_LIMIT).collect();
        NoteOutcome::Truncated { original_len }
    }

    pub fn add_risk(&mut self, flag: RiskFlag) {
        self.risk_flags.insert(flag);
    }

    pub fn remove_risk(&mut self, flag: RiskFlag) {
        self.risk_flags.remove(&flag);
    }

    /// `Some` marks the "other risk" box as checked; the text is checked by
    /// [`EvaluationRecord::validate`].
    pub fn set_other_risk(&mut self, text: Option<String>) {
        self.other_risk = text;
    }

    /// Risk labels in display order: checked flags first, then the free-text
    /// risk unless it repeats a checked flag.
    pub fn risks(&self) -> Vec<String> {
        let mut risks: Vec<String> = RiskFlag::ALL
            .into_iter()
            .filter(|flag| self.risk_flags.contains(flag))
            .map(|flag| flag.label().to_string())
            .collect();

        if let Some(other) = self.other_risk.as_deref().map(str::trim) {
            let duplicate = risks.iter().any(|risk| risk.eq_ignore_ascii_case(other));
            if !other.is_empty() && !duplicate {
                risks.push(other.to_string());
            }
        }

        risks
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let profile = &self.profile;

        if !taxonomy::is_valid_weight_class(profile.age_group, profile.gender, &profile.weight_class)
        {
            errors.push(ValidationError::WeightClassMismatch {
                weight_class: profile.weight_class.clone(),
                age_group: profile.age_group,
                gender: profile.gender,
            });
        }

        for (dimension, value) in self.scores() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                errors.push(ValidationError::OutOfRange { dimension, value });
            }
        }

        for dimension in Dimension::ALL {
            let length = self.note(dimension).chars().count();
            if length > NOTE_LIMIT {
                errors.push(ValidationError::TooLong {
                    dimension,
                    length,
                    limit: NOTE_LIMIT,
                });
            }
        }

        if let Some(other) = &self.other_risk {
            if other.trim().is_empty() {
                errors.push(ValidationError::MissingOtherRisk);
            }
        }

        errors
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn sample_profile() -> AthleteProfile {
        AthleteProfile {
            athlete_name: "Li Xiaoming".to_string(),
            gender: Gender::Male,
            age_group: AgeGroup::Senior,
            weight_class: "-68 kg".to_string(),
            bootcamp_name: "Boot Camp Oct 2026".to_string(),
            bootcamp_date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
        }
    }

    pub(crate) fn sample_record() -> EvaluationRecord {
        let created_at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        EvaluationRecord::new_at(
            sample_profile(),
            Status::Developing,
            KeyOutcomes::default(),
            created_at,
        )
    }

    #[test]
    fn new_record_defaults_every_score_to_three() {
        let record = sample_record();
        assert!(record.scores().all(|(_, score)| score == 3));
        assert_eq!(record.scores().count(), Dimension::COUNT);
        assert!(record.validate().is_empty());
    }

    #[test]
    fn set_score_rejects_out_of_range_and_keeps_previous() {
        let mut record = sample_record();
        record.set_score(Dimension::PhysicalCapacity, 5).unwrap();

        let err = record.set_score(Dimension::PhysicalCapacity, 6).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                dimension: Dimension::PhysicalCapacity,
                value: 6,
            }
        );
        assert!(record.set_score(Dimension::PhysicalCapacity, 0).is_err());
        assert_eq!(record.score(Dimension::PhysicalCapacity), 5);
    }

    #[test]
    fn long_note_is_truncated_to_limit() {
        let mut record = sample_record();
        let text = "x".repeat(130);

        let outcome = record.set_note(Dimension::CompetitionBehavior, &text);

        assert_eq!(outcome, NoteOutcome::Truncated { original_len: 130 });
        assert_eq!(record.note(Dimension::CompetitionBehavior).chars().count(), NOTE_LIMIT);
        assert!(record.validate().is_empty());
    }

    #[test]
    fn note_limit_counts_characters_not_bytes() {
        let mut record = sample_record();
        let text = "傷".repeat(NOTE_LIMIT);

        assert_eq!(record.set_note(Dimension::PhysicalCapacity, &text), NoteOutcome::Stored);
        assert_eq!(record.note(Dimension::PhysicalCapacity), text);
    }

    #[test]
    fn adding_same_risk_twice_is_idempotent() {
        let mut record = sample_record();
        record.add_risk(RiskFlag::Overtraining);
        record.add_risk(RiskFlag::Overtraining);
        assert_eq!(record.risks().len(), 1);

        record.remove_risk(RiskFlag::Overtraining);
        record.remove_risk(RiskFlag::Overtraining);
        assert!(record.risks().is_empty());
    }

    #[test]
    fn risks_follow_flag_order_then_other() {
        let mut record = sample_record();
        record.add_risk(RiskFlag::OpponentAdaptationGap);
        record.add_risk(RiskFlag::InjuryRisk);
        record.set_other_risk(Some("Weight cut stress".to_string()));

        assert_eq!(
            record.risks(),
            vec!["Injury Risk", "Opponent Adaptation Gap", "Weight cut stress"]
        );
    }

    #[test]
    fn other_risk_repeating_a_flag_is_collapsed() {
        let mut record = sample_record();
        record.add_risk(RiskFlag::Overtraining);
        record.set_other_risk(Some(" overtraining ".to_string()));

        assert_eq!(record.risks(), vec!["Overtraining"]);
    }

    #[test]
    fn other_risk_naming_an_unchecked_flag_is_kept() {
        let mut record = sample_record();
        record.set_other_risk(Some("Overtraining".to_string()));

        assert_eq!(record.risks(), vec!["Overtraining"]);
    }

    #[test]
    fn blank_athlete_name_counts_as_unnamed() {
        let mut record = sample_record();
        assert!(!record.is_unnamed());

        record.profile.athlete_name = " \t".to_string();
        assert!(record.is_unnamed());
    }

    #[test]
    fn validate_collects_every_violation() {
        let mut record = sample_record();
        record.profile.weight_class = "-46 kg".to_string();
        record.scores[Dimension::CompetitionReadiness.index()] = 9;
        record.notes[Dimension::AttendanceCommitment.index()] = "y".repeat(101);
        record.set_other_risk(Some("   ".to_string()));

        let errors = record.validate();

        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::WeightClassMismatch { .. }));
        assert_eq!(
            errors[1],
            ValidationError::OutOfRange {
                dimension: Dimension::CompetitionReadiness,
                value: 9,
            }
        );
        assert_eq!(
            errors[2],
            ValidationError::TooLong {
                dimension: Dimension::AttendanceCommitment,
                length: 101,
                limit: NOTE_LIMIT,
            }
        );
        assert_eq!(errors[3], ValidationError::MissingOtherRisk);
    }

    #[test]
    fn deserialized_record_is_revalidated() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        value["scores"][0] = serde_json::json!(7);
        let record: EvaluationRecord = serde_json::from_value(value).unwrap();

        assert_eq!(
            record.validate(),
            vec![ValidationError::OutOfRange {
                dimension: Dimension::TechnicalTactical,
                value: 7,
            }]
        );
    }
}
