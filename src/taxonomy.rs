use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum AgeGroup {
    Senior,
    Junior,
    Cadet,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Senior, AgeGroup::Junior, AgeGroup::Cadet];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Senior => "Senior",
            AgeGroup::Junior => "Junior",
            AgeGroup::Cadet => "Cadet",
        }
    }

    /// Age bracket shown next to the label on the form.
    pub fn age_range(self) -> Option<&'static str> {
        match self {
            AgeGroup::Senior => None,
            AgeGroup::Junior => Some("15-17"),
            AgeGroup::Cadet => Some("12-14"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

const SENIOR_MALE: &[&str] = &[
    "-54 kg", "-58 kg", "-63 kg", "-68 kg", "-74 kg", "-80 kg", "-87 kg", "+87 kg",
];
const SENIOR_FEMALE: &[&str] = &[
    "-46 kg", "-49 kg", "-53 kg", "-57 kg", "-62 kg", "-67 kg", "-73 kg", "+73 kg",
];
const JUNIOR_MALE: &[&str] = &[
    "-45 kg", "-48 kg", "-51 kg", "-55 kg", "-59 kg", "-63 kg", "-68 kg", "-73 kg", "-78 kg",
    "+78 kg",
];
const JUNIOR_FEMALE: &[&str] = &[
    "-42 kg", "-44 kg", "-46 kg", "-49 kg", "-52 kg", "-55 kg", "-59 kg", "-63 kg", "-68 kg",
    "+68 kg",
];
const CADET_MALE: &[&str] = &[
    "-33 kg", "-37 kg", "-41 kg", "-45 kg", "-49 kg", "-53 kg", "-57 kg", "-61 kg", "-65 kg",
    "+65 kg",
];
const CADET_FEMALE: &[&str] = &[
    "-29 kg", "-33 kg", "-37 kg", "-41 kg", "-44 kg", "-47 kg", "-51 kg", "-55 kg", "-59 kg",
    "+59 kg",
];

/// Ordered weight classes for an age group and gender, lightest first.
pub fn weight_classes_for(age_group: AgeGroup, gender: Gender) -> &'static [&'static str] {
    match (age_group, gender) {
        (AgeGroup::Senior, Gender::Male) => SENIOR_MALE,
        (AgeGroup::Senior, Gender::Female) => SENIOR_FEMALE,
        (AgeGroup::Junior, Gender::Male) => JUNIOR_MALE,
        (AgeGroup::Junior, Gender::Female) => JUNIOR_FEMALE,
        (AgeGroup::Cadet, Gender::Male) => CADET_MALE,
        (AgeGroup::Cadet, Gender::Female) => CADET_FEMALE,
    }
}

pub fn is_valid_weight_class(age_group: AgeGroup, gender: Gender, weight_class: &str) -> bool {
    weight_classes_for(age_group, gender).contains(&weight_class)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Dimension {
    #[serde(rename = "technical")]
    TechnicalTactical,
    #[serde(rename = "physical")]
    PhysicalCapacity,
    #[serde(rename = "behavior")]
    CompetitionBehavior,
    #[serde(rename = "readiness")]
    CompetitionReadiness,
    #[serde(rename = "attendance")]
    AttendanceCommitment,
}

impl Dimension {
    pub const COUNT: usize = 5;

    /// Canonical order. Chart series, export columns and tie-breaks follow it.
    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::TechnicalTactical,
        Dimension::PhysicalCapacity,
        Dimension::CompetitionBehavior,
        Dimension::CompetitionReadiness,
        Dimension::AttendanceCommitment,
    ];

    pub fn index(self) -> usize {
        match self {
            Dimension::TechnicalTactical => 0,
            Dimension::PhysicalCapacity => 1,
            Dimension::CompetitionBehavior => 2,
            Dimension::CompetitionReadiness => 3,
            Dimension::AttendanceCommitment => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::TechnicalTactical => "Technical & Tactical",
            Dimension::PhysicalCapacity => "Physical Capacity",
            Dimension::CompetitionBehavior => "Competition Behavior",
            Dimension::CompetitionReadiness => "Competition Readiness",
            Dimension::AttendanceCommitment => "Attendance & Commitment",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Dimension::TechnicalTactical => "technical",
            Dimension::PhysicalCapacity => "physical",
            Dimension::CompetitionBehavior => "behavior",
            Dimension::CompetitionReadiness => "readiness",
            Dimension::AttendanceCommitment => "attendance",
        }
    }

    pub fn scope(self) -> &'static str {
        match self {
            Dimension::TechnicalTactical => {
                "Pre-match planning, in-match execution, match control, opponent style adaptation"
            }
            Dimension::PhysicalCapacity => {
                "Training completion, late-training skill quality, fatigue recovery, injury risk"
            }
            Dimension::CompetitionBehavior => {
                "Response to scoring, decisions when behind, coach execution, emotional control"
            }
            Dimension::CompetitionReadiness => {
                "International standard proximity, opponent adaptation, high-intensity tolerance"
            }
            Dimension::AttendanceCommitment => {
                "Attendance rate, key class participation, training attitude, coach cooperation"
            }
        }
    }

    /// Rubric text for score levels 5 down to 1.
    pub fn rubric(self) -> [&'static str; 5] {
        match self {
            Dimension::TechnicalTactical => [
                "Consistent performance, tactical execution above 85%",
                "Mostly good, occasional gaps",
                "Average, tactical execution fluctuates",
                "Unstable, needs improvement",
                "Fundamental skills insufficient",
            ],
            Dimension::PhysicalCapacity => [
                "Full attendance, no quality drop, good recovery",
                "Full or nearly full attendance, slight late drop",
                "Above 80% attendance, visible fatigue",
                "Multiple absences, clear decline",
                "Cannot complete the load, injury risk",
            ],
            Dimension::CompetitionBehavior => [
                "Stable response, quick adjustments, good control",
                "Mostly good, occasional overreaction",
                "Poor in some matches, needs reminding",
                "Multiple impulsive reactions",
                "Unstable, cannot self-adjust",
            ],
            Dimension::CompetitionReadiness => [
                "Fully meets international standard, ready",
                "Mostly compliant, minor adjustments",
                "Near standard, needs 1-2 international matches",
                "Basic but clear gap, not recommended immediately",
                "Large gap, needs long-term development",
            ],
            Dimension::AttendanceCommitment => [
                "100% attendance, full engagement, proactive",
                "Above 95% attendance, minor inattention",
                "80-95% attendance or fluctuating engagement",
                "Below 80% attendance or clear lack of focus",
                "Multiple absences, poor attitude",
            ],
        }
    }

    pub fn rubric_for(self, score: u8) -> Option<&'static str> {
        match score {
            1..=5 => Some(self.rubric()[usize::from(5 - score)]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum RiskFlag {
    InjuryRisk,
    Overtraining,
    PerformanceInconsistency,
    PoorDecisionMaking,
    OpponentAdaptationGap,
}

impl RiskFlag {
    pub const ALL: [RiskFlag; 5] = [
        RiskFlag::InjuryRisk,
        RiskFlag::Overtraining,
        RiskFlag::PerformanceInconsistency,
        RiskFlag::PoorDecisionMaking,
        RiskFlag::OpponentAdaptationGap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskFlag::InjuryRisk => "Injury Risk",
            RiskFlag::Overtraining => "Overtraining",
            RiskFlag::PerformanceInconsistency => "Performance Inconsistency",
            RiskFlag::PoorDecisionMaking => "Poor Decision-Making",
            RiskFlag::OpponentAdaptationGap => "Opponent Adaptation Gap",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            RiskFlag::InjuryRisk => "injury-risk",
            RiskFlag::Overtraining => "overtraining",
            RiskFlag::PerformanceInconsistency => "performance-inconsistency",
            RiskFlag::PoorDecisionMaking => "poor-decision-making",
            RiskFlag::OpponentAdaptationGap => "opponent-adaptation-gap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Status {
    ReadyNow,
    Developing,
    ReAssess,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ReadyNow, Status::Developing, Status::ReAssess];

    pub fn label(self) -> &'static str {
        match self {
            Status::ReadyNow => "Ready Now",
            Status::Developing => "Developing",
            Status::ReAssess => "Re-assess",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Status::ReadyNow => "ready-now",
            Status::Developing => "developing",
            Status::ReAssess => "re-assess",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_label!(AgeGroup, Gender, Dimension, RiskFlag, Status);

fn matches_choice(value: &str, label: &str, key: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case(label) || value.eq_ignore_ascii_case(key)
}

fn parse_choice<T: Copy>(
    field: &'static str,
    value: &str,
    choices: &[T],
    label: impl Fn(T) -> &'static str,
    key: impl Fn(T) -> &'static str,
) -> Result<T, TaxonomyError> {
    choices
        .iter()
        .copied()
        .find(|choice| matches_choice(value, label(*choice), key(*choice)))
        .ok_or_else(|| TaxonomyError::InvalidSelection {
            field,
            value: value.to_string(),
        })
}

impl FromStr for AgeGroup {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("age group", s, &AgeGroup::ALL, AgeGroup::label, AgeGroup::label)
    }
}

impl FromStr for Gender {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("gender", s, &Gender::ALL, Gender::label, Gender::label)
    }
}

impl FromStr for Dimension {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("dimension", s, &Dimension::ALL, Dimension::label, Dimension::key)
    }
}

impl FromStr for RiskFlag {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("risk flag", s, &RiskFlag::ALL, RiskFlag::label, RiskFlag::key)
    }
}

impl FromStr for Status {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("status", s, &Status::ALL, Status::label, Status::key)
    }
}

// Form JSON goes through the same parsers as the CLI.
macro_rules! try_from_string {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = TaxonomyError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )*
    };
}

try_from_string!(AgeGroup, Gender, Dimension, RiskFlag, Status);
