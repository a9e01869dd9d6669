use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::error::ValidationError;
use crate::models::{AthleteProfile, EvaluationRecord, KeyOutcomes, OUTCOME_SLOTS};
use crate::taxonomy::{AgeGroup, Dimension, Gender, RiskFlag, Status};

/// Raw values as collected by the evaluation form.
#[derive(Debug, Clone, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub athlete_name: String,
    pub gender: Gender,
    pub age_group: AgeGroup,
    pub weight_class: String,
    pub bootcamp_name: Option<String>,
    pub bootcamp_date: Option<NaiveDate>,
    #[serde(default)]
    pub scores: BTreeMap<Dimension, i64>,
    #[serde(default)]
    pub notes: BTreeMap<Dimension, String>,
    #[serde(default)]
    pub risks: Vec<RiskFlag>,
    pub other_risk: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub next_actions: Vec<String>,
}

pub fn load_form(path: &Path) -> anyhow::Result<FormInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form at {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse form JSON in {}", path.display()))
}

pub fn default_bootcamp_name(date: NaiveDate) -> String {
    format!("Boot Camp {}", date.format("%b %Y"))
}

fn fill_slots(
    list: &'static str,
    entries: Vec<String>,
    errors: &mut Vec<ValidationError>,
) -> [String; OUTCOME_SLOTS] {
    if entries.len() > OUTCOME_SLOTS {
        errors.push(ValidationError::TooManyOutcomes {
            list,
            count: entries.len(),
        });
    }

    let mut slots: [String; OUTCOME_SLOTS] = Default::default();
    for (slot, entry) in slots.iter_mut().zip(entries) {
        *slot = entry;
    }
    slots
}

impl FormInput {
    /// Builds a record from the form, reporting every problem at once.
    pub fn into_record(self) -> Result<EvaluationRecord, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let today = Local::now().date_naive();
        let bootcamp_date = self.bootcamp_date.unwrap_or(today);

        let profile = AthleteProfile {
            athlete_name: self.athlete_name,
            gender: self.gender,
            age_group: self.age_group,
            weight_class: self.weight_class,
            bootcamp_name: self
                .bootcamp_name
                .unwrap_or_else(|| default_bootcamp_name(today)),
            bootcamp_date,
        };

        let outcomes = KeyOutcomes {
            achievements: fill_slots("achievements", self.achievements, &mut errors),
            improvements: fill_slots("improvements", self.improvements, &mut errors),
            next_actions: fill_slots("next actions", self.next_actions, &mut errors),
        };

        let mut record = EvaluationRecord::new(profile, self.status, outcomes);

        for (dimension, value) in self.scores {
            if let Err(err) = record.set_score(dimension, value) {
                errors.push(err);
            }
        }
        for (dimension, text) in &self.notes {
            record.set_note(*dimension, text);
        }
        for flag in self.risks {
            record.add_risk(flag);
        }
        record.set_other_risk(self.other_risk);

        errors.extend(record.validate());

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}
