use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::SecondsFormat;

use crate::models::{EvaluationRecord, OUTCOME_SLOTS};
use crate::taxonomy::Dimension;

pub const COLUMNS: [&str; 22] = [
    "Timestamp",
    "Athlete Name",
    "Gender",
    "Weight Class",
    "Age Group",
    "Boot Camp Name",
    "Boot Camp Date",
    "Technical & Tactical",
    "Physical Capacity",
    "Competition Behavior",
    "Competition Readiness",
    "Attendance & Commitment",
    "Status",
    "Risks",
    "Technical Note",
    "Physical Note",
    "Behavior Note",
    "Readiness Note",
    "Attendance Note",
    "Top Achievements",
    "Improvements",
    "Next Actions",
];

/// A record projected onto the export columns, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    cells: Vec<(&'static str, String)>,
}

impl FlatRow {
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }

    #[cfg(test)]
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(name, _)| *name)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, value)| value.as_str())
    }
}

pub fn timestamp(record: &EvaluationRecord) -> String {
    record
        .created_at()
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn join_risks(record: &EvaluationRecord) -> String {
    record.risks().join(", ")
}

/// Joins all slots, empty ones included, so "a |  | c" keeps its shape.
pub fn join_outcomes(entries: &[String; OUTCOME_SLOTS]) -> String {
    entries.join(" | ")
}

/// Logs a warning when a record leaves the app without an athlete name.
/// Both the CSV and the remote path call this.
pub fn warn_if_unnamed(record: &EvaluationRecord) -> bool {
    let unnamed = record.is_unnamed();
    if unnamed {
        tracing::warn!(
            bootcamp = %record.profile.bootcamp_name,
            "exporting evaluation without an athlete name"
        );
    }
    unnamed
}

pub fn to_flat_row(record: &EvaluationRecord) -> FlatRow {
    let profile = &record.profile;
    warn_if_unnamed(record);

    let mut values = vec![
        timestamp(record),
        profile.athlete_name.clone(),
        profile.gender.label().to_string(),
        profile.weight_class.clone(),
        profile.age_group.label().to_string(),
        profile.bootcamp_name.clone(),
        profile.bootcamp_date.to_string(),
    ];
    values.extend(record.scores().map(|(_, score)| score.to_string()));
    values.push(record.status.label().to_string());
    values.push(join_risks(record));
    values.extend(Dimension::ALL.iter().map(|d| record.note(*d).to_string()));
    values.push(join_outcomes(&record.outcomes.achievements));
    values.push(join_outcomes(&record.outcomes.improvements));
    values.push(join_outcomes(&record.outcomes.next_actions));

    FlatRow {
        cells: COLUMNS.iter().copied().zip(values).collect(),
    }
}

pub fn to_csv_bytes(rows: &[FlatRow]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.values())?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush CSV buffer: {}", err.error()))
}

fn sanitize_name(name: &str) -> String {
    let mut cleaned = String::new();
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            cleaned.push(ch);
        } else if !cleaned.ends_with('_') {
            cleaned.push('_');
        }
    }

    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn export_filename(record: &EvaluationRecord) -> String {
    format!(
        "bootcamp_{}_{}.csv",
        sanitize_name(&record.profile.athlete_name),
        record.profile.bootcamp_date
    )
}

pub fn write_csv(record: &EvaluationRecord, dir: &Path) -> anyhow::Result<PathBuf> {
    let bytes = to_csv_bytes(&[to_flat_row(record)])?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_filename(record));
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    tracing::info!(path = %path.display(), "evaluation exported");
    Ok(path)
}
