use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RemoteStoreError;
use crate::export::{join_outcomes, join_risks, timestamp, warn_if_unnamed};
use crate::models::EvaluationRecord;
use crate::taxonomy::Dimension;

/// Type tag written in the second column. The shared sheet may hold other
/// evaluation kinds under different tags.
pub const RECORD_KIND: &str = "Boot Camp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Appends one row to an append-only sheet. Transport and credentials
/// belong to the implementor.
#[async_trait]
pub trait SheetAppender: Send + Sync {
    async fn append(&self, row: &[Cell]) -> anyhow::Result<()>;
}

pub fn to_remote_row(record: &EvaluationRecord) -> Vec<Cell> {
    let profile = &record.profile;
    let mut row: Vec<Cell> = vec![
        timestamp(record).into(),
        RECORD_KIND.into(),
        profile.athlete_name.clone().into(),
        profile.gender.label().into(),
        profile.weight_class.clone().into(),
        profile.age_group.label().into(),
        profile.bootcamp_name.clone().into(),
        profile.bootcamp_date.to_string().into(),
    ];
    row.extend(record.scores().map(|(_, score)| Cell::Int(score)));
    row.push(record.status.label().into());
    row.push(join_risks(record).into());
    row.extend(Dimension::ALL.iter().map(|d| Cell::from(record.note(*d))));
    row.push(join_outcomes(&record.outcomes.achievements).into());
    row.push(join_outcomes(&record.outcomes.improvements).into());
    row.push(join_outcomes(&record.outcomes.next_actions).into());
    row
}

/// Saves evaluations to the shared sheet. Only constructed when the store
/// is configured; otherwise callers stay local-only.
pub struct RemoteStore<A: SheetAppender> {
    appender: A,
}

impl<A: SheetAppender> RemoteStore<A> {
    pub fn new(appender: A) -> Self {
        Self { appender }
    }

    /// Single attempt, no retry. The record is only read.
    pub async fn append_record(&self, record: &EvaluationRecord) -> Result<(), RemoteStoreError> {
        warn_if_unnamed(record);
        let row = to_remote_row(record);
        match self.appender.append(&row).await {
            Ok(()) => {
                tracing::info!(
                    athlete = %record.profile.athlete_name,
                    cells = row.len(),
                    "evaluation appended to remote store"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "remote append failed");
                Err(RemoteStoreError::new(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_record;
    use crate::taxonomy::RiskFlag;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSheet {
        rows: Mutex<Vec<Vec<Cell>>>,
    }

    #[async_trait]
    impl SheetAppender for RecordingSheet {
        async fn append(&self, row: &[Cell]) -> anyhow::Result<()> {
            self.rows.lock().unwrap().push(row.to_vec());
            Ok(())
        }
    }

    struct FailingSheet;

    #[async_trait]
    impl SheetAppender for FailingSheet {
        async fn append(&self, _row: &[Cell]) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn remote_row_follows_sheet_layout() {
        let mut record = sample_record();
        record.set_score(Dimension::TechnicalTactical, 5).unwrap();
        record.set_note(Dimension::CompetitionReadiness, "Needs 2 G1 events");
        record.add_risk(RiskFlag::PerformanceInconsistency);

        let row = to_remote_row(&record);

        assert_eq!(row.len(), 23);
        assert_eq!(row[0], Cell::from("2026-10-16T09:30:00.000000Z"));
        assert_eq!(row[1], Cell::from("Boot Camp"));
        assert_eq!(row[2], Cell::from("Li Xiaoming"));
        assert_eq!(row[3], Cell::from("Male"));
        assert_eq!(row[4], Cell::from("-68 kg"));
        assert_eq!(row[5], Cell::from("Senior"));
        assert_eq!(row[7], Cell::from("2026-10-12"));
        assert_eq!(&row[8..13], &[Cell::Int(5), Cell::Int(3), Cell::Int(3), Cell::Int(3), Cell::Int(3)]);
        assert_eq!(row[13], Cell::from("Developing"));
        assert_eq!(row[14], Cell::from("Performance Inconsistency"));
        assert_eq!(row[18], Cell::from("Needs 2 G1 events"));
        assert_eq!(row[20], Cell::from(" |  | "));
    }

    #[test]
    fn cells_serialize_as_plain_json_values() {
        let row = vec![Cell::from("Boot Camp"), Cell::Int(4)];
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!(["Boot Camp", 4])
        );
    }

    #[tokio::test]
    async fn append_record_sends_one_row() {
        let store = RemoteStore::new(RecordingSheet::default());
        let record = sample_record();

        store.append_record(&record).await.unwrap();

        let rows = store.appender.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], to_remote_row(&record));
    }

    #[tokio::test]
    async fn failing_collaborator_surfaces_error_and_keeps_record() {
        let store = RemoteStore::new(FailingSheet);
        let record = sample_record();
        let before = record.clone();

        let err = store.append_record(&record).await.unwrap_err();

        assert_eq!(err.to_string(), "remote append failed");
        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "quota exceeded");
        assert_eq!(record, before);
    }

    #[tokio::test]
    async fn unnamed_record_is_still_appended() {
        let store = RemoteStore::new(RecordingSheet::default());
        let mut record = sample_record();
        record.profile.athlete_name = String::new();

        assert!(warn_if_unnamed(&record));
        store.append_record(&record).await.unwrap();

        let rows = store.appender.rows.lock().unwrap();
        assert_eq!(rows[0][2], Cell::from(""));
    }
}
