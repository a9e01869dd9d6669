use thiserror::Error;

use crate::taxonomy::{AgeGroup, Dimension, Gender};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("invalid {field} selection: '{value}'")]
    InvalidSelection { field: &'static str, value: String },
}

/// A single problem with an evaluation. Validation collects these rather
/// than stopping at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("weight class '{weight_class}' is not offered for {age_group} {gender}")]
    WeightClassMismatch {
        weight_class: String,
        age_group: AgeGroup,
        gender: Gender,
    },

    #[error("{dimension} score {value} is outside 1-5")]
    OutOfRange { dimension: Dimension, value: i64 },

    #[error("{dimension} note is {length} characters, limit is {limit}")]
    TooLong {
        dimension: Dimension,
        length: usize,
        limit: usize,
    },

    #[error("other risk is checked but has no description")]
    MissingOtherRisk,

    #[error("{list} accepts at most 3 entries, got {count}")]
    TooManyOutcomes { list: &'static str, count: usize },
}

#[derive(Error, Debug)]
#[error("remote append failed")]
pub struct RemoteStoreError {
    #[source]
    pub cause: BoxError,
}

impl RemoteStoreError {
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}
