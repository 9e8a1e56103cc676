use thiserror::Error;

use crate::models::RecordError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("Numeric overflow occurred while aggregating the [{view}] view")]
    Overflow {
        view: &'static str
    }
}

impl AnalysisError {
    pub fn overflow(view: &'static str) -> Self {
        Self::Overflow { view }
    }
}
