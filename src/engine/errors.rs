use thiserror::Error;
use tokio::task::JoinError;

use crate::aggregator::AnalysisError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Only CSV files can be analysed: [{path}]")]
    NotCsv {
        path: String
    },
    #[error("File [{path}] is {size} bytes which exceeds the limit of {limit} bytes")]
    PayloadTooLarge {
        path: String,
        size: u64,
        limit: u64
    },
    #[error("Could not read [{path}]: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("CSV deserialization error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Analysis task did not complete: {0}")]
    Task(#[from] JoinError)
}
