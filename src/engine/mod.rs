mod analysis_engine;
mod errors;

pub use analysis_engine::AnalysisEngine;
pub use errors::IngestError;
