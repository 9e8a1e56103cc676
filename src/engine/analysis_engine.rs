use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tokio::task::spawn_blocking;
use tracing::{debug, info};

use crate::aggregator::SalesAggregator;
use crate::engine::IngestError;
use crate::models::{AnalysisReport, RawRecord};

const DEFAULT_MAX_PAYLOAD: u64 = 16 * 1024 * 1024;

/// Loads a sales CSV file and produces its [`AnalysisReport`].
///
/// The whole file is decoded before analysis starts. Each `run` is independent,
/// so one engine can serve any number of files concurrently.
pub struct AnalysisEngine {
    max_payload: u64,
    check_extension: bool
}

impl AnalysisEngine {
    /// Creates an engine accepting `.csv` files of up to 16 MiB.
    pub fn new() -> Self {
        Self {
            max_payload: DEFAULT_MAX_PAYLOAD,
            check_extension: true
        }
    }

    /// Sets the largest file size, in bytes, the engine will read.
    pub fn with_max_payload(mut self, bytes: u64) -> Self {
        self.max_payload = bytes;
        self
    }

    /// Enables or disables the `.csv` file extension check.
    #[cfg(test)]
    pub fn with_extension_check(mut self, enabled: bool) -> Self {
        self.check_extension = enabled;
        self
    }

    /// Validates, decodes and analyses the file at `path`.
    ///
    /// Decoding and aggregation run on the blocking thread pool.
    ///
    /// # Errors
    /// Returns `IngestError` if the file is not a CSV file, is too large or
    /// cannot be read, if any row fails to decode, or if the analysis itself fails.
    /// Nothing is returned for a partially valid file.
    pub async fn run(&self, path: &Path) -> Result<AnalysisReport, IngestError> {
        if self.check_extension && !has_csv_extension(path) {
            return Err(IngestError::NotCsv { path: path.display().to_string() });
        }

        let metadata = tokio::fs::metadata(path).await
            .map_err(|source| IngestError::Io { path: path.display().to_string(), source })?;

        if metadata.len() > self.max_payload {
            return Err(IngestError::PayloadTooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: self.max_payload
            });
        }

        info!("Analysing [{}] ({} bytes)", path.display(), metadata.len());

        let path = path.to_path_buf();
        let report = spawn_blocking(move || -> Result<AnalysisReport, IngestError> {
            let records = read_records(&path)?;
            debug!("Decoded {} records from [{}]", records.len(), path.display());

            Ok(SalesAggregator::analyze(&records)?)
        }).await??;

        info!("Analysed {} records", report.total_records);

        Ok(report)
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
}

fn read_records(path: &Path) -> Result<Vec<RawRecord>, IngestError> {
    let file = File::open(path)
        .map_err(|source| IngestError::Io { path: path.display().to_string(), source })?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let records = reader.deserialize::<RawRecord>().collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}
