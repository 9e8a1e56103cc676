use crate::aggregator::views::{group, CategoryView, ChannelView, RegionView};
use crate::aggregator::AnalysisError;
use crate::models::{AgeSegmentTotals, AnalysisReport, GenderTotals, RawRecord, TransactionRecord};
use crate::types::{AgeBracket, Amount};

/// Computes the sales report for a batch of transactions.
///
/// The aggregator holds no state and performs no I/O; every call works only on
/// the records it is given, so independent calls may run concurrently.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Validates every raw row and then analyses the batch.
    ///
    /// # Errors
    /// Returns `AnalysisError` if any record is missing a field, has an
    /// unparsable number or an unknown gender, or if a running sum overflows.
    /// No partial report is produced.
    pub fn analyze(records: &[RawRecord]) -> Result<AnalysisReport, AnalysisError> {
        let transactions = records.iter()
            .enumerate()
            .map(|(index, record)| record.validate(index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Self::analyze_records(&transactions)
    }

    /// Analyses already validated records. An empty batch yields an empty report.
    pub fn analyze_records(records: &[TransactionRecord]) -> Result<AnalysisReport, AnalysisError> {
        Ok(AnalysisReport {
            channels: group::<ChannelView>(records)?,
            categories: group::<CategoryView>(records)?,
            age_segments: age_segments(records)?,
            gender_stats: gender_totals(records)?,
            regions: group::<RegionView>(records)?,
            total_records: records.len()
        })
    }
}

fn age_segments(records: &[TransactionRecord]) -> Result<AgeSegmentTotals, AnalysisError> {
    let mut totals: [Amount; AgeBracket::COUNT] = [0; AgeBracket::COUNT];

    for record in records {
        let total = &mut totals[AgeBracket::of(record.customer_age).index()];

        *total = total.checked_add(record.total_amount)
            .ok_or_else(|| AnalysisError::overflow("age segment"))?;
    }

    Ok(AgeSegmentTotals::from_totals(totals))
}

fn gender_totals(records: &[TransactionRecord]) -> Result<GenderTotals, AnalysisError> {
    let mut totals = GenderTotals::default();

    for record in records {
        let summary = totals.get_mut(record.customer_gender);

        summary.total_revenue = summary.total_revenue.checked_add(record.total_amount)
            .ok_or_else(|| AnalysisError::overflow("gender"))?;
        summary.transaction_count += 1;
    }

    Ok(totals)
}
