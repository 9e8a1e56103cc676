use std::collections::HashMap;

use crate::aggregator::accumulator::GroupAccumulator;
use crate::aggregator::AnalysisError;
use crate::models::{CategorySummary, ChannelSummary, RegionSummary, TransactionRecord};
use crate::types::Amount;

/// A view that groups transactions by a text key and reports one row per key.
///
/// `group` drives every implementation: it creates an accumulator the first
/// time a key is seen, feeds it every record with that key through
/// `accumulate`, turns each accumulator into a row with `finalize` and sorts
/// the rows by `revenue`, highest first.
pub trait GroupedView {
    /// Used in error messages.
    const NAME: &'static str;

    type Summary;

    fn key(record: &TransactionRecord) -> &str;

    /// Returns `None` if a running sum overflows.
    fn accumulate(accumulator: &mut GroupAccumulator, record: &TransactionRecord) -> Option<()> {
        accumulator.add_sale(record)
    }

    fn finalize(key: String, accumulator: &GroupAccumulator) -> Self::Summary;

    fn revenue(summary: &Self::Summary) -> Amount;
}

/// Runs one grouped view over `records`.
///
/// Groups are kept in first-seen order and sorted with a stable sort, so rows
/// with equal revenue stay in the order their keys first appeared.
pub fn group<V: GroupedView>(records: &[TransactionRecord]) -> Result<Vec<V::Summary>, AnalysisError> {
    let mut positions = HashMap::<&str, usize>::new();
    let mut groups = Vec::<(&str, GroupAccumulator)>::new();

    for record in records {
        let key = V::key(record);
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push((key, GroupAccumulator::default()));
            groups.len() - 1
        });

        V::accumulate(&mut groups[position].1, record)
            .ok_or_else(|| AnalysisError::overflow(V::NAME))?;
    }

    let mut summaries: Vec<V::Summary> = groups.into_iter()
        .map(|(key, accumulator)| V::finalize(key.to_string(), &accumulator))
        .collect();

    summaries.sort_by(|left, right| V::revenue(right).cmp(&V::revenue(left)));

    Ok(summaries)
}

pub struct ChannelView;

impl GroupedView for ChannelView {
    const NAME: &'static str = "channel";

    type Summary = ChannelSummary;

    fn key(record: &TransactionRecord) -> &str {
        &record.marketing_channel
    }

    fn accumulate(accumulator: &mut GroupAccumulator, record: &TransactionRecord) -> Option<()> {
        accumulator.add_sale(record)?;
        accumulator.add_discount(record)
    }

    fn finalize(key: String, accumulator: &GroupAccumulator) -> ChannelSummary {
        ChannelSummary {
            channel: key,
            total_revenue: accumulator.total_revenue,
            transaction_count: accumulator.transaction_count,
            average_purchase_amount: accumulator.average_purchase_amount(),
            average_discount_rate: accumulator.average_discount_rate()
        }
    }

    fn revenue(summary: &ChannelSummary) -> Amount {
        summary.total_revenue
    }
}

pub struct CategoryView;

impl GroupedView for CategoryView {
    const NAME: &'static str = "category";

    type Summary = CategorySummary;

    fn key(record: &TransactionRecord) -> &str {
        &record.product_category
    }

    fn accumulate(accumulator: &mut GroupAccumulator, record: &TransactionRecord) -> Option<()> {
        accumulator.add_sale(record)?;
        accumulator.add_quantity(record)
    }

    fn finalize(key: String, accumulator: &GroupAccumulator) -> CategorySummary {
        CategorySummary {
            category: key,
            total_revenue: accumulator.total_revenue,
            transaction_count: accumulator.transaction_count,
            average_purchase_amount: accumulator.average_purchase_amount(),
            total_quantity: accumulator.total_quantity
        }
    }

    fn revenue(summary: &CategorySummary) -> Amount {
        summary.total_revenue
    }
}

pub struct RegionView;

impl GroupedView for RegionView {
    const NAME: &'static str = "region";

    type Summary = RegionSummary;

    fn key(record: &TransactionRecord) -> &str {
        &record.customer_region
    }

    fn finalize(key: String, accumulator: &GroupAccumulator) -> RegionSummary {
        RegionSummary {
            region: key,
            total_revenue: accumulator.total_revenue,
            transaction_count: accumulator.transaction_count,
            average_purchase_amount: accumulator.average_purchase_amount()
        }
    }

    fn revenue(summary: &RegionSummary) -> Amount {
        summary.total_revenue
    }
}
