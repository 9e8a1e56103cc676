use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{AgeBracket, Amount, Gender, Quantity, RecordCount};

/// Sales figures for one marketing channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel: String,
    pub total_revenue: Amount,
    pub transaction_count: RecordCount,
    /// Rounded to whole currency units.
    pub average_purchase_amount: Decimal,
    /// Rounded to one decimal place.
    pub average_discount_rate: Decimal
}

/// Sales figures for one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub total_revenue: Amount,
    pub transaction_count: RecordCount,
    pub average_purchase_amount: Decimal,
    pub total_quantity: Quantity
}

/// Sales figures for one customer region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub region: String,
    pub total_revenue: Amount,
    pub transaction_count: RecordCount,
    pub average_purchase_amount: Decimal
}

/// Revenue per fixed age bracket, always holding all five brackets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeSegmentTotals {
    totals: [Amount; AgeBracket::COUNT]
}

impl AgeSegmentTotals {
    pub fn from_totals(totals: [Amount; AgeBracket::COUNT]) -> Self {
        Self { totals }
    }

    pub fn get(&self, bracket: AgeBracket) -> Amount {
        self.totals[bracket.index()]
    }

    /// Brackets with their revenue, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (AgeBracket, Amount)> + '_ {
        AgeBracket::ALL.into_iter().map(|bracket| (bracket, self.get(bracket)))
    }
}

impl Serialize for AgeSegmentTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.totals.len()))?;

        for (bracket, total) in self.iter() {
            map.serialize_entry(bracket.label(), &total)?;
        }

        map.end()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderSummary {
    pub total_revenue: Amount,
    pub transaction_count: RecordCount
}

/// Revenue and transaction count per gender; both buckets are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderTotals {
    pub male: GenderSummary,
    pub female: GenderSummary
}

impl GenderTotals {
    pub fn get_mut(&mut self, gender: Gender) -> &mut GenderSummary {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female
        }
    }
}

/// The result of analysing one batch of transactions.
///
/// Channel, category and region rows are ordered by total revenue, highest
/// first. Rows with equal revenue keep the order in which their key first
/// appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub channels: Vec<ChannelSummary>,
    pub categories: Vec<CategorySummary>,
    pub age_segments: AgeSegmentTotals,
    pub gender_stats: GenderTotals,
    pub regions: Vec<RegionSummary>,
    pub total_records: usize
}
