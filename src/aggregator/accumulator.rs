use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::TransactionRecord;
use crate::types::{Amount, Quantity, RecordCount};

/// Running sums for one group of a grouped view.
///
/// Accumulators only exist once a record has been added, so `transaction_count`
/// is never zero when an average is taken.
#[derive(Debug, Clone, Default)]
pub struct GroupAccumulator {
    pub total_revenue: Amount,
    pub transaction_count: RecordCount,
    pub discount_sum: Decimal,
    pub total_quantity: Quantity
}

impl GroupAccumulator {
    /// Adds the revenue of a sale and counts it. Returns `None` on overflow.
    pub fn add_sale(&mut self, record: &TransactionRecord) -> Option<()> {
        self.total_revenue = self.total_revenue.checked_add(record.total_amount)?;
        self.transaction_count = self.transaction_count.checked_add(1)?;

        Some(())
    }

    pub fn add_discount(&mut self, record: &TransactionRecord) -> Option<()> {
        self.discount_sum = self.discount_sum.checked_add(record.discount_rate)?;

        Some(())
    }

    pub fn add_quantity(&mut self, record: &TransactionRecord) -> Option<()> {
        self.total_quantity = self.total_quantity.checked_add(record.quantity)?;

        Some(())
    }

    /// Mean revenue per transaction, rounded to whole currency units.
    pub fn average_purchase_amount(&self) -> Decimal {
        average(Decimal::from(self.total_revenue), self.transaction_count, 0)
    }

    /// Mean discount rate per transaction, rounded to one decimal place.
    pub fn average_discount_rate(&self) -> Decimal {
        average(self.discount_sum, self.transaction_count, 1)
    }
}

/// Divides exactly, then rounds half to even and pads to `decimal_places`.
fn average(sum: Decimal, count: RecordCount, decimal_places: u32) -> Decimal {
    let mut average = (sum / Decimal::from(count))
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);

    average.rescale(decimal_places);
    average
}
