mod errors;
mod record;
mod report;

pub use errors::RecordError;
pub use record::{RawRecord, TransactionRecord};
pub use report::{
    AgeSegmentTotals,
    AnalysisReport,
    CategorySummary,
    ChannelSummary,
    GenderTotals,
    RegionSummary
};

/// Logical field names, as used in English CSV headers and error messages.
pub mod fields {
    pub const MARKETING_CHANNEL: &str = "marketing_channel";
    pub const PRODUCT_CATEGORY: &str = "product_category";
    pub const TOTAL_AMOUNT: &str = "total_amount";
    pub const DISCOUNT_RATE: &str = "discount_rate";
    pub const QUANTITY: &str = "quantity";
    pub const CUSTOMER_AGE: &str = "customer_age";
    pub const CUSTOMER_GENDER: &str = "customer_gender";
    pub const CUSTOMER_REGION: &str = "customer_region";
}
