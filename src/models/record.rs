use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::models::errors::RecordError;
use crate::models::fields;
use crate::types::{Age, Amount, Gender, Quantity};

/// Represents a single row from the input CSV file, exactly as decoded.
///
/// Every field is optional text so that a missing column or an empty cell
/// surfaces as a [`RecordError`] during validation instead of a decode error.
/// Label fields keep an empty cell as `Some("")`; only an absent column or a
/// short row leaves them `None`.
/// Headers may use the English field names or the Korean ones used by point-of-sale exports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "marketing_channel", alias = "마케팅채널", default, deserialize_with = "present_label")]
    pub marketing_channel: Option<String>,
    #[serde(rename = "product_category", alias = "카테고리", default, deserialize_with = "present_label")]
    pub product_category: Option<String>,
    #[serde(rename = "total_amount", alias = "총금액")]
    pub total_amount: Option<String>,
    #[serde(rename = "discount_rate", alias = "할인율")]
    pub discount_rate: Option<String>,
    #[serde(rename = "quantity", alias = "수량")]
    pub quantity: Option<String>,
    #[serde(rename = "customer_age", alias = "고객연령")]
    pub customer_age: Option<String>,
    #[serde(rename = "customer_gender", alias = "고객성별")]
    pub customer_gender: Option<String>,
    #[serde(rename = "customer_region", alias = "고객지역", default, deserialize_with = "present_label")]
    pub customer_region: Option<String>
}

/// A validated sales transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub marketing_channel: String,
    pub product_category: String,
    /// Total charge in whole currency units.
    pub total_amount: Amount,
    pub discount_rate: Decimal,
    pub quantity: Quantity,
    pub customer_age: Age,
    pub customer_gender: Gender,
    pub customer_region: String
}

impl RawRecord {
    /// Converts the raw row into a [`TransactionRecord`].
    ///
    /// `record` is the 1-based data row number, used only for error reporting.
    ///
    /// # Errors
    /// - `MalformedRecord` if a field is missing or a numeric field does not parse.
    /// - `UnknownCategoryValue` if the gender is outside the closed set.
    pub fn validate(&self, record: usize) -> Result<TransactionRecord, RecordError> {
        let marketing_channel = label(&self.marketing_channel, record, fields::MARKETING_CHANNEL)?;
        let product_category = label(&self.product_category, record, fields::PRODUCT_CATEGORY)?;
        let total_amount = parse_number(&self.total_amount, record, fields::TOTAL_AMOUNT)?;
        let discount_rate = parse_rate(&self.discount_rate, record, fields::DISCOUNT_RATE)?;
        let quantity = parse_number(&self.quantity, record, fields::QUANTITY)?;
        let customer_age = parse_number(&self.customer_age, record, fields::CUSTOMER_AGE)?;
        let gender = required(&self.customer_gender, record, fields::CUSTOMER_GENDER)?;
        let customer_region = label(&self.customer_region, record, fields::CUSTOMER_REGION)?;

        let customer_gender = Gender::from_str(gender)
            .map_err(|_| RecordError::unknown_value(record, fields::CUSTOMER_GENDER, gender))?;

        Ok(TransactionRecord {
            marketing_channel: marketing_channel.to_string(),
            product_category: product_category.to_string(),
            total_amount,
            discount_rate,
            quantity,
            customer_age,
            customer_gender,
            customer_region: customer_region.to_string()
        })
    }
}

/// Keeps an empty cell as an empty label instead of treating it as absent.
fn present_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Group keys may be empty, but the column itself must be present.
fn label<'a>(value: &'a Option<String>, record: usize, field: &'static str) -> Result<&'a str, RecordError> {
    value.as_deref()
        .map(str::trim)
        .ok_or_else(|| RecordError::missing_field(record, field))
}

fn required<'a>(value: &'a Option<String>, record: usize, field: &'static str) -> Result<&'a str, RecordError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::missing_field(record, field))
    }
}

fn parse_number<T>(value: &Option<String>, record: usize, field: &'static str) -> Result<T, RecordError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = required(value, record, field)?;

    value.parse().map_err(|error| RecordError::unparsable(record, field, value, error))
}

fn parse_rate(value: &Option<String>, record: usize, field: &'static str) -> Result<Decimal, RecordError> {
    let value = required(value, record, field)?;

    //NOTE: Exported spreadsheets occasionally write small rates in exponent form (e.g. 5e-1)
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|error| RecordError::unparsable(record, field, value, error))
}
