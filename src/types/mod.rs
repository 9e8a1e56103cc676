mod age_bracket;
mod errors;
mod gender;

pub use age_bracket::AgeBracket;
pub use errors::GenderError;
pub use gender::Gender;

pub type Amount = i64;
pub type Quantity = u64;
pub type Age = u32;
pub type RecordCount = u64;
