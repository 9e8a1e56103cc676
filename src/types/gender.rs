use crate::types::GenderError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MALE_LOCALE: &str = "남성";
const FEMALE_LOCALE: &str = "여성";

/// Customer gender as reported by the point of sale.
///
/// The set is closed. Source files label genders in Korean (`남성`, `여성`);
/// English labels are accepted in any case.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Gender {
    Male,
    Female
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female"
        }
    }
}

impl Display for Gender {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = GenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value == MALE_LOCALE || value.eq_ignore_ascii_case("male") {
            return Ok(Gender::Male);
        }

        if value == FEMALE_LOCALE || value.eq_ignore_ascii_case("female") {
            return Ok(Gender::Female);
        }

        Err(GenderError::Unknown(value.to_string()))
    }
}
