use crate::types::Age;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Fixed customer age brackets used by the age segment view.
///
/// Brackets are ordered, non-overlapping and cover every age.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AgeBracket {
    UpTo25,
    From26To35,
    From36To45,
    From46To55,
    From56
}

impl AgeBracket {
    pub const COUNT: usize = 5;

    pub const ALL: [AgeBracket; Self::COUNT] = [
        AgeBracket::UpTo25,
        AgeBracket::From26To35,
        AgeBracket::From36To45,
        AgeBracket::From46To55,
        AgeBracket::From56
    ];

    pub fn of(age: Age) -> Self {
        match age {
            0..=25 => AgeBracket::UpTo25,
            26..=35 => AgeBracket::From26To35,
            36..=45 => AgeBracket::From36To45,
            46..=55 => AgeBracket::From46To55,
            _ => AgeBracket::From56
        }
    }

    /// Position of the bracket in report order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::UpTo25 => "20s or younger",
            AgeBracket::From26To35 => "26–35",
            AgeBracket::From36To45 => "36–45",
            AgeBracket::From46To55 => "46–55",
            AgeBracket::From56 => "56 or older"
        }
    }
}

impl Display for AgeBracket {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
