//! Field validation and normalization for interactive input

use std::fmt;

/// Maximum accepted years of experience for a mechanic
pub const MAX_EXPERIENCE_YEARS: i32 = 99;

/// Validation error for user-entered fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Number above the allowed maximum
    TooLarge { field: &'static str, max: i32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::TooLarge { field, max } => {
                write!(f, "{} cannot be greater than {}", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Closing date in `MM-DD-YYYY` shape.
///
/// Only the delimiter positions and overall length are checked; the
/// components are not required to be a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDate(String);

impl ServiceDate {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let chars: Vec<char> = raw.chars().collect();
        let shaped = chars.len() == 10 && chars[2] == '-' && chars[5] == '-';
        if !shaped {
            return Err(ValidationError::InvalidFormat {
                field: "date",
                reason: "expected month-day-year as MM-DD-YYYY",
            });
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Vehicle identification number, normalized to uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vin(String);

impl Vin {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "vin" });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer last name with its first letter capitalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastName(String);

impl LastName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut chars = raw.chars();
        let Some(first) = chars.next() else {
            return Err(ValidationError::Empty { field: "last name" });
        };
        let mut name: String = first.to_uppercase().collect();
        name.push_str(chars.as_str());
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check a mechanic's years of experience. There is no lower bound.
pub fn check_experience(years: i32) -> Result<i32, ValidationError> {
    if years > MAX_EXPERIENCE_YEARS {
        return Err(ValidationError::TooLarge {
            field: "years of experience",
            max: MAX_EXPERIENCE_YEARS,
        });
    }
    Ok(years)
}

/// Answer to "are you a returning customer?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturningAnswer {
    Yes,
    No,
    /// Anything else; the workflow carries on without enrolling
    Other(String),
}

impl ReturningAnswer {
    /// Exact, case-sensitive match on `yes` / `no`
    pub fn parse(raw: &str) -> Self {
        match raw {
            "yes" => Self::Yes,
            "no" => Self::No,
            other => Self::Other(other.to_owned()),
        }
    }
}
