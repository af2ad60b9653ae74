//! Carriage direction tokens.

use crate::error::CodecError;
use std::fmt;
use std::str::FromStr;

/// Direction of a carriage pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `+`: towards increasing needle numbers.
    Increasing,
    /// `-`: towards decreasing needle numbers.
    Decreasing,
}

impl Direction {
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        match s {
            "+" => Ok(Direction::Increasing),
            "-" => Ok(Direction::Decreasing),
            _ => Err(CodecError::InvalidDirection(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Increasing => "+",
            Direction::Decreasing => "-",
        }
    }

    /// Returns the opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
