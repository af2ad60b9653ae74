//! Bed and bed+needle tokens.
//!
//! A bed is written as one of:
//!
//! ```text
//! f   b   f-  f+  b-  b+
//! fs  bs  fs- fs+ bs- bs+
//! ```
//!
//! A needle location concatenates the bed with a decimal needle index,
//! e.g. `f10`, `bs-3`.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Front or back needle bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Front,
    Back,
}

/// Explicit sign suffix on a bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarity {
    Plus,
    Minus,
}

/// A bed specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed {
    side: Side,
    slider: bool,
    polarity: Option<Polarity>,
}

impl Bed {
    pub const FRONT: Bed = Bed::new(Side::Front, false, None);
    pub const BACK: Bed = Bed::new(Side::Back, false, None);
    pub const FRONT_SLIDER: Bed = Bed::new(Side::Front, true, None);
    pub const BACK_SLIDER: Bed = Bed::new(Side::Back, true, None);

    pub const fn new(side: Side, slider: bool, polarity: Option<Polarity>) -> Self {
        Self {
            side,
            slider,
            polarity,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_slider(&self) -> bool {
        self.slider
    }

    pub fn polarity(&self) -> Option<Polarity> {
        self.polarity
    }

    /// Parses a bed specification.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let invalid = || CodecError::InvalidBedSpec(s.to_string());
        let mut chars = s.chars();

        let side = match chars.next() {
            Some('f') => Side::Front,
            Some('b') => Side::Back,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (slider, sign) = match rest.strip_prefix('s') {
            Some(sign) => (true, sign),
            None => (false, rest),
        };

        let polarity = match sign {
            "" => None,
            "+" => Some(Polarity::Plus),
            "-" => Some(Polarity::Minus),
            _ => return Err(invalid()),
        };

        Ok(Self::new(side, slider, polarity))
    }
}

impl fmt::Display for Bed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.side {
            Side::Front => "f",
            Side::Back => "b",
        })?;
        if self.slider {
            f.write_str("s")?;
        }
        match self.polarity {
            Some(Polarity::Plus) => f.write_str("+"),
            Some(Polarity::Minus) => f.write_str("-"),
            None => Ok(()),
        }
    }
}

impl FromStr for Bed {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A needle location: bed plus non-negative needle index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BedNeedle {
    bed: Bed,
    needle: u32,
}

impl BedNeedle {
    pub const fn from_parts(bed: Bed, needle: u32) -> Self {
        Self { bed, needle }
    }

    /// Builds a location from a bed string and a signed needle index.
    pub fn new(bed: &str, needle: i64) -> Result<Self, CodecError> {
        let bed = Bed::parse(bed)?;
        let needle = u32::try_from(needle)
            .map_err(|_| CodecError::InvalidNeedleIndex(needle.to_string()))?;
        Ok(Self { bed, needle })
    }

    /// Parses a combined `<bed><needle>` token.
    ///
    /// Everything before the first decimal digit is the bed; everything from
    /// that digit on must be a plain decimal integer.
    pub fn parse(token: &str) -> Result<Self, CodecError> {
        let pos = token
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| CodecError::InvalidBedNeedleFormat(token.to_string()))?;

        let (bed, digits) = token.split_at(pos);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CodecError::InvalidBedNeedleFormat(token.to_string()));
        }

        let bed = Bed::parse(bed)?;
        let needle = digits
            .parse::<u32>()
            .map_err(|_| CodecError::InvalidNeedleIndex(digits.to_string()))?;

        Ok(Self { bed, needle })
    }

    pub fn bed(&self) -> Bed {
        self.bed
    }

    pub fn needle(&self) -> u32 {
        self.needle
    }
}

impl fmt::Display for BedNeedle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bed, self.needle)
    }
}

impl FromStr for BedNeedle {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BedNeedle {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<BedNeedle> for String {
    fn from(bn: BedNeedle) -> Self {
        bn.to_string()
    }
}
