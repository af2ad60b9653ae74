//! Knitout operations and their canonical text lines.
//!
//! Each [`Operation`] formats as exactly one line of a knitout document
//! (without the trailing newline):
//!
//! ```text
//! in A B
//! knit + f10 A
//! split - b3 f3 A
//! xfer f20 b20
//! rack 0.25
//! x-presser-mode auto
//! ;a comment
//! pause
//! ```

use crate::bed::BedNeedle;
use crate::direction::Direction;
use crate::COMMENT_PREFIX;
use std::fmt;
use std::str::FromStr;

/// Fabric presser mode (`x-presser-mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresserMode {
    On,
    Off,
    Auto,
}

impl PresserMode {
    pub const ALL: [PresserMode; 3] = [PresserMode::On, PresserMode::Off, PresserMode::Auto];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresserMode::On => "on",
            PresserMode::Off => "off",
            PresserMode::Auto => "auto",
        }
    }
}

impl fmt::Display for PresserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresserMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A single knitout instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    // Carrier handling
    In(Vec<String>),
    Inhook(Vec<String>),
    Releasehook(Vec<String>),
    Out(Vec<String>),
    Outhook(Vec<String>),

    // Stitch settings and machine extensions
    Stitch { before: u32, after: u32 },
    StitchNumber(u32),
    PresserMode(PresserMode),
    SpeedNumber(u32),
    RollerAdvance(u32),
    AddRollerAdvance(i64),
    CarrierSpacing(u32),
    CarrierStoppingDistance(u32),

    // Needle operations
    Rack(f64),
    Knit {
        direction: Direction,
        at: BedNeedle,
        carriers: Vec<String>,
    },
    Tuck {
        direction: Direction,
        at: BedNeedle,
        carriers: Vec<String>,
    },
    Split {
        direction: Direction,
        from: BedNeedle,
        to: BedNeedle,
        carriers: Vec<String>,
    },
    Miss {
        direction: Direction,
        at: BedNeedle,
        carriers: Vec<String>,
    },
    Drop(BedNeedle),
    Amiss(BedNeedle),
    Xfer { from: BedNeedle, to: BedNeedle },

    // Annotations
    Comment(String),
    Pause,
    Raw(String),
}

impl Operation {
    /// Returns the opcode token, or `None` for comment and raw lines.
    pub fn opcode(&self) -> Option<&'static str> {
        Some(match self {
            Operation::In(_) => "in",
            Operation::Inhook(_) => "inhook",
            Operation::Releasehook(_) => "releasehook",
            Operation::Out(_) => "out",
            Operation::Outhook(_) => "outhook",
            Operation::Stitch { .. } => "stitch",
            Operation::StitchNumber(_) => "x-stitch-number",
            Operation::PresserMode(_) => "x-presser-mode",
            Operation::SpeedNumber(_) => "x-speed-number",
            Operation::RollerAdvance(_) => "x-roller-advance",
            Operation::AddRollerAdvance(_) => "x-add-roller-advance",
            Operation::CarrierSpacing(_) => "x-carrier-spacing",
            Operation::CarrierStoppingDistance(_) => "x-carrier-stopping-distance",
            Operation::Rack(_) => "rack",
            Operation::Knit { .. } => "knit",
            Operation::Tuck { .. } => "tuck",
            Operation::Split { .. } => "split",
            Operation::Miss { .. } => "miss",
            Operation::Drop(_) => "drop",
            Operation::Amiss(_) => "amiss",
            Operation::Xfer { .. } => "xfer",
            Operation::Pause => "pause",
            Operation::Comment(_) | Operation::Raw(_) => return None,
        })
    }
}

fn write_carriers(f: &mut fmt::Formatter<'_>, carriers: &[String]) -> fmt::Result {
    for carrier in carriers {
        write!(f, " {}", carrier)?;
    }
    Ok(())
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Comment(text) => return write!(f, "{}{}", COMMENT_PREFIX, text),
            Operation::Raw(text) => return f.write_str(text),
            _ => {}
        }

        if let Some(opcode) = self.opcode() {
            f.write_str(opcode)?;
        }

        match self {
            Operation::In(cs)
            | Operation::Inhook(cs)
            | Operation::Releasehook(cs)
            | Operation::Out(cs)
            | Operation::Outhook(cs) => write_carriers(f, cs),

            Operation::Stitch { before, after } => write!(f, " {} {}", before, after),
            Operation::StitchNumber(n)
            | Operation::SpeedNumber(n)
            | Operation::RollerAdvance(n)
            | Operation::CarrierSpacing(n)
            | Operation::CarrierStoppingDistance(n) => write!(f, " {}", n),
            Operation::AddRollerAdvance(n) => write!(f, " {}", n),
            Operation::PresserMode(mode) => write!(f, " {}", mode),

            // Avoid printing "-0" for a racking that rounded to zero.
            Operation::Rack(r) => write!(f, " {}", if *r == 0.0 { 0.0 } else { *r }),

            Operation::Knit {
                direction,
                at,
                carriers,
            }
            | Operation::Tuck {
                direction,
                at,
                carriers,
            }
            | Operation::Miss {
                direction,
                at,
                carriers,
            } => {
                write!(f, " {} {}", direction, at)?;
                write_carriers(f, carriers)
            }
            Operation::Split {
                direction,
                from,
                to,
                carriers,
            } => {
                write!(f, " {} {} {}", direction, from, to)?;
                write_carriers(f, carriers)
            }
            Operation::Drop(at) | Operation::Amiss(at) => write!(f, " {}", at),
            Operation::Xfer { from, to } => write!(f, " {} {}", from, to),

            Operation::Pause | Operation::Comment(_) | Operation::Raw(_) => Ok(()),
        }
    }
}
