//! # knitout-codec
//!
//! Text grammar for knitout programs.
//!
//! This crate provides:
//! - Bed and bed+needle token parsing/formatting (`f10`, `bs-3`)
//! - Direction tokens and carrier-list splitting
//! - Canonical operation lines and header lines
//! - The magic first line of a knitout document

pub mod bed;
pub mod carriers;
pub mod direction;
pub mod error;
pub mod header;
pub mod operation;

pub use bed::{Bed, BedNeedle, Polarity, Side};
pub use carriers::{has_carrier_delimiter, split_carriers, CARRIER_DELIMITERS};
pub use direction::Direction;
pub use error::CodecError;
pub use header::Header;
pub use operation::{Operation, PresserMode};

/// Knitout language version emitted by this implementation.
pub const KNITOUT_VERSION: u32 = 2;

/// First line of every knitout document.
pub const MAGIC: &str = ";!knitout-2";

/// Prefix of a header line.
pub const HEADER_PREFIX: &str = ";;";

/// Separator between a header name and its value.
pub const HEADER_SEPARATOR: &str = ": ";

/// Prefix of a comment line.
pub const COMMENT_PREFIX: char = ';';
