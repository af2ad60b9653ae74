//! # knitout-core
//!
//! Validating builder for knitout programs.
//!
//! This crate provides:
//! - Carrier name validation against the declared machine carriers
//! - Carrier state tracking (in/out, parked on the insertion hook)
//! - Best-effort tracking of needles that hold loops
//! - Header validation and ordering
//! - The [`Writer`], which validates every operation before recording it
//!   and serializes the finished document

pub mod carrier;
pub mod diagnostic;
pub mod error;
pub mod header;
pub mod log;
pub mod needle;
pub mod registry;
pub mod sink;
pub mod text;
pub mod writer;

pub use carrier::CarrierState;
pub use diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{KnitoutError, Result};
pub use header::HeaderSet;
pub use log::OperationLog;
pub use needle::NeedleState;
pub use registry::CarrierRegistry;
pub use sink::Sink;
pub use writer::{CarrierSnapshot, Writer, WriterSnapshot, NO_CARRIERS};

pub use knitout_codec::{Bed, BedNeedle, CodecError, Direction, Header, Operation, PresserMode};
