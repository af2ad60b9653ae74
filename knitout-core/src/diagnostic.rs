//! Non-fatal diagnostics.
//!
//! Diagnostics report questionable input that the writer accepts anyway
//! (possibly after correcting it). They never change whether a call
//! succeeds. The writer hands each one to a [`DiagnosticSink`]; the default
//! [`TracingSink`] logs them as warnings, and a `Vec<Diagnostic>` collects them.

use std::fmt;

/// A non-fatal condition noticed while building a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A carrier name that is not in the declared carrier list.
    UnknownCarrier { carrier: String },

    /// A declared carrier name containing a list delimiter.
    SuspiciousCarrierName { carrier: String, delimiter: char },

    /// A header name outside the known set and the `X-` namespace.
    UnrecognizedHeader { name: String },

    /// A racking value that was moved to the nearest quarter.
    RackingRounded { requested: f64, applied: f64 },

    /// Leading `;` characters removed from a comment line.
    CommentPrefixStripped { line: String },

    /// An extension value outside its accepted range; the opcode was dropped.
    ExtensionValueRejected {
        extension: &'static str,
        value: i64,
        expected: &'static str,
    },

    /// A presser mode that is not one of on/off/auto; the opcode was dropped.
    UnknownPresserMode { mode: String },

    /// An extension the declared machine does not support; emitted anyway.
    UnsupportedExtension {
        extension: &'static str,
        machine: String,
    },

    /// A raw operation appended without any checking.
    RawOperation { operation: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownCarrier { carrier } => {
                write!(f, "carrier '{}' is unknown", carrier)
            }
            Diagnostic::SuspiciousCarrierName { carrier, delimiter } => write!(
                f,
                "carrier name '{}' contains '{}', which also separates carrier lists",
                carrier, delimiter
            ),
            Diagnostic::UnrecognizedHeader { name } => write!(
                f,
                "header name '{}' not recognized; header will still be written",
                name
            ),
            Diagnostic::RackingRounded { requested, applied } => write!(
                f,
                "only racking values in multiples of 1/4 are supported; corrected from {} to {}",
                requested, applied
            ),
            Diagnostic::CommentPrefixStripped { line } => write!(
                f,
                "comment '{}' starts with ';' (use headers for header comments); prefix removed",
                line
            ),
            Diagnostic::ExtensionValueRejected {
                extension,
                value,
                expected,
            } => write!(
                f,
                "ignoring {} extension: {} is not {}",
                extension, value, expected
            ),
            Diagnostic::UnknownPresserMode { mode } => write!(
                f,
                "ignoring presser mode extension, unknown mode '{}' (valid modes: on, off, auto)",
                mode
            ),
            Diagnostic::UnsupportedExtension { extension, machine } => write!(
                f,
                "{} is not supported on {}; including it anyway",
                extension, machine
            ),
            Diagnostic::RawOperation { operation } => write!(
                f,
                "operation '{}' added as is, no error checking performed",
                operation
            ),
        }
    }
}

/// Receives diagnostics from a writer.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Logs diagnostics through `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
