//! Header validation.
//!
//! Recognized headers (names compared case-insensitively):
//!
//! - `Carriers` - reserved; synthesized from the declared carrier list
//! - `Machine` - any value, at most once
//! - `Gauge` - must be a number
//! - `Position` - one of `Left`, `Center`, `Right`, `Keep`
//! - `Yarn-<carrier>` - carrier should be declared
//! - `X-...` - extension namespace, always accepted
//!
//! Any other name is written anyway, with a diagnostic.

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::{KnitoutError, Result};
use crate::registry::CarrierRegistry;
use knitout_codec::{Header, HEADER_SEPARATOR};

/// Accepted values of the `Position` header.
pub const POSITIONS: [&str; 4] = ["Left", "Center", "Right", "Keep"];

const CARRIERS: &str = "Carriers";
const MACHINE: &str = "Machine";
const GAUGE: &str = "Gauge";
const POSITION: &str = "Position";
const YARN_PREFIX: &str = "Yarn-";
const EXTENSION_PREFIX: &str = "X-";

/// Headers in insertion order. `Carriers` is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    headers: Vec<Header>,
    machine: Option<String>,
}

impl HeaderSet {
    /// Creates the set with the `Carriers` header built from the registry.
    pub fn new(registry: &CarrierRegistry) -> Self {
        Self {
            headers: vec![Header::new(CARRIERS, registry.names().join(" "))],
            machine: None,
        }
    }

    /// Validates and appends a header.
    pub fn add<D: DiagnosticSink + ?Sized>(
        &mut self,
        name: &str,
        value: &str,
        registry: &CarrierRegistry,
        diagnostics: &mut D,
    ) -> Result<()> {
        if name.contains(HEADER_SEPARATOR) {
            return Err(KnitoutError::InvalidHeaderName {
                name: name.to_string(),
                reason: format!("must not contain the sequence '{}'", HEADER_SEPARATOR),
            });
        }
        if name.contains('\n') {
            return Err(KnitoutError::InvalidHeaderName {
                name: name.to_string(),
                reason: "must not contain a line feed".to_string(),
            });
        }
        if value.contains('\n') {
            return Err(KnitoutError::InvalidHeaderValue {
                name: name.to_string(),
                reason: "must not contain a line feed".to_string(),
            });
        }

        let mut machine = None;
        if name.eq_ignore_ascii_case(CARRIERS) {
            return Err(KnitoutError::ReservedHeaderName {
                name: name.to_string(),
            });
        } else if name.eq_ignore_ascii_case(MACHINE) {
            if self.machine.is_some() {
                return Err(KnitoutError::DuplicateHeader {
                    name: name.to_string(),
                });
            }
            machine = Some(value.to_string());
        } else if name.eq_ignore_ascii_case(GAUGE) {
            if !is_number(value) {
                return Err(KnitoutError::InvalidHeaderValue {
                    name: name.to_string(),
                    reason: format!("'{}' is not a number", value),
                });
            }
        } else if name.eq_ignore_ascii_case(POSITION) {
            if !POSITIONS.contains(&value) {
                return Err(KnitoutError::InvalidHeaderValue {
                    name: name.to_string(),
                    reason: format!("must be one of: {}", POSITIONS.join(", ")),
                });
            }
        } else if let Some(carrier) = name.strip_prefix(YARN_PREFIX) {
            if !registry.contains(carrier) {
                diagnostics.emit(Diagnostic::UnknownCarrier {
                    carrier: carrier.to_string(),
                });
            }
        } else if name.starts_with(EXTENSION_PREFIX) {
            // Extension headers accept any value.
        } else {
            diagnostics.emit(Diagnostic::UnrecognizedHeader {
                name: name.to_string(),
            });
        }

        if machine.is_some() {
            self.machine = machine;
        }
        self.headers.push(Header::new(name, value));
        tracing::debug!("header added: {}", name);
        Ok(())
    }

    /// The declared machine name, if a `Machine` header was added.
    pub fn machine(&self) -> Option<&str> {
        self.machine.as_deref()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().map_or(false, f64::is_finite)
}
