//! Declared machine carriers.

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::{KnitoutError, Result};
use knitout_codec::CARRIER_DELIMITERS;

/// The carrier names declared for the machine, front-to-back.
///
/// The list is advisory: names outside it are reported but accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierRegistry {
    carriers: Vec<String>,
}

impl CarrierRegistry {
    pub fn new<I, S>(carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            carriers: carriers.into_iter().map(Into::into).collect(),
        }
    }

    /// Declared carrier names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.carriers
    }

    pub fn contains(&self, name: &str) -> bool {
        self.carriers.iter().any(|c| c == name)
    }

    /// Reports declared names that would be ambiguous in a carrier list.
    pub fn check_names<D: DiagnosticSink + ?Sized>(&self, diagnostics: &mut D) {
        for carrier in &self.carriers {
            for delimiter in CARRIER_DELIMITERS {
                if carrier.contains(delimiter) {
                    diagnostics.emit(Diagnostic::SuspiciousCarrierName {
                        carrier: carrier.clone(),
                        delimiter,
                    });
                }
            }
        }
    }

    /// Validates a carrier name and returns it trimmed.
    ///
    /// An empty name is an error; an undeclared name is only reported.
    pub fn validate<D: DiagnosticSink + ?Sized>(
        &self,
        name: &str,
        diagnostics: &mut D,
    ) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(KnitoutError::InvalidCarrierName {
                name: name.to_string(),
            });
        }

        if !self.contains(trimmed) {
            diagnostics.emit(Diagnostic::UnknownCarrier {
                carrier: trimmed.to_string(),
            });
        }

        Ok(trimmed.to_string())
    }

    /// Validates every name in order, stopping at the first empty one.
    pub fn validate_all<D, S>(&self, names: &[S], diagnostics: &mut D) -> Result<Vec<String>>
    where
        D: DiagnosticSink + ?Sized,
        S: AsRef<str>,
    {
        names
            .iter()
            .map(|name| self.validate(name.as_ref(), diagnostics))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_known_carrier() {
        let registry = CarrierRegistry::new(["A", "B", "C"]);
        let mut diags: Vec<Diagnostic> = Vec::new();

        assert_eq!(registry.validate(" B\t", &mut diags).unwrap(), "B");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_validate_unknown_carrier_is_reported() {
        let registry = CarrierRegistry::new(["A", "B", "C"]);
        let mut diags: Vec<Diagnostic> = Vec::new();

        assert_eq!(registry.validate("20000", &mut diags).unwrap(), "20000");
        assert_eq!(
            diags,
            vec![Diagnostic::UnknownCarrier {
                carrier: "20000".into()
            }]
        );
    }

    #[test]
    fn test_validate_empty_carrier() {
        let registry = CarrierRegistry::new(["A"]);
        let mut diags: Vec<Diagnostic> = Vec::new();

        let err = registry.validate("  ", &mut diags).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CARRIER_NAME");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_validate_all_stops_at_empty() {
        let registry = CarrierRegistry::new(["A", "B"]);
        let mut diags: Vec<Diagnostic> = Vec::new();

        let names = registry.validate_all(&["A", "B"], &mut diags).unwrap();
        assert_eq!(names, vec!["A", "B"]);

        assert!(registry.validate_all(&["A", ""], &mut diags).is_err());
    }

    #[test]
    fn test_check_names() {
        let registry = CarrierRegistry::new(["1", "a b", "c,d"]);
        let mut diags: Vec<Diagnostic> = Vec::new();
        registry.check_names(&mut diags);

        assert_eq!(
            diags,
            vec![
                Diagnostic::SuspiciousCarrierName {
                    carrier: "a b".into(),
                    delimiter: ' '
                },
                Diagnostic::SuspiciousCarrierName {
                    carrier: "c,d".into(),
                    delimiter: ','
                },
            ]
        );
    }
}
