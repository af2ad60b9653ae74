//! Carrier-list splitting.
//!
//! A carrier set may be written as one string with carrier names separated
//! by runs of spaces and/or commas: `"A, B  C"` names `A`, `B` and `C`.

/// Characters that separate carrier names in a combined carrier string.
pub const CARRIER_DELIMITERS: [char; 2] = [' ', ','];

/// Returns true if `s` names more than one carrier token.
pub fn has_carrier_delimiter(s: &str) -> bool {
    s.contains(CARRIER_DELIMITERS)
}

/// Splits a combined carrier string into carrier names.
///
/// Empty pieces produced by adjacent delimiters are skipped.
pub fn split_carriers(s: &str) -> Vec<String> {
    s.split(CARRIER_DELIMITERS)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
