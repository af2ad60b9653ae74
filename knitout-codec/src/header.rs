//! Header lines (`;;Name: value`).

use crate::{HEADER_PREFIX, HEADER_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A header name/value pair. The name is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            HEADER_PREFIX, self.name, HEADER_SEPARATOR, self.value
        )
    }
}
