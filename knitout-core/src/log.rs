//! Append-only log of validated operation lines.

use knitout_codec::Operation;

/// Ordered operation lines. Lines are never edited, removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationLog {
    lines: Vec<String>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats and appends an operation.
    pub fn append(&mut self, operation: &Operation) {
        let line = operation.to_string();
        tracing::trace!("append: {}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
