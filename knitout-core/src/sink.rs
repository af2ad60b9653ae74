//! Output destinations for a finished document.

use std::fmt;
use std::path::PathBuf;

/// Where a serialized document goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sink {
    /// Standard output.
    #[default]
    Stdout,
    /// A file, created or truncated.
    File(PathBuf),
}

impl Sink {
    /// Returns a file sink for `Some(path)` and stdout otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Sink::File(path),
            None => Sink::Stdout,
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("stdout"),
            Sink::File(path) => write!(f, "{}", path.display()),
        }
    }
}
