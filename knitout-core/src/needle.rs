//! Best-effort bookkeeping of needles that hold loops.

use knitout_codec::BedNeedle;
use std::collections::BTreeSet;

/// Set of needle locations believed to hold a loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeedleState {
    loaded: BTreeSet<BedNeedle>,
}

impl NeedleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, at: BedNeedle) {
        self.loaded.insert(at);
    }

    pub fn mark_cleared(&mut self, at: &BedNeedle) {
        self.loaded.remove(at);
    }

    pub fn is_loaded(&self, at: &BedNeedle) -> bool {
        self.loaded.contains(at)
    }

    /// Moves the loop at `from` to `to`, if there is one.
    ///
    /// Returns whether a loop moved.
    pub fn transfer(&mut self, from: &BedNeedle, to: BedNeedle) -> bool {
        if self.loaded.remove(from) {
            self.loaded.insert(to);
            true
        } else {
            false
        }
    }

    pub fn loaded(&self) -> impl Iterator<Item = &BedNeedle> {
        self.loaded.iter()
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}
