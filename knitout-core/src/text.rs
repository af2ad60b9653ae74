//! String-form entry points.
//!
//! These accept the loose textual arguments knitout authors tend to write,
//! parse them, and forward to the typed methods on [`Writer`]:
//!
//! - direction as `"+"` / `"-"`
//! - needle as a combined token such as `"f10"` or `"bs-3"`
//! - carriers as one string, split on runs of spaces and commas (`"A, B"`)
//!
//! All parsing happens before the typed call, so a parse failure leaves
//! the writer unchanged.

use crate::diagnostic::DiagnosticSink;
use crate::error::Result;
use crate::writer::Writer;
use knitout_codec::{has_carrier_delimiter, split_carriers, BedNeedle, Direction};

/// Carriers for `in`/`out`-style calls. A plain name is kept as given, so an
/// empty string is reported as a missing carrier name.
pub fn carrier_set(carriers: &str) -> Vec<String> {
    if has_carrier_delimiter(carriers) {
        split_carriers(carriers)
    } else {
        vec![carriers.to_string()]
    }
}

/// Carriers for needle operations, where an empty string means no carriers.
pub fn optional_carriers(carriers: &str) -> Vec<String> {
    if carriers.is_empty() {
        Vec::new()
    } else {
        carrier_set(carriers)
    }
}

impl<D: DiagnosticSink> Writer<D> {
    pub fn in_str(&mut self, carriers: &str) -> Result<()> {
        self.in_carriers(&carrier_set(carriers))
    }

    pub fn inhook_str(&mut self, carriers: &str) -> Result<()> {
        self.inhook(&carrier_set(carriers))
    }

    pub fn releasehook_str(&mut self, carriers: &str) -> Result<()> {
        self.releasehook(&carrier_set(carriers))
    }

    pub fn out_str(&mut self, carriers: &str) -> Result<()> {
        self.out(&carrier_set(carriers))
    }

    pub fn outhook_str(&mut self, carriers: &str) -> Result<()> {
        self.outhook(&carrier_set(carriers))
    }

    pub fn knit_str(&mut self, direction: &str, at: &str, carriers: &str) -> Result<()> {
        let direction = Direction::parse(direction)?;
        let at = BedNeedle::parse(at)?;
        self.knit(direction, at, &optional_carriers(carriers))
    }

    pub fn tuck_str(&mut self, direction: &str, at: &str, carriers: &str) -> Result<()> {
        let direction = Direction::parse(direction)?;
        let at = BedNeedle::parse(at)?;
        self.tuck(direction, at, &optional_carriers(carriers))
    }

    pub fn split_str(&mut self, direction: &str, from: &str, to: &str, carriers: &str) -> Result<()> {
        let direction = Direction::parse(direction)?;
        let from = BedNeedle::parse(from)?;
        let to = BedNeedle::parse(to)?;
        self.split(direction, from, to, &optional_carriers(carriers))
    }

    pub fn miss_str(&mut self, direction: &str, at: &str, carriers: &str) -> Result<()> {
        let direction = Direction::parse(direction)?;
        let at = BedNeedle::parse(at)?;
        self.miss(direction, at, &optional_carriers(carriers))
    }

    pub fn drop_str(&mut self, at: &str) -> Result<()> {
        self.drop(BedNeedle::parse(at)?);
        Ok(())
    }

    pub fn amiss_str(&mut self, at: &str) -> Result<()> {
        self.amiss(BedNeedle::parse(at)?);
        Ok(())
    }

    pub fn xfer_str(&mut self, from: &str, to: &str) -> Result<()> {
        let from = BedNeedle::parse(from)?;
        let to = BedNeedle::parse(to)?;
        self.xfer(from, to);
        Ok(())
    }
}
