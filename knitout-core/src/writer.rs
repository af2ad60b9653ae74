//! The knitout writer - validates operations, tracks machine state, and
//! serializes the finished document.
//!
//! Every method runs all of its checks before touching any state. A call
//! that returns an error leaves carriers, needles, racking, headers and the
//! operation log exactly as they were.

use crate::carrier::CarrierState;
use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{KnitoutError, Result};
use crate::header::HeaderSet;
use crate::log::OperationLog;
use crate::needle::NeedleState;
use crate::registry::CarrierRegistry;
use crate::sink::Sink;
use knitout_codec::{BedNeedle, Direction, Header, Operation, PresserMode, MAGIC};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};

/// An empty carrier list, for knits, tucks and splits without yarn.
pub const NO_CARRIERS: &[&str] = &[];

/// Racking values within this distance of a quarter are not reported.
const RACKING_TOLERANCE: f64 = 0.001;

/// 2^52. Every `f64` at least this large in magnitude is a whole number.
const RACKING_EXACT_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Machine families that support each extension.
const SWG: &str = "SWG";
const KNITERATE: &str = "KNITERATE";

/// Builds a knitout program one validated operation at a time.
pub struct Writer<D: DiagnosticSink = TracingSink> {
    registry: CarrierRegistry,
    carriers: CarrierState,
    needles: NeedleState,
    racking: f64,
    headers: HeaderSet,
    log: OperationLog,
    diagnostics: D,
}

/// Active carrier in a [`WriterSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierSnapshot {
    pub name: String,
    pub on_hook: bool,
}

/// The observable state of a writer at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriterSnapshot {
    pub carriers: Vec<CarrierSnapshot>,
    pub loaded_needles: Vec<BedNeedle>,
    pub racking: f64,
    pub headers: Vec<Header>,
    pub operations: Vec<String>,
}

impl Writer<TracingSink> {
    /// Creates a writer for a machine with the given carriers, front-to-back.
    pub fn new<I, S>(carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_diagnostics(carriers, TracingSink)
    }
}

impl<D: DiagnosticSink> Writer<D> {
    /// Creates a writer that reports diagnostics to `diagnostics`.
    pub fn with_diagnostics<I, S>(carriers: I, mut diagnostics: D) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = CarrierRegistry::new(carriers);
        registry.check_names(&mut diagnostics);
        let headers = HeaderSet::new(&registry);

        Self {
            registry,
            carriers: CarrierState::new(),
            needles: NeedleState::new(),
            racking: 0.0,
            headers,
            log: OperationLog::new(),
            diagnostics,
        }
    }

    // =========================================================================
    // State Access
    // =========================================================================

    pub fn registry(&self) -> &CarrierRegistry {
        &self.registry
    }

    pub fn carrier_state(&self) -> &CarrierState {
        &self.carriers
    }

    pub fn needle_state(&self) -> &NeedleState {
        &self.needles
    }

    pub fn racking(&self) -> f64 {
        self.racking
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn operations(&self) -> &OperationLog {
        &self.log
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    /// Captures carriers, needles, racking, headers and operations.
    pub fn snapshot(&self) -> WriterSnapshot {
        WriterSnapshot {
            carriers: self
                .carriers
                .active()
                .map(|(name, on_hook)| CarrierSnapshot {
                    name: name.to_string(),
                    on_hook,
                })
                .collect(),
            loaded_needles: self.needles.loaded().copied().collect(),
            racking: self.racking,
            headers: self.headers.headers().to_vec(),
            operations: self.log.lines().to_vec(),
        }
    }

    // =========================================================================
    // Headers and Raw Operations
    // =========================================================================

    /// Adds a header line. See [`HeaderSet`] for the rules.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.headers
            .add(name, value, &self.registry, &mut self.diagnostics)
    }

    /// Appends `operation` verbatim, without any checking.
    pub fn add_raw_operation(&mut self, operation: &str) {
        self.diagnostics.emit(Diagnostic::RawOperation {
            operation: operation.to_string(),
        });
        self.log.append(&Operation::Raw(operation.to_string()));
    }

    // =========================================================================
    // Carrier Operations
    // =========================================================================

    /// `in`: brings carriers in.
    pub fn in_carriers<S: AsRef<str>>(&mut self, carriers: &[S]) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;
        self.carriers.bring_in(&carriers, false)?;
        self.log.append(&Operation::In(carriers));
        Ok(())
    }

    /// `inhook`: brings carriers in parked on the yarn inserting hook.
    pub fn inhook<S: AsRef<str>>(&mut self, carriers: &[S]) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;
        self.carriers.bring_in(&carriers, true)?;
        self.log.append(&Operation::Inhook(carriers));
        Ok(())
    }

    /// `releasehook`: releases carriers from the yarn inserting hook.
    pub fn releasehook<S: AsRef<str>>(&mut self, carriers: &[S]) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;
        self.carriers.release_hook(&carriers)?;
        self.log.append(&Operation::Releasehook(carriers));
        Ok(())
    }

    /// `out`: takes carriers out.
    pub fn out<S: AsRef<str>>(&mut self, carriers: &[S]) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;
        self.carriers.take_out(&carriers)?;
        self.log.append(&Operation::Out(carriers));
        Ok(())
    }

    /// `outhook`: takes carriers out with the yarn inserting hook.
    pub fn outhook<S: AsRef<str>>(&mut self, carriers: &[S]) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;
        self.carriers.take_out(&carriers)?;
        self.log.append(&Operation::Outhook(carriers));
        Ok(())
    }

    // =========================================================================
    // Stitch Settings and Extensions
    // =========================================================================

    /// `stitch`: sets loop lengths before and after the needle.
    pub fn stitch(&mut self, before: i64, after: i64) {
        let Some(before) = self.accept_value("stitch", before, 0) else {
            return;
        };
        let Some(after) = self.accept_value("stitch", after, 0) else {
            return;
        };
        self.log.append(&Operation::Stitch { before, after });
    }

    /// `x-stitch-number`
    pub fn stitch_number(&mut self, value: i64) {
        if let Some(n) = self.accept_value("stitch number", value, 0) {
            self.log.append(&Operation::StitchNumber(n));
        }
    }

    /// `x-presser-mode`: one of `on`, `off`, `auto`.
    pub fn presser_mode(&mut self, mode: &str) {
        self.check_machine_support("presser mode", SWG);
        match mode.parse::<PresserMode>() {
            Ok(mode) => self.log.append(&Operation::PresserMode(mode)),
            Err(mode) => self.diagnostics.emit(Diagnostic::UnknownPresserMode { mode }),
        }
    }

    /// `x-speed-number`
    pub fn speed_number(&mut self, value: i64) {
        if let Some(n) = self.accept_value("speed number", value, 0) {
            self.log.append(&Operation::SpeedNumber(n));
        }
    }

    /// `x-roller-advance`
    pub fn roller_advance(&mut self, value: i64) {
        self.check_machine_support("roller advance", KNITERATE);
        if let Some(n) = self.accept_value("roller advance", value, 0) {
            self.log.append(&Operation::RollerAdvance(n));
        }
    }

    /// `x-add-roller-advance`: a relative adjustment, so any sign is allowed.
    pub fn add_roller_advance(&mut self, value: i64) {
        self.check_machine_support("add roller advance", KNITERATE);
        self.log.append(&Operation::AddRollerAdvance(value));
    }

    /// `x-carrier-spacing`
    pub fn carrier_spacing(&mut self, value: i64) {
        self.check_machine_support("carrier spacing", KNITERATE);
        if let Some(n) = self.accept_value("carrier spacing", value, 1) {
            self.log.append(&Operation::CarrierSpacing(n));
        }
    }

    /// `x-carrier-stopping-distance`
    pub fn carrier_stopping_distance(&mut self, value: i64) {
        self.check_machine_support("carrier stopping distance", KNITERATE);
        if let Some(n) = self.accept_value("carrier stopping distance", value, 1) {
            self.log.append(&Operation::CarrierStoppingDistance(n));
        }
    }

    // =========================================================================
    // Needle Operations
    // =========================================================================

    /// `rack`: sets the bed offset, rounded to the nearest quarter.
    pub fn rack(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(KnitoutError::NonFiniteRacking { value });
        }

        // Scaling by 4 would overflow near f64::MAX; such values are whole already.
        let applied = if value.abs() >= RACKING_EXACT_LIMIT {
            value
        } else {
            (value * 4.0).round() / 4.0
        };
        if (applied - value).abs() > RACKING_TOLERANCE {
            self.diagnostics.emit(Diagnostic::RackingRounded {
                requested: value,
                applied,
            });
        }

        self.racking = applied;
        self.log.append(&Operation::Rack(applied));
        Ok(())
    }

    /// `knit`: with carriers the needle ends up holding the new loop;
    /// without carriers the old loop is knit off and the needle is empty.
    pub fn knit<S: AsRef<str>>(
        &mut self,
        direction: Direction,
        at: BedNeedle,
        carriers: &[S],
    ) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;

        if carriers.is_empty() {
            self.needles.mark_cleared(&at);
        } else {
            self.needles.mark_loaded(at);
        }

        self.log.append(&Operation::Knit {
            direction,
            at,
            carriers,
        });
        Ok(())
    }

    /// `tuck`: the needle holds a loop afterwards, with or without carriers.
    pub fn tuck<S: AsRef<str>>(
        &mut self,
        direction: Direction,
        at: BedNeedle,
        carriers: &[S],
    ) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;

        self.needles.mark_loaded(at);

        self.log.append(&Operation::Tuck {
            direction,
            at,
            carriers,
        });
        Ok(())
    }

    /// `split`: moves the loop at `from` to `to` on the other bed. With
    /// carriers, a new loop is also formed at `from`.
    pub fn split<S: AsRef<str>>(
        &mut self,
        direction: Direction,
        from: BedNeedle,
        to: BedNeedle,
        carriers: &[S],
    ) -> Result<()> {
        let carriers = self.validate_carriers(carriers)?;

        if from.bed() == to.bed() {
            return Err(KnitoutError::SameBedSplit {
                bed: from.bed().to_string(),
            });
        }

        self.needles.transfer(&from, to);
        if !carriers.is_empty() {
            self.needles.mark_loaded(from);
        }

        self.log.append(&Operation::Split {
            direction,
            from,
            to,
            carriers,
        });
        Ok(())
    }

    /// `miss`: moves carriers past a needle. At least one carrier is required.
    pub fn miss<S: AsRef<str>>(
        &mut self,
        direction: Direction,
        at: BedNeedle,
        carriers: &[S],
    ) -> Result<()> {
        if carriers.is_empty() {
            return Err(KnitoutError::NoCarriersForMiss);
        }
        let carriers = self.validate_carriers(carriers)?;

        self.log.append(&Operation::Miss {
            direction,
            at,
            carriers,
        });
        Ok(())
    }

    /// `drop`: knits off the loop at `at` without yarn.
    pub fn drop(&mut self, at: BedNeedle) {
        self.needles.mark_cleared(&at);
        self.log.append(&Operation::Drop(at));
    }

    /// `amiss`: a tuck without yarn. Needle state is not changed.
    pub fn amiss(&mut self, at: BedNeedle) {
        self.log.append(&Operation::Amiss(at));
    }

    /// `xfer`: moves the loop at `from` to `to`; a split without yarn.
    pub fn xfer(&mut self, from: BedNeedle, to: BedNeedle) {
        self.needles.transfer(&from, to);
        self.log.append(&Operation::Xfer { from, to });
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Adds one comment line per line of `text`.
    ///
    /// Leading `;` characters would turn a comment into a header line, so
    /// they are removed.
    pub fn comment(&mut self, text: &str) {
        for line in text.split('\n') {
            let stripped = line.trim_start_matches(';');
            if stripped.len() != line.len() {
                self.diagnostics.emit(Diagnostic::CommentPrefixStripped {
                    line: line.to_string(),
                });
            }
            self.log.append(&Operation::Comment(stripped.to_string()));
        }
    }

    /// `pause`, preceded by `text` as a comment.
    pub fn pause(&mut self, text: &str) {
        self.comment(text);
        self.log.append(&Operation::Pause);
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Renders the full document: magic line, headers, then operations.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 * (self.headers.len() + self.log.len() + 1));
        out.push_str(MAGIC);
        out.push('\n');
        for header in self.headers.iter() {
            out.push_str(&header.to_string());
            out.push('\n');
        }
        for line in self.log.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Writes the rendered document to `w` in a single write.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.render().as_bytes())?;
        w.flush()
    }

    /// Writes the rendered document to `sink`.
    pub fn write(&self, sink: &Sink) -> Result<()> {
        let unavailable = |source| KnitoutError::SinkUnavailable {
            target: sink.to_string(),
            source,
        };

        match sink {
            Sink::Stdout => {
                tracing::info!("no output file given; writing to stdout");
                self.write_to(&mut io::stdout().lock()).map_err(unavailable)?;
            }
            Sink::File(path) => {
                let mut file = File::create(path).map_err(unavailable)?;
                self.write_to(&mut file).map_err(unavailable)?;
                tracing::info!(
                    "wrote {} headers and {} operations to {}",
                    self.headers.len(),
                    self.log.len(),
                    path.display()
                );
            }
        }

        Ok(())
    }

    // =========================================================================
    // Validation Helpers
    // =========================================================================

    fn validate_carriers<S: AsRef<str>>(&mut self, carriers: &[S]) -> Result<Vec<String>> {
        self.registry.validate_all(carriers, &mut self.diagnostics)
    }

    /// Returns `value` if it is at least `min` and fits the opcode's argument.
    fn accept_value(&mut self, extension: &'static str, value: i64, min: i64) -> Option<u32> {
        match u32::try_from(value) {
            Ok(n) if value >= min => Some(n),
            _ => {
                self.diagnostics.emit(Diagnostic::ExtensionValueRejected {
                    extension,
                    value,
                    expected: if min > 0 {
                        "a positive integer"
                    } else {
                        "a non-negative integer"
                    },
                });
                None
            }
        }
    }

    /// Reports an extension the declared machine does not support.
    fn check_machine_support(&mut self, extension: &'static str, family: &str) {
        if let Some(machine) = self.headers.machine() {
            if !machine.to_uppercase().contains(family) {
                self.diagnostics.emit(Diagnostic::UnsupportedExtension {
                    extension,
                    machine: machine.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> Writer<Vec<Diagnostic>> {
        Writer::with_diagnostics(["A", "B", "C"], Vec::new())
    }

    fn bn(s: &str) -> BedNeedle {
        BedNeedle::parse(s).unwrap()
    }

    const PLUS: Direction = Direction::Increasing;
    const MINUS: Direction = Direction::Decreasing;

    #[test]
    fn test_new_writer() {
        let w = writer();
        assert_eq!(w.render(), ";!knitout-2\n;;Carriers: A B C\n");
        assert_eq!(w.racking(), 0.0);
        assert!(w.operations().is_empty());
        assert!(w.diagnostics().is_empty());
    }

    #[test]
    fn test_construction_reports_suspicious_names() {
        let w = Writer::with_diagnostics(["1", "a b"], Vec::new());
        assert_eq!(w.diagnostics().len(), 1);
        assert!(matches!(
            w.diagnostics()[0],
            Diagnostic::SuspiciousCarrierName { delimiter: ' ', .. }
        ));
    }

    #[test]
    fn test_carrier_lifecycle() {
        let mut w = writer();
        w.inhook(&["A"]).unwrap();
        assert!(w.carrier_state().is_on_hook("A"));

        w.releasehook(&["A"]).unwrap();
        assert!(!w.carrier_state().is_on_hook("A"));

        w.outhook(&["A"]).unwrap();
        assert!(!w.carrier_state().is_in("A"));

        w.in_carriers(&["B", "C"]).unwrap();
        w.out(&["B", "C"]).unwrap();

        assert_eq!(
            w.operations().lines(),
            &[
                "inhook A",
                "releasehook A",
                "outhook A",
                "in B C",
                "out B C"
            ]
        );
    }

    #[test]
    fn test_carrier_errors_leave_log_untouched() {
        let mut w = writer();
        w.in_carriers(&["A"]).unwrap();

        assert!(matches!(
            w.in_carriers(&["B", "A"]),
            Err(KnitoutError::CarrierAlreadyIn { .. })
        ));
        assert!(matches!(
            w.in_carriers(&["B", ""]),
            Err(KnitoutError::InvalidCarrierName { .. })
        ));
        assert!(matches!(
            w.out(NO_CARRIERS),
            Err(KnitoutError::EmptyCarrierSet { operation: "out" })
        ));

        assert_eq!(w.operations().lines(), &["in A"]);
        assert!(!w.carrier_state().is_in("B"));
    }

    #[test]
    fn test_unknown_carrier_is_diagnostic_only() {
        let mut w = writer();
        w.in_carriers(&["Z"]).unwrap();
        assert!(w.carrier_state().is_in("Z"));
        assert_eq!(
            w.diagnostics(),
            &vec![Diagnostic::UnknownCarrier {
                carrier: "Z".into()
            }]
        );
    }

    #[test]
    fn test_knit_tracks_loops() {
        let mut w = writer();
        w.knit(PLUS, bn("f10"), &["A"]).unwrap();
        assert!(w.needle_state().is_loaded(&bn("f10")));

        w.knit(MINUS, bn("f10"), NO_CARRIERS).unwrap();
        assert!(!w.needle_state().is_loaded(&bn("f10")));

        assert_eq!(w.operations().lines(), &["knit + f10 A", "knit - f10"]);
    }

    #[test]
    fn test_tuck_always_loads() {
        let mut w = writer();
        w.tuck(MINUS, bn("b3"), NO_CARRIERS).unwrap();
        w.tuck(MINUS, bn("b4"), &["A", "B"]).unwrap();
        assert!(w.needle_state().is_loaded(&bn("b3")));
        assert!(w.needle_state().is_loaded(&bn("b4")));
        assert_eq!(w.operations().lines().last().map(String::as_str), Some("tuck - b4 A B"));
    }

    #[test]
    fn test_split_moves_loop_and_deposits_new_one() {
        let mut w = writer();
        w.knit(PLUS, bn("b10"), &["A"]).unwrap();

        w.split(PLUS, bn("b10"), bn("f20"), &["A", "B"]).unwrap();
        assert!(w.needle_state().is_loaded(&bn("f20")));
        assert!(w.needle_state().is_loaded(&bn("b10")));

        w.split(PLUS, bn("f20"), bn("b21"), NO_CARRIERS).unwrap();
        assert!(!w.needle_state().is_loaded(&bn("f20")));
        assert!(w.needle_state().is_loaded(&bn("b21")));

        assert_eq!(w.operations().lines()[1], "split + b10 f20 A B");
        assert_eq!(w.operations().lines()[2], "split + f20 b21");
    }

    #[test]
    fn test_split_from_empty_needle_with_carriers() {
        let mut w = writer();
        w.split(MINUS, bn("f1"), bn("b1"), &["A"]).unwrap();
        assert!(w.needle_state().is_loaded(&bn("f1")));
        assert!(!w.needle_state().is_loaded(&bn("b1")));
    }

    #[test]
    fn test_split_same_bed() {
        let mut w = writer();
        w.knit(PLUS, bn("b10"), &["A"]).unwrap();
        let before = w.snapshot();

        let err = w.split(PLUS, bn("b10"), bn("b5"), &["A"]).unwrap_err();
        assert!(matches!(err, KnitoutError::SameBedSplit { .. }));
        assert_eq!(w.snapshot(), before);

        // Different polarity is a different bed.
        w.split(PLUS, bn("b10"), bn("b+5"), NO_CARRIERS).unwrap();
    }

    #[test]
    fn test_miss_requires_carriers() {
        let mut w = writer();
        let err = w.miss(PLUS, bn("f1"), NO_CARRIERS).unwrap_err();
        assert!(matches!(err, KnitoutError::NoCarriersForMiss));

        w.miss(PLUS, bn("f1"), &["A"]).unwrap();
        assert!(w.needle_state().is_empty());
        assert_eq!(w.operations().lines(), &["miss + f1 A"]);
    }

    #[test]
    fn test_drop_amiss_xfer() {
        let mut w = writer();
        w.tuck(PLUS, bn("f10"), &["A"]).unwrap();
        w.tuck(PLUS, bn("f20"), &["A"]).unwrap();

        w.drop(bn("f10"));
        assert!(!w.needle_state().is_loaded(&bn("f10")));

        w.amiss(bn("f30"));
        assert!(!w.needle_state().is_loaded(&bn("f30")));

        w.xfer(bn("f20"), bn("b20"));
        assert!(!w.needle_state().is_loaded(&bn("f20")));
        assert!(w.needle_state().is_loaded(&bn("b20")));

        // Transferring from an empty needle moves nothing.
        w.xfer(bn("f5"), bn("b5"));
        assert!(!w.needle_state().is_loaded(&bn("b5")));

        assert_eq!(
            &w.operations().lines()[2..],
            &["drop f10", "amiss f30", "xfer f20 b20", "xfer f5 b5"]
        );
    }

    #[test]
    fn test_rack_quantization() {
        let mut w = writer();
        w.rack(0.5).unwrap();
        assert_eq!(w.racking(), 0.5);
        assert!(w.diagnostics().is_empty());

        w.rack(0.33).unwrap();
        assert_eq!(w.racking(), 0.25);
        assert_eq!(
            w.diagnostics(),
            &vec![Diagnostic::RackingRounded {
                requested: 0.33,
                applied: 0.25
            }]
        );

        w.rack(-1.0005).unwrap();
        assert_eq!(w.racking(), -1.0);
        assert_eq!(w.diagnostics().len(), 1);

        assert_eq!(w.operations().lines(), &["rack 0.5", "rack 0.25", "rack -1"]);
    }

    #[test]
    fn test_rack_huge_values_stay_finite() {
        let mut w = writer();
        for value in [1e308, f64::MAX, -f64::MAX, 4_503_599_627_370_497.0] {
            w.rack(value).unwrap();
            assert!(w.racking().is_finite());
            assert_eq!(w.racking(), value);
        }
        assert!(w.diagnostics().is_empty());
        assert!(w.operations().iter().all(|line| !line.contains("inf")));
    }

    #[test]
    fn test_rack_non_finite() {
        let mut w = writer();
        w.rack(1.0).unwrap();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = w.rack(value).unwrap_err();
            assert_eq!(err.error_code(), "NON_FINITE_RACKING");
        }
        assert_eq!(w.racking(), 1.0);
        assert_eq!(w.operations().len(), 1);
    }

    #[test]
    fn test_comment_lines() {
        let mut w = writer();
        w.comment("line1\nline2");
        assert_eq!(w.operations().lines(), &[";line1", ";line2"]);
        assert!(w.diagnostics().is_empty());

        w.comment(";;;more comments");
        assert_eq!(w.operations().lines().last().map(String::as_str), Some(";more comments"));
        assert!(matches!(
            w.diagnostics()[0],
            Diagnostic::CommentPrefixStripped { .. }
        ));
    }

    #[test]
    fn test_pause() {
        let mut w = writer();
        w.pause("\tsome comment about the pause");
        w.pause("");
        assert_eq!(
            w.operations().lines(),
            &[";\tsome comment about the pause", "pause", ";", "pause"]
        );
    }

    #[test]
    fn test_raw_operation() {
        let mut w = writer();
        w.add_raw_operation("x-vis-color #ff0000 A");
        assert_eq!(w.operations().lines(), &["x-vis-color #ff0000 A"]);
        assert!(matches!(
            w.diagnostics()[0],
            Diagnostic::RawOperation { .. }
        ));
    }

    #[test]
    fn test_extension_ranges() {
        let mut w = writer();
        w.stitch(10, 20);
        w.stitch(-1, 20);
        w.stitch_number(5);
        w.stitch_number(-5);
        w.speed_number(300);
        w.speed_number(-1);
        w.roller_advance(100);
        w.add_roller_advance(-20);
        w.carrier_spacing(0);
        w.carrier_spacing(2);
        w.carrier_stopping_distance(-3);
        w.carrier_stopping_distance(4);

        assert_eq!(
            w.operations().lines(),
            &[
                "stitch 10 20",
                "x-stitch-number 5",
                "x-speed-number 300",
                "x-roller-advance 100",
                "x-add-roller-advance -20",
                "x-carrier-spacing 2",
                "x-carrier-stopping-distance 4",
            ]
        );

        let rejected = w
            .diagnostics()
            .iter()
            .filter(|d| matches!(d, Diagnostic::ExtensionValueRejected { .. }))
            .count();
        assert_eq!(rejected, 5);
    }

    #[test]
    fn test_presser_mode() {
        let mut w = writer();
        w.presser_mode("auto");
        w.presser_mode("sideways");
        assert_eq!(w.operations().lines(), &["x-presser-mode auto"]);
        assert_eq!(
            w.diagnostics(),
            &vec![Diagnostic::UnknownPresserMode {
                mode: "sideways".into()
            }]
        );
    }

    #[test]
    fn test_machine_support() {
        let mut w = writer();
        // No machine declared: nothing to compare against.
        w.roller_advance(10);
        assert!(w.diagnostics().is_empty());

        w.add_header("Machine", "SWGXYZ").unwrap();
        w.presser_mode("on");
        assert!(w.diagnostics().is_empty());

        w.carrier_spacing(3);
        assert_eq!(
            w.diagnostics(),
            &vec![Diagnostic::UnsupportedExtension {
                extension: "carrier spacing",
                machine: "SWGXYZ".into()
            }]
        );
        assert_eq!(w.operations().lines().last().map(String::as_str), Some("x-carrier-spacing 3"));
    }

    #[test]
    fn test_kniterate_machine_case_insensitive() {
        let mut w = writer();
        w.add_header("Machine", "Kniterate").unwrap();
        w.roller_advance(10);
        w.presser_mode("off");
        assert_eq!(w.diagnostics().len(), 1);
        assert!(matches!(
            w.diagnostics()[0],
            Diagnostic::UnsupportedExtension {
                extension: "presser mode",
                ..
            }
        ));
    }

    #[test]
    fn test_render_document() {
        let mut w = writer();
        w.add_header("Machine", "SWGXYZ").unwrap();
        w.add_header("Gauge", "15").unwrap();
        w.in_carriers(&["A"]).unwrap();
        w.knit(PLUS, bn("f1"), &["A"]).unwrap();
        w.out(&["A"]).unwrap();

        assert_eq!(
            w.render(),
            ";!knitout-2\n\
             ;;Carriers: A B C\n\
             ;;Machine: SWGXYZ\n\
             ;;Gauge: 15\n\
             in A\n\
             knit + f1 A\n\
             out A\n"
        );

        let mut buf = Vec::new();
        w.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), w.render());
    }

    #[test]
    fn test_write_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.k");

        let mut w = writer();
        w.comment("hello");
        w.write(&Sink::File(path.clone())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, w.render());
    }

    #[test]
    fn test_write_sink_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.k");

        let w = writer();
        let err = w.write(&Sink::File(path)).unwrap_err();
        assert_eq!(err.error_code(), "SINK_UNAVAILABLE");
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut w = writer();
        w.inhook(&["B"]).unwrap();
        w.tuck(PLUS, bn("f2"), &["B"]).unwrap();
        w.rack(0.25).unwrap();

        let snapshot = w.snapshot();
        assert_eq!(
            snapshot.carriers,
            vec![CarrierSnapshot {
                name: "B".into(),
                on_hook: true
            }]
        );
        assert_eq!(snapshot.loaded_needles, vec![bn("f2")]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["loaded_needles"][0], "f2");
        assert_eq!(json["racking"], 0.25);
        assert_eq!(json["operations"][0], "inhook B");
    }
}
