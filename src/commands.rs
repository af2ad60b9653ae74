//! Sample programs driven from the command line.

use crate::config::Config;
use crate::Commands;
use knitout_core::{
    Bed, BedNeedle, DiagnosticSink, Direction, KnitoutError, Result, Writer, NO_CARRIERS,
};

/// Carriers of the carrier-string demo.
const CARRIERS_DEMO: [&str; 5] = ["1", "2", "3", "4", "10"];

/// Carriers of the guided tour, declared out of name order.
const TOUR_CARRIERS: [&str; 4] = ["B", "A", "2", "C"];

/// A finished program plus the calls the writer refused along the way.
pub struct Program<D: DiagnosticSink> {
    pub writer: Writer<D>,
    pub rejected: Vec<KnitoutError>,
}

/// Builds the program for `cmd`.
///
/// Errors the sample provokes on purpose are collected in
/// [`Program::rejected`]; any other error aborts the program.
pub fn execute<D: DiagnosticSink>(cmd: &Commands, config: &Config, diagnostics: D) -> Result<Program<D>> {
    match cmd {
        Commands::Swatch {
            width,
            height,
            carrier,
        } => {
            let mut writer = Writer::with_diagnostics(config.machine.carriers.clone(), diagnostics);
            config.machine.apply_headers(&mut writer)?;
            swatch(&mut writer, *width, *height, carrier)?;
            Ok(Program {
                writer,
                rejected: Vec::new(),
            })
        }

        Commands::Carriers => {
            let mut writer = Writer::with_diagnostics(CARRIERS_DEMO, diagnostics);
            config.machine.apply_headers(&mut writer)?;
            carrier_strings(&mut writer)?;
            Ok(Program {
                writer,
                rejected: Vec::new(),
            })
        }

        Commands::Tour => {
            let mut writer = Writer::with_diagnostics(TOUR_CARRIERS, diagnostics);
            config.machine.apply_headers(&mut writer)?;
            let mut rejected = Vec::new();
            tour(&mut writer, &mut rejected)?;
            Ok(Program { writer, rejected })
        }
    }
}

/// Stockinette swatch: hook in, cast on by tucking alternate needles in
/// both directions, knit `height` row pairs, hook out.
pub fn swatch<D: DiagnosticSink>(w: &mut Writer<D>, width: u32, height: u32, carrier: &str) -> Result<()> {
    let carrier = [carrier];
    let front = |s| BedNeedle::from_parts(Bed::FRONT, s);

    w.presser_mode("auto");
    w.inhook(&carrier)?;

    for s in (1..=width).rev() {
        if s % 2 == 0 {
            w.tuck(Direction::Decreasing, front(s), &carrier)?;
        } else {
            w.miss(Direction::Decreasing, front(s), &carrier)?;
        }
    }
    for s in 1..=width {
        if s % 2 != 0 {
            w.tuck(Direction::Increasing, front(s), &carrier)?;
        } else {
            w.miss(Direction::Increasing, front(s), &carrier)?;
        }
    }

    w.releasehook(&carrier)?;

    let mut direction = Direction::Decreasing;
    for _ in 0..2 * height {
        let needles: Vec<u32> = match direction {
            Direction::Decreasing => (1..=width).rev().collect(),
            Direction::Increasing => (1..=width).collect(),
        };
        for s in needles {
            w.knit(direction, front(s), &carrier)?;
        }
        direction = direction.reverse();
    }

    w.outhook(&carrier)?;
    tracing::debug!("swatch: {}x{} on carrier {}", width, height, carrier[0]);
    Ok(())
}

/// The ways carriers can be written for a needle operation.
pub fn carrier_strings<D: DiagnosticSink>(w: &mut Writer<D>) -> Result<()> {
    w.add_header("Presser", "On")?;
    w.add_header("X-Presser", "On")?;
    w.add_header("X-Takedown", "On")?;

    w.knit_str("-", "b3", "10")?;
    w.knit_str("-", "b3", "   10")?;
    w.knit(Direction::Increasing, BedNeedle::new("f", 1)?, &["1", "2"])?;
    w.knit_str("-", "b3", "1    3")?;
    w.tuck_str("-", "b3", "1,   4")?;
    Ok(())
}

/// Every opcode once, including calls that are refused.
pub fn tour<D: DiagnosticSink>(w: &mut Writer<D>, rejected: &mut Vec<KnitoutError>) -> Result<()> {
    let mut expect_err = |result: Result<()>| {
        if let Err(e) = result {
            tracing::debug!("refused: {}", e);
            rejected.push(e);
        }
    };

    w.add_header("Presser", "On")?;
    w.add_header("X-Presser", "On")?;
    w.add_header("X-Takedown", "On")?;

    w.in_carriers(&["A", "B", "C"])?;
    expect_err(w.inhook(&["C"]));
    expect_err(w.releasehook(&["A"]));

    w.stitch(10, 20);
    w.stitch_number(5);
    w.speed_number(300);
    w.presser_mode("on");
    w.roller_advance(100);
    w.add_roller_advance(-20);
    w.carrier_spacing(2);
    w.carrier_stopping_distance(4);

    w.knit_str("+", "f10", "A, 2")?;
    w.knit_str("+", "f10", "A, B, C")?;
    w.comment("a carrier string with a comma is split into two carriers:");
    w.knit_str("+", "f10", "1,2")?;
    w.knit_str("+", "f1099", "")?;
    expect_err(w.knit_str("_", "f1099", ""));

    w.rack(0.5)?;
    expect_err(w.xfer_str("fs10", "fs10.5"));
    w.rack(0.3)?;
    w.rack(0.0)?;

    w.drop_str("f10")?;
    w.amiss_str("f20")?;
    w.comment("transfers are supported in knitout as an opcode");
    w.xfer_str("f20", "b20")?;
    w.split_str("+", "b10", "f20", "A, B")?;
    expect_err(w.split_str("+", "b10", "c20", "A, B"));
    expect_err(w.split_str("+", "b10", "b20", "A"));
    w.tuck(Direction::Decreasing, BedNeedle::new("b", 5)?, NO_CARRIERS)?;

    w.knit(Direction::Decreasing, BedNeedle::new("f", 10000)?, &["1"])?;
    w.knit(Direction::Decreasing, BedNeedle::new("b", 40000)?, &["20000"])?;
    expect_err(
        BedNeedle::new("b", -100)
            .map_err(KnitoutError::from)
            .and_then(|at| w.miss(Direction::Increasing, at, &["4"])),
    );
    expect_err(w.miss_str("+", "f3", ""));

    w.out_str("A, B, C")?;
    expect_err(w.outhook(&["A", "B", "C"]));

    w.add_raw_operation("x-vis-color #ff0000 A");
    w.pause("\tsome comment about the pause");
    w.comment("a \tcomment; \n another comment;");
    w.comment(";another comment");
    w.comment(";;;more comments");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use knitout_core::Diagnostic;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_swatch_program() {
        let cmd = Commands::Swatch {
            width: 4,
            height: 2,
            carrier: "6".to_string(),
        };
        let program = execute(&cmd, &config(), Vec::<Diagnostic>::new()).unwrap();
        let w = &program.writer;

        assert!(program.rejected.is_empty());
        assert!(w.diagnostics().is_empty());
        assert_eq!(w.carrier_state().active_count(), 0);
        assert_eq!(w.needle_state().len(), 4);

        let lines = w.operations().lines();
        assert_eq!(lines[0], "x-presser-mode auto");
        assert_eq!(lines[1], "inhook 6");
        assert_eq!(lines[2], "tuck - f4 6");
        assert_eq!(lines[5], "miss - f1 6");
        assert_eq!(lines[6], "tuck + f1 6");
        assert_eq!(lines[10], "releasehook 6");
        assert_eq!(&lines[11..16], &["knit - f4 6", "knit - f3 6", "knit - f2 6", "knit - f1 6", "knit + f1 6"]);
        assert_eq!(lines[19], "knit - f4 6");
        assert_eq!(lines.last().map(String::as_str), Some("outhook 6"));
        // presser + inhook + 8 cast-on + releasehook + 16 knits + outhook
        assert_eq!(lines.len(), 28);
    }

    #[test]
    fn test_swatch_unknown_carrier_is_reported() {
        let cmd = Commands::Swatch {
            width: 2,
            height: 1,
            carrier: "12".to_string(),
        };
        let program = execute(&cmd, &config(), Vec::<Diagnostic>::new()).unwrap();
        assert!(program
            .writer
            .diagnostics()
            .iter()
            .all(|d| matches!(d, Diagnostic::UnknownCarrier { .. })));
        assert!(!program.writer.diagnostics().is_empty());
    }

    #[test]
    fn test_swatch_blank_carrier_fails() {
        let cmd = Commands::Swatch {
            width: 2,
            height: 1,
            carrier: " ".to_string(),
        };
        let err = execute(&cmd, &config(), Vec::<Diagnostic>::new())
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "INVALID_CARRIER_NAME");
    }

    #[test]
    fn test_carriers_program() {
        let program = execute(&Commands::Carriers, &config(), Vec::<Diagnostic>::new()).unwrap();
        let w = &program.writer;

        assert_eq!(
            w.operations().lines(),
            &[
                "knit - b3 10",
                "knit - b3 10",
                "knit + f1 1 2",
                "knit - b3 1 3",
                "tuck - b3 1 4",
            ]
        );
        assert_eq!(w.headers().headers()[0].to_string(), ";;Carriers: 1 2 3 4 10");
        assert_eq!(
            w.diagnostics(),
            &vec![Diagnostic::UnrecognizedHeader {
                name: "Presser".into()
            }]
        );
    }

    #[test]
    fn test_tour_program() {
        let program = execute(&Commands::Tour, &config(), Vec::<Diagnostic>::new()).unwrap();
        let w = &program.writer;

        let codes: Vec<&str> = program.rejected.iter().map(|e| e.error_code()).collect();
        assert_eq!(
            codes,
            vec![
                "CARRIER_ALREADY_IN",
                "CARRIER_NOT_IN_HOOK",
                "INVALID_DIRECTION",
                "INVALID_BED_NEEDLE_FORMAT",
                "INVALID_BED_SPEC",
                "SAME_BED_SPLIT",
                "INVALID_NEEDLE_INDEX",
                "NO_CARRIERS_FOR_MISS",
                "CARRIER_NOT_IN",
            ]
        );

        assert_eq!(w.carrier_state().active_count(), 0);
        assert_eq!(w.racking(), 0.0);

        let lines = w.operations().lines();
        assert_eq!(lines[0], "in A B C");
        assert!(lines.contains(&"split + b10 f20 A B".to_string()));
        assert!(lines.contains(&"rack 0.25".to_string()));
        assert!(lines.contains(&"knit + f10 1 2".to_string()));
        assert_eq!(
            &lines[lines.len() - 6..],
            &[
                ";\tsome comment about the pause",
                "pause",
                ";a \tcomment; ",
                "; another comment;",
                ";another comment",
                ";more comments",
            ]
        );

        let rounded = w
            .diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::RackingRounded { .. }));
        assert!(rounded);
        let unsupported = w
            .diagnostics()
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnsupportedExtension { .. }))
            .count();
        assert_eq!(unsupported, 4);
    }
}
