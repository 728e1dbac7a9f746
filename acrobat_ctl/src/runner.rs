// acrobat_ctl/src/runner.rs

use acrobat_core::allocation::ActuatorCommand;
use acrobat_core::config::VehicleConfig;
use acrobat_core::pipeline::ControlPipeline;
use std::io::BufRead;
use tracing::{debug, warn};

use crate::error::CtlError;
use crate::input::SampleParser;
use crate::sink::PulseSink;

/// Counters for one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Samples that produced a control command.
    pub cycles: usize,
    /// Samples where the controller refused to evaluate; neutral was sent.
    pub degenerate: usize,
    /// Lines that could not be parsed and were dropped.
    pub rejected: usize,
}

/// Drives the pipeline from `reader` until end of input.
///
/// Every sample is evaluated independently. A bad line is dropped; a cycle
/// the controller cannot evaluate sends the neutral command so the thrusters
/// never keep a stale demand. Only I/O failures stop the loop.
pub fn run<R: BufRead, S: PulseSink>(
    pipeline: &ControlPipeline,
    vehicle: &VehicleConfig,
    parser: &SampleParser,
    mut reader: R,
    sink: &mut S,
) -> Result<RunSummary, CtlError> {
    let mut summary = RunSummary::default();
    let mut warned_missing_velocity = false;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        // Raw bytes so a corrupted line is dropped instead of ending the run.
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = line_no, "Dropping sample, not valid UTF-8: {}", e);
                summary.rejected += 1;
                continue;
            }
        };

        let parsed = match parser.parse_line(line_no, line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                warn!("Dropping sample: {}", e);
                summary.rejected += 1;
                continue;
            }
        };

        if !parsed.has_velocity && !warned_missing_velocity {
            warn!("Samples carry no velocities; using zero, derivative terms give no damping.");
            warned_missing_velocity = true;
        }

        match pipeline.step(&parsed.sample) {
            Ok(output) => {
                debug!(
                    line = line_no,
                    force = ?output.wrench.force,
                    torque = output.wrench.torque,
                    pulse_widths = ?output.command.pulse_widths,
                    blade_rps = ?vehicle.blade_rps(&output.command),
                    "control cycle"
                );
                sink.send(&output.command)?;
                summary.cycles += 1;
            }
            Err(e) => {
                warn!(line = line_no, "Control cycle skipped, commanding neutral: {}", e);
                sink.send(&ActuatorCommand::neutral())?;
                summary.degenerate += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AttitudeFormat;
    use acrobat_core::config::MissionConfig;

    fn vehicle() -> VehicleConfig {
        VehicleConfig::default()
    }

    #[derive(Default)]
    struct RecordingSink(Vec<ActuatorCommand>);

    impl PulseSink for RecordingSink {
        fn send(&mut self, command: &ActuatorCommand) -> Result<(), CtlError> {
            self.0.push(*command);
            Ok(())
        }
    }

    fn pipeline() -> ControlPipeline {
        ControlPipeline::from_config(&MissionConfig::default()).unwrap()
    }

    #[test]
    fn test_on_target_sample_is_neutral() {
        let mut sink = RecordingSink::default();
        let summary = run(
            &pipeline(),
            &vehicle(),
            &SampleParser::default(),
            "0 0 0.2 0 0 0\n".as_bytes(),
            &mut sink,
        )
        .unwrap();

        assert_eq!(summary, RunSummary { cycles: 1, degenerate: 0, rejected: 0 });
        assert_eq!(sink.0, vec![ActuatorCommand::neutral()]);
    }

    #[test]
    fn test_bad_lines_are_dropped_and_loop_continues() {
        let input = "\
# header
0 0 0.2 0 0 0
not a sample
0.05 0 0.2 0 0 0 0 0 0 0 0 0
";
        let mut sink = RecordingSink::default();
        let summary = run(
            &pipeline(),
            &vehicle(),
            &SampleParser::default(),
            input.as_bytes(),
            &mut sink,
        )
        .unwrap();

        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(sink.0.len(), 2);
        assert_ne!(sink.0[1], ActuatorCommand::neutral());
    }

    #[test]
    fn test_half_turn_sends_neutral_and_recovers() {
        let input = "0 0 0.2 3.141592653589793 0 0\n0 0 0.2 0 0 0\n";
        let mut sink = RecordingSink::default();
        let summary = run(
            &pipeline(),
            &vehicle(),
            &SampleParser::new(AttitudeFormat::Euler, false),
            input.as_bytes(),
            &mut sink,
        )
        .unwrap();

        assert_eq!(summary.degenerate, 1);
        assert_eq!(summary.cycles, 1);
        assert_eq!(sink.0, vec![ActuatorCommand::neutral(), ActuatorCommand::neutral()]);
    }

    #[test]
    fn test_invalid_utf8_line_is_dropped_and_loop_continues() {
        let mut input = b"0 0 0.2 0 0 0\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"0.05 0 0.2 0 0 0\n");

        let mut sink = RecordingSink::default();
        let summary = run(
            &pipeline(),
            &vehicle(),
            &SampleParser::default(),
            input.as_slice(),
            &mut sink,
        )
        .unwrap();

        assert_eq!(summary, RunSummary { cycles: 2, degenerate: 0, rejected: 1 });
        assert_eq!(sink.0.len(), 2);
        assert_ne!(sink.0[1], ActuatorCommand::neutral());
    }

    #[test]
    fn test_last_line_without_newline_is_used() {
        let mut sink = RecordingSink::default();
        let summary = run(
            &pipeline(),
            &vehicle(),
            &SampleParser::default(),
            "0 0 0.2 0 0 0".as_bytes(),
            &mut sink,
        )
        .unwrap();
        assert_eq!(summary.cycles, 1);
    }
}
