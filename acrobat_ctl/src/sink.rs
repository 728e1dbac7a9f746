// acrobat_ctl/src/sink.rs

use acrobat_core::allocation::ActuatorCommand;
use std::io::Write;
use tracing::warn;

use crate::error::CtlError;

/// Where pulse widths go: the boundary to the ESC driver.
///
/// Sinks are responsible for keeping commands inside the protocol range; the
/// allocator does not clamp.
pub trait PulseSink {
    fn send(&mut self, command: &ActuatorCommand) -> Result<(), CtlError>;
}

/// Writes `pw1 pw2 pw3` per command, saturated to 1000..=2000 µs.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    saturated: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            saturated: 0,
        }
    }

    /// How many commands had to be clamped so far.
    pub fn saturated_count(&self) -> usize {
        self.saturated
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PulseSink for WriterSink<W> {
    fn send(&mut self, command: &ActuatorCommand) -> Result<(), CtlError> {
        let out = if command.is_within_protocol() {
            *command
        } else {
            self.saturated += 1;
            let clamped = command.saturated();
            warn!(
                requested = ?command.pulse_widths,
                sent = ?clamped.pulse_widths,
                "pulse widths outside the ESC range, saturating"
            );
            clamped
        };

        let [a, b, c] = out.pulse_widths;
        writeln!(self.writer, "{:.1} {:.1} {:.1}", a, b, c)?;
        self.writer.flush()?;
        Ok(())
    }
}
