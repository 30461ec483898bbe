//! Ramp output
//!
//! A [`RampTarget`] that writes ramps instead of loading them into hardware.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use vcgt_core::{Diagnostics, Error, GammaRamp, RampTarget};

/// How ramps are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RampFormat {
    /// One `r g b` line per entry, lowercase hex
    Hex,
    /// JSON object with size and the three channels
    Json,
}

/// Writes each applied ramp to a file or stdout
///
/// The destination is opened on the first applied ramp, so a run that never
/// applies one (no-action mode, or a failed load) leaves an existing output
/// file untouched.
pub struct WriterTarget {
    size: usize,
    format: RampFormat,
    path: Option<PathBuf>,
    writer: Option<Box<dyn Write>>,
}

impl WriterTarget {
    /// Target writing to `path`, or to stdout when `None`
    pub fn new(size: usize, format: RampFormat, path: Option<PathBuf>) -> Self {
        Self {
            size,
            format,
            path,
            writer: None,
        }
    }

    /// Whether a ramp has been written
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn writer(&mut self) -> io::Result<&mut Box<dyn Write>> {
        if self.writer.is_none() {
            let writer: Box<dyn Write> = match &self.path {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(BufWriter::new(io::stdout())),
            };
            self.writer = Some(writer);
        }
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("ramp output not open"))
    }

    pub fn finish(self) -> Result<()> {
        match self.writer {
            Some(mut writer) => writer.flush().context("Failed to flush ramp output"),
            None => Ok(()),
        }
    }
}

impl RampTarget for WriterTarget {
    fn ramp_size(&self) -> vcgt_core::Result<usize> {
        Ok(self.size)
    }

    fn apply(&mut self, ramp: &GammaRamp) -> vcgt_core::Result<()> {
        let format = self.format;
        let writer = self.writer().map_err(Error::Io)?;
        write_ramp(writer, ramp, format).map_err(Error::Io)
    }
}

/// Render a ramp in the given format
pub fn write_ramp<W: Write + ?Sized>(writer: &mut W, ramp: &GammaRamp, format: RampFormat) -> io::Result<()> {
    match format {
        RampFormat::Hex => {
            for (r, g, b) in ramp.iter() {
                writeln!(writer, "{r:x} {g:x} {b:x}")?;
            }
        }
        RampFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, ramp)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Print warnings the way the rest of the tool reports problems
pub fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}
