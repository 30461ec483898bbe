//! Info command: what a profile says about its vcgt tag.

use std::fs;
use std::io::{self, Cursor, Write};
use std::path::Path;

use anyhow::{Context, Result};
use vcgt_core::icc::{ProfileHeader, TagDirectoryEntry, TagDirectoryReader, TagSignature};
use vcgt_core::vcgt::VcgtTable;
use vcgt_core::{Channel, Diagnostics, TagDecoder, VcgtCurve, VcgtDecoder};

use crate::InfoArgs;
use crate::output::report;

/// Prints header summary, tag directory and the decoded vcgt tag.
pub fn run(args: InfoArgs) -> Result<()> {
    let data = fs::read(&args.profile)
        .with_context(|| format!("Failed to read {}", args.profile.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    describe(&mut out, &args.profile, &data)?;
    out.flush()?;
    Ok(())
}

/// Write the report for one profile.
///
/// A directory whose declared count runs past the data is listed up to the
/// last complete entry; it is only an error if no vcgt entry was among them.
pub fn describe<W: Write>(out: &mut W, path: &Path, data: &[u8]) -> Result<()> {
    let header = ProfileHeader::read(data)?;
    writeln!(out, "{}", path.display())?;
    writeln!(out, "  File size:  {} bytes", data.len())?;
    writeln!(out, "  Declared:   {} bytes", header.size)?;
    writeln!(out, "  Version:    {}", header.version)?;
    writeln!(out, "  Class:      {:?}", header.device_class)?;
    writeln!(out, "  Space:      {} -> {}", header.color_space_name(), header.pcs_name())?;
    if !header.has_signature {
        writeln!(out, "  (no 'acsp' signature at offset 36)")?;
    }

    let mut reader = TagDirectoryReader::new(Cursor::new(data))?;
    writeln!(out, "  Tags:       {}", reader.tag_count())?;

    let mut vcgt: Option<TagDirectoryEntry> = None;
    let mut directory_error = None;
    for entry in reader.by_ref() {
        match entry {
            Ok(entry) => {
                writeln!(out, "    {}  offset {:>8}  size {:>8}", entry.signature, entry.offset, entry.size)?;
                if entry.signature == TagSignature::VCGT && vcgt.is_none() {
                    vcgt = Some(entry);
                }
            }
            Err(err) => {
                writeln!(out, "    (directory ends early: {err})")?;
                directory_error = Some(err);
                break;
            }
        }
    }

    let Some(vcgt) = vcgt else {
        if let Some(err) = directory_error {
            return Err(err).context("Failed to read tag directory");
        }
        writeln!(out, "  vcgt:       none")?;
        return Ok(());
    };

    let mut diagnostics = Diagnostics::new();
    let curve = TagDecoder::default().decode(data, vcgt.into(), &mut diagnostics)?;
    match &curve {
        VcgtCurve::Formula(formula) => {
            writeln!(out, "  vcgt:       formula")?;
            for channel in Channel::ALL {
                let c = formula.channel(channel);
                writeln!(
                    out,
                    "    {:<6} gamma {:.6}  min {:.6}  max {:.6}",
                    channel.name(),
                    c.gamma.to_f64(),
                    c.min.to_f64(),
                    c.max.to_f64()
                )?;
            }
        }
        VcgtCurve::Table(table) => {
            writeln!(out, "  vcgt:       table")?;
            writeln!(out, "    channels:        {}", table.channel_count())?;
            writeln!(out, "    entry size:      {}bits", table.entry_size().bits())?;
            writeln!(out, "    entries/channel: {}", table.entry_count())?;
            write_endpoints(out, table)?;
        }
    }
    report(&diagnostics);

    Ok(())
}

fn write_endpoints<W: Write>(out: &mut W, table: &VcgtTable) -> io::Result<()> {
    for channel in Channel::ALL {
        let samples = table.samples(channel);
        let first = samples.first().copied().unwrap_or_default();
        let last = samples.last().copied().unwrap_or_default();
        writeln!(out, "    {:<6} {:#06x} .. {:#06x}", channel.name(), first, last)?;
    }
    Ok(())
}
