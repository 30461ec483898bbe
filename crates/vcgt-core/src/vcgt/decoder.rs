//! vcgt tag decoding
//!
//! Tag layout (all integers big-endian):
//!
//! ```text
//! 0   'vcgt'
//! 4   reserved
//! 8   curve type: 0 = table, 1 = formula
//! 12  formula: 9 x u16Fixed16 (r gamma/min/max, g ..., b ...)
//! 12  table:   channels u16, entries u16, entry size u16,
//!              then channels x entries samples, channel-major
//! ```

use tracing::debug;

use super::curve::{
    CURVE_TYPE_FORMULA, CURVE_TYPE_TABLE, EntrySize, FormulaChannel, RGB_CHANNELS, VcgtCurve,
    VcgtFormula, VcgtTable,
};
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{FormatError, Result, UnsupportedFormat};
use crate::icc::{TagLocation, TagSignature, U16Fixed16};
use crate::options::SignaturePolicy;

/// Turns the bytes of a vcgt tag into a curve
pub trait VcgtDecoder {
    /// Decode the tag found at `location` inside `profile`
    ///
    /// Non-fatal findings go to `diagnostics`.
    fn decode(
        &self,
        profile: &[u8],
        location: TagLocation,
        diagnostics: &mut Diagnostics,
    ) -> Result<VcgtCurve>;
}

/// Native vcgt decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDecoder {
    signature_policy: SignaturePolicy,
}

impl TagDecoder {
    pub fn new(signature_policy: SignaturePolicy) -> Self {
        Self { signature_policy }
    }

    fn decode_formula(reader: &mut TagReader<'_>) -> Result<VcgtFormula> {
        let mut channel = || -> Result<FormulaChannel> {
            Ok(FormulaChannel {
                gamma: U16Fixed16::from_raw(reader.read_u32()?),
                min: U16Fixed16::from_raw(reader.read_u32()?),
                max: U16Fixed16::from_raw(reader.read_u32()?),
            })
        };

        let red = channel()?;
        let green = channel()?;
        let blue = channel()?;

        for (name, c) in [("Red", &red), ("Green", &green), ("Blue", &blue)] {
            debug!(
                "{name}: Gamma {:.6} Min {:.6} Max {:.6}",
                c.gamma.to_f64(),
                c.min.to_f64(),
                c.max.to_f64()
            );
        }

        Ok(VcgtFormula { red, green, blue })
    }

    fn decode_table(reader: &mut TagReader<'_>) -> Result<VcgtTable> {
        let channels = reader.read_u16()?;
        let entries = reader.read_u16()?;
        let entry_size_raw = reader.read_u16()?;

        if channels != RGB_CHANNELS {
            return Err(UnsupportedFormat::ChannelCount(channels).into());
        }
        let entry_size =
            EntrySize::from_u16(entry_size_raw).ok_or(UnsupportedFormat::EntrySize(entry_size_raw))?;
        if entries == 0 {
            return Err(UnsupportedFormat::EmptyTable.into());
        }

        debug!(
            "channels: {}, entry size: {}bits, entries/channel: {}",
            channels,
            entry_size.bits(),
            entries
        );

        let mut channel = || -> Result<Vec<u16>> {
            (0..entries)
                .map(|_| reader.read_sample(entry_size))
                .collect()
        };

        let red = channel()?;
        let green = channel()?;
        let blue = channel()?;

        VcgtTable::new(entry_size, red, green, blue)
            .ok_or_else(|| UnsupportedFormat::EmptyTable.into())
    }
}

impl VcgtDecoder for TagDecoder {
    fn decode(
        &self,
        profile: &[u8],
        location: TagLocation,
        diagnostics: &mut Diagnostics,
    ) -> Result<VcgtCurve> {
        let out_of_bounds = || FormatError::TagOutOfBounds {
            offset: location.offset,
            size: location.size,
            profile_size: profile.len(),
        };
        let start = location.offset as usize;
        let end = start
            .checked_add(location.size as usize)
            .ok_or_else(out_of_bounds)?;
        let body = profile.get(start..end).ok_or_else(out_of_bounds)?;

        let mut reader = TagReader::new(body);

        let signature = reader.read_u32()?;
        if signature != TagSignature::VCGT.0 {
            match self.signature_policy {
                SignaturePolicy::Strict => {
                    return Err(FormatError::SignatureMismatch(signature).into());
                }
                SignaturePolicy::Permissive => {
                    diagnostics.push(Diagnostic::warning(DiagnosticKind::SignatureMismatch {
                        found: signature,
                    }));
                }
            }
        }

        let _reserved = reader.read_u32()?;

        match reader.read_u32()? {
            CURVE_TYPE_FORMULA => Ok(VcgtCurve::Formula(Self::decode_formula(&mut reader)?)),
            CURVE_TYPE_TABLE => Ok(VcgtCurve::Table(Self::decode_table(&mut reader)?)),
            other => Err(UnsupportedFormat::CurveType(other).into()),
        }
    }
}

/// Bounds-checked big-endian cursor over a tag body
struct TagReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TagReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(FormatError::Truncated {
                position: self.pos,
                needed: N,
                tag_size: self.data.len(),
            })?;
        self.pos += N;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    fn read_sample(&mut self, size: EntrySize) -> Result<u16> {
        match size {
            EntrySize::One => {
                let [b] = self.take::<1>()?;
                Ok(u16::from(b))
            }
            EntrySize::Two => self.read_u16(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ramp::Channel;

    fn formula_tag(gammas: [f64; 3]) -> Vec<u8> {
        let mut tag = Vec::new();
        tag.extend_from_slice(b"vcgt");
        tag.extend_from_slice(&[0; 4]);
        tag.extend_from_slice(&1u32.to_be_bytes());
        for g in gammas {
            tag.extend_from_slice(&U16Fixed16::from_f64(g).0.to_be_bytes());
            tag.extend_from_slice(&0u32.to_be_bytes());
            tag.extend_from_slice(&U16Fixed16::ONE.0.to_be_bytes());
        }
        tag
    }

    fn table_tag(channels: u16, entry_size: u16, samples: &[u16]) -> Vec<u8> {
        let entries = samples.len() as u16 / channels.max(1);
        let mut tag = Vec::new();
        tag.extend_from_slice(b"vcgt");
        tag.extend_from_slice(&[0; 4]);
        tag.extend_from_slice(&0u32.to_be_bytes());
        tag.extend_from_slice(&channels.to_be_bytes());
        tag.extend_from_slice(&entries.to_be_bytes());
        tag.extend_from_slice(&entry_size.to_be_bytes());
        for &s in samples {
            match entry_size {
                1 => tag.push(s as u8),
                _ => tag.extend_from_slice(&s.to_be_bytes()),
            }
        }
        tag
    }

    fn decode(tag: &[u8]) -> (Result<VcgtCurve>, Diagnostics) {
        decode_with(TagDecoder::default(), tag)
    }

    fn decode_with(decoder: TagDecoder, tag: &[u8]) -> (Result<VcgtCurve>, Diagnostics) {
        // Place the tag behind some padding to exercise the offset
        let mut profile = vec![0xEEu8; 16];
        profile.extend_from_slice(tag);
        let location = TagLocation {
            offset: 16,
            size: tag.len() as u32,
        };
        let mut diagnostics = Diagnostics::new();
        let result = decoder.decode(&profile, location, &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn test_formula() {
        let (curve, diags) = decode(&formula_tag([1.0, 1.8, 2.2]));
        let formula = *curve.unwrap().as_formula().unwrap();

        assert!(diags.is_empty());
        assert_eq!(formula.red.gamma, U16Fixed16::ONE);
        assert!((formula.green.gamma.to_f64() - 1.8).abs() < 1e-4);
        assert!((formula.blue.gamma.to_f64() - 2.2).abs() < 1e-4);
        assert_eq!(formula.blue.min.0, 0);
        assert_eq!(formula.blue.max, U16Fixed16::ONE);
    }

    #[test]
    fn test_table_16bit_channel_major() {
        let samples = [0u16, 0x1000, 0xFFFF, 1, 2, 3, 0xA0B0, 0xC0D0, 0xE0F0];
        let (curve, _) = decode(&table_tag(3, 2, &samples));
        let curve = curve.unwrap();
        let table = curve.as_table().unwrap();

        assert_eq!(table.entry_count(), 3);
        assert_eq!(table.entry_size(), EntrySize::Two);
        assert_eq!(table.samples(Channel::Red), &[0, 0x1000, 0xFFFF]);
        assert_eq!(table.samples(Channel::Green), &[1, 2, 3]);
        assert_eq!(table.samples(Channel::Blue), &[0xA0B0, 0xC0D0, 0xE0F0]);
    }

    #[test]
    fn test_table_8bit_reads_one_byte_per_sample() {
        let samples = [0u16, 128, 255, 1, 2, 3, 4, 5, 6];
        let tag = table_tag(3, 1, &samples);
        assert_eq!(tag.len(), 18 + 9);

        let (curve, _) = decode(&tag);
        let curve = curve.unwrap();
        let table = curve.as_table().unwrap();
        assert_eq!(table.entry_size(), EntrySize::One);
        assert_eq!(table.samples(Channel::Red), &[0, 128, 255]);
        assert_eq!(table.samples(Channel::Blue), &[4, 5, 6]);
    }

    #[test]
    fn test_channel_count_rejected() {
        let (result, _) = decode(&table_tag(1, 2, &[0, 1, 2]));
        assert!(matches!(
            result,
            Err(Error::Unsupported(UnsupportedFormat::ChannelCount(1)))
        ));
    }

    #[test]
    fn test_entry_size_rejected() {
        let (result, _) = decode(&table_tag(3, 4, &[0, 0, 0]));
        assert!(matches!(
            result,
            Err(Error::Unsupported(UnsupportedFormat::EntrySize(4)))
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        let (result, _) = decode(&table_tag(3, 2, &[]));
        assert!(matches!(
            result,
            Err(Error::Unsupported(UnsupportedFormat::EmptyTable))
        ));
    }

    #[test]
    fn test_unknown_curve_type() {
        let mut tag = formula_tag([1.0; 3]);
        tag[8..12].copy_from_slice(&7u32.to_be_bytes());
        let (result, _) = decode(&tag);
        assert!(matches!(
            result,
            Err(Error::Unsupported(UnsupportedFormat::CurveType(7)))
        ));
    }

    #[test]
    fn test_truncated_formula() {
        let tag = formula_tag([1.0; 3]);
        let (result, _) = decode(&tag[..tag.len() - 2]);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_declared_size_limits_reads() {
        // Samples exist in the buffer but lie beyond the declared tag size
        let tag = table_tag(3, 2, &[1; 9]);
        let mut profile = tag.clone();
        profile.extend_from_slice(&[0u8; 64]);

        let location = TagLocation {
            offset: 0,
            size: (tag.len() - 4) as u32,
        };
        let result = TagDecoder::default().decode(&profile, location, &mut Diagnostics::new());
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_tag_out_of_bounds() {
        let profile = vec![0u8; 32];
        let location = TagLocation {
            offset: 20,
            size: 40,
        };
        let result = TagDecoder::default().decode(&profile, location, &mut Diagnostics::new());
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::TagOutOfBounds { .. }))
        ));

        let location = TagLocation {
            offset: u32::MAX,
            size: u32::MAX,
        };
        let result = TagDecoder::default().decode(&profile, location, &mut Diagnostics::new());
        assert!(result.unwrap_err().is_format());
    }

    #[test]
    fn test_signature_mismatch_permissive() {
        let mut tag = formula_tag([1.0; 3]);
        tag[0..4].copy_from_slice(b"desc");

        let (result, diags) = decode(&tag);
        assert!(result.is_ok());
        assert_eq!(diags.len(), 1);
        let d = diags.iter().next().unwrap();
        assert!(d.is_warning());
        assert_eq!(
            d.kind,
            DiagnosticKind::SignatureMismatch {
                found: u32::from_be_bytes(*b"desc")
            }
        );
    }

    #[test]
    fn test_signature_mismatch_strict() {
        let mut tag = formula_tag([1.0; 3]);
        tag[0..4].copy_from_slice(b"desc");

        let (result, diags) = decode_with(TagDecoder::new(SignaturePolicy::Strict), &tag);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::SignatureMismatch(_)))
        ));
        assert!(diags.is_empty());
    }
}
