//! ICC Profile Header
//!
//! The header is exactly 128 bytes. The vcgt pipeline skips it entirely; the
//! summary here only exists for reporting and is never validated.

use std::fmt;

use crate::error::Result;

/// Profile file signature - 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Byte offset of the profile signature within the header
pub const SIGNATURE_OFFSET: usize = 36;

/// Header size; the tag count follows immediately
pub const HEADER_SIZE: usize = 128;

/// Informational subset of the ICC header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileHeader {
    /// Profile size in bytes as declared by the header
    pub size: u32,
    /// Profile version (major.minor.patch)
    pub version: ProfileVersion,
    /// Device class (display, input, output, etc.)
    pub device_class: ProfileClass,
    /// Color space of data, raw signature
    pub color_space: u32,
    /// Profile connection space, raw signature
    pub pcs: u32,
    /// Whether the 'acsp' signature is present at offset 36
    pub has_signature: bool,
}

impl ProfileHeader {
    /// Read the header fields without validating them
    pub fn read(data: &[u8]) -> Result<Self> {
        let header = data.get(..HEADER_SIZE).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "profile too small: expected {} bytes, got {}",
                    HEADER_SIZE,
                    data.len()
                ),
            )
        })?;

        let be32 = |offset: usize| {
            u32::from_be_bytes([
                header[offset],
                header[offset + 1],
                header[offset + 2],
                header[offset + 3],
            ])
        };

        Ok(Self {
            size: be32(0),
            version: ProfileVersion {
                major: header[8],
                minor: header[9] >> 4,
                patch: header[9] & 0x0F,
            },
            device_class: ProfileClass::from_u32(be32(12)),
            color_space: be32(16),
            pcs: be32(20),
            has_signature: be32(SIGNATURE_OFFSET) == PROFILE_SIGNATURE,
        })
    }

    /// Color space as printable ASCII
    pub fn color_space_name(&self) -> String {
        signature_name(self.color_space)
    }

    /// PCS as printable ASCII
    pub fn pcs_name(&self) -> String {
        signature_name(self.pcs)
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    Input,
    Display,
    Output,
    DeviceLink,
    ColorSpace,
    Abstract,
    NamedColor,
    /// Anything else; kept raw since the header is not validated
    Unknown(u32),
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Self {
        match &val.to_be_bytes() {
            b"scnr" => Self::Input,
            b"mntr" => Self::Display,
            b"prtr" => Self::Output,
            b"link" => Self::DeviceLink,
            b"spac" => Self::ColorSpace,
            b"abst" => Self::Abstract,
            b"nmcl" => Self::NamedColor,
            _ => Self::Unknown(val),
        }
    }
}

fn signature_name(sig: u32) -> String {
    String::from_utf8_lossy(&sig.to_be_bytes())
        .trim_end()
        .to_string()
}
