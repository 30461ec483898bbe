//! Error types for vcgt

use thiserror::Error;

/// Result type for vcgt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a profile into a gamma ramp
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Profile unreadable or shorter than a required read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed tag directory or vcgt tag body
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Well-formed but unsupported vcgt encoding
    #[error("Unsupported format: {0}")]
    Unsupported(#[from] UnsupportedFormat),

    /// Requested ramp size is zero
    #[error("Invalid ramp size: {0}")]
    InvalidRampSize(usize),

    /// The ramp consumer rejected the ramp
    #[error("Hardware error: {0}")]
    Hardware(String),
}

/// Structural problems in the profile bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    /// No `vcgt` entry in the tag directory
    #[error("no vcgt tag in profile")]
    TagNotFound,

    /// Directory entry points outside the profile data
    #[error("tag at offset {offset} with size {size} exceeds profile size {profile_size}")]
    TagOutOfBounds {
        offset: u32,
        size: u32,
        profile_size: usize,
    },

    /// A read inside the tag ran past its declared size
    #[error("vcgt tag truncated: needed {needed} bytes at position {position}, tag size is {tag_size}")]
    Truncated {
        position: usize,
        needed: usize,
        tag_size: usize,
    },

    /// Tag body does not start with `vcgt` (strict policy only)
    #[error("invalid content of vcgt tag, starting with 0x{0:08X}")]
    SignatureMismatch(u32),
}

/// vcgt encodings this decoder refuses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnsupportedFormat {
    /// Curve type other than 0 (table) or 1 (formula)
    #[error("unknown vcgt curve type {0}")]
    CurveType(u32),

    /// Only RGB tables are supported
    #[error("vcgt table has {0} channels, expected 3")]
    ChannelCount(u16),

    /// Samples must be 1 or 2 bytes wide
    #[error("vcgt table entry size {0} is not 1 or 2")]
    EntrySize(u16),

    /// Table declares zero entries per channel
    #[error("vcgt table has no entries")]
    EmptyTable,
}

impl Error {
    /// Check whether this is an I/O failure (including short reads)
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check whether this is a format failure
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// Check whether this is an unsupported-encoding failure
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }
}
