//! ICC Profile Structure
//!
//! Just enough of the ICC container to find a tag:
//!
//! 1. A 128-byte header (skipped, optionally summarized)
//! 2. A tag table listing all tags
//! 3. Tag data (may overlap)
//!
//! # Example
//!
//! ```ignore
//! use vcgt_core::icc::locate_vcgt_tag_in;
//!
//! let location = locate_vcgt_tag_in(&bytes)?;
//! println!("vcgt at {} ({} bytes)", location.offset, location.size);
//! ```

pub mod directory;
pub mod header;
pub mod scan;

mod types;

pub use directory::{
    TagDirectoryEntry, TagDirectoryReader, TagLocation, locate_vcgt_tag, locate_vcgt_tag_in,
    read_tag_directory,
};
pub use header::{HEADER_SIZE, ProfileClass, ProfileHeader, ProfileVersion};
pub use scan::{SignatureMatcher, find_embedded_profiles};
pub use types::{TagSignature, U16Fixed16};
