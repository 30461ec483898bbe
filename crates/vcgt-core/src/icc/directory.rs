//! ICC Tag Directory
//!
//! The tag directory follows the 128-byte header:
//!
//! ```text
//! offset 128: tag count (u32, big-endian)
//! offset 132: count x { signature: u32, offset: u32, size: u32 }
//! ```
//!
//! Only the directory is read here. Tag payloads are left to the decoders.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use tracing::debug;

use super::header::HEADER_SIZE;
use super::types::TagSignature;
use crate::error::{FormatError, Result};

/// Offset of the first directory entry (header + tag count)
pub const TAG_TABLE_START: u64 = HEADER_SIZE as u64 + 4;

/// Size of one directory entry: signature(4) + offset(4) + size(4)
pub const TAG_ENTRY_SIZE: u64 = 12;

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagDirectoryEntry {
    /// Tag signature
    pub signature: TagSignature,
    /// Offset from start of profile
    pub offset: u32,
    /// Size of tag data
    pub size: u32,
}

/// Byte range of a tag inside the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagLocation {
    pub offset: u32,
    pub size: u32,
}

impl From<TagDirectoryEntry> for TagLocation {
    fn from(entry: TagDirectoryEntry) -> Self {
        Self {
            offset: entry.offset,
            size: entry.size,
        }
    }
}

/// Sequential reader over the tag directory of a seekable profile source
///
/// Entries are read lazily in directory order. Every short read surfaces as
/// an `UnexpectedEof` I/O error.
#[derive(Debug)]
pub struct TagDirectoryReader<R> {
    source: R,
    count: u32,
    read: u32,
}

impl<R: Read + Seek> TagDirectoryReader<R> {
    /// Skip the header and read the tag count
    pub fn new(mut source: R) -> Result<Self> {
        source.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        let count = read_u32_be(&mut source)?;
        Ok(Self {
            source,
            count,
            read: 0,
        })
    }

    /// Number of tags declared by the directory
    pub fn tag_count(&self) -> u32 {
        self.count
    }

    /// Read the next directory entry, if any remain
    pub fn next_entry(&mut self) -> Result<Option<TagDirectoryEntry>> {
        if self.read >= self.count {
            return Ok(None);
        }

        let signature = TagSignature(read_u32_be(&mut self.source)?);
        let offset = read_u32_be(&mut self.source)?;
        let size = read_u32_be(&mut self.source)?;
        self.read += 1;

        Ok(Some(TagDirectoryEntry {
            signature,
            offset,
            size,
        }))
    }

    /// Find the first entry with the given signature
    pub fn find_tag(&mut self, signature: TagSignature) -> Result<Option<TagLocation>> {
        while let Some(entry) = self.next_entry()? {
            if entry.signature == signature {
                return Ok(Some(entry.into()));
            }
        }
        Ok(None)
    }

    /// Read all remaining entries
    ///
    /// The source length is checked against the declared count first, so a
    /// bogus count cannot trigger a huge allocation.
    pub fn read_all(mut self) -> Result<Vec<TagDirectoryEntry>> {
        let len = self.source.seek(SeekFrom::End(0))?;
        let remaining = u64::from(self.count - self.read);
        let start = TAG_TABLE_START + u64::from(self.read) * TAG_ENTRY_SIZE;
        let required = start + remaining * TAG_ENTRY_SIZE;
        if len < required {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "tag directory declares {} entries ({} bytes) but profile has {} bytes",
                    self.count, required, len
                ),
            )
            .into());
        }
        self.source.seek(SeekFrom::Start(start))?;

        let mut entries = Vec::with_capacity(remaining as usize);
        while let Some(entry) = self.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl<R: Read + Seek> Iterator for TagDirectoryReader<R> {
    type Item = Result<TagDirectoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// Locate the vcgt tag in a seekable profile source
pub fn locate_vcgt_tag<R: Read + Seek>(source: R) -> Result<TagLocation> {
    let mut reader = TagDirectoryReader::new(source)?;
    let location = reader
        .find_tag(TagSignature::VCGT)?
        .ok_or(FormatError::TagNotFound)?;

    debug!(
        offset = location.offset,
        size = location.size,
        "vcgt found"
    );
    Ok(location)
}

/// Locate the vcgt tag in an in-memory profile
pub fn locate_vcgt_tag_in(data: &[u8]) -> Result<TagLocation> {
    locate_vcgt_tag(Cursor::new(data))
}

/// Read the full tag directory of an in-memory profile
pub fn read_tag_directory(data: &[u8]) -> Result<Vec<TagDirectoryEntry>> {
    TagDirectoryReader::new(Cursor::new(data))?.read_all()
}

fn read_u32_be<R: Read>(source: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    source.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn profile_with_entries(entries: &[(&[u8; 4], u32, u32)]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for (sig, offset, size) in entries {
            data.extend_from_slice(*sig);
            data.extend_from_slice(&offset.to_be_bytes());
            data.extend_from_slice(&size.to_be_bytes());
        }
        data
    }

    #[test]
    fn test_locate_vcgt() {
        let data = profile_with_entries(&[
            (b"desc", 200, 40),
            (b"vcgt", 300, 48),
            (b"cprt", 400, 20),
        ]);
        let location = locate_vcgt_tag_in(&data).unwrap();
        assert_eq!(location, TagLocation { offset: 300, size: 48 });
    }

    #[test]
    fn test_first_vcgt_wins() {
        let data = profile_with_entries(&[(b"vcgt", 300, 48), (b"vcgt", 500, 60)]);
        let location = locate_vcgt_tag_in(&data).unwrap();
        assert_eq!(location.offset, 300);
    }

    #[test]
    fn test_missing_vcgt() {
        let data = profile_with_entries(&[(b"desc", 200, 40)]);
        let err = locate_vcgt_tag_in(&data).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::TagNotFound)));
    }

    #[test]
    fn test_signature_is_case_sensitive() {
        let data = profile_with_entries(&[(b"VCGT", 300, 48)]);
        assert!(locate_vcgt_tag_in(&data).unwrap_err().is_format());
    }

    #[test]
    fn test_header_too_short() {
        let data = vec![0u8; 100];
        assert!(locate_vcgt_tag_in(&data).unwrap_err().is_io());
    }

    #[test]
    fn test_count_exceeds_data() {
        let mut data = profile_with_entries(&[(b"desc", 200, 40)]);
        data[128..132].copy_from_slice(&1000u32.to_be_bytes());

        assert!(locate_vcgt_tag_in(&data).unwrap_err().is_io());
        assert!(read_tag_directory(&data).unwrap_err().is_io());
    }

    #[test]
    fn test_entry_cut_mid_field() {
        let mut data = profile_with_entries(&[(b"desc", 200, 40), (b"vcgt", 300, 48)]);
        data.truncate(data.len() - 6);
        assert!(locate_vcgt_tag_in(&data).unwrap_err().is_io());
    }

    #[test]
    fn test_read_directory() {
        let data = profile_with_entries(&[(b"desc", 200, 40), (b"vcgt", 300, 48)]);
        let entries = read_tag_directory(&data).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].signature, TagSignature::DESC);
        assert_eq!(entries[1].signature, TagSignature::VCGT);
        assert_eq!(entries[1].size, 48);
    }

    #[test]
    fn test_iterator() {
        let data = profile_with_entries(&[(b"desc", 200, 40), (b"wtpt", 240, 20)]);
        let reader = TagDirectoryReader::new(Cursor::new(&data[..])).unwrap();
        assert_eq!(reader.tag_count(), 2);
        let sigs: Vec<_> = reader.map(|e| e.unwrap().signature).collect();
        assert_eq!(sigs, vec![TagSignature::DESC, TagSignature::MEDIA_WHITE]);
    }
}
