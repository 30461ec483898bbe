//! Synthetic profile construction
//!
//! Builds ICC profiles byte by byte so tests control every field the vcgt
//! pipeline reads.

use vcgt_core::icc::{HEADER_SIZE, U16Fixed16};

/// Builds a display profile with arbitrary tags
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    tags: Vec<([u8; 4], Vec<u8>)>,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Add a tag; directory order follows call order
    pub fn tag(mut self, signature: &[u8; 4], body: Vec<u8>) -> Self {
        self.tags.push((*signature, body));
        self
    }

    pub fn vcgt(self, body: Vec<u8>) -> Self {
        self.tag(b"vcgt", body)
    }

    /// Add a `desc`-typed text tag
    pub fn description(self, text: &str) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(b"desc");
        body.extend_from_slice(&[0; 4]);
        body.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        body.extend_from_slice(text.as_bytes());
        body.push(0);
        self.tag(b"desc", body)
    }

    /// Serialize: header, tag count, directory, 4-byte aligned tag bodies
    pub fn build(&self) -> Vec<u8> {
        let directory_end = HEADER_SIZE + 4 + self.tags.len() * 12;

        let mut bodies = Vec::new();
        let mut entries = Vec::with_capacity(self.tags.len());
        for (signature, body) in &self.tags {
            let offset = directory_end + bodies.len();
            entries.push((*signature, offset as u32, body.len() as u32));
            bodies.extend_from_slice(body);
            while bodies.len() % 4 != 0 {
                bodies.push(0);
            }
        }

        let total = directory_end + bodies.len();
        let mut data = display_header(total as u32);
        data.extend_from_slice(&(self.tags.len() as u32).to_be_bytes());
        for (signature, offset, size) in entries {
            data.extend_from_slice(&signature);
            data.extend_from_slice(&offset.to_be_bytes());
            data.extend_from_slice(&size.to_be_bytes());
        }
        data.extend_from_slice(&bodies);
        data
    }
}

/// 128-byte v2.1 RGB display header
fn display_header(size: u32) -> Vec<u8> {
    let mut data = vec![0u8; HEADER_SIZE];
    data[0..4].copy_from_slice(&size.to_be_bytes());
    data[8] = 2;
    data[9] = 0x10;
    data[12..16].copy_from_slice(b"mntr");
    data[16..20].copy_from_slice(b"RGB ");
    data[20..24].copy_from_slice(b"XYZ ");
    data[36..40].copy_from_slice(b"acsp");
    data
}

/// vcgt formula body from `(gamma, min, max)` per channel
pub fn formula_tag(channels: [(f64, f64, f64); 3]) -> Vec<u8> {
    let mut body = vcgt_prefix(1);
    for (gamma, min, max) in channels {
        for v in [gamma, min, max] {
            body.extend_from_slice(&U16Fixed16::from_f64(v).0.to_be_bytes());
        }
    }
    body
}

/// vcgt table body with three channels
///
/// Samples are written with `entry_size` bytes each (1 or 2).
pub fn table_tag(entry_size: u16, red: &[u16], green: &[u16], blue: &[u16]) -> Vec<u8> {
    let mut payload = Vec::new();
    for channel in [red, green, blue] {
        for &sample in channel {
            match entry_size {
                1 => payload.push(sample as u8),
                _ => payload.extend_from_slice(&sample.to_be_bytes()),
            }
        }
    }
    table_tag_raw(3, red.len() as u16, entry_size, &payload)
}

/// vcgt table body with an arbitrary header and raw sample bytes
pub fn table_tag_raw(channels: u16, entries: u16, entry_size: u16, payload: &[u8]) -> Vec<u8> {
    let mut body = vcgt_prefix(0);
    body.extend_from_slice(&channels.to_be_bytes());
    body.extend_from_slice(&entries.to_be_bytes());
    body.extend_from_slice(&entry_size.to_be_bytes());
    body.extend_from_slice(payload);
    body
}

fn vcgt_prefix(curve_type: u32) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(b"vcgt");
    body.extend_from_slice(&[0; 4]);
    body.extend_from_slice(&curve_type.to_be_bytes());
    body
}
