//! Gamma ramps
//!
//! A ramp is three equally sized 16-bit lookup tables, one per RGB channel,
//! in the layout display gamma APIs expect.

use std::fmt;

/// One of the three ramp channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-channel gamma ramp; every channel has exactly `size` entries
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GammaRamp {
    size: usize,
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
}

impl GammaRamp {
    /// Build a ramp from three channels of equal length
    ///
    /// Returns `None` if the lengths differ.
    pub fn from_channels(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Option<Self> {
        let size = red.len();
        if green.len() != size || blue.len() != size {
            return None;
        }
        Some(Self {
            size,
            red,
            green,
            blue,
        })
    }

    /// Identity ramp spanning 0..=65535
    pub fn linear(size: usize) -> Self {
        let denom = size.saturating_sub(1).max(1) as u64;
        let channel: Vec<u16> = (0..size as u64)
            .map(|j| (j * u64::from(u16::MAX) / denom) as u16)
            .collect();
        Self {
            size,
            red: channel.clone(),
            green: channel.clone(),
            blue: channel,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn red(&self) -> &[u16] {
        &self.red
    }

    pub fn green(&self) -> &[u16] {
        &self.green
    }

    pub fn blue(&self) -> &[u16] {
        &self.blue
    }

    pub fn channel(&self, channel: Channel) -> &[u16] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// `(red, green, blue)` entries in index order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u16, u16, u16)> + '_ {
        self.red
            .iter()
            .zip(&self.green)
            .zip(&self.blue)
            .map(|((&r, &g), &b)| (r, g, b))
    }

    pub fn into_channels(self) -> (Vec<u16>, Vec<u16>, Vec<u16>) {
        (self.red, self.green, self.blue)
    }
}
