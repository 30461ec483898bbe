//! Decoded vcgt curve representations
//!
//! A vcgt tag holds either a gamma formula (type 1) or sampled tables
//! (type 0). Both always describe three channels in RGB order.

use crate::icc::U16Fixed16;
use crate::ramp::Channel;

/// Curve type field values
pub const CURVE_TYPE_TABLE: u32 = 0;
pub const CURVE_TYPE_FORMULA: u32 = 1;

/// The only supported channel count
pub const RGB_CHANNELS: u16 = 3;

/// Decoded vcgt payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VcgtCurve {
    /// VideoCardGammaFormula
    Formula(VcgtFormula),
    /// VideoCardGammaTable
    Table(VcgtTable),
}

impl VcgtCurve {
    pub fn as_formula(&self) -> Option<&VcgtFormula> {
        match self {
            VcgtCurve::Formula(formula) => Some(formula),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&VcgtTable> {
        match self {
            VcgtCurve::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Raw curve type as stored in the tag
    pub fn curve_type(&self) -> u32 {
        match self {
            VcgtCurve::Formula(_) => CURVE_TYPE_FORMULA,
            VcgtCurve::Table(_) => CURVE_TYPE_TABLE,
        }
    }

    /// Native resolution: table entry count, or `None` for a formula
    pub fn native_size(&self) -> Option<usize> {
        self.as_table().map(VcgtTable::entry_count)
    }
}

/// Gamma, minimum and maximum of one channel
///
/// Only `gamma` takes part in ramp evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaChannel {
    pub gamma: U16Fixed16,
    pub min: U16Fixed16,
    pub max: U16Fixed16,
}

impl FormulaChannel {
    pub fn new(gamma: f64, min: f64, max: f64) -> Self {
        Self {
            gamma: U16Fixed16::from_f64(gamma),
            min: U16Fixed16::from_f64(min),
            max: U16Fixed16::from_f64(max),
        }
    }
}

/// VideoCardGammaFormula: nine 16.16 values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VcgtFormula {
    pub red: FormulaChannel,
    pub green: FormulaChannel,
    pub blue: FormulaChannel,
}

impl VcgtFormula {
    pub fn channel(&self, channel: Channel) -> &FormulaChannel {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

/// Width of a table sample in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntrySize {
    /// 8-bit samples
    One,
    /// 16-bit big-endian samples
    Two,
}

impl EntrySize {
    pub fn from_u16(size: u16) -> Option<Self> {
        match size {
            1 => Some(EntrySize::One),
            2 => Some(EntrySize::Two),
            _ => None,
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            EntrySize::One => 1,
            EntrySize::Two => 2,
        }
    }

    pub fn bits(self) -> usize {
        self.bytes() * 8
    }
}

/// VideoCardGammaTable: three channel-major sample tables
///
/// Samples are stored as read; 8-bit tables keep values in `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VcgtTable {
    entry_size: EntrySize,
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
}

impl VcgtTable {
    /// Build a table from three equally long, non-empty channels
    ///
    /// Returns `None` if the lengths differ, are zero, or exceed `u16::MAX`.
    pub fn new(entry_size: EntrySize, red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Option<Self> {
        let count = red.len();
        if count == 0 || count > usize::from(u16::MAX) {
            return None;
        }
        if green.len() != count || blue.len() != count {
            return None;
        }
        Some(Self {
            entry_size,
            red,
            green,
            blue,
        })
    }

    pub fn channel_count(&self) -> u16 {
        RGB_CHANNELS
    }

    pub fn entry_count(&self) -> usize {
        self.red.len()
    }

    pub fn entry_size(&self) -> EntrySize {
        self.entry_size
    }

    pub fn samples(&self, channel: Channel) -> &[u16] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_size() {
        assert_eq!(EntrySize::from_u16(1), Some(EntrySize::One));
        assert_eq!(EntrySize::from_u16(2).map(EntrySize::bits), Some(16));
        assert_eq!(EntrySize::from_u16(0), None);
        assert_eq!(EntrySize::from_u16(4), None);
    }

    #[test]
    fn test_table_invariants() {
        assert!(VcgtTable::new(EntrySize::Two, vec![], vec![], vec![]).is_none());
        assert!(VcgtTable::new(EntrySize::Two, vec![0; 3], vec![0; 3], vec![0; 2]).is_none());

        let table = VcgtTable::new(EntrySize::One, vec![1; 4], vec![2; 4], vec![3; 4]).unwrap();
        assert_eq!(table.channel_count(), 3);
        assert_eq!(table.entry_count(), 4);
        assert_eq!(table.samples(Channel::Green), &[2, 2, 2, 2]);
    }

    #[test]
    fn test_curve_accessors() {
        let curve = VcgtCurve::Formula(VcgtFormula::default());
        assert_eq!(curve.curve_type(), CURVE_TYPE_FORMULA);
        assert!(curve.as_table().is_none());
        assert_eq!(curve.native_size(), None);
    }
}
