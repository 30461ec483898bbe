//! Video Card Gamma Table (vcgt) tag
//!
//! The vcgt tag is a private Apple extension carried by most display
//! profiles. It describes the calibration curve to load into the video
//! card's lookup table, either as a gamma formula or as sampled tables.

mod curve;
mod decoder;

pub use curve::{
    CURVE_TYPE_FORMULA, CURVE_TYPE_TABLE, EntrySize, FormulaChannel, RGB_CHANNELS, VcgtCurve,
    VcgtFormula, VcgtTable,
};
pub use decoder::{TagDecoder, VcgtDecoder};
