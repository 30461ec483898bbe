//! # vcgt-core
//!
//! Decodes the Video Card Gamma Table (`vcgt`) tag of ICC display profiles
//! and turns it into a gamma ramp sized for a display's hardware lookup
//! table.
//!
//! ## Pipeline
//!
//! 1. [`icc::locate_vcgt_tag`] walks the tag directory
//! 2. [`vcgt::VcgtDecoder`] decodes the formula or table payload
//! 3. [`evaluate::CurveEvaluator`] produces a ramp of the requested size
//! 4. [`validate::validate`] flags non-monotonic ramps
//!
//! [`Calibrator`] runs all four and hands the ramp to a [`RampTarget`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use vcgt_core::{CalibrationOptions, Calibrator, FileSource, MemoryTarget};
//!
//! let calibrator = Calibrator::new(CalibrationOptions::default());
//! let mut target = MemoryTarget::new(256);
//! let calibration = calibrator
//!     .apply(&mut FileSource::new("display.icc"), &mut target)
//!     .unwrap();
//!
//! for warning in &calibration.diagnostics {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod calibration;
pub mod diagnostic;
pub mod error;
pub mod evaluate;
pub mod icc;
pub mod options;
pub mod ramp;
pub mod simd;
pub mod validate;
pub mod vcgt;

pub use calibration::{Calibration, Calibrator, FileSource, MemoryTarget, ProfileSource, RampTarget};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{Error, FormatError, Result, UnsupportedFormat};
pub use evaluate::{CurveEvaluator, evaluate};
pub use options::{CalibrationOptions, FormulaScale, SYSTEM_GAMMA, SignaturePolicy};
pub use ramp::{Channel, GammaRamp};
pub use validate::validate;
pub use vcgt::{TagDecoder, VcgtCurve, VcgtDecoder};

/// Version of vcgt-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
