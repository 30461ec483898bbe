//! Profile-to-ramp pipeline
//!
//! Wires the components together:
//!
//! ```text
//! tag directory -> vcgt decoder -> curve evaluator -> ramp validator -> target
//! ```
//!
//! Reading the profile and talking to the display are left to the caller
//! through [`ProfileSource`] and [`RampTarget`].

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::diagnostic::Diagnostics;
use crate::error::{Error, Result};
use crate::evaluate::CurveEvaluator;
use crate::icc::{find_embedded_profiles, locate_vcgt_tag_in};
use crate::options::CalibrationOptions;
use crate::ramp::GammaRamp;
use crate::validate::validate;
use crate::vcgt::{TagDecoder, VcgtCurve, VcgtDecoder};

/// Supplies the raw profile bytes
pub trait ProfileSource {
    fn read_profile(&mut self) -> Result<Vec<u8>>;
}

/// A display lookup table the ramp is loaded into
pub trait RampTarget {
    /// Number of entries per channel the target expects
    fn ramp_size(&self) -> Result<usize>;

    /// Load the ramp; called at most once per calibration
    fn apply(&mut self, ramp: &GammaRamp) -> Result<()>;
}

/// Profile read from the file system in one go
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileSource for FileSource {
    fn read_profile(&mut self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

impl ProfileSource for &[u8] {
    fn read_profile(&mut self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

/// In-memory target that keeps the last applied ramp
#[derive(Debug, Clone)]
pub struct MemoryTarget {
    size: usize,
    applied: Option<GammaRamp>,
}

impl MemoryTarget {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            applied: None,
        }
    }

    pub fn applied(&self) -> Option<&GammaRamp> {
        self.applied.as_ref()
    }
}

impl RampTarget for MemoryTarget {
    fn ramp_size(&self) -> Result<usize> {
        Ok(self.size)
    }

    fn apply(&mut self, ramp: &GammaRamp) -> Result<()> {
        if ramp.size() != self.size {
            return Err(Error::Hardware(format!(
                "ramp has {} entries, target expects {}",
                ramp.size(),
                self.size
            )));
        }
        self.applied = Some(ramp.clone());
        Ok(())
    }
}

/// Result of one profile run
#[derive(Debug, Clone)]
pub struct Calibration {
    /// Decoded vcgt curve
    pub curve: VcgtCurve,
    /// Ramp at the requested size
    pub ramp: GammaRamp,
    /// Warnings from decoding and validation, in that order
    pub diagnostics: Diagnostics,
}

/// Runs the pipeline with a fixed decoder and options
#[derive(Debug, Clone)]
pub struct Calibrator<D = TagDecoder> {
    decoder: D,
    options: CalibrationOptions,
}

impl Calibrator<TagDecoder> {
    pub fn new(options: CalibrationOptions) -> Self {
        Self {
            decoder: TagDecoder::new(options.signature_policy),
            options,
        }
    }
}

impl Default for Calibrator<TagDecoder> {
    fn default() -> Self {
        Self::new(CalibrationOptions::default())
    }
}

impl<D: VcgtDecoder> Calibrator<D> {
    /// Use a custom decoder implementation
    pub fn with_decoder(decoder: D, options: CalibrationOptions) -> Self {
        Self { decoder, options }
    }

    pub fn options(&self) -> &CalibrationOptions {
        &self.options
    }

    /// Compute the ramp for an in-memory profile
    pub fn load(&self, profile: &[u8], target_size: usize) -> Result<Calibration> {
        if target_size == 0 {
            return Err(Error::InvalidRampSize(target_size));
        }

        let mut diagnostics = Diagnostics::new();

        let location = locate_vcgt_tag_in(profile)?;
        let curve = self.decoder.decode(profile, location, &mut diagnostics)?;
        let ramp = CurveEvaluator::new(self.options.formula_scale).evaluate(&curve, target_size);
        diagnostics.extend(validate(&ramp));

        debug!(
            curve_type = curve.curve_type(),
            native_size = curve.native_size(),
            target_size,
            warnings = diagnostics.warning_count(),
            "vcgt evaluated"
        );

        Ok(Calibration {
            curve,
            ramp,
            diagnostics,
        })
    }

    /// Read a profile, size the ramp for `target` and load it
    ///
    /// With `no_action` set the ramp is computed but never applied.
    pub fn apply<S, T>(&self, source: &mut S, target: &mut T) -> Result<Calibration>
    where
        S: ProfileSource + ?Sized,
        T: RampTarget + ?Sized,
    {
        let profile = source.read_profile()?;
        let size = target.ramp_size()?;
        let calibration = self.load(&profile, size)?;

        if self.options.no_action {
            info!("no action requested, ramp not applied");
        } else {
            target.apply(&calibration.ramp)?;
        }
        debug!("ramp size: {}", size);

        Ok(calibration)
    }

    /// Run the pipeline on every profile embedded in `blob`
    ///
    /// Returns each profile's start offset with its own result.
    pub fn load_embedded(&self, blob: &[u8], target_size: usize) -> Vec<(usize, Result<Calibration>)> {
        find_embedded_profiles(blob)
            .into_iter()
            .map(|offset| (offset, self.load(&blob[offset..], target_size)))
            .collect()
    }
}
