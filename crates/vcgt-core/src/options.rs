//! Calibration options
//!
//! All behavior switches are passed explicitly to the components that need
//! them; nothing is read from process-wide state.

/// Reference display gamma the formula curves are expressed against
pub const SYSTEM_GAMMA: f64 = 2.222222;

/// What to do when the tag body does not start with `vcgt`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignaturePolicy {
    /// Emit a warning diagnostic and keep decoding
    #[default]
    Permissive,
    /// Fail with `FormatError::SignatureMismatch`
    Strict,
}

/// Full-scale constant for formula curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaScale {
    /// 65535, the 16-bit maximum
    #[default]
    Standard,
    /// 65563, found in older ramp loaders; values near 1.0 saturate at 65535
    Legacy,
}

impl FormulaScale {
    pub fn value(self) -> f64 {
        match self {
            FormulaScale::Standard => 65535.0,
            FormulaScale::Legacy => 65563.0,
        }
    }
}

/// Options for turning a profile into a ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationOptions {
    /// Handling of a bad signature inside the vcgt body
    pub signature_policy: SignaturePolicy,
    /// Scale used by formula curves
    pub formula_scale: FormulaScale,
    /// Compute and validate the ramp but never hand it to the target
    pub no_action: bool,
}

impl CalibrationOptions {
    pub fn with_signature_policy(mut self, policy: SignaturePolicy) -> Self {
        self.signature_policy = policy;
        self
    }

    pub fn with_formula_scale(mut self, scale: FormulaScale) -> Self {
        self.formula_scale = scale;
        self
    }

    pub fn with_no_action(mut self, no_action: bool) -> Self {
        self.no_action = no_action;
        self
    }
}
