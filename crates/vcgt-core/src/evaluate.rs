//! Curve evaluation
//!
//! Turns a decoded vcgt curve into a ramp of the size the display expects.
//!
//! Formula curves are evaluated directly:
//!
//! ```text
//! ramp[j] = round(scale * (j / size) ^ (gamma * SYSTEM_GAMMA))
//! ```
//!
//! Table curves are resampled by nearest neighbor. When the table is larger
//! than the ramp every `ratio`-th sample is taken; when it is smaller each
//! sample is repeated `ratio` times. `ratio` is the floor of the size
//! quotient, so source indices are clamped to the last sample.

use tracing::trace;

use crate::options::{FormulaScale, SYSTEM_GAMMA};
use crate::ramp::{Channel, GammaRamp};
use crate::simd;
use crate::vcgt::{EntrySize, VcgtCurve, VcgtFormula, VcgtTable};

/// Converts curves to ramps
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveEvaluator {
    scale: FormulaScale,
}

impl CurveEvaluator {
    pub fn new(scale: FormulaScale) -> Self {
        Self { scale }
    }

    /// Produce a ramp of `target_size` entries
    ///
    /// `target_size` is expected to be non-zero; zero yields an empty ramp.
    pub fn evaluate(&self, curve: &VcgtCurve, target_size: usize) -> GammaRamp {
        let ramp = match curve {
            VcgtCurve::Formula(formula) => self.evaluate_formula(formula, target_size),
            VcgtCurve::Table(table) => evaluate_table(table, target_size),
        };

        if tracing::enabled!(tracing::Level::TRACE) {
            for (r, g, b) in ramp.iter() {
                trace!("{r:x} {g:x} {b:x}");
            }
        }
        ramp
    }

    /// Evaluate a formula curve; `min`/`max` are not applied
    pub fn evaluate_formula(&self, formula: &VcgtFormula, target_size: usize) -> GammaRamp {
        let scale = self.scale.value();
        let [red, green, blue] = Channel::ALL.map(|channel| {
            let exponent = formula.channel(channel).gamma.to_f64() * SYSTEM_GAMMA;
            let mut out = vec![0u16; target_size];
            simd::formula_channel(&mut out, exponent, scale);
            out
        });

        ramp_from(red, green, blue)
    }
}

/// Evaluate a curve with the given formula scale
pub fn evaluate(curve: &VcgtCurve, target_size: usize, scale: FormulaScale) -> GammaRamp {
    CurveEvaluator::new(scale).evaluate(curve, target_size)
}

/// Resample a table curve to `target_size` entries, widening 8-bit samples
pub fn evaluate_table(table: &VcgtTable, target_size: usize) -> GammaRamp {
    let [red, green, blue] = Channel::ALL.map(|channel| {
        let samples = table.samples(channel);
        match table.entry_size() {
            EntrySize::Two => resample(samples, target_size),
            EntrySize::One => {
                let mut wide = vec![0u16; samples.len()];
                simd::widen_u8_samples(samples, &mut wide);
                resample(&wide, target_size)
            }
        }
    });

    ramp_from(red, green, blue)
}

/// Nearest-neighbor resampling of `samples` to `target_size` entries
pub fn resample<T: Copy>(samples: &[T], target_size: usize) -> Vec<T> {
    if samples.is_empty() {
        return Vec::new();
    }
    if samples.len() == target_size {
        return samples.to_vec();
    }

    (0..target_size)
        .map(|j| samples[source_index(samples.len(), target_size, j)])
        .collect()
}

/// Source sample index for ramp entry `j`
///
/// Always within `0..entry_count` for `entry_count > 0`.
pub fn source_index(entry_count: usize, target_size: usize, j: usize) -> usize {
    let last = entry_count.saturating_sub(1);

    let index = if entry_count == target_size {
        j
    } else if entry_count > target_size {
        let ratio = entry_count / target_size;
        ratio.saturating_mul(j)
    } else {
        let ratio = target_size / entry_count;
        j / ratio
    };

    index.min(last)
}

fn ramp_from(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> GammaRamp {
    // Channels are built with identical lengths above
    GammaRamp::from_channels(red, green, blue).unwrap_or_else(|| GammaRamp::linear(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcgt::FormulaChannel;

    fn table16(samples: Vec<u16>) -> VcgtCurve {
        VcgtCurve::Table(
            VcgtTable::new(EntrySize::Two, samples.clone(), samples.clone(), samples).unwrap(),
        )
    }

    fn identity_samples(count: usize) -> Vec<u16> {
        (0..count).map(|i| i as u16).collect()
    }

    #[test]
    fn test_equal_size_is_identity() {
        let samples: Vec<u16> = (0..256).map(|i| (i * 251 % 65536) as u16).collect();
        let ramp = evaluate(&table16(samples.clone()), 256, FormulaScale::Standard);
        assert_eq!(ramp.red(), &samples[..]);
        assert_eq!(ramp.blue(), &samples[..]);
    }

    #[test]
    fn test_downsample() {
        let ramp = evaluate(&table16(identity_samples(1024)), 256, FormulaScale::Standard);
        assert_eq!(ramp.size(), 256);
        assert_eq!(ramp.red()[10], 40);
        assert_eq!(ramp.green()[255], 1020);
    }

    #[test]
    fn test_upsample() {
        let ramp = evaluate(&table16(identity_samples(256)), 1024, FormulaScale::Standard);
        assert_eq!(ramp.size(), 1024);
        assert_eq!(ramp.red()[400], 100);
        assert_eq!(ramp.red()[403], 100);
        assert_eq!(ramp.red()[1023], 255);
    }

    #[test]
    fn test_non_integer_ratios_stay_in_range() {
        for (entries, target) in [(100, 30), (30, 100), (7, 1024), (4096, 3), (255, 256), (257, 256)] {
            for j in 0..target {
                assert!(source_index(entries, target, j) < entries);
            }
            let ramp = evaluate(&table16(identity_samples(entries)), target, FormulaScale::Standard);
            assert_eq!(ramp.size(), target);
        }
    }

    #[test]
    fn test_downsample_100_to_30() {
        // ratio = 3, last entry reads sample 87
        let ramp = evaluate(&table16(identity_samples(100)), 30, FormulaScale::Standard);
        assert_eq!(ramp.red()[29], 87);
    }

    #[test]
    fn test_upsample_clamps_tail() {
        // ratio = floor(100 / 30) = 3; j = 99 would read sample 33
        let ramp = evaluate(&table16(identity_samples(30)), 100, FormulaScale::Standard);
        assert_eq!(ramp.red()[99], 29);
        assert_eq!(ramp.red()[89], 29);
        assert_eq!(ramp.red()[3], 1);
    }

    #[test]
    fn test_8bit_table_widened() {
        let samples = vec![0u16, 1, 128, 255];
        let curve = VcgtCurve::Table(
            VcgtTable::new(EntrySize::One, samples.clone(), samples.clone(), samples).unwrap(),
        );
        let ramp = evaluate(&curve, 4, FormulaScale::Standard);
        assert_eq!(ramp.red(), &[0, 257, 32896, 65535]);
    }

    #[test]
    fn test_formula_gamma_one() {
        let channel = FormulaChannel::new(1.0, 0.0, 1.0);
        let curve = VcgtCurve::Formula(VcgtFormula {
            red: channel,
            green: channel,
            blue: channel,
        });
        let ramp = evaluate(&curve, 256, FormulaScale::Standard);

        assert_eq!(ramp.red()[0], 0);
        let expected = 65535.0 * (255.0f64 / 256.0).powf(SYSTEM_GAMMA);
        assert!((ramp.red()[255] as f64 - expected).abs() <= 1.0);
        assert_eq!(ramp.red(), ramp.green());
    }

    #[test]
    fn test_formula_per_channel_gamma() {
        let curve = VcgtCurve::Formula(VcgtFormula {
            red: FormulaChannel::new(1.0, 0.0, 1.0),
            green: FormulaChannel::new(0.45, 0.0, 1.0),
            blue: FormulaChannel::new(2.0, 0.0, 1.0),
        });
        let ramp = evaluate(&curve, 256, FormulaScale::Standard);

        // Lower exponent lifts the curve
        assert!(ramp.green()[128] > ramp.red()[128]);
        assert!(ramp.blue()[128] < ramp.red()[128]);
    }

    #[test]
    fn test_legacy_scale_saturates() {
        let curve = VcgtCurve::Formula(VcgtFormula {
            red: FormulaChannel::new(0.0001, 0.0, 1.0),
            green: FormulaChannel::new(1.0, 0.0, 1.0),
            blue: FormulaChannel::new(1.0, 0.0, 1.0),
        });
        let legacy = evaluate(&curve, 256, FormulaScale::Legacy);
        let standard = evaluate(&curve, 256, FormulaScale::Standard);

        assert_eq!(legacy.red()[255], 65535);
        assert!(legacy.green()[200] > standard.green()[200]);
    }

    #[test]
    fn test_zero_target() {
        let ramp = evaluate(&table16(identity_samples(16)), 0, FormulaScale::Standard);
        assert!(ramp.is_empty());
    }
}
