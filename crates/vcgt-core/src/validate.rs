//! Ramp sanity checks

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::ramp::{Channel, GammaRamp};

/// Flag every strictly decreasing step in each channel
///
/// Some legitimate profiles dip at the tail, so nothing here is fatal.
pub fn validate(ramp: &GammaRamp) -> Vec<Diagnostic> {
    Channel::ALL
        .into_iter()
        .flat_map(|channel| {
            ramp.channel(channel)
                .windows(2)
                .enumerate()
                .filter(|(_, pair)| pair[1] < pair[0])
                .map(move |(index, _)| {
                    Diagnostic::warning(DiagnosticKind::NonMonotonic { channel, index })
                })
        })
        .collect()
}

/// Check whether every channel is non-decreasing
pub fn is_monotonic(ramp: &GammaRamp) -> bool {
    Channel::ALL
        .into_iter()
        .all(|channel| ramp.channel(channel).windows(2).all(|pair| pair[0] <= pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_ramp_is_clean() {
        let ramp = GammaRamp::linear(256);
        assert!(validate(&ramp).is_empty());
        assert!(is_monotonic(&ramp));
    }

    #[test]
    fn test_flat_steps_are_allowed() {
        let ramp = GammaRamp::from_channels(vec![0, 5, 5, 9], vec![0; 4], vec![1; 4]).unwrap();
        assert!(validate(&ramp).is_empty());
    }

    #[test]
    fn test_single_decrease_flagged() {
        let mut green = GammaRamp::linear(16).green().to_vec();
        green[8] = green[6];
        let ramp = GammaRamp::from_channels(GammaRamp::linear(16).red().to_vec(), green, vec![7; 16])
            .unwrap();

        let diags = validate(&ramp);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_warning());
        assert_eq!(
            diags[0].kind,
            DiagnosticKind::NonMonotonic {
                channel: Channel::Green,
                index: 7
            }
        );
        assert!(!is_monotonic(&ramp));
        // Inspection only
        assert_eq!(ramp.size(), 16);
    }

    #[test]
    fn test_every_channel_reported() {
        let down = vec![3u16, 2, 1];
        let ramp = GammaRamp::from_channels(down.clone(), down.clone(), down).unwrap();
        let diags = validate(&ramp);
        assert_eq!(diags.len(), 6);
        assert!(matches!(
            diags[5].kind,
            DiagnosticKind::NonMonotonic {
                channel: Channel::Blue,
                index: 1
            }
        ));
    }
}
