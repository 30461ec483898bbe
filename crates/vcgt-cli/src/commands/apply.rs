//! Apply command: profile in, ramp out.

use std::fs;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use vcgt_core::{
    CalibrationOptions, Calibrator, FileSource, FormulaScale, RampTarget, SignaturePolicy,
};

use crate::ApplyArgs;
use crate::output::{WriterTarget, report};

/// Runs the apply command.
///
/// With `--search` every embedded profile is processed and a failure in one
/// does not stop the others; the command fails only if none succeeded.
pub fn run(args: ApplyArgs) -> Result<()> {
    let options = CalibrationOptions::default()
        .with_signature_policy(if args.strict {
            SignaturePolicy::Strict
        } else {
            SignaturePolicy::Permissive
        })
        .with_formula_scale(if args.legacy_scale {
            FormulaScale::Legacy
        } else {
            FormulaScale::Standard
        })
        .with_no_action(args.noaction);
    debug!(?options, size = args.size, "apply");

    let calibrator = Calibrator::new(options);
    let mut target = WriterTarget::new(args.size, args.format, args.output.clone());

    if args.search {
        let blob = fs::read(&args.profile)
            .with_context(|| format!("Failed to read {}", args.profile.display()))?;

        let results = calibrator.load_embedded(&blob, args.size);
        if results.is_empty() {
            bail!("no embedded ICC profile found in {}", args.profile.display());
        }

        let total = results.len();
        let mut loaded = 0;
        for (offset, result) in results {
            match result {
                Ok(calibration) => {
                    info!(offset, "embedded profile");
                    report(&calibration.diagnostics);
                    if !options.no_action {
                        target.apply(&calibration.ramp)?;
                    }
                    loaded += 1;
                }
                Err(err) => eprintln!("Error - profile at offset {offset}: {err}"),
            }
        }

        if loaded == 0 {
            bail!("none of the {total} embedded profiles has a usable vcgt tag");
        }
    } else {
        let calibration = calibrator
            .apply(&mut FileSource::new(&args.profile), &mut target)
            .with_context(|| format!("Failed to load vcgt from {}", args.profile.display()))?;
        report(&calibration.diagnostics);
    }

    target.finish()
}
