//! Clear command: write an identity ramp.

use anyhow::Result;
use tracing::debug;
use vcgt_core::{GammaRamp, RampTarget};

use crate::ClearArgs;
use crate::output::WriterTarget;

/// Writes a linear ramp of the requested size.
pub fn run(args: ClearArgs) -> Result<()> {
    if args.size == 0 {
        anyhow::bail!("ramp size must be at least 1");
    }

    let mut target = WriterTarget::new(args.size, args.format, args.output);
    debug!(size = args.size, "writing linear ramp");
    target.apply(&GammaRamp::linear(args.size))?;
    target.finish()
}
