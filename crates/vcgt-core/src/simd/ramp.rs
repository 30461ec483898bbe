//! SIMD-dispatched ramp kernels
//!
//! Ramps are small (256 to 4096 entries) but are generated once per channel,
//! and formula curves call `powf` for every entry.

use multiversion::multiversion;

/// Fill `output` with `round(scale * (j / len) ^ exponent)`, saturated to u16
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn formula_channel(output: &mut [u16], exponent: f64, scale: f64) {
    let len = output.len() as f64;

    for (j, out) in output.iter_mut().enumerate() {
        let x = j as f64 / len;
        *out = (scale * x.powf(exponent)).round().clamp(0.0, 65535.0) as u16;
    }
}

/// Widen 8-bit samples to the 16-bit scale (0xFF -> 0xFFFF)
///
/// Converts the first `min(input.len(), output.len())` samples.
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn widen_u8_samples(input: &[u16], output: &mut [u16]) {
    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = (*inp).min(0xFF) * 257;
    }
}
