// In: src/kernels/quantize.rs

//! Min-max normalization and 8-bit quantization.
//!
//! This is the final transform in the compression pipeline. It takes the
//! reconstructed floating-point image, whose value range is unconstrained
//! after the lossy projection, and maps it linearly onto the displayable
//! [0, 255] range.

use ndarray::Array2;

/// Fill value for a reconstruction with no value range at all.
pub const DEGENERATE_FILL: u8 = 128;

//==================================================================================
// 1. Core Logic
//==================================================================================

/// Rescales linearly so min maps to 0 and max to 255, then rounds and clips
/// to `u8`.
///
/// A degenerate reconstruction (max equal to min, as produced by a constant
/// input image) would divide by zero; it is special-cased to a constant
/// mid-gray image instead.
pub fn to_u8(reconstructed: &Array2<f64>) -> Array2<u8> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &value in reconstructed.iter() {
        lo = lo.min(value);
        hi = hi.max(value);
    }

    let range = hi - lo;
    if !range.is_finite() || range < f64::EPSILON {
        return Array2::from_elem(reconstructed.dim(), DEGENERATE_FILL);
    }

    reconstructed.mapv(|value| (((value - lo) / range) * 255.0).round().clamp(0.0, 255.0) as u8)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
