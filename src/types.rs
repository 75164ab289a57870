// In: src/types.rs

//! This module defines the canonical decoded-image representation used
//! throughout the eigenpress pipeline.
//!
//! Every entry point converts incoming pixel data into a `PixelBuffer` before
//! any numeric work happens, so the kernels only ever see validated `f64`
//! arrays with intensities in the unit range.

use ndarray::{Array, Array2, Array3, Axis, Dimension};
use num_traits::ToPrimitive;

use crate::error::EigenpressError;

//==================================================================================
// 1. The Canonical Buffer
//==================================================================================

/// A validated, decoded image: either a single grayscale plane or a
/// multi-channel (RGB / RGBA) volume, both `f64` with intensities in [0, 1].
///
/// Shapes are row-major `(height, width)` and `(height, width, channels)`.
#[derive(Debug, Clone)]
pub enum PixelBuffer {
    Gray(Array2<f64>),
    Multi(Array3<f64>),
}

impl PixelBuffer {
    /// Builds a grayscale buffer from any numeric 2D array.
    ///
    /// Rejects empty shapes and non-finite or negative intensities. Values
    /// above 1.0 are assumed to be 8-bit and the whole plane is rescaled
    /// by 1/255.
    pub fn from_gray<T>(raw: &Array2<T>) -> Result<Self, EigenpressError>
    where
        T: ToPrimitive + Copy,
    {
        let (height, width) = raw.dim();
        if height == 0 || width == 0 {
            return Err(EigenpressError::InvalidInput(format!(
                "empty grayscale buffer ({height}x{width})"
            )));
        }
        Ok(PixelBuffer::Gray(to_unit_intensities(raw)?))
    }

    /// Builds a buffer from any numeric 3D array of shape
    /// `(height, width, channels)`.
    ///
    /// A single-channel volume collapses to the grayscale form. Three and
    /// four channels are kept as-is (RGB, RGBA); anything else is rejected.
    pub fn from_channels<T>(raw: &Array3<T>) -> Result<Self, EigenpressError>
    where
        T: ToPrimitive + Copy,
    {
        let (height, width, channels) = raw.dim();
        if height == 0 || width == 0 || channels == 0 {
            return Err(EigenpressError::InvalidInput(format!(
                "empty image buffer ({height}x{width}x{channels})"
            )));
        }
        match channels {
            1 => {
                let plane = raw.index_axis(Axis(2), 0).to_owned();
                Ok(PixelBuffer::Gray(to_unit_intensities(&plane)?))
            }
            3 | 4 => Ok(PixelBuffer::Multi(to_unit_intensities(raw)?)),
            other => Err(EigenpressError::InvalidInput(format!(
                "unsupported channel count {other}, expected 1, 3 or 4"
            ))),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            PixelBuffer::Gray(plane) => plane.nrows(),
            PixelBuffer::Multi(volume) => volume.dim().0,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            PixelBuffer::Gray(plane) => plane.ncols(),
            PixelBuffer::Multi(volume) => volume.dim().1,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            PixelBuffer::Gray(_) => 1,
            PixelBuffer::Multi(volume) => volume.dim().2,
        }
    }
}

//==================================================================================
// 2. Conversion Helpers
//==================================================================================

/// Converts any numeric array to `f64` unit-range intensities.
///
/// Non-finite and negative values are rejected as malformed input. If any
/// value exceeds 1.0 the array is treated as 8-bit data and divided by 255;
/// the pipeline's trailing min-max normalization makes the result invariant
/// to this affine choice.
fn to_unit_intensities<T, D>(raw: &Array<T, D>) -> Result<Array<f64, D>, EigenpressError>
where
    T: ToPrimitive + Copy,
    D: Dimension,
{
    let mut converted = Array::<f64, D>::zeros(raw.raw_dim());
    let mut max_value = 0.0_f64;
    for (dst, src) in converted.iter_mut().zip(raw.iter()) {
        let value = src.to_f64().ok_or_else(|| {
            EigenpressError::InvalidInput("pixel value is not representable as f64".to_string())
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(EigenpressError::InvalidInput(format!(
                "pixel intensity {value} is not a finite non-negative number"
            )));
        }
        max_value = max_value.max(value);
        *dst = value;
    }
    if max_value > 1.0 {
        converted.mapv_inplace(|v| v / 255.0);
    }
    Ok(converted)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
