// In: src/kernels/grayscale.rs

//! This module contains the pure, stateless kernel for collapsing a
//! multi-channel image into a single luminance plane.
//!
//! This is the first transform in the compression pipeline. The weights are
//! the standard ITU-R BT.709 luminance coefficients, fixed with no
//! configuration so the conversion is fully deterministic.

use ndarray::{Array2, Array3, Axis, Zip};

use crate::error::EigenpressError;

/// Luminance weights for the red, green and blue channels.
pub const LUMA_R: f64 = 0.2125;
pub const LUMA_G: f64 = 0.7154;
pub const LUMA_B: f64 = 0.0721;

//==================================================================================
// 1. Core Logic
//==================================================================================

/// Collapses an `(height, width, channels)` volume into a luminance plane.
///
/// Intensities are expected in the unit range (the `PixelBuffer`
/// constructors guarantee this). A single-channel volume passes through
/// untouched; for four channels the alpha plane is ignored.
///
/// # Errors
/// Returns `EigenpressError::InvalidInput` for empty volumes or channel
/// counts other than 1, 3 or 4.
pub fn combine_channels(volume: &Array3<f64>) -> Result<Array2<f64>, EigenpressError> {
    let (height, width, channels) = volume.dim();
    if height == 0 || width == 0 {
        return Err(EigenpressError::InvalidInput(format!(
            "empty image volume ({height}x{width}x{channels})"
        )));
    }
    match channels {
        1 => Ok(volume.index_axis(Axis(2), 0).to_owned()),
        3 | 4 => {
            let mut gray = Array2::<f64>::zeros((height, width));
            Zip::from(&mut gray)
                .and(volume.lanes(Axis(2)))
                .for_each(|luma, pixel| {
                    *luma = LUMA_R * pixel[0] + LUMA_G * pixel[1] + LUMA_B * pixel[2];
                });
            Ok(gray)
        }
        other => Err(EigenpressError::InvalidInput(format!(
            "unsupported channel count {other}, expected 1, 3 or 4"
        ))),
    }
}

//==================================================================================
// 2. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn weights_sum_to_one() {
        assert!((LUMA_R + LUMA_G + LUMA_B - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pure_channels_map_to_their_weight() {
        let mut volume = Array3::<f64>::zeros((1, 3, 3));
        volume[[0, 0, 0]] = 1.0; // pure red
        volume[[0, 1, 1]] = 1.0; // pure green
        volume[[0, 2, 2]] = 1.0; // pure blue
        let gray = combine_channels(&volume).unwrap();
        assert!((gray[[0, 0]] - LUMA_R).abs() < 1e-12);
        assert!((gray[[0, 1]] - LUMA_G).abs() < 1e-12);
        assert!((gray[[0, 2]] - LUMA_B).abs() < 1e-12);
    }

    #[test]
    fn white_maps_to_one() {
        let volume = Array3::<f64>::from_elem((2, 2, 3), 1.0);
        let gray = combine_channels(&volume).unwrap();
        for &v in gray.iter() {
            assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let mut with_alpha = Array3::<f64>::from_elem((2, 2, 4), 0.25);
        for a in with_alpha.index_axis_mut(Axis(2), 3).iter_mut() {
            *a = 1.0;
        }
        let rgb = Array3::<f64>::from_elem((2, 2, 3), 0.25);
        assert_eq!(
            combine_channels(&with_alpha).unwrap(),
            combine_channels(&rgb).unwrap()
        );
    }

    #[test]
    fn single_channel_passes_through() {
        let mut volume = Array3::<f64>::zeros((2, 2, 1));
        volume[[1, 1, 0]] = 0.7;
        let gray = combine_channels(&volume).unwrap();
        assert_eq!(gray[[1, 1]], 0.7);
        assert_eq!(gray.dim(), (2, 2));
    }

    #[test]
    fn bad_channel_counts_are_rejected() {
        let volume = Array3::<f64>::zeros((2, 2, 2));
        assert!(combine_channels(&volume).is_err());
        let empty = Array3::<f64>::zeros((0, 2, 3));
        assert!(combine_channels(&empty).is_err());
    }
}
