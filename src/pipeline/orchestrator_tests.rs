// In: src/pipeline/orchestrator_tests.rs

//! End-to-end property tests for the compression pipeline, exercised through
//! the public orchestrator API on synthetic images.

use ndarray::{Array2, Array3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{Fidelity, FidelityPreset};
use crate::error::EigenpressError;
use crate::kernels::quantize::DEGENERATE_FILL;
use crate::pipeline::{compress, compress_buffer, compress_detailed};
use crate::types::PixelBuffer;

/// Smooth low-rank structure plus a little seeded noise. The noise gives the
/// eigenvalue spectrum a tail so the fidelity presets resolve to genuinely
/// different component counts. The result is rescaled to span exactly [0, 1],
/// which makes the pipeline's trailing min-max normalization close to the
/// identity and lets outputs be compared against the original directly.
fn structured_image(height: usize, width: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut image = Array2::from_shape_fn((height, width), |(y, x)| {
        0.5 + 0.2 * ((x as f64) * 0.31).sin() * ((y as f64) * 0.17).cos()
            + 0.2 * ((x + y) as f64 / (height + width) as f64 - 0.5)
            + rng.random_range(-0.05..0.05)
    });
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in image.iter() {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    image.mapv_inplace(|v| (v - lo) / (hi - lo));
    image
}

fn mse_against(original: &Array2<f64>, quantized: &Array2<u8>) -> f64 {
    original
        .iter()
        .zip(quantized.iter())
        .map(|(&a, &b)| {
            let diff = a - f64::from(b) / 255.0;
            diff * diff
        })
        .sum::<f64>()
        / original.len() as f64
}

#[test]
fn output_shape_equals_input_shape() {
    let gray = structured_image(24, 17, 7);
    let fidelity = Fidelity::variance_fraction(0.9).unwrap();
    let out = compress(&gray, &fidelity).unwrap();
    assert_eq!(out.dim(), (24, 17));
}

#[test]
fn multi_channel_buffer_collapses_before_compression() {
    let volume = Array3::from_shape_fn((12, 9, 3), |(y, x, c)| {
        ((y * 9 + x + c) as f64 * 0.11).sin().abs()
    });
    let buffer = PixelBuffer::from_channels(&volume).unwrap();
    let fidelity = Fidelity::variance_fraction(0.95).unwrap();
    let out = compress_buffer(&buffer, &fidelity).unwrap();
    assert_eq!(out.dim(), (12, 9));
}

#[test]
fn identical_inputs_produce_identical_outputs() {
    let gray = structured_image(20, 20, 11);
    let fidelity = Fidelity::variance_fraction(0.95).unwrap();
    let first = compress(&gray, &fidelity).unwrap();
    let second = compress(&gray, &fidelity).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reconstruction_error_does_not_increase_with_fidelity() {
    let gray = structured_image(48, 40, 3);
    let mut previous_mse = f64::INFINITY;
    for preset in FidelityPreset::ALLOWED {
        let out = compress(&gray, &Fidelity::from(preset)).unwrap();
        let mse = mse_against(&gray, &out);
        assert!(
            mse <= previous_mse + 1e-4,
            "mse rose from {previous_mse} to {mse} at preset {preset:?}"
        );
        previous_mse = mse;
    }
}

#[test]
fn higher_fidelity_retains_at_least_as_many_components() {
    let gray = structured_image(48, 40, 5);
    let mut previous = 0;
    for preset in FidelityPreset::ALLOWED {
        let report = compress_detailed(&gray, &Fidelity::from(preset)).unwrap();
        assert!(report.retained_components >= previous);
        assert!(report.explained_variance_ratio >= preset.fraction() - 1e-9);
        previous = report.retained_components;
    }
}

#[test]
fn constant_image_compresses_to_constant_image() {
    // An 8-bit-range constant plane; the buffer constructor rescales it.
    let raw = Array2::from_elem((10, 10), 128.0);
    let buffer = PixelBuffer::from_gray(&raw).unwrap();
    let fidelity = Fidelity::variance_fraction(0.9).unwrap();
    let out = compress_buffer(&buffer, &fidelity).unwrap();
    assert_eq!(out.dim(), (10, 10));
    assert!(out.iter().all(|&v| v == DEGENERATE_FILL));
}

#[test]
fn full_rank_reproduces_the_original() {
    // The generator spans exactly [0, 1], so the trailing renormalization is
    // the identity and the quantized output can be compared directly.
    let gray = structured_image(16, 16, 13);
    let full_rank = Fidelity::components(16).unwrap();
    let out = compress(&gray, &full_rank).unwrap();
    for (&a, &b) in gray.iter().zip(out.iter()) {
        let diff = (a - f64::from(b) / 255.0).abs();
        assert!(diff <= 1.5 / 255.0, "pixel drifted by {diff}");
    }
}

#[test]
fn pathological_fraction_still_retains_one_component() {
    let gray = structured_image(12, 12, 17);
    let fidelity = Fidelity::variance_fraction(1e-9).unwrap();
    let report = compress_detailed(&gray, &fidelity).unwrap();
    assert_eq!(report.retained_components, 1);
}

#[test]
fn out_of_range_fraction_is_rejected() {
    let gray = structured_image(10, 10, 19);
    // Bypass the checked constructor the way a deserialized value could.
    let bad = Fidelity::VarianceFraction(1.5);
    assert!(matches!(
        compress(&gray, &bad),
        Err(EigenpressError::InvalidFidelity(_))
    ));
}

#[test]
fn oversized_component_count_is_rejected() {
    let gray = structured_image(10, 14, 23);
    let too_many = Fidelity::components(11).unwrap();
    assert!(matches!(
        compress(&gray, &too_many),
        Err(EigenpressError::InvalidFidelity(_))
    ));
}

#[test]
fn empty_image_is_rejected() {
    let empty = Array2::<f64>::zeros((0, 5));
    let fidelity = Fidelity::variance_fraction(0.9).unwrap();
    assert!(matches!(
        compress(&empty, &fidelity),
        Err(EigenpressError::InvalidInput(_))
    ));
}
