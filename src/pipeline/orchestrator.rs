// In: src/pipeline/orchestrator.rs

//! The top-level coordinator for the compression pipeline.
//!
//! This module is pure with respect to the outside world: it accepts decoded
//! pixel arrays, sequences the kernels (grayscale, PCA, quantization) and
//! returns the normalized 8-bit result. Codec and file concerns live in
//! `bridge` and the binary.

use ndarray::Array2;

use crate::config::Fidelity;
use crate::error::EigenpressError;
use crate::kernels::{grayscale, pca::PcaBasis, quantize};
use crate::types::PixelBuffer;

//==================================================================================
// 1. Pipeline Output
//==================================================================================

/// The result of one compression run: the quantized image plus the numbers
/// a caller needs to report what the lossy step actually did.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Normalized 8-bit output, same shape as the input grayscale image.
    pub pixels: Array2<u8>,
    /// Number of principal components that survived truncation.
    pub retained_components: usize,
    /// Cumulative explained-variance ratio achieved by those components.
    pub explained_variance_ratio: f64,
}

//==================================================================================
// 2. Public Orchestration API
//==================================================================================

/// Compresses a grayscale image, returning only the quantized pixels.
///
/// This is the core contract of the library; `compress_detailed` is the same
/// operation with the reconstruction report attached.
pub fn compress(gray: &Array2<f64>, fidelity: &Fidelity) -> Result<Array2<u8>, EigenpressError> {
    Ok(compress_detailed(gray, fidelity)?.pixels)
}

/// Compresses any decoded pixel buffer, converting to grayscale first when
/// the buffer is multi-channel.
pub fn compress_buffer(
    buffer: &PixelBuffer,
    fidelity: &Fidelity,
) -> Result<Array2<u8>, EigenpressError> {
    Ok(compress_buffer_detailed(buffer, fidelity)?.pixels)
}

/// `compress_buffer` with the reconstruction report attached.
pub fn compress_buffer_detailed(
    buffer: &PixelBuffer,
    fidelity: &Fidelity,
) -> Result<Reconstruction, EigenpressError> {
    match buffer {
        // Already a single channel, skip the combination step.
        PixelBuffer::Gray(gray) => compress_detailed(gray, fidelity),
        PixelBuffer::Multi(volume) => {
            let gray = grayscale::combine_channels(volume)?;
            compress_detailed(&gray, fidelity)
        }
    }
}

/// The full pipeline on a grayscale matrix.
pub fn compress_detailed(
    gray: &Array2<f64>,
    fidelity: &Fidelity,
) -> Result<Reconstruction, EigenpressError> {
    // 1. Validate the shape and the fidelity parameter against it.
    let (height, width) = gray.dim();
    if height == 0 || width == 0 {
        return Err(EigenpressError::InvalidInput(format!(
            "empty grayscale image ({height}x{width})"
        )));
    }
    fidelity.validate_for(height, width)?;

    // 2. Fit the basis and resolve the component count to retain.
    let basis = PcaBasis::fit(gray)?;
    let retained = basis.resolve_components(fidelity);
    let achieved = basis.cumulative_explained(retained);
    log::debug!(
        "retaining {retained} of {width} components, cumulative explained variance {achieved:.4}"
    );

    // 3. The lossy step: project onto the truncated basis and reconstruct.
    let scores = basis.project(gray, retained)?;
    let reconstructed = basis.reconstruct(&scores)?;
    if reconstructed.dim() != gray.dim() {
        return Err(EigenpressError::InternalError(format!(
            "reconstruction shape {:?} does not match input shape {:?}",
            reconstructed.dim(),
            gray.dim()
        )));
    }

    // 4. Normalize and quantize for display.
    Ok(Reconstruction {
        pixels: quantize::to_u8(&reconstructed),
        retained_components: retained,
        explained_variance_ratio: achieved,
    })
}
