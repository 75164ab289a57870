// In: src/bridge/stateless_api.rs

use image::ImageFormat;

use crate::bridge::format::CompressionStats;
use crate::bridge::image_impl;
use crate::config::Fidelity;
use crate::error::EigenpressError;
use crate::pipeline;

/// Compresses one encoded image into an encoded grayscale approximation.
///
/// This is the byte-level rendition of the core contract: decode whatever
/// container arrives, run the lossy PCA pipeline, encode the result. The
/// returned stats describe what the lossy step did.
pub fn compress_image_bytes(
    bytes: &[u8],
    fidelity: &Fidelity,
) -> Result<(Vec<u8>, CompressionStats), EigenpressError> {
    compress_image_bytes_as(bytes, fidelity, ImageFormat::Png)
}

/// `compress_image_bytes` with an explicit output container format.
pub fn compress_image_bytes_as(
    bytes: &[u8],
    fidelity: &Fidelity,
    output_format: ImageFormat,
) -> Result<(Vec<u8>, CompressionStats), EigenpressError> {
    // 1. Marshall the data from the codec world into our pure internal format.
    let buffer = image_impl::decode_to_buffer(bytes)?;
    log::debug!(
        "decoded {}x{} image with {} channel(s)",
        buffer.width(),
        buffer.height(),
        buffer.channels()
    );

    // 2. Call the pure pipeline engine.
    let reconstruction = pipeline::compress_buffer_detailed(&buffer, fidelity)?;

    // 3. The bridge finishes the job: encode and report.
    let encoded = image_impl::encode_gray(&reconstruction.pixels, output_format)?;
    let stats = CompressionStats {
        width: buffer.width(),
        height: buffer.height(),
        input_channels: buffer.channels(),
        input_bytes: bytes.len(),
        output_bytes: encoded.len(),
        retained_components: reconstruction.retained_components,
        explained_variance_ratio: reconstruction.explained_variance_ratio,
    };
    Ok((encoded, stats))
}
