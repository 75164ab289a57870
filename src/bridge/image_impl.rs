// In: src/bridge/image_impl.rs

//! Marshalling between the `image` crate's world and the pure pipeline types.
//!
//! Everything codec-shaped lives here: decoding bytes into a `PixelBuffer`
//! and encoding a quantized plane back into an image container. The pipeline
//! itself never sees an `image` type.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat};
use ndarray::{Array2, Array3};

use crate::error::EigenpressError;
use crate::types::PixelBuffer;

//==================================================================================
// 1. Decoding
//==================================================================================

/// Decodes raw image bytes (PNG, JPEG, whatever `image` was built with) into
/// the canonical pixel buffer.
///
/// Grayscale sources map to the 2D form so the channel-combination step is
/// skipped downstream; color sources map to an RGB volume.
pub(crate) fn decode_to_buffer(bytes: &[u8]) -> Result<PixelBuffer, EigenpressError> {
    if bytes.is_empty() {
        return Err(EigenpressError::InvalidInput(
            "empty input byte stream".to_string(),
        ));
    }
    let decoded = image::load_from_memory(bytes)?;
    if decoded.color().has_color() {
        PixelBuffer::from_channels(&rgb_to_array(&decoded)?)
    } else {
        PixelBuffer::from_gray(&luma_to_array(&decoded)?)
    }
}

fn luma_to_array(decoded: &DynamicImage) -> Result<Array2<u8>, EigenpressError> {
    let gray = decoded.to_luma8();
    let (width, height) = gray.dimensions();
    Array2::from_shape_vec((height as usize, width as usize), gray.into_raw()).map_err(|e| {
        EigenpressError::InternalError(format!("decoded luma plane has inconsistent shape: {e}"))
    })
}

fn rgb_to_array(decoded: &DynamicImage) -> Result<Array3<u8>, EigenpressError> {
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    // The raw container is row-major interleaved RGB, exactly the layout
    // from_shape_vec expects.
    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw()).map_err(|e| {
        EigenpressError::InternalError(format!("decoded RGB container has inconsistent shape: {e}"))
    })
}

//==================================================================================
// 2. Encoding
//==================================================================================

/// Wraps a quantized plane in a `GrayImage`.
pub(crate) fn gray_to_image(pixels: &Array2<u8>) -> Result<GrayImage, EigenpressError> {
    let (height, width) = pixels.dim();
    let width = u32::try_from(width)
        .map_err(|_| EigenpressError::InvalidInput(format!("image width {width} exceeds u32")))?;
    let height = u32::try_from(height)
        .map_err(|_| EigenpressError::InvalidInput(format!("image height {height} exceeds u32")))?;
    // Collect in logical (row-major) order, independent of array layout.
    let raw: Vec<u8> = pixels.iter().copied().collect();
    GrayImage::from_raw(width, height, raw).ok_or_else(|| {
        EigenpressError::InternalError("quantized plane does not fill its dimensions".to_string())
    })
}

/// Encodes a quantized plane into the requested container format.
pub(crate) fn encode_gray(
    pixels: &Array2<u8>,
    format: ImageFormat,
) -> Result<Vec<u8>, EigenpressError> {
    let img = gray_to_image(pixels)?;
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard_png(side: u32) -> Vec<u8> {
        let img = GrayImage::from_fn(side, side, |x, y| {
            image::Luma([if (x + y) % 2 == 0 { 255u8 } else { 0 }])
        });
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn grayscale_png_decodes_to_gray_buffer() {
        let bytes = checkerboard_png(8);
        let buffer = decode_to_buffer(&bytes).unwrap();
        assert_eq!(buffer.channels(), 1);
        assert_eq!((buffer.height(), buffer.width()), (8, 8));
        let PixelBuffer::Gray(plane) = buffer else {
            panic!("expected grayscale buffer");
        };
        assert!((plane[[0, 0]] - 1.0).abs() < 1e-12);
        assert_eq!(plane[[0, 1]], 0.0);
    }

    #[test]
    fn rgb_png_decodes_to_multi_buffer() {
        let img = image::RgbImage::from_fn(4, 6, |x, _| image::Rgb([x as u8 * 60, 10, 200]));
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        let buffer = decode_to_buffer(&cursor.into_inner()).unwrap();
        assert_eq!(buffer.channels(), 3);
        assert_eq!((buffer.height(), buffer.width()), (6, 4));
    }

    #[test]
    fn empty_bytes_are_invalid_input() {
        assert!(matches!(
            decode_to_buffer(&[]),
            Err(EigenpressError::InvalidInput(_))
        ));
    }

    #[test]
    fn garbage_bytes_are_a_codec_error() {
        let garbage = vec![0x13u8; 64];
        assert!(matches!(
            decode_to_buffer(&garbage),
            Err(EigenpressError::ImageCodec(_))
        ));
    }

    #[test]
    fn encode_decode_roundtrip_preserves_pixels() {
        let plane = Array2::from_shape_fn((5, 7), |(y, x)| (y * 7 + x) as u8);
        let bytes = encode_gray(&plane, ImageFormat::Png).unwrap();
        let back = image::load_from_memory(&bytes).unwrap().to_luma8();
        assert_eq!(back.dimensions(), (7, 5));
        for ((y, x), &v) in plane.indexed_iter() {
            assert_eq!(back.get_pixel(x as u32, y as u32)[0], v);
        }
    }
}
