//! This file is the root of the `eigenpress` Rust crate.
//!
//! eigenpress performs lossy image compression by fitting a
//! principal-component basis to the grayscale representation of an image,
//! truncating it, and reconstructing a displayable approximation.
//!
//! Layering, outermost first:
//! 1.  `bridge` marshals encoded bytes in and out via the `image` crate and
//!     is the byte-level public API.
//! 2.  `pipeline` is the pure engine: validation plus kernel sequencing.
//! 3.  `kernels` are the stateless numeric transforms (grayscale combination,
//!     PCA basis, min-max quantization).

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod pipeline;
pub mod types;

//==================================================================================
// 2. Re-exports
//==================================================================================
pub use bridge::{compress_image_bytes, compress_image_bytes_as, CompressionStats};
pub use config::{Fidelity, FidelityPreset};
pub use error::EigenpressError;
pub use pipeline::{compress, compress_buffer, Reconstruction};
pub use types::PixelBuffer;
