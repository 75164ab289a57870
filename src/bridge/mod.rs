// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the byte-level public surface of the eigenpress library. It
// encapsulates the pure, codec-agnostic `pipeline` engine behind the `image`
// crate's containers. It is the authoritative boundary between the outside
// world (encoded PNG/JPEG bytes) and the internal numeric pipeline.
//
// Data Flow:
//
//   1. [Stateless API (compress_image_bytes)] -> Receives `&[u8]`
//         |
//         `-> a. Calls `image_impl` to convert bytes -> `types::PixelBuffer`
//         |
//         `-> b. Calls the pure engine with the buffer and fidelity
//
//   2. [Pipeline Engine (pipeline::orchestrator)] -> Returns `Result<Reconstruction>`
//         |
//         `-> the quantized plane plus the retained-component report
//
//   3. [Stateless API] -> Calls `image_impl` to encode the plane, assembles
//      `format::CompressionStats`, returns `(Vec<u8>, CompressionStats)`
//
// ====================================================================================
pub(crate) mod image_impl;

pub mod format;
pub mod stateless_api;

// --- Low-Level Stateless API ---
pub use stateless_api::{compress_image_bytes, compress_image_bytes_as};

// --- Format Structs ---
pub use format::CompressionStats;
