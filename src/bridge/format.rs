// In: src/bridge/format.rs

//! Public report types returned alongside compressed output.

use serde::{Deserialize, Serialize};

/// Summary of one byte-level compression run, suitable for logging or for
/// serializing straight to JSON at the application boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompressionStats {
    /// Width of the decoded input image in pixels.
    pub width: usize,
    /// Height of the decoded input image in pixels.
    pub height: usize,
    /// Channel count of the decoded input (1, 3 or 4).
    pub input_channels: usize,
    /// Size of the encoded input in bytes.
    pub input_bytes: usize,
    /// Size of the encoded output in bytes.
    pub output_bytes: usize,
    /// Principal components retained by the lossy step.
    pub retained_components: usize,
    /// Cumulative explained-variance ratio those components achieve.
    pub explained_variance_ratio: f64,
}
