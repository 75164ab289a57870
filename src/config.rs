// In: src/config.rs

//! The single source of truth for all eigenpress fidelity configuration.
//!
//! This module defines the `Fidelity` parameter, which is created once at the
//! application boundary (e.g., from a CLI flag or a JSON document) and then
//! passed down to the pipeline. Validation happens in the constructors so
//! that the pipeline only ever sees well-formed parameters, plus a final
//! shape-aware check at compression time for values that arrived through
//! deserialization.

use serde::{Deserialize, Serialize};

use crate::error::EigenpressError;

//==================================================================================
// I. Core Fidelity Parameter
//==================================================================================

/// Selects how much of the principal-component basis to retain.
///
/// Two forms are accepted:
/// - `VarianceFraction(f)`: retain the minimal number of components whose
///   cumulative explained-variance ratio reaches `f`. Must lie strictly
///   inside (0, 1).
/// - `Components(k)`: retain exactly `k` components. Must lie in
///   `[1, min(height, width)]` of the image being compressed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    VarianceFraction(f64),
    Components(usize),
}

impl Fidelity {
    /// Builds the fractional form, rejecting values outside (0, 1).
    pub fn variance_fraction(fraction: f64) -> Result<Self, EigenpressError> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
            return Err(EigenpressError::InvalidFidelity(format!(
                "variance fraction must lie strictly inside (0, 1), got {fraction}"
            )));
        }
        Ok(Fidelity::VarianceFraction(fraction))
    }

    /// Builds the exact-count form, rejecting zero. The upper bound depends
    /// on the image shape and is checked by `validate_for`.
    pub fn components(count: usize) -> Result<Self, EigenpressError> {
        if count == 0 {
            return Err(EigenpressError::InvalidFidelity(
                "component count must be at least 1".to_string(),
            ));
        }
        Ok(Fidelity::Components(count))
    }

    /// Re-validates the parameter against a concrete image shape.
    ///
    /// Constructors cannot know the image dimensions, and serde can build
    /// either variant without going through a constructor, so the pipeline
    /// calls this once before fitting.
    pub fn validate_for(&self, height: usize, width: usize) -> Result<(), EigenpressError> {
        let max_rank = height.min(width);
        match *self {
            Fidelity::VarianceFraction(fraction)
                if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 =>
            {
                Err(EigenpressError::InvalidFidelity(format!(
                    "variance fraction must lie strictly inside (0, 1), got {fraction}"
                )))
            }
            Fidelity::Components(count) if count == 0 || count > max_rank => {
                Err(EigenpressError::InvalidFidelity(format!(
                    "component count must lie in [1, {max_rank}] for a {height}x{width} image, got {count}"
                )))
            }
            _ => Ok(()),
        }
    }
}

//==================================================================================
// II. Boundary Presets
//==================================================================================

/// The enumerated fidelity levels offered at the application boundary.
///
/// The library accepts any valid `Fidelity`; front ends are expected to offer
/// this restricted set so users pick a level instead of typing a float.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FidelityPreset {
    /// Retain 80% of the variance. Smallest output, strongest artifacts.
    Low,

    /// Retain 90% of the variance.
    Medium,

    /// Retain 95% of the variance. The recommended default.
    #[default]
    High,

    /// Retain 99% of the variance. Close to the source image.
    Maximum,
}

impl FidelityPreset {
    /// Every preset a boundary may offer, in ascending fidelity order.
    pub const ALLOWED: [FidelityPreset; 4] = [
        FidelityPreset::Low,
        FidelityPreset::Medium,
        FidelityPreset::High,
        FidelityPreset::Maximum,
    ];

    /// The variance fraction this preset resolves to.
    pub fn fraction(self) -> f64 {
        match self {
            FidelityPreset::Low => 0.80,
            FidelityPreset::Medium => 0.90,
            FidelityPreset::High => 0.95,
            FidelityPreset::Maximum => 0.99,
        }
    }

    /// Maps a user-supplied fraction back onto a preset, if it is one of
    /// the allowed values.
    pub fn from_fraction(fraction: f64) -> Option<Self> {
        Self::ALLOWED
            .into_iter()
            .find(|preset| (preset.fraction() - fraction).abs() < 1e-9)
    }
}

impl From<FidelityPreset> for Fidelity {
    fn from(preset: FidelityPreset) -> Self {
        // Preset fractions are all valid by construction.
        Fidelity::VarianceFraction(preset.fraction())
    }
}

//==================================================================================
// III. Unit Tests
//==================================================================================
