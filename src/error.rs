//! Error types for cloth operations.

use thiserror::Error;

/// Errors that can occur while building or configuring a cloth.
///
/// Per-step work (wind, tearing, classification) never fails; only mesh
/// generation and configuration are fallible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// Density leaves no positive spacing between particles.
    #[error("density {density} leaves no positive spacing between particles")]
    InvalidDensity { density: f32 },
    /// Grid dimensions must be at least 2x2.
    #[error("grid must be at least 2x2, got {cols}x{rows}")]
    InvalidGridDimensions { cols: usize, rows: usize },
    /// A drawn placement segment has a non-finite endpoint.
    #[error("placement segment has a non-finite endpoint")]
    InvalidSegment,
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Stiffness must be in (0, 1].
    #[error("stiffness must be in (0, 1]")]
    InvalidStiffness,
    /// Default footprint must have a positive width and height.
    #[error("default footprint must be positive in both axes")]
    InvalidFootprint,
    /// Probe and cut radii must be positive.
    #[error("probe radius must be positive and cut radius non-negative")]
    InvalidRadius,
}
