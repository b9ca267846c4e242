//! Strain-based visual classification of links.
//!
//! Classification is advisory: it only colors links and never decides what
//! gets torn. Both sides recompute the breaking distance from whatever tear
//! multiplier they read.

use crate::float::Float;
use crate::link::Link;
use crate::particle::Particle;

/// Strain above which a link is drawn as about to break.
pub const CRITICAL_STRAIN: f32 = 0.9;
/// Strain above which a link is drawn as stressed.
pub const WARNING_STRAIN: f32 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrainLevel {
    Safe,
    Warning,
    Critical,
}

/// Length at which a link with `rest_length` tears.
pub fn breaking_distance<F: Float>(rest_length: F, tear_multiplier: F) -> F {
    rest_length * tear_multiplier
}

/// Stretch normalized so 0 is at rest and 1 is at the breaking distance.
///
/// Returns `None` when the multiplier leaves no room between rest and
/// breaking distance (multiplier <= 1).
pub fn strain<F: Float>(length: F, rest_length: F, tear_multiplier: F) -> Option<F> {
    let span = breaking_distance(rest_length, tear_multiplier) - rest_length;
    if !(span > F::zero()) {
        return None;
    }
    Some(((length - rest_length) / span).max(F::zero()))
}

/// Classify a link of the given `length`.
pub fn classify<F: Float>(length: F, rest_length: F, tear_multiplier: F) -> StrainLevel {
    match strain(length, rest_length, tear_multiplier) {
        Some(s) if s > F::from_f32(CRITICAL_STRAIN) => StrainLevel::Critical,
        Some(s) if s > F::from_f32(WARNING_STRAIN) => StrainLevel::Warning,
        Some(_) => StrainLevel::Safe,
        None if length > rest_length => StrainLevel::Critical,
        None => StrainLevel::Safe,
    }
}

/// Classify `link` against its current endpoint positions.
pub fn classify_link<F: Float>(
    link: &Link<F>,
    particles: &[Particle<F>],
    tear_multiplier: F,
) -> StrainLevel {
    classify(link.length(particles), link.rest_length, tear_multiplier)
}
