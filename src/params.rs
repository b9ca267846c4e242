//! Live, user-adjustable simulation parameters.
//!
//! The session owns one `Params` value. The step and the render frame each
//! read it at their own point of use, so a parameter changed between the two
//! is seen by the frame one step before the simulation acts on it.

use crate::config::ClothConfig;
use crate::float::Float;

/// Bounds of the tear multiplier slider.
pub const TEAR_MULTIPLIER_RANGE: (f32, f32) = (1.1, 20.0);
/// Bounds of the wind strength slider.
pub const WIND_STRENGTH_RANGE: (f32, f32) = (0.0, 100.0);
/// Bounds of the wind speed slider.
pub const WIND_SPEED_RANGE: (f32, f32) = (0.0, 100.0);

/// Wind controls in slider units; `WindConfig` turns them into physics.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindParams<F: Float> {
    pub enabled: bool,
    /// Direction the wind blows toward, radians from +x.
    pub angle: F,
    pub strength: F,
    pub speed: F,
}

impl<F: Float> Default for WindParams<F> {
    fn default() -> Self {
        WindParams {
            enabled: false,
            angle: F::zero(),
            strength: F::from_f32(20.0),
            speed: F::from_f32(20.0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params<F: Float> {
    /// Grid density; spacing is `spacing_base - density`.
    pub density: F,
    pub wind: WindParams<F>,
    /// Breaking distance is `rest length * tear_multiplier`.
    pub tear_multiplier: F,
    /// Solid probes push the cloth, ghost probes only mark the pointer.
    pub solid_probe: bool,
}

impl<F: Float> Params<F> {
    pub fn new() -> Self {
        Params {
            density: F::from_f32(35.0),
            wind: WindParams::default(),
            tear_multiplier: F::from_f32(3.0),
            solid_probe: false,
        }
    }

    pub fn with_density(mut self, density: F) -> Self {
        self.density = density;
        self
    }

    pub fn with_wind(mut self, wind: WindParams<F>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_tear_multiplier(mut self, tear_multiplier: F) -> Self {
        self.tear_multiplier = tear_multiplier;
        self
    }

    pub fn with_solid_probe(mut self, solid: bool) -> Self {
        self.solid_probe = solid;
        self
    }

    /// Store `param`, clamped to its slider range.
    ///
    /// Non-finite values are dropped and `false` is returned.
    pub fn apply(&mut self, param: Parameter<F>, config: &ClothConfig<F>) -> bool {
        if let Some(value) = param.value() {
            if !value.is_finite() {
                log::warn!("ignoring non-finite value for {:?}", param);
                return false;
            }
        }
        match param {
            Parameter::Density(v) => {
                self.density = v.clamp(config.density_min, config.density_max);
            }
            Parameter::TearMultiplier(v) => {
                self.tear_multiplier = clamp_to(v, TEAR_MULTIPLIER_RANGE);
            }
            Parameter::WindEnabled(on) => self.wind.enabled = on,
            Parameter::WindAngle(v) => self.wind.angle = v,
            Parameter::WindStrength(v) => self.wind.strength = clamp_to(v, WIND_STRENGTH_RANGE),
            Parameter::WindSpeed(v) => self.wind.speed = clamp_to(v, WIND_SPEED_RANGE),
            Parameter::SolidProbe(on) => self.solid_probe = on,
        }
        true
    }
}

impl<F: Float> Default for Params<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_to<F: Float>(v: F, (lo, hi): (f32, f32)) -> F {
    v.clamp(F::from_f32(lo), F::from_f32(hi))
}

/// A single parameter change coming from the UI.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Parameter<F: Float> {
    /// Changing density rebuilds the mesh at its current placement.
    Density(F),
    TearMultiplier(F),
    WindEnabled(bool),
    WindAngle(F),
    WindStrength(F),
    WindSpeed(F),
    SolidProbe(bool),
}

impl<F: Float> Parameter<F> {
    fn value(&self) -> Option<F> {
        match *self {
            Parameter::Density(v)
            | Parameter::TearMultiplier(v)
            | Parameter::WindAngle(v)
            | Parameter::WindStrength(v)
            | Parameter::WindSpeed(v) => Some(v),
            Parameter::WindEnabled(_) | Parameter::SolidProbe(_) => None,
        }
    }
}
