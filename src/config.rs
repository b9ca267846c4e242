//! Configuration types for the solver, the mesh generator and interaction.
//!
//! All coordinates are screen-space: +x right, +y down, units are pixels and
//! time is in seconds.

use crate::error::ClothError;
use crate::float::Float;
use crate::render::Palette;
use crate::vec::Vec2;

/// Configuration for the constraint solver and simulation.
///
/// # Builder Pattern
/// ```
/// use tearcloth::config::SolverConfig;
/// use tearcloth::vec::Vec2;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_iterations(8)
///     .with_gravity(Vec2::new(0.0, 981.0))
///     .with_damping(0.99)
///     .with_sub_steps(2);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<F: Float> {
    /// Number of link relaxation iterations per sub-step. Default: 8.
    pub iterations: usize,
    /// Gravity acceleration vector. Default: 1000 px/s² downward.
    pub gravity: Vec2<F>,
    /// Velocity damping factor [0, 1]. 1.0 = no damping. Default: 0.99.
    pub damping: F,
    /// Number of sub-steps per frame. Higher = more stable. Default: 2.
    pub sub_steps: usize,
}

impl<F: Float> SolverConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            iterations: 8,
            gravity: Vec2::new(F::zero(), F::from_f32(1000.0)),
            damping: F::from_f32(0.99),
            sub_steps: 2,
        }
    }

    /// Set the number of relaxation iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of sub-steps.
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mesh generation settings.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Spacing is `spacing_base - density`. Default: 60.
    pub spacing_base: F,
    /// Width and height targeted by default placement. Default: 500 x 375.
    pub footprint: Vec2<F>,
    /// Smallest distance between the viewport top and a default mesh. Default: 20.
    pub top_margin: F,
    /// Lowest density the parameter setter accepts. Default: 10.
    pub density_min: F,
    /// Highest density the parameter setter accepts. Default: 50.
    pub density_max: F,
    /// Mass of every free particle. Default: 1.
    pub particle_mass: F,
    /// Relaxation stiffness of every link, in (0, 1]. Default: 0.5.
    pub link_stiffness: F,
}

impl<F: Float> ClothConfig<F> {
    pub fn new() -> Self {
        ClothConfig {
            spacing_base: F::from_f32(60.0),
            footprint: Vec2::new(F::from_f32(500.0), F::from_f32(375.0)),
            top_margin: F::from_f32(20.0),
            density_min: F::from_f32(10.0),
            density_max: F::from_f32(50.0),
            particle_mass: F::one(),
            link_stiffness: F::half(),
        }
    }

    pub fn with_footprint(mut self, footprint: Vec2<F>) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_top_margin(mut self, top_margin: F) -> Self {
        self.top_margin = top_margin;
        self
    }

    pub fn with_density_range(mut self, min: F, max: F) -> Self {
        self.density_min = min;
        self.density_max = max;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_link_stiffness(mut self, stiffness: F) -> Self {
        self.link_stiffness = stiffness;
        self
    }

    /// Grid spacing produced by `density`.
    pub fn spacing_for(&self, density: F) -> F {
        self.spacing_base - density
    }

    /// Reject settings that could only produce a degenerate mesh.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !(self.particle_mass > F::zero()) || !self.particle_mass.is_finite() {
            return Err(ClothError::InvalidMass);
        }
        if !(self.link_stiffness > F::zero()) || self.link_stiffness > F::one() {
            return Err(ClothError::InvalidStiffness);
        }
        if !(self.footprint.x > F::zero()) || !(self.footprint.y > F::zero()) {
            return Err(ClothError::InvalidFootprint);
        }
        if !(self.density_min <= self.density_max)
            || !(self.spacing_for(self.density_max) > F::zero())
        {
            return Err(ClothError::InvalidDensity {
                density: self.density_max.to_f32(),
            });
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer interaction settings: probe, proximity cut and grab.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionConfig<F: Float> {
    /// Radius of the pointer probe. Default: 30.
    pub probe_radius: F,
    /// Fraction of a solid probe's velocity handed to particles it pushes. Default: 0.25.
    pub probe_carry: F,
    /// Links whose midpoint is closer than this to the pointer are cut. Default: 15.
    pub cut_radius: F,
    /// How far from a particle a press may land and still grab it. Default: 10.
    pub follow_radius: F,
    /// Pull applied to a grabbed particle per solver iteration. Default: 0.2.
    pub follow_stiffness: F,
}

impl<F: Float> InteractionConfig<F> {
    pub fn new() -> Self {
        InteractionConfig {
            probe_radius: F::from_f32(30.0),
            probe_carry: F::from_f32(0.25),
            cut_radius: F::from_f32(15.0),
            follow_radius: F::from_f32(10.0),
            follow_stiffness: F::from_f32(0.2),
        }
    }

    pub fn with_probe_radius(mut self, radius: F) -> Self {
        self.probe_radius = radius;
        self
    }

    pub fn with_probe_carry(mut self, carry: F) -> Self {
        self.probe_carry = carry;
        self
    }

    pub fn with_cut_radius(mut self, radius: F) -> Self {
        self.cut_radius = radius;
        self
    }

    pub fn with_follow(mut self, radius: F, stiffness: F) -> Self {
        self.follow_radius = radius;
        self.follow_stiffness = stiffness;
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if !(self.probe_radius > F::zero()) || !(self.cut_radius >= F::zero()) {
            return Err(ClothError::InvalidRadius);
        }
        if !(self.follow_stiffness >= F::zero()) || self.follow_stiffness > F::one() {
            return Err(ClothError::InvalidStiffness);
        }
        Ok(())
    }
}

impl<F: Float> Default for InteractionConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale factors turning wind slider values into physical quantities.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindConfig<F: Float> {
    /// Spatial phase per pixel along x and y. Default: 0.002.
    pub phase_scale: F,
    /// Force per strength slider unit. Default: 12.
    pub strength_scale: F,
    /// Angular frequency (rad/s) per speed slider unit. Default: 0.2.
    pub speed_scale: F,
}

impl<F: Float> WindConfig<F> {
    pub fn new() -> Self {
        WindConfig {
            phase_scale: F::from_f32(0.002),
            strength_scale: F::from_f32(12.0),
            speed_scale: F::from_f32(0.2),
        }
    }

    pub fn with_phase_scale(mut self, phase_scale: F) -> Self {
        self.phase_scale = phase_scale;
        self
    }

    pub fn with_strength_scale(mut self, strength_scale: F) -> Self {
        self.strength_scale = strength_scale;
        self
    }

    pub fn with_speed_scale(mut self, speed_scale: F) -> Self {
        self.speed_scale = speed_scale;
        self
    }
}

impl<F: Float> Default for WindConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundle of every non-solver setting a session needs.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig<F: Float> {
    pub cloth: ClothConfig<F>,
    pub interaction: InteractionConfig<F>,
    pub wind: WindConfig<F>,
    pub palette: Palette,
}

impl<F: Float> SessionConfig<F> {
    pub fn new() -> Self {
        SessionConfig {
            cloth: ClothConfig::new(),
            interaction: InteractionConfig::new(),
            wind: WindConfig::new(),
            palette: Palette::default(),
        }
    }

    pub fn with_cloth(mut self, cloth: ClothConfig<F>) -> Self {
        self.cloth = cloth;
        self
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig<F>) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_wind(mut self, wind: WindConfig<F>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        self.cloth.validate()?;
        self.interaction.validate()
    }
}
