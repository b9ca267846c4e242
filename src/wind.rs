//! Time-varying wind force with a traveling-wave phase across the cloth.

use crate::config::WindConfig;
use crate::float::Float;
use crate::mesh::Mesh;
use crate::params::WindParams;
use crate::vec::Vec2;

/// Wind field in physical units.
///
/// Each body sees `sin(time * speed + phase) * strength + strength` along
/// `direction`, with `phase = (x + y) * phase_scale`. The magnitude never
/// drops below zero, so wind only ever blows one way.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindField<F: Float> {
    pub direction: Vec2<F>,
    pub strength: F,
    pub speed: F,
    pub phase_scale: F,
}

impl<F: Float> WindField<F> {
    pub fn new(angle: F, strength: F, speed: F, phase_scale: F) -> Self {
        WindField {
            direction: Vec2::from_angle(angle),
            strength,
            speed,
            phase_scale,
        }
    }

    /// Convert slider-unit parameters into a field.
    pub fn from_params(params: &WindParams<F>, config: &WindConfig<F>) -> Self {
        Self::new(
            params.angle,
            params.strength * config.strength_scale,
            params.speed * config.speed_scale,
            config.phase_scale,
        )
    }

    /// Scalar magnitude at `position`, in `[0, 2 * strength]`.
    pub fn magnitude_at(&self, position: Vec2<F>, time: F) -> F {
        let phase = position.x * self.phase_scale + position.y * self.phase_scale;
        let wave = (time * self.speed + phase).sin() * self.strength + self.strength;
        wave.max(F::zero())
    }

    pub fn force_at(&self, position: Vec2<F>, time: F) -> Vec2<F> {
        self.direction.scale(self.magnitude_at(position, time))
    }

    /// Add the wind force to every free particle. Returns how many were pushed.
    pub fn apply(&self, mesh: &mut Mesh<F>, time: F) -> usize {
        let mut pushed = 0;
        for p in mesh.particles_mut().iter_mut().filter(|p| !p.pinned) {
            let force = self.force_at(p.pos, time);
            p.apply_force(force);
            pushed += 1;
        }
        pushed
    }
}
