//! Elastic links between two particles of a mesh.

use crate::float::Float;
use crate::vec::Vec2;
use crate::particle::Particle;

/// Which grid relationship a link was built for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// Between horizontal neighbors in one row.
    Horizontal,
    /// Between vertical neighbors in one column.
    Vertical,
    /// Across the diagonal of a grid cell.
    Brace,
}

/// Distance link between particles `a` and `b`.
///
/// `rest_length` is fixed at creation; links are only ever removed, never
/// stretched to a new rest length.
#[derive(Clone, Debug)]
pub struct Link<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub kind: LinkKind,
}

impl<F: Float> Link<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F, kind: LinkKind) -> Self {
        Link { a, b, rest_length, stiffness, kind }
    }

    /// Current endpoint distance.
    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos)
    }

    pub fn midpoint(&self, particles: &[Particle<F>]) -> Vec2<F> {
        particles[self.a].pos.midpoint(particles[self.b].pos)
    }

    /// Both endpoint positions, `a` first.
    pub fn endpoints(&self, particles: &[Particle<F>]) -> (Vec2<F>, Vec2<F>) {
        (particles[self.a].pos, particles[self.b].pos)
    }

    /// One relaxation pass toward `rest_length`, split by inverse mass.
    pub fn solve(&self, particles: &mut [Particle<F>]) {
        let a_pos = particles[self.a].pos;
        let b_pos = particles[self.b].pos;
        let a_inv = particles[self.a].inv_mass;
        let b_inv = particles[self.b].inv_mass;

        let w_total = a_inv + b_inv;
        if w_total.is_near_zero(F::from_f32(1e-10)) {
            return; // both pinned
        }

        let delta = b_pos - a_pos;
        let dist = delta.length();
        if dist.is_near_zero(F::from_f32(1e-10)) {
            return; // degenerate
        }

        let error = dist - self.rest_length;
        let correction = delta.scale(error * self.stiffness / dist);

        if !particles[self.a].pinned {
            particles[self.a].pos = particles[self.a].pos + correction.scale(a_inv / w_total);
        }
        if !particles[self.b].pinned {
            particles[self.b].pos = particles[self.b].pos - correction.scale(b_inv / w_total);
        }
    }
}
