//! Pointer-driven circular obstacle.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// A circular obstacle that follows the pointer while a button is held.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Probe<F: Float> {
    pub position: Vec2<F>,
    /// Displacement of the last solid move; zero for ghost moves.
    pub velocity: Vec2<F>,
    pub radius: F,
}

impl<F: Float> Probe<F> {
    pub fn new(position: Vec2<F>, radius: F) -> Self {
        Probe { position, velocity: Vec2::zero(), radius }
    }

    pub fn contains(&self, point: Vec2<F>) -> bool {
        self.position.distance_sq(point) < self.radius * self.radius
    }

    /// Project free particles inside the circle onto its rim and hand them
    /// `carry` times the probe velocity. Returns how many were pushed.
    pub fn push_particles(&self, particles: &mut [Particle<F>], carry: F) -> usize {
        let mut pushed = 0;
        let kick = self.velocity.scale(carry);
        for p in particles.iter_mut().filter(|p| !p.pinned) {
            let offset = p.pos - self.position;
            let dist_sq = offset.length_sq();
            if dist_sq >= self.radius * self.radius {
                continue;
            }
            let dist = dist_sq.sqrt();
            let normal = if dist.is_near_zero(F::from_f32(1e-6)) {
                // Dead center: push along the probe's motion, or straight up.
                let dir = self.velocity.normalize();
                if dir == Vec2::zero() { Vec2::new(F::zero(), -F::one()) } else { dir }
            } else {
                offset.scale(F::one() / dist)
            };
            p.pos = p.pos + normal.scale(self.radius - dist);
            p.set_velocity_raw(p.velocity_raw() + kick);
            pushed += 1;
        }
        pushed
    }
}

/// Holder for the single live probe.
///
/// `begin` creates the probe, `update` moves it, `end` destroys it. A probe
/// is never reused: every press creates a fresh one.
#[derive(Clone, Debug)]
pub struct ProbeSlot<F: Float> {
    probe: Option<Probe<F>>,
    radius: F,
}

impl<F: Float> ProbeSlot<F> {
    pub fn new(radius: F) -> Self {
        ProbeSlot { probe: None, radius }
    }

    /// Create the probe at `position`. Returns `false` if one is already live.
    pub fn begin(&mut self, position: Vec2<F>) -> bool {
        if self.probe.is_some() {
            return false;
        }
        self.probe = Some(Probe::new(position, self.radius));
        true
    }

    /// Move the probe to `target`.
    ///
    /// A solid probe first takes `target - current` as its velocity so the
    /// solver can push overlapping particles; a ghost probe only teleports.
    /// Without a live probe this is a no-op.
    pub fn update(&mut self, target: Vec2<F>, solid: bool) {
        if let Some(probe) = self.probe.as_mut() {
            probe.velocity = if solid { target - probe.position } else { Vec2::zero() };
            probe.position = target;
        }
    }

    /// Remove and return the probe.
    pub fn end(&mut self) -> Option<Probe<F>> {
        self.probe.take()
    }

    /// Forget the velocity once the solver has consumed it.
    pub fn settle(&mut self) {
        if let Some(probe) = self.probe.as_mut() {
            probe.velocity = Vec2::zero();
        }
    }

    pub fn get(&self) -> Option<&Probe<F>> {
        self.probe.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.probe.is_some()
    }

    pub fn radius(&self) -> F {
        self.radius
    }
}
