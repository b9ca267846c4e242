//! Pointer state and the pointer-follow grab.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    /// Alternate (usually right) button; holding it suspends proximity cutting.
    Secondary,
    Auxiliary,
}

/// Last known pointer position and the button currently held, if any.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer<F: Float> {
    pub position: Vec2<F>,
    pub held: Option<PointerButton>,
}

impl<F: Float> Pointer<F> {
    pub fn alternate_held(&self) -> bool {
        self.held == Some(PointerButton::Secondary)
    }
}

/// A free particle being dragged toward the pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grab<F: Float> {
    pub particle: usize,
    pub target: Vec2<F>,
    pub stiffness: F,
}

impl<F: Float> Grab<F> {
    /// Move the grabbed particle `stiffness` of the way to the target.
    pub fn solve(&self, particles: &mut [Particle<F>]) {
        if let Some(p) = particles.get_mut(self.particle) {
            if !p.pinned {
                p.pos = p.pos + (self.target - p.pos).scale(self.stiffness);
            }
        }
    }
}

/// Index of the free particle nearest to `point` within `radius`.
pub fn nearest_free<F: Float>(particles: &[Particle<F>], point: Vec2<F>, radius: F) -> Option<usize> {
    let mut best: Option<(usize, F)> = None;
    for (i, p) in particles.iter().enumerate() {
        if p.pinned {
            continue;
        }
        let d2 = p.pos.distance_sq(point);
        if d2 > radius * radius {
            continue;
        }
        if best.map_or(true, |(_, b)| d2 < b) {
            best = Some((i, d2));
        }
    }
    best.map(|(i, _)| i)
}

/// The default pointer interaction: press near a particle to drag it.
///
/// Disabled while a new mesh is being drawn so the two gestures never
/// compete for the same press.
#[derive(Clone, Debug)]
pub struct PointerFollow<F: Float> {
    enabled: bool,
    radius: F,
    stiffness: F,
    grab: Option<Grab<F>>,
}

impl<F: Float> PointerFollow<F> {
    pub fn new(radius: F, stiffness: F) -> Self {
        PointerFollow { enabled: true, radius, stiffness, grab: None }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable and drop any particle being held.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.grab = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Grab the nearest free particle under `position`. Returns whether one was taken.
    pub fn press(&mut self, particles: &[Particle<F>], position: Vec2<F>) -> bool {
        if !self.enabled {
            return false;
        }
        self.grab = nearest_free(particles, position, self.radius).map(|particle| Grab {
            particle,
            target: position,
            stiffness: self.stiffness,
        });
        self.grab.is_some()
    }

    pub fn drag(&mut self, position: Vec2<F>) {
        if let Some(grab) = self.grab.as_mut() {
            grab.target = position;
        }
    }

    pub fn release(&mut self) {
        self.grab = None;
    }

    pub fn grab(&self) -> Option<&Grab<F>> {
        self.grab.as_ref()
    }
}
