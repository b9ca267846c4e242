//! Constraint solver seam and the bundled Verlet implementation.

use crate::config::SolverConfig;
use crate::float::Float;
use crate::mesh::Mesh;
use crate::observer::StepObserver;
use crate::pointer::Grab;
use crate::probe::Probe;

/// Everything besides the mesh that the solver has to collide with or obey
/// during one step.
#[derive(Copy, Clone, Debug)]
pub struct Contacts<'a, F: Float> {
    /// The pointer probe; only a solid probe collides.
    pub probe: Option<&'a Probe<F>>,
    pub solid_probe: bool,
    /// Fraction of the probe velocity handed to particles it pushes.
    pub probe_carry: F,
    /// Particle held by the pointer-follow interaction.
    pub grab: Option<&'a Grab<F>>,
}

impl<'a, F: Float> Contacts<'a, F> {
    pub fn none() -> Self {
        Contacts { probe: None, solid_probe: false, probe_carry: F::zero(), grab: None }
    }

    /// The probe, if it is live and solid.
    pub fn solid(&self) -> Option<&'a Probe<F>> {
        self.probe.filter(|_| self.solid_probe)
    }
}

/// Integrates a mesh forward in time.
///
/// The cloth core only adds forces and removes links; stiffness, damping and
/// collision response are entirely up to the implementation.
pub trait Solver<F: Float> {
    /// Advance `mesh` by `dt`, consuming forces accumulated since the last call.
    fn integrate<O: StepObserver>(
        &mut self,
        mesh: &mut Mesh<F>,
        contacts: &Contacts<'_, F>,
        dt: F,
        observer: &mut O,
    );
}

/// Position-based Verlet solver with iterative link relaxation.
#[derive(Clone, Debug, Default)]
pub struct VerletSolver<F: Float> {
    pub config: SolverConfig<F>,
}

impl<F: Float> VerletSolver<F> {
    pub fn new(config: SolverConfig<F>) -> Self {
        VerletSolver { config }
    }
}

impl<F: Float> Solver<F> for VerletSolver<F> {
    fn integrate<O: StepObserver>(
        &mut self,
        mesh: &mut Mesh<F>,
        contacts: &Contacts<'_, F>,
        dt: F,
        observer: &mut O,
    ) {
        if !(dt > F::zero()) {
            return;
        }
        let config = &self.config;
        let sub_steps = config.sub_steps.max(1);
        let sub_dt = dt / F::from_f32(sub_steps as f32);
        let solid = contacts.solid();
        let (particles, links) = mesh.split_mut();

        for sub in 0..sub_steps {
            for p in particles.iter_mut() {
                p.apply_acceleration(config.gravity);
            }

            for p in particles.iter_mut() {
                p.integrate(sub_dt, config.damping);
            }
            observer.on_integrate();

            // The probe's motion is handed over once per step.
            if let (0, Some(probe)) = (sub, solid) {
                probe.push_particles(particles, contacts.probe_carry);
            }

            for i in 0..config.iterations {
                for link in links.iter() {
                    link.solve(particles);
                }
                if let Some(grab) = contacts.grab {
                    grab.solve(particles);
                }
                if let Some(probe) = solid {
                    probe.push_particles(particles, F::zero());
                }
                observer.on_constraint_iteration(i);
            }
        }
    }
}
