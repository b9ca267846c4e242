//! Step observer trait for monitoring simulation progress.

/// Why a link left the mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemovalCause {
    /// Its midpoint came within the cut radius of the pointer.
    Cut,
    /// It stretched past its breaking distance.
    Torn,
}

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or sound effects on tearing). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each link relaxation iteration.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after wind forces were added to `_particles` free particles.
    fn on_wind_applied(&mut self, _particles: usize) {}

    /// Called once for every link removed from the mesh.
    fn on_link_removed(&mut self, _cause: RemovalCause) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
