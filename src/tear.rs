//! Per-step link removal: proximity cutting and strain tearing.

use crate::float::Float;
use crate::mesh::Mesh;
use crate::observer::{RemovalCause, StepObserver};
use crate::strain::breaking_distance;
use crate::vec::Vec2;

/// Pointer cutter for one step: links with a midpoint inside the circle go.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cutter<F: Float> {
    pub position: Vec2<F>,
    pub radius: F,
}

/// Inputs of one evaluation pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TearContext<F: Float> {
    /// `None` whenever proximity cutting is disabled this step.
    pub cutter: Option<Cutter<F>>,
    pub tear_multiplier: F,
}

/// Proximity cutting only runs with no probe, outside draw mode, and while
/// the alternate pointer button is up.
pub fn cutting_enabled(probe_active: bool, drawing: bool, alternate_held: bool) -> bool {
    !probe_active && !drawing && !alternate_held
}

/// Links removed by one evaluation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TearReport {
    pub cut: usize,
    pub torn: usize,
}

impl TearReport {
    pub fn total(&self) -> usize {
        self.cut + self.torn
    }
}

fn should_cut<F: Float>(cutter: &Cutter<F>, midpoint: Vec2<F>) -> bool {
    cutter.position.distance(midpoint) < cutter.radius
}

/// Run the cut and tear checks over every link of `mesh`.
///
/// Links are visited from the back so `swap_remove` only ever pulls in a link
/// that was already checked. A cut link skips the strain check. A multiplier
/// at or below 1 tears every link stretched past its rest length.
pub fn evaluate<F: Float, O: StepObserver>(
    mesh: &mut Mesh<F>,
    ctx: &TearContext<F>,
    observer: &mut O,
) -> TearReport {
    let multiplier = ctx.tear_multiplier.max(F::one());
    let mut report = TearReport::default();

    for i in (0..mesh.link_count()).rev() {
        let (cut, torn) = {
            let link = &mesh.links()[i];
            let particles = mesh.particles();
            let cut = ctx
                .cutter
                .as_ref()
                .is_some_and(|c| should_cut(c, link.midpoint(particles)));
            let torn = !cut
                && link.length(particles) > breaking_distance(link.rest_length, multiplier);
            (cut, torn)
        };

        if cut {
            mesh.remove_link(i);
            report.cut += 1;
            observer.on_link_removed(RemovalCause::Cut);
        } else if torn {
            mesh.remove_link(i);
            report.torn += 1;
            observer.on_link_removed(RemovalCause::Torn);
        }
    }

    if report.total() > 0 {
        log::trace!("removed {} links ({} cut, {} torn)", report.total(), report.cut, report.torn);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutting_gate() {
        assert!(cutting_enabled(false, false, false));
        assert!(!cutting_enabled(true, false, false));
        assert!(!cutting_enabled(false, true, false));
        assert!(!cutting_enabled(false, false, true));
    }

    #[test]
    fn report_total() {
        let report = TearReport { cut: 2, torn: 3 };
        assert_eq!(report.total(), 5);
    }
}
