//! The interactive cloth session: one live mesh plus everything that acts on it.
//!
//! A host drives the session with three calls: [`ClothSession::handle`] for
//! every UI or pointer event, [`ClothSession::step`] once per simulation tick
//! and [`ClothSession::frame`] once per paint. Mesh replacement only happens
//! inside `handle`, so a step or frame never observes a half-built mesh.

use crate::config::SessionConfig;
use crate::draw::{DrawEvent, DrawMachine};
use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::{Mesh, Segment};
use crate::observer::StepObserver;
use crate::params::{Parameter, Params};
use crate::pointer::{Pointer, PointerButton, PointerFollow};
use crate::probe::ProbeSlot;
use crate::render::{DrawGuide, LinkSegment, ProbeShape, RenderFrame};
use crate::solver::{Contacts, Solver, VerletSolver};
use crate::strain::classify_link;
use crate::tear::{self, Cutter, TearContext, TearReport};
use crate::vec::Vec2;
use crate::wind::WindField;

/// Inbound UI and pointer events.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command<F: Float> {
    SetDrawMode(bool),
    PointerDown { position: Vec2<F>, button: PointerButton },
    PointerMove { position: Vec2<F> },
    PointerUp { position: Vec2<F> },
    /// The pointer left the surface; nothing is cut until it returns.
    PointerLeave,
    Set(Parameter<F>),
    /// Rebuild at the current placement (drawn segment or default).
    Regenerate,
    /// Rebuild at the default placement, forgetting any drawn segment.
    Reset,
    /// The drawing surface changed size. The live mesh stays where it is.
    Resize { width: F, height: F },
}

/// What one simulation step did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Free particles that received a wind force.
    pub wind_pushed: usize,
    pub removed: TearReport,
}

pub struct ClothSession<F: Float, S: Solver<F> = VerletSolver<F>> {
    config: SessionConfig<F>,
    params: Params<F>,
    solver: S,
    mesh: Mesh<F>,
    placement: Option<Segment<F>>,
    probe: ProbeSlot<F>,
    follow: PointerFollow<F>,
    draw: DrawMachine<F>,
    pointer: Option<Pointer<F>>,
    viewport: Vec2<F>,
    time: F,
}

impl<F: Float> ClothSession<F, VerletSolver<F>> {
    /// Session with default configuration, parameters and solver.
    pub fn with_defaults(viewport: Vec2<F>) -> Result<Self, ClothError> {
        Self::new(viewport, SessionConfig::new(), Params::new(), VerletSolver::default())
    }
}

impl<F: Float, S: Solver<F>> ClothSession<F, S> {
    /// Validate `config` and spawn the first mesh at the default placement.
    pub fn new(
        viewport: Vec2<F>,
        config: SessionConfig<F>,
        params: Params<F>,
        solver: S,
    ) -> Result<Self, ClothError> {
        config.validate()?;
        let mut params = params;
        params.density = params
            .density
            .clamp(config.cloth.density_min, config.cloth.density_max);
        let mesh = Mesh::generate(params.density, None, viewport, &config.cloth)?;
        let probe = ProbeSlot::new(config.interaction.probe_radius);
        let follow = PointerFollow::new(
            config.interaction.follow_radius,
            config.interaction.follow_stiffness,
        );
        Ok(ClothSession {
            config,
            params,
            solver,
            mesh,
            placement: None,
            probe,
            follow,
            draw: DrawMachine::new(),
            pointer: None,
            viewport,
            time: F::zero(),
        })
    }

    /// Apply one inbound event.
    ///
    /// Only commands that rebuild the mesh can fail. When they do, the live
    /// mesh and parameters are kept and the pointer gesture is still finished.
    pub fn handle(&mut self, command: Command<F>) -> Result<(), ClothError> {
        match command {
            Command::SetDrawMode(on) => {
                self.draw.set_draw_mode(on);
                self.sync_follow();
            }
            Command::PointerDown { position, button } => {
                self.pointer = Some(Pointer { position, held: Some(button) });
                if self.draw.is_drawing() {
                    self.draw.pointer_down(position);
                } else if button == PointerButton::Primary {
                    self.probe.begin(position);
                    self.follow.press(self.mesh.particles(), position);
                }
            }
            Command::PointerMove { position } => {
                let held = self.pointer.and_then(|p| p.held);
                self.pointer = Some(Pointer { position, held });
                self.draw.pointer_move(position);
                self.probe.update(position, self.params.solid_probe);
                self.follow.drag(position);
            }
            Command::PointerUp { position } => {
                self.pointer = Some(Pointer { position, held: None });
                self.probe.end();
                self.follow.release();
                if let DrawEvent::Completed(segment) = self.draw.pointer_up(position) {
                    self.sync_follow();
                    self.rebuild(Some(segment))?;
                }
            }
            Command::PointerLeave => self.pointer = None,
            Command::Set(param) => {
                let previous = self.params;
                if self.params.apply(param, &self.config.cloth) {
                    if let Parameter::Density(_) = param {
                        // A density the current placement cannot hold is not kept.
                        if let Err(err) = self.rebuild(self.placement) {
                            self.params = previous;
                            return Err(err);
                        }
                    }
                }
            }
            Command::Regenerate => self.rebuild(self.placement)?,
            Command::Reset => self.rebuild(None)?,
            Command::Resize { width, height } => self.viewport = Vec2::new(width, height),
        }
        Ok(())
    }

    /// Pointer-follow runs exactly when no drawing is in progress.
    fn sync_follow(&mut self) {
        if self.draw.follow_allowed() {
            self.follow.enable();
        } else {
            self.follow.disable();
        }
    }

    /// Build a mesh for `segment` (or the default placement) and swap it in.
    fn rebuild(&mut self, segment: Option<Segment<F>>) -> Result<(), ClothError> {
        let mesh = Mesh::generate(self.params.density, segment, self.viewport, &self.config.cloth)?;
        self.placement = segment;
        self.replace_mesh(mesh);
        Ok(())
    }

    /// Swap in `mesh` and hand back the previous one.
    ///
    /// A particle held by pointer-follow belongs to the old mesh, so the grab
    /// is dropped.
    pub fn replace_mesh(&mut self, mesh: Mesh<F>) -> Mesh<F> {
        self.follow.release();
        let old = core::mem::replace(&mut self.mesh, mesh);
        log::debug!(
            "replaced {}x{} mesh with {}x{}",
            old.cols(),
            old.rows(),
            self.mesh.cols(),
            self.mesh.rows()
        );
        old
    }

    /// One simulation tick: integrate, add wind for the next tick, then cut
    /// and tear.
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> StepReport {
        let mut report = StepReport::default();
        if dt > F::zero() {
            self.time = self.time + dt;
        }

        let contacts = Contacts {
            probe: self.probe.get(),
            solid_probe: self.params.solid_probe,
            probe_carry: self.config.interaction.probe_carry,
            grab: self.follow.grab(),
        };
        self.solver.integrate(&mut self.mesh, &contacts, dt, observer);
        self.probe.settle();

        let wind = self.params.wind;
        if wind.enabled {
            let field = WindField::from_params(&wind, &self.config.wind);
            report.wind_pushed = field.apply(&mut self.mesh, self.time);
            observer.on_wind_applied(report.wind_pushed);
        }

        let ctx = self.tear_context();
        report.removed = tear::evaluate(&mut self.mesh, &ctx, observer);
        observer.on_step_complete();
        report
    }

    fn tear_context(&self) -> TearContext<F> {
        let cutter = self.pointer.and_then(|pointer| {
            let enabled = tear::cutting_enabled(
                self.probe.is_active(),
                self.draw.is_drawing(),
                pointer.alternate_held(),
            );
            enabled.then_some(Cutter {
                position: pointer.position,
                radius: self.config.interaction.cut_radius,
            })
        });
        TearContext { cutter, tear_multiplier: self.params.tear_multiplier }
    }

    /// Describe the current state for painting.
    ///
    /// Reads the tear multiplier on its own; a change since the last step
    /// already shows here.
    pub fn frame(&self) -> RenderFrame<F> {
        let palette = &self.config.palette;
        let multiplier = self.params.tear_multiplier;
        let particles = self.mesh.particles();

        let links = self
            .mesh
            .links()
            .iter()
            .map(|link| {
                let (a, b) = link.endpoints(particles);
                let level = classify_link(link, particles, multiplier);
                LinkSegment { a, b, level, color: palette.link(level) }
            })
            .collect();

        let probe = self
            .probe
            .get()
            .map(|p| ProbeShape::new(p.position, p.radius, self.params.solid_probe, palette));

        let guide = self.draw.guide().map(|segment| DrawGuide::new(segment, palette));

        RenderFrame { guide, probe, links }
    }

    pub fn mesh(&self) -> &Mesh<F> {
        &self.mesh
    }

    pub fn params(&self) -> &Params<F> {
        &self.params
    }

    pub fn config(&self) -> &SessionConfig<F> {
        &self.config
    }

    pub fn probe(&self) -> &ProbeSlot<F> {
        &self.probe
    }

    pub fn draw(&self) -> &DrawMachine<F> {
        &self.draw
    }

    pub fn follow(&self) -> &PointerFollow<F> {
        &self.follow
    }

    pub fn pointer(&self) -> Option<&Pointer<F>> {
        self.pointer.as_ref()
    }

    pub fn placement(&self) -> Option<Segment<F>> {
        self.placement
    }

    pub fn viewport(&self) -> Vec2<F> {
        self.viewport
    }

    pub fn time(&self) -> F {
        self.time
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn solver_mut(&mut self) -> &mut S {
        &mut self.solver
    }
}
