use approx::assert_relative_eq;
use tearcloth::{
    ClothConfig, ClothError, ClothSession, Command, Contacts, DrawState, Float, Mesh,
    NoOpStepObserver, Parameter, Params, PointerButton, RemovalCause, Segment, SessionConfig,
    Solver, SolverConfig, StepObserver, Vec2, VerletSolver,
};

/// Leaves the mesh exactly where it is, so removal rules can be checked
/// against known geometry.
struct FrozenSolver;

impl<F: Float> Solver<F> for FrozenSolver {
    fn integrate<O: StepObserver>(
        &mut self,
        _mesh: &mut Mesh<F>,
        _contacts: &Contacts<'_, F>,
        _dt: F,
        _observer: &mut O,
    ) {
    }
}

#[derive(Default)]
struct Recorder {
    integrations: usize,
    iterations: usize,
    wind_calls: usize,
    cut: usize,
    torn: usize,
    steps: usize,
}

impl StepObserver for Recorder {
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }

    fn on_constraint_iteration(&mut self, _iteration: usize) {
        self.iterations += 1;
    }

    fn on_wind_applied(&mut self, _particles: usize) {
        self.wind_calls += 1;
    }

    fn on_link_removed(&mut self, cause: RemovalCause) {
        match cause {
            RemovalCause::Cut => self.cut += 1,
            RemovalCause::Torn => self.torn += 1,
        }
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}

const DT: f64 = 1.0 / 60.0;

fn viewport() -> Vec2<f64> {
    Vec2::new(1000.0, 800.0)
}

fn frozen() -> ClothSession<f64, FrozenSolver> {
    ClothSession::new(viewport(), SessionConfig::new(), Params::new(), FrozenSolver).unwrap()
}

fn weightless(params: Params<f64>) -> ClothSession<f64> {
    let solver = VerletSolver::new(SolverConfig::new().with_gravity(Vec2::zero()));
    ClothSession::new(viewport(), SessionConfig::new(), params, solver).unwrap()
}

/// Midpoint of the horizontal link from (col, row) to (col + 1, row).
fn horizontal_midpoint<S: Solver<f64>>(session: &ClothSession<f64, S>, col: usize, row: usize) -> Vec2<f64> {
    let mesh = session.mesh();
    mesh.position_at(col, row).midpoint(mesh.position_at(col + 1, row))
}

fn has_link<S: Solver<f64>>(session: &ClothSession<f64, S>, a: usize, b: usize) -> bool {
    session.mesh().links().iter().any(|l| l.a == a && l.b == b)
}

#[test]
fn hovering_pointer_cuts_nearby_links() {
    let mut session = frozen();
    let target = horizontal_midpoint(&session, 9, 7);
    let (a, b) = (session.mesh().index(9, 7), session.mesh().index(10, 7));
    let before = session.mesh().link_count();

    session.handle(Command::PointerMove { position: target }).unwrap();
    let report = session.step(DT, &mut NoOpStepObserver);

    assert!(report.removed.cut >= 1);
    assert_eq!(report.removed.torn, 0);
    assert!(!has_link(&session, a, b));
    assert_eq!(session.mesh().link_count(), before - report.removed.cut);
}

#[test]
fn cutting_is_suspended_by_probe_draw_mode_and_alternate_button() {
    let down = |button| Command::PointerDown { position: Vec2::zero(), button };
    let cases: [(&str, Vec<Command<f64>>); 4] = [
        ("probe", vec![down(PointerButton::Primary), Command::PointerMove { position: Vec2::zero() }]),
        ("draw mode", vec![Command::SetDrawMode(true), Command::PointerMove { position: Vec2::zero() }]),
        ("alternate", vec![down(PointerButton::Secondary), Command::PointerMove { position: Vec2::zero() }]),
        ("left", vec![Command::PointerMove { position: Vec2::zero() }, Command::PointerLeave]),
    ];

    for (name, commands) in cases {
        let mut session = frozen();
        let target = horizontal_midpoint(&session, 9, 7);
        let before = session.mesh().link_count();

        for command in commands {
            // Every move lands on the link midpoint.
            let command = match command {
                Command::PointerMove { .. } => Command::PointerMove { position: target },
                other => other,
            };
            session.handle(command).unwrap();
        }

        let report = session.step(DT, &mut NoOpStepObserver);
        assert_eq!(report.removed.cut, 0, "{}", name);
        assert_eq!(session.mesh().link_count(), before, "{}", name);
    }
}

#[test]
fn drawn_segment_replaces_the_mesh() {
    let mut session = frozen();
    session.handle(Command::SetDrawMode(true)).unwrap();
    assert!(session.draw().is_drawing());
    assert!(!session.follow().is_enabled());

    session
        .handle(Command::PointerDown { position: Vec2::new(0.0, 0.0), button: PointerButton::Primary })
        .unwrap();
    // Drawing never spawns a probe.
    assert!(!session.probe().is_active());

    session.handle(Command::PointerMove { position: Vec2::new(100.0, 0.0) }).unwrap();
    let guide = session.frame().guide.expect("guide while dragging");
    assert_eq!(guide.segment, Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)));

    session.handle(Command::PointerUp { position: Vec2::new(250.0, 0.0) }).unwrap();
    assert_eq!(*session.draw().state(), DrawState::Idle);
    assert!(session.follow().is_enabled());
    assert_eq!(session.mesh().cols(), 10);
    assert_eq!(session.mesh().rows(), 10);
    assert_eq!(session.mesh().layout().anchor, Vec2::new(125.0, 0.0));
    assert_eq!(session.placement(), Some(Segment::new(Vec2::new(0.0, 0.0), Vec2::new(250.0, 0.0))));
    assert!(session.frame().guide.is_none());
}

#[test]
fn cancelled_draw_keeps_the_mesh() {
    let mut session = frozen();
    let before = session.mesh().positions();

    session.handle(Command::SetDrawMode(true)).unwrap();
    session
        .handle(Command::PointerDown { position: Vec2::new(0.0, 0.0), button: PointerButton::Primary })
        .unwrap();
    session.handle(Command::SetDrawMode(false)).unwrap();
    session.handle(Command::PointerUp { position: Vec2::new(400.0, 0.0) }).unwrap();

    assert!(!session.draw().is_drawing());
    assert!(session.follow().is_enabled());
    assert_eq!(session.placement(), None);
    assert_eq!(session.mesh().positions(), before);
}

#[test]
fn regenerate_reset_and_density_rebuild() {
    let mut session = frozen();
    let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(250.0, 0.0));
    session.handle(Command::SetDrawMode(true)).unwrap();
    session
        .handle(Command::PointerDown { position: seg.start, button: PointerButton::Primary })
        .unwrap();
    session.handle(Command::PointerUp { position: seg.end }).unwrap();

    // Damage the mesh, then regenerate it at the same placement.
    session.handle(Command::PointerMove { position: horizontal_midpoint(&session, 4, 4) }).unwrap();
    session.step(DT, &mut NoOpStepObserver);
    assert!(session.mesh().link_count() < Mesh::<f64>::expected_link_count(10, 10));
    session.handle(Command::PointerLeave).unwrap();

    session.handle(Command::Regenerate).unwrap();
    assert_eq!(session.placement(), Some(seg));
    assert_eq!(session.mesh().link_count(), Mesh::<f64>::expected_link_count(10, 10));

    // Density rebuilds at the drawn placement: spacing 20 over 250 gives 12.
    session.handle(Command::Set(Parameter::Density(40.0))).unwrap();
    assert_eq!(session.mesh().spacing(), 20.0);
    assert_eq!(session.mesh().cols(), 12);

    session.handle(Command::Reset).unwrap();
    assert_eq!(session.placement(), None);
    assert_eq!(session.mesh().cols(), 25);
    assert_eq!(session.mesh().rows(), 18);
}

#[test]
fn non_finite_parameters_are_ignored() {
    let mut session = frozen();
    let before = session.mesh().positions();
    session.handle(Command::Set(Parameter::Density(f64::NAN))).unwrap();
    session.handle(Command::Set(Parameter::TearMultiplier(f64::INFINITY))).unwrap();
    assert_eq!(session.params().density, 35.0);
    assert_eq!(session.params().tear_multiplier, 3.0);
    assert_eq!(session.mesh().positions(), before);
}

#[test]
fn resize_moves_only_future_meshes() {
    let mut session = frozen();
    let before = session.mesh().positions();
    session.handle(Command::Resize { width: 2000.0, height: 1000.0 }).unwrap();
    assert_eq!(session.viewport(), Vec2::new(2000.0, 1000.0));
    assert_eq!(session.mesh().positions(), before);

    session.handle(Command::Reset).unwrap();
    let mesh = session.mesh();
    let center_x = (mesh.position_at(0, 0).x + mesh.position_at(mesh.cols() - 1, 0).x) / 2.0;
    assert_relative_eq!(center_x, 1000.0, epsilon = 1e-9);
}

#[test]
fn solid_probe_pushes_particles_out() {
    let mut session = weightless(Params::new().with_solid_probe(true));
    let center = session.mesh().position_at(10, 7);
    session
        .handle(Command::PointerDown { position: center, button: PointerButton::Primary })
        .unwrap();
    session.step(DT, &mut NoOpStepObserver);

    let probe = *session.probe().get().expect("probe while held");
    for p in session.mesh().particles().iter().filter(|p| !p.pinned) {
        assert!(
            p.pos.distance(probe.position) >= probe.radius - 1e-3,
            "particle at {:?} inside probe",
            p.pos
        );
    }

    session.handle(Command::PointerUp { position: center }).unwrap();
    assert!(!session.probe().is_active());
}

#[test]
fn ghost_probe_leaves_cloth_alone() {
    let mut session = weightless(Params::new());
    let before = session.mesh().positions();
    let center = horizontal_midpoint(&session, 9, 7);
    session
        .handle(Command::PointerDown { position: center, button: PointerButton::Primary })
        .unwrap();
    session.handle(Command::PointerMove { position: center + Vec2::new(5.0, 0.0) }).unwrap();
    let report = session.step(DT, &mut NoOpStepObserver);

    assert_eq!(report.removed.total(), 0);
    for (a, b) in before.iter().zip(session.mesh().positions()) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
    }
}

#[test]
fn dragging_a_particle_far_away_tears_it_loose() {
    let mut session = ClothSession::<f64>::with_defaults(viewport()).unwrap();
    let rows = session.mesh().rows();
    let corner = session.mesh().position_at(0, rows - 1);
    session
        .handle(Command::PointerDown { position: corner, button: PointerButton::Primary })
        .unwrap();
    assert!(session.follow().grab().is_some());

    session.handle(Command::PointerMove { position: corner + Vec2::new(0.0, 2000.0) }).unwrap();
    let mut torn = 0;
    for _ in 0..3 {
        let report = session.step(DT, &mut NoOpStepObserver);
        assert_eq!(report.removed.cut, 0);
        torn += report.removed.torn;
    }
    assert!(torn > 0);

    session.handle(Command::PointerUp { position: corner }).unwrap();
    assert!(session.follow().grab().is_none());
}

#[test]
fn pinned_row_holds_in_the_wind() {
    let mut session = ClothSession::<f64>::with_defaults(viewport()).unwrap();
    session.handle(Command::Set(Parameter::WindEnabled(true))).unwrap();
    let cols = session.mesh().cols();
    let top: Vec<_> = (0..cols).map(|c| session.mesh().position_at(c, 0)).collect();

    let mut pushed = 0;
    for _ in 0..60 {
        pushed = session.step(DT, &mut NoOpStepObserver).wind_pushed;
    }
    assert_eq!(pushed, session.mesh().particle_count() - cols);
    for (col, expected) in top.iter().enumerate() {
        assert_eq!(session.mesh().position_at(col, 0), *expected);
    }
}

#[test]
fn replace_mesh_hands_back_the_old_one() {
    let mut session = frozen();
    let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(250.0, 0.0));
    let mesh = Mesh::generate(35.0, Some(seg), viewport(), &ClothConfig::new()).unwrap();

    let old = session.replace_mesh(mesh);
    assert_eq!((old.cols(), old.rows()), (20, 15));
    assert_eq!((session.mesh().cols(), session.mesh().rows()), (10, 10));
    assert!(session.follow().grab().is_none());
}

#[test]
fn observer_sees_every_phase() {
    let mut session = ClothSession::<f64>::with_defaults(viewport()).unwrap();
    session.handle(Command::Set(Parameter::WindEnabled(true))).unwrap();
    let target = horizontal_midpoint(&session, 9, 7);
    session.handle(Command::PointerMove { position: target }).unwrap();

    let mut recorder = Recorder::default();
    let report = session.step(DT, &mut recorder);

    let config = &session.solver().config;
    assert_eq!(recorder.integrations, config.sub_steps);
    assert_eq!(recorder.iterations, config.sub_steps * config.iterations);
    assert_eq!(recorder.wind_calls, 1);
    assert_eq!(recorder.steps, 1);
    assert_eq!(recorder.cut, report.removed.cut);
    assert_eq!(recorder.torn, report.removed.torn);
    assert!(recorder.cut > 0);
}

#[test]
fn time_only_advances_on_positive_dt() {
    let mut session = frozen();
    session.step(0.5, &mut NoOpStepObserver);
    session.step(0.0, &mut NoOpStepObserver);
    session.step(-1.0, &mut NoOpStepObserver);
    assert_eq!(session.time(), 0.5);
}

#[test]
fn frame_describes_every_link_and_the_probe() {
    let mut session = frozen();
    let frame = session.frame();
    assert_eq!(frame.links.len(), session.mesh().link_count());
    assert_eq!(frame.level_counts(), (frame.links.len(), 0, 0));
    assert!(frame.probe.is_none());

    let at = Vec2::new(40.0, 40.0);
    session.handle(Command::PointerDown { position: at, button: PointerButton::Primary }).unwrap();
    let probe = session.frame().probe.expect("probe shape");
    assert_eq!(probe.center, at);
    assert_eq!(probe.radius, 30.0);
    assert!(!probe.solid);
}

#[test]
fn frame_reads_tear_multiplier_before_the_step_does() {
    let mut session = frozen();
    // Stretch one vertical link to 2.5x rest: safe at 3.0, beyond a 2.0 breaking distance.
    let index = session.mesh().index(5, 14);
    let above = session.mesh().position_at(5, 13);
    let mut mesh = session.mesh().clone();
    mesh.particles_mut()[index].pos = above + Vec2::new(0.0, 62.5);
    session.replace_mesh(mesh);
    assert_eq!(session.frame().level_counts().2, 0);

    session.handle(Command::Set(Parameter::TearMultiplier(2.0))).unwrap();
    assert!(session.frame().level_counts().2 > 0);
    let report = session.step(DT, &mut NoOpStepObserver);
    assert!(report.removed.torn > 0);
}

fn draw_segment<S: Solver<f64>>(
    session: &mut ClothSession<f64, S>,
    start: Vec2<f64>,
    end: Vec2<f64>,
) -> Result<(), ClothError> {
    session.handle(Command::SetDrawMode(true))?;
    session.handle(Command::PointerDown { position: start, button: PointerButton::Primary })?;
    session.handle(Command::PointerUp { position: end })
}

#[test]
fn rejected_density_leaves_params_and_mesh_alone() {
    let mut session = frozen();
    session.handle(Command::Set(Parameter::Density(20.0))).unwrap();
    let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(12000.0, 0.0));
    draw_segment(&mut session, seg.start, seg.end).unwrap();
    assert_eq!(session.mesh().cols(), 300);

    // Spacing 10 over 12000 would need a 1200-wide grid.
    let err = session.handle(Command::Set(Parameter::Density(50.0))).unwrap_err();
    assert_eq!(err, ClothError::InvalidGridDimensions { cols: 1200, rows: 1200 });
    assert_eq!(session.params().density, 20.0);
    assert_eq!(session.mesh().spacing(), 40.0);
    assert_eq!(session.mesh().cols(), 300);
    assert_eq!(session.placement(), Some(seg));

    session.handle(Command::Regenerate).unwrap();
    assert_eq!(session.mesh().spacing(), 40.0);
    assert_eq!(session.mesh().cols(), 300);
}

#[test]
fn failed_draw_still_finishes_the_pointer_gesture() {
    let mut session = frozen();
    let grabbed = session.mesh().position_at(5, 5);
    session
        .handle(Command::PointerDown { position: grabbed, button: PointerButton::Primary })
        .unwrap();
    assert!(session.probe().is_active());
    assert!(session.follow().grab().is_some());
    let before = session.mesh().positions();

    let err = draw_segment(&mut session, Vec2::new(0.0, 0.0), Vec2::new(1.0e7, 0.0)).unwrap_err();
    assert!(matches!(err, ClothError::InvalidGridDimensions { .. }));

    assert!(!session.probe().is_active());
    assert!(session.follow().grab().is_none());
    assert!(session.follow().is_enabled());
    assert_eq!(*session.draw().state(), DrawState::Idle);
    assert_eq!(session.placement(), None);
    assert_eq!(session.params().density, 35.0);
    assert_eq!(session.mesh().positions(), before);

    // With the probe gone, hovering cuts again.
    let target = horizontal_midpoint(&session, 9, 7);
    session.handle(Command::PointerMove { position: target }).unwrap();
    assert!(session.step(DT, &mut NoOpStepObserver).removed.cut > 0);
}

#[test]
fn completed_draw_ends_a_probe_started_before_draw_mode() {
    let mut session = frozen();
    session
        .handle(Command::PointerDown { position: Vec2::new(40.0, 40.0), button: PointerButton::Primary })
        .unwrap();
    draw_segment(&mut session, Vec2::new(0.0, 0.0), Vec2::new(250.0, 0.0)).unwrap();

    assert!(!session.probe().is_active());
    assert!(session.follow().is_enabled());
    assert_eq!(session.mesh().cols(), 10);
}
