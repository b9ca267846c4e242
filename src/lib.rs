//! Tearable Verlet cloth for interactive toys and games.
//!
//! `tearcloth` builds a pinned, cross-braced grid of particles and keeps it
//! interactive: links tear when stretched too far, the pointer snips links it
//! hovers over, a pointer probe pushes the cloth around, and a traveling-wave
//! wind blows through it. Each link is classified by strain so a renderer can
//! color it as it nears its breaking point.
//!
//! # Features
//!
//! - **Mesh generation**: default footprint or sized, placed and rotated by a drawn segment
//! - **Tearing & cutting**: strain-based breaking plus proximity snipping
//! - **Wind**: oscillating, spatially phased force field
//! - **Probe**: solid (pushing) or ghost pointer obstacle
//! - **Draw mode**: drag a segment to place the next mesh
//! - **Pluggable solver**: bring your own through the `Solver` trait, or use `VerletSolver`
//! - **Observable**: monitor steps and removals via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use tearcloth::{ClothSession, Command, NoOpStepObserver, PointerButton, Vec2};
//!
//! let mut session = ClothSession::<f32>::with_defaults(Vec2::new(1024.0, 768.0)).unwrap();
//! session
//!     .handle(Command::PointerDown { position: Vec2::new(500.0, 300.0), button: PointerButton::Primary })
//!     .unwrap();
//! session.step(1.0 / 60.0, &mut NoOpStepObserver);
//! let frame = session.frame();
//! assert_eq!(frame.links.len(), session.mesh().link_count());
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod link;
pub mod mesh;
pub mod wind;
pub mod probe;
pub mod tear;
pub mod strain;
pub mod draw;
pub mod pointer;
pub mod params;
pub mod solver;
pub mod session;
pub mod render;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use particle::Particle;
pub use link::{Link, LinkKind};
pub use mesh::{Layout, Mesh, Segment};
pub use wind::WindField;
pub use probe::{Probe, ProbeSlot};
pub use tear::{Cutter, TearContext, TearReport};
pub use strain::StrainLevel;
pub use draw::{DrawEvent, DrawMachine, DrawState};
pub use pointer::{Pointer, PointerButton, PointerFollow};
pub use params::{Parameter, Params, WindParams};
pub use solver::{Contacts, Solver, VerletSolver};
pub use session::{ClothSession, Command, StepReport};
pub use render::{Color, Palette, RenderFrame};
pub use observer::{NoOpStepObserver, RemovalCause, StepObserver};
pub use config::{ClothConfig, InteractionConfig, SessionConfig, SolverConfig, WindConfig};
pub use error::ClothError;
