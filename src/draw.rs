//! Draw-mode state machine: define a new mesh by dragging a segment.

use crate::float::Float;
use crate::mesh::Segment;
use crate::vec::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawState<F: Float> {
    /// Probe, cutting and pointer-follow are live.
    Idle,
    /// A drag defines the next mesh; `current` only feeds the guide line.
    Drawing {
        start: Option<Vec2<F>>,
        current: Option<Vec2<F>>,
    },
}

/// What a draw-mode input changed, for the session to act on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawEvent<F: Float> {
    /// Nothing to do.
    None,
    /// Entered draw mode; pointer-follow must be disabled.
    Started,
    /// Left draw mode without a segment; pointer-follow comes back.
    Cancelled,
    /// A drag finished; build a mesh for the segment. Draw mode is over.
    Completed(Segment<F>),
}

#[derive(Clone, Debug)]
pub struct DrawMachine<F: Float> {
    state: DrawState<F>,
}

impl<F: Float> DrawMachine<F> {
    pub fn new() -> Self {
        DrawMachine { state: DrawState::Idle }
    }

    pub fn state(&self) -> &DrawState<F> {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Pointer-follow is allowed exactly when no drawing is in progress.
    pub fn follow_allowed(&self) -> bool {
        !self.is_drawing()
    }

    /// Start and current points of the guide, once both exist.
    pub fn guide(&self) -> Option<Segment<F>> {
        match self.state {
            DrawState::Drawing { start: Some(start), current: Some(current) } => {
                Some(Segment::new(start, current))
            }
            _ => None,
        }
    }

    /// Toggle draw mode on or off.
    pub fn set_draw_mode(&mut self, on: bool) -> DrawEvent<F> {
        match (on, self.is_drawing()) {
            (true, false) => {
                self.state = DrawState::Drawing { start: None, current: None };
                log::debug!("draw mode on");
                DrawEvent::Started
            }
            (false, true) => {
                self.state = DrawState::Idle;
                log::debug!("draw mode cancelled");
                DrawEvent::Cancelled
            }
            _ => DrawEvent::None,
        }
    }

    pub fn pointer_down(&mut self, position: Vec2<F>) -> DrawEvent<F> {
        if let DrawState::Drawing { start, current } = &mut self.state {
            *start = Some(position);
            *current = None;
        }
        DrawEvent::None
    }

    pub fn pointer_move(&mut self, position: Vec2<F>) -> DrawEvent<F> {
        if let DrawState::Drawing { start: Some(_), current } = &mut self.state {
            *current = Some(position);
        }
        DrawEvent::None
    }

    /// Finish the drag. Only a drag that had a start point completes.
    pub fn pointer_up(&mut self, position: Vec2<F>) -> DrawEvent<F> {
        match self.state {
            DrawState::Drawing { start: Some(start), .. } => {
                self.state = DrawState::Idle;
                log::debug!("draw mode completed");
                DrawEvent::Completed(Segment::new(start, position))
            }
            _ => DrawEvent::None,
        }
    }
}

impl<F: Float> Default for DrawMachine<F> {
    fn default() -> Self {
        Self::new()
    }
}
