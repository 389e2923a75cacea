//! Drag-to-reposition state machine
//!
//! `Idle -> Dragging` on pointer-down over a body while paused,
//! `Dragging -> Dragging` on pointer-move (position only, trail cleared),
//! `Dragging -> Idle` on pointer-up, pointer-leave or when the run loop starts.

use super::input::{PointerEvent, Surface};
use crate::simulation::states::{System, NVec2};

/// Bodies can be grabbed within this multiple of their radius
pub const GRAB_MARGIN: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        index: usize,
        offset: NVec2, // pointer minus body position at grab time
    },
}

/// What a pointer event did to the bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored,
    Grabbed(usize),
    Moved(usize),
    Released(usize),
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self { state: DragState::Idle }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { index, .. } => Some(index),
            DragState::Idle => None,
        }
    }

    /// Topmost body under `p` (simulation space). Bodies are drawn in index
    /// order, so the search runs from the last index down.
    pub fn hit_test(sys: &System, p: NVec2) -> Option<usize> {
        sys.bodies
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| b.distance_to(&p) <= b.radius * GRAB_MARGIN)
            .map(|(i, _)| i)
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        surface: &Surface,
        sys: &mut System,
        running: bool,
    ) -> DragOutcome {
        match event {
            PointerEvent::Down(p) => self.pointer_down(surface.to_simulation(p), sys, running),
            PointerEvent::Move(p) => self.pointer_move(surface.to_simulation(p), sys, running),
            PointerEvent::Up | PointerEvent::Leave => self.release(),
        }
    }

    fn pointer_down(&mut self, p: NVec2, sys: &mut System, running: bool) -> DragOutcome {
        if running {
            return DragOutcome::Ignored;
        }
        let Some(index) = Self::hit_test(sys, p) else {
            return DragOutcome::Ignored;
        };
        let body = &mut sys.bodies[index];
        self.state = DragState::Dragging {
            index,
            offset: p - body.x,
        };
        body.trail.clear();
        DragOutcome::Grabbed(index)
    }

    fn pointer_move(&mut self, p: NVec2, sys: &mut System, running: bool) -> DragOutcome {
        if running {
            return DragOutcome::Ignored;
        }
        let DragState::Dragging { index, offset } = self.state else {
            return DragOutcome::Ignored;
        };
        match sys.bodies.get_mut(index) {
            Some(body) => {
                body.x = p - offset;
                body.trail.clear();
                DragOutcome::Moved(index)
            }
            None => {
                self.state = DragState::Idle;
                DragOutcome::Ignored
            }
        }
    }

    /// End any drag in progress
    pub fn release(&mut self) -> DragOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { index, .. } => DragOutcome::Released(index),
            DragState::Idle => DragOutcome::Ignored,
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}
