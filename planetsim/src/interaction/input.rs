//! Unified input events
//!
//! Mouse and touch sources both normalize into [`PointerEvent`]. Coordinates
//! are surface-relative: origin at the top-left corner, y pointing down, in
//! the same units as the simulation.

use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(NVec2),
    Move(NVec2),
    Up,
    /// Pointer left the surface; ends a drag like `Up`
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A touch event with every touch point currently on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<NVec2>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: Vec<NVec2>) -> Self {
        Self { phase, touches }
    }

    /// Single-touch normalization: only the first touch point is used.
    /// Start/move without any touch point yield nothing.
    pub fn to_pointer(&self) -> Option<PointerEvent> {
        match self.phase {
            TouchPhase::Start => self.touches.first().map(|p| PointerEvent::Down(*p)),
            TouchPhase::Move => self.touches.first().map(|p| PointerEvent::Move(*p)),
            TouchPhase::End | TouchPhase::Cancel => Some(PointerEvent::Up),
        }
    }
}

/// Follows the first finger down and drops every other finger until it lifts
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    active: Option<u64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<u64> {
        self.active
    }

    /// Feed one per-finger report; returns the single-touch event to forward, if any
    pub fn track(&mut self, id: u64, phase: TouchPhase, position: NVec2) -> Option<TouchEvent> {
        match (self.active, phase) {
            (None, TouchPhase::Start) => {
                self.active = Some(id);
                Some(TouchEvent::new(phase, vec![position]))
            }
            (Some(a), TouchPhase::Move) if a == id => Some(TouchEvent::new(phase, vec![position])),
            (Some(a), TouchPhase::End | TouchPhase::Cancel) if a == id => {
                self.active = None;
                Some(TouchEvent::new(phase, vec![]))
            }
            _ => None,
        }
    }
}

/// Drawable surface; its center is the simulation origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Half-width and half-height, used by the reflective boundary
    pub fn half_extents(&self) -> NVec2 {
        self.center()
    }

    pub fn to_simulation(&self, p: NVec2) -> NVec2 {
        p - self.center()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(800.0, 560.0)
    }
}
