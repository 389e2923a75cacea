//! Renderer seam between the run loop and whatever draws the frames
//!
//! A renderer only ever sees shared references to the simulation state, so it
//! cannot mutate bodies or trails. It may fail; the run loop logs the error
//! and keeps going.

use crate::error::Result;
use crate::simulation::states::Body;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub bodies: &'a [Body],
    pub running: bool,
    pub fps: u32,
    pub speed: f64,
    pub dragging: Option<usize>, // body under the pointer while paused
}

pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>) -> Result<()>;
}
