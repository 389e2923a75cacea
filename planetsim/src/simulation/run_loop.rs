//! Frame-driven run loop
//!
//! `Paused <-> Running`. While running, every frame the host grants calls
//! [`RunLoop::tick`] once: measure the wall-clock delta since the previous
//! tick, reject it if it is not plausible, otherwise scale it by the speed
//! control and integrate one step, then render and request the next frame.
//! While paused nothing is integrated and frames are only drawn on request
//! (resize, parameter change, drag).
//!
//! The loop owns the [`SimulationContext`]; input, control and command
//! events all go through it. It is inserted into Bevy as a `Resource`.

use bevy::prelude::Resource;
use log::{debug, error, info, warn};

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::interaction::drag::DragOutcome;
use crate::interaction::input::{PointerEvent, Surface, TouchEvent};
use crate::simulation::context::SimulationContext;
use crate::simulation::controls::{ControlEvent, ControlPanel};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::System;
use crate::visualization::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Paused,
    Running,
}

/// Handle of a requested frame; at most one is pending at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No frame was pending (paused, or already ticked this frame)
    NotScheduled,
    /// First tick after a baseline reset: timing recorded, nothing integrated
    Baseline,
    /// Physics skipped because the frame delta was rejected
    Skipped { elapsed: f64 },
    /// One step of `dt` (speed-scaled seconds) was integrated
    Advanced { dt: f64 },
}

/// Frames per second over windows of at least one second of timestamps
#[derive(Debug, Clone, Default)]
struct FpsCounter {
    frames: u32,
    window_start: Option<f64>,
    fps: u32,
}

impl FpsCounter {
    fn frame(&mut self, timestamp: f64) {
        self.frames += 1;
        let start = *self.window_start.get_or_insert(timestamp);
        let span = timestamp - start;
        if span > 1.0 {
            self.fps = (self.frames as f64 / span).round() as u32;
            debug!("FPS: {}", self.fps);
            self.frames = 0;
            self.window_start = Some(timestamp);
        }
    }

    fn restart(&mut self, timestamp: f64) {
        self.frames = 0;
        self.window_start = timestamp.is_finite().then_some(timestamp);
    }
}

#[derive(Resource)]
pub struct RunLoop {
    ctx: SimulationContext,
    state: RunState,
    last_timestamp: Option<f64>, // delta-time baseline, seconds
    pending_frame: Option<FrameRequest>,
    next_frame_id: u64,
    redraw_requested: bool,
    fps: FpsCounter,
}

impl RunLoop {
    pub fn new(ctx: SimulationContext) -> Self {
        Self {
            ctx,
            state: RunState::Paused,
            last_timestamp: None,
            pending_frame: None,
            next_frame_id: 0,
            redraw_requested: true,
            fps: FpsCounter::default(),
        }
    }

    pub fn from_config(cfg: &ScenarioConfig, surface: Surface) -> Result<Self> {
        let scenario = Scenario::build_scenario(cfg)?;
        Ok(Self::new(SimulationContext::new(scenario, surface)))
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn system(&self) -> &System {
        &self.ctx.scenario.system
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps
    }

    // =========================================================================================
    // Commands
    // =========================================================================================

    pub fn toggle(&mut self) -> RunState {
        match self.state {
            RunState::Paused => self.start(),
            RunState::Running => self.pause(),
        }
        self.state
    }

    /// Enter `Running`: ends any drag, resets the delta-time baseline and asks for a frame
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = RunState::Running;
        self.ctx.drag.release();
        self.last_timestamp = None;
        self.request_frame();
        info!("simulation running");
    }

    /// Enter `Paused`: cancels the pending frame
    pub fn pause(&mut self) {
        if let Some(FrameRequest(id)) = self.pending_frame.take() {
            debug!("cancelled frame {id}");
        }
        if self.is_running() {
            self.state = RunState::Paused;
            info!("simulation paused");
        }
    }

    /// Pause and restore the initial bodies and control values
    pub fn reset(&mut self) {
        self.pause();
        self.ctx.drag.release();
        self.ctx.scenario.reset();
        let scenario = &self.ctx.scenario;
        self.ctx.controls = ControlPanel::from_system(
            &scenario.system,
            scenario.initial_speed,
            &scenario.coupling,
        );
        self.last_timestamp = None;
        self.request_redraw();
        info!("simulation reset");
    }

    // =========================================================================================
    // Input and controls
    // =========================================================================================

    pub fn handle_pointer(&mut self, event: PointerEvent) -> DragOutcome {
        let running = self.is_running();
        let ctx = &mut self.ctx;
        let outcome = ctx
            .drag
            .handle(event, &ctx.surface, &mut ctx.scenario.system, running);
        if matches!(outcome, DragOutcome::Grabbed(_) | DragOutcome::Moved(_)) {
            self.request_redraw();
        }
        outcome
    }

    pub fn handle_touch(&mut self, event: &TouchEvent) -> DragOutcome {
        match event.to_pointer() {
            Some(pointer) => self.handle_pointer(pointer),
            None => DragOutcome::Ignored,
        }
    }

    /// Apply a parameter change; rejected changes leave everything as it was
    pub fn apply_control(&mut self, event: ControlEvent) -> Result<()> {
        let ctx = &mut self.ctx;
        ctx.controls
            .apply(event, &mut ctx.scenario.system, &ctx.scenario.coupling)?;
        self.request_redraw();
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!("ignoring surface size {width}x{height}");
            return;
        }
        self.ctx.surface = Surface::new(width, height);
        self.request_redraw();
    }

    // =========================================================================================
    // Frames
    // =========================================================================================

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn request_frame(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(FrameRequest(self.next_frame_id));
            self.next_frame_id += 1;
        }
    }

    /// Run one scheduled tick at host time `timestamp` (seconds)
    pub fn tick(&mut self, timestamp: f64, renderer: &mut dyn Renderer) -> TickOutcome {
        if !self.is_running() || self.pending_frame.take().is_none() {
            return TickOutcome::NotScheduled;
        }

        let baseline = self.last_timestamp;
        let outcome = match baseline {
            None if timestamp.is_finite() => {
                self.last_timestamp = Some(timestamp);
                self.fps.restart(timestamp);
                TickOutcome::Baseline
            }
            None => self.reject(f64::NAN, timestamp),
            Some(last) => {
                let elapsed = timestamp - last;
                self.fps.frame(timestamp);
                if !elapsed.is_finite()
                    || elapsed < 0.0
                    || elapsed > self.ctx.scenario.parameters.max_frame_dt
                {
                    self.reject(elapsed, timestamp)
                } else {
                    self.last_timestamp = Some(timestamp);
                    self.advance(elapsed)
                }
            }
        };

        self.render(renderer);
        self.request_frame();
        outcome
    }

    fn reject(&mut self, elapsed: f64, timestamp: f64) -> TickOutcome {
        warn!("invalid frame delta {elapsed}, skipping physics update");
        self.last_timestamp = None;
        self.fps.restart(timestamp);
        TickOutcome::Skipped { elapsed }
    }

    fn advance(&mut self, elapsed: f64) -> TickOutcome {
        let dt = elapsed * self.ctx.controls.speed;
        let boundary = self.ctx.boundary();
        let scenario = &mut self.ctx.scenario;
        match semi_implicit_euler(
            &mut scenario.system,
            &scenario.forces,
            &scenario.parameters,
            boundary,
            dt,
        ) {
            Ok(()) => TickOutcome::Advanced { dt },
            Err(e) => {
                warn!("{e}, skipping physics update");
                TickOutcome::Skipped { elapsed }
            }
        }
    }

    /// Draw if something asked for a redraw since the last frame
    pub fn redraw_if_requested(&mut self, renderer: &mut dyn Renderer) -> bool {
        if !self.redraw_requested {
            return false;
        }
        self.render(renderer);
        true
    }

    /// Draw the current state. Render failures are logged, never propagated.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.redraw_requested = false;
        let frame = self.ctx.frame(self.is_running(), self.fps.fps);
        if let Err(e) = renderer.render(&frame) {
            error!("{e}");
        }
    }
}
