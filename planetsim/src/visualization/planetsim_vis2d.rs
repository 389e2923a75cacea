use bevy::color::Srgba;
use bevy::input::touch::TouchInput;
use bevy::prelude::*;
use bevy::time::Real;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow, WindowResized};

use crate::error::{Result, SimError};
use crate::interaction::input::{PointerEvent, TouchPhase, TouchTracker};
use crate::simulation::controls::ControlEvent;
use crate::simulation::run_loop::RunLoop;
use crate::simulation::states::NVec2;
use crate::visualization::renderer::{FrameView, Renderer};

const BACKGROUND: Color = Color::srgb(0.039, 0.039, 0.102);
const SPEED_STEP: f64 = 0.1;
const MASS_SLIDER_STEP: f64 = 5.0;

/// Body currently targeted by the keyboard parameter controls
#[derive(Resource, Default)]
struct SelectedBody(usize);

/// Last frame handed over by the run loop. Gizmos are immediate mode, so the
/// frame is kept here and drawn again every Bevy update until the run loop
/// renders a new one.
#[derive(Resource, Default)]
struct FrameSnapshot {
    bodies: Vec<BodySprite>,
    running: bool,
    fps: u32,
    speed: f64,
    dragging: Option<usize>,
}

/// Finger driving the pointer; other touches are ignored
#[derive(Resource, Default)]
struct ActiveTouch(TouchTracker);

struct BodySprite {
    position: Vec2, // world space
    radius: f32,
    color: Srgba,
    trail: Vec<Vec2>,
}

/// Simulation space has y pointing down, Bevy world space has y pointing up
fn to_world(p: &NVec2) -> Vec2 {
    Vec2::new(p.x as f32, -p.y as f32)
}

fn to_nvec(p: Vec2) -> NVec2 {
    NVec2::new(p.x as f64, p.y as f64)
}

struct SnapshotRenderer<'a> {
    snapshot: &'a mut FrameSnapshot,
}

impl Renderer for SnapshotRenderer<'_> {
    fn render(&mut self, frame: &FrameView<'_>) -> Result<()> {
        let mut bad_color = None;
        self.snapshot.bodies = frame
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let color = Srgba::hex(&b.color).unwrap_or_else(|_| {
                    bad_color = Some((i, b.color.clone()));
                    Srgba::WHITE
                });
                BodySprite {
                    position: to_world(&b.x),
                    radius: b.radius as f32,
                    color,
                    trail: b.trail.iter().map(to_world).collect(),
                }
            })
            .collect();
        self.snapshot.running = frame.running;
        self.snapshot.fps = frame.fps;
        self.snapshot.speed = frame.speed;
        self.snapshot.dragging = frame.dragging;

        match bad_color {
            Some((i, c)) => Err(SimError::Render(format!("body {i} has invalid color {c:?}"))),
            None => Ok(()),
        }
    }
}

pub fn run_2d(run_loop: RunLoop) {
    info!("run_2d: starting Bevy 2D viewer with {} bodies", run_loop.system().len());
    let surface = run_loop.context().surface;

    App::new()
        .insert_resource(run_loop)
        .insert_resource(ClearColor(BACKGROUND))
        .init_resource::<SelectedBody>()
        .init_resource::<FrameSnapshot>()
        .init_resource::<ActiveTouch>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "planetsim".into(),
                resolution: (surface.width as f32, surface.height as f32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                resize_system,
                pointer_input_system,
                touch_input_system,
                keyboard_system,
                frame_system,
                draw_system,
                title_system,
            )
                .chain(),
        )
        .run();
}

fn setup_system(mut commands: Commands, windows: Query<&Window, With<PrimaryWindow>>, mut run_loop: ResMut<RunLoop>) {
    commands.spawn(Camera2dBundle::default());

    if let Ok(window) = windows.get_single() {
        run_loop.resize(window.width() as f64, window.height() as f64);
    }
}

fn resize_system(mut resized: EventReader<WindowResized>, mut run_loop: ResMut<RunLoop>) {
    for e in resized.read() {
        run_loop.resize(e.width as f64, e.height as f64);
    }
}

fn pointer_input_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    mut run_loop: ResMut<RunLoop>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        if let Some(p) = windows.get_single().ok().and_then(|w| w.cursor_position()) {
            run_loop.handle_pointer(PointerEvent::Down(to_nvec(p)));
        }
    }
    for e in moved.read() {
        run_loop.handle_pointer(PointerEvent::Move(to_nvec(e.position)));
    }
    if buttons.just_released(MouseButton::Left) {
        run_loop.handle_pointer(PointerEvent::Up);
    }
    for _ in left.read() {
        run_loop.handle_pointer(PointerEvent::Leave);
    }
}

fn touch_input_system(
    mut touch_events: EventReader<TouchInput>,
    mut active: ResMut<ActiveTouch>,
    mut run_loop: ResMut<RunLoop>,
) {
    for e in touch_events.read() {
        let phase = match e.phase {
            bevy::input::touch::TouchPhase::Started => TouchPhase::Start,
            bevy::input::touch::TouchPhase::Moved => TouchPhase::Move,
            bevy::input::touch::TouchPhase::Ended => TouchPhase::End,
            bevy::input::touch::TouchPhase::Canceled => TouchPhase::Cancel,
        };
        if let Some(event) = active.0.track(e.id, phase, to_nvec(e.position)) {
            run_loop.handle_touch(&event);
        }
    }
}

fn keyboard_system(keys: Res<ButtonInput<KeyCode>>, mut selected: ResMut<SelectedBody>, mut run_loop: ResMut<RunLoop>) {
    if keys.just_pressed(KeyCode::Space) {
        let state = run_loop.toggle();
        info!("start/pause -> {:?}", state);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        run_loop.reset();
    }

    let digits = [
        KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3,
        KeyCode::Digit4, KeyCode::Digit5, KeyCode::Digit6,
        KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
    for (i, key) in digits.iter().enumerate() {
        if keys.just_pressed(*key) && i < run_loop.system().len() {
            selected.0 = i;
            info!("controls now target body {i}");
        }
    }

    let index = selected.0;
    let controls = &run_loop.context().controls;
    let mut events = Vec::new();

    if keys.just_pressed(KeyCode::ArrowUp) {
        events.push(ControlEvent::Speed(controls.speed + SPEED_STEP));
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        events.push(ControlEvent::Speed(controls.speed - SPEED_STEP));
    }
    if let Some(&size) = controls.sizes.get(index) {
        if keys.just_pressed(KeyCode::Equal) {
            events.push(ControlEvent::Radius { index, radius: size + 1.0 });
        }
        if keys.just_pressed(KeyCode::Minus) {
            events.push(ControlEvent::Radius { index, radius: (size - 1.0).max(1.0) });
        }
    }
    if let Some(&value) = controls.mass_sliders.get(index) {
        if keys.just_pressed(KeyCode::BracketRight) {
            events.push(ControlEvent::MassSlider { index, value: value + MASS_SLIDER_STEP });
        }
        if keys.just_pressed(KeyCode::BracketLeft) {
            events.push(ControlEvent::MassSlider { index, value: value - MASS_SLIDER_STEP });
        }
    }

    for event in events {
        if let Err(e) = run_loop.apply_control(event) {
            warn!("{e}");
        }
    }
}

/// Ticks the run loop when it has a frame pending, otherwise honours redraw requests.
/// Uses the unclamped real clock so long stalls reach the frame-delta check.
fn frame_system(time: Res<Time<Real>>, mut run_loop: ResMut<RunLoop>, mut snapshot: ResMut<FrameSnapshot>) {
    if run_loop.pending_frame().is_some() {
        let mut renderer = SnapshotRenderer { snapshot: &mut *snapshot };
        run_loop.tick(time.elapsed_seconds_f64(), &mut renderer);
    } else if run_loop.redraw_requested() {
        let mut renderer = SnapshotRenderer { snapshot: &mut *snapshot };
        run_loop.redraw_if_requested(&mut renderer);
    }
}

fn draw_system(snapshot: Res<FrameSnapshot>, mut gizmos: Gizmos) {
    for body in &snapshot.bodies {
        let n = body.trail.len();
        if n >= 2 {
            // fade from transparent (oldest) to the body color (newest)
            gizmos.linestrip_gradient_2d(body.trail.iter().enumerate().map(|(i, p)| {
                let alpha = i as f32 / (n - 1) as f32;
                (*p, Color::srgba(body.color.red, body.color.green, body.color.blue, alpha))
            }));
        }
    }

    for (i, body) in snapshot.bodies.iter().enumerate() {
        let c = body.color;
        gizmos.circle_2d(body.position, body.radius * 2.0, Color::srgba(c.red, c.green, c.blue, 0.25));
        gizmos.circle_2d(body.position, body.radius, Color::from(c));
        if snapshot.dragging == Some(i) {
            gizmos.circle_2d(body.position, body.radius + 3.0, Color::WHITE);
        }
    }
}

fn title_system(snapshot: Res<FrameSnapshot>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if !snapshot.is_changed() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let hint = if snapshot.running {
        "running"
    } else {
        "paused, drag planets to reposition them"
    };
    window.title = format!(
        "planetsim | planets: {} | FPS: {} | speed x{:.1} | {}",
        snapshot.bodies.len(),
        snapshot.fps,
        snapshot.speed,
        hint,
    );
}
