//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it feeds window and
//! device events into the input trackers and, on every redraw, runs the
//! camera schedule and carries out the cursor and quit requests it raised.

use std::path::PathBuf;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use flycam_camera::{
    CameraMotionController, CameraSettings, EulerAngles, FrameInput, HostRequests, Transform,
    build_camera_schedule,
};
use flycam_config::Config;
use flycam_input::{CursorMode, KeyboardState, MouseState};
use glam::Vec3;
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::platform::AppError;

/// Hot-reloads `config.ron`.
pub const RELOAD_KEY: KeyCode = KeyCode::F5;

/// Where the camera starts: a little above the origin, looking down -Z.
pub const START_POSITION: Vec3 = Vec3::new(0.0, 2.0, 10.0);

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Host requests raised by one frame of the camera schedule.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub cursor_mode: Option<CursorMode>,
    pub quit: bool,
}

/// Application state: window, input trackers and the camera world.
pub struct AppState {
    config: Config,
    config_dir: PathBuf,
    window: Option<Arc<Window>>,
    keyboard: KeyboardState,
    mouse: MouseState,
    clock: FrameClock,
    world: World,
    schedule: Schedule,
    camera: Entity,
    title: String,
}

impl AppState {
    /// Builds the camera world from `config`. `config_dir` is where F5
    /// reloads the configuration from.
    pub fn new(config: Config, config_dir: PathBuf) -> Result<Self, AppError> {
        let settings = CameraSettings::from_config(&config.camera)?;

        let mut world = World::new();
        world.insert_resource(FrameInput::default());
        world.insert_resource(HostRequests::default());
        let camera = world
            .spawn((
                CameraMotionController::new(settings),
                Transform::from_pose(START_POSITION, EulerAngles::default()),
            ))
            .id();

        Ok(Self {
            title: config.window.title.clone(),
            config,
            config_dir,
            window: None,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            clock: FrameClock::new(),
            world,
            schedule: build_camera_schedule(),
            camera,
        })
    }

    /// The camera entity's transform.
    pub fn camera_transform(&self) -> Option<&Transform> {
        self.world.get::<Transform>(self.camera)
    }

    /// The camera entity's controller.
    pub fn controller(&self) -> Option<&CameraMotionController> {
        self.world.get::<CameraMotionController>(self.camera)
    }

    /// Samples input, runs the camera schedule for a frame of `delta_seconds`
    /// and returns the requests it raised. Input transients are cleared.
    pub fn step(&mut self, delta_seconds: f32) -> FrameOutcome {
        if self.keyboard.just_pressed(RELOAD_KEY) {
            self.reload_config();
        }

        let input = match self.controller() {
            Some(controller) => {
                let settings = controller.settings();
                FrameInput::capture(
                    &self.keyboard,
                    &self.mouse,
                    &settings.bindings,
                    settings.mouse_axis_scale,
                    delta_seconds,
                )
            }
            None => FrameInput::default(),
        };
        *self.world.resource_mut::<FrameInput>() = input;
        self.schedule.run(&mut self.world);

        let mut requests = self.world.resource_mut::<HostRequests>();
        let outcome = FrameOutcome {
            cursor_mode: requests.take_cursor_mode(),
            quit: requests.take_quit(),
        };

        self.keyboard.clear_transients();
        self.mouse.clear_transients();
        outcome
    }

    /// Re-reads `config.ron` and pushes new camera settings to the controller.
    /// Failures keep the running configuration.
    pub fn reload_config(&mut self) {
        let new_config = match self.config.reload(&self.config_dir) {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!("Config unchanged");
                return;
            }
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };
        let settings = match CameraSettings::from_config(&new_config.camera) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring reloaded camera settings: {e}");
                return;
            }
        };
        if let Some(mut controller) = self.world.get_mut::<CameraMotionController>(self.camera) {
            controller.apply_settings(settings);
        }
        self.config = new_config;
        info!("Camera settings reloaded");
    }

    /// Releases all keys and buttons so nothing stays held while the window
    /// is in the background. A held look button releases the cursor on the
    /// next frame.
    pub fn on_focus_lost(&mut self) {
        self.keyboard.release_all();
        self.mouse.release_all();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        let outcome = self.step(dt);

        if let Some(window) = self.window.clone() {
            if let Some(mode) = outcome.cursor_mode {
                self.mouse.set_cursor_mode(&window, mode);
            }
            self.update_title(&window);
        }

        if outcome.quit {
            info!("Quit requested, shutting down");
            event_loop.exit();
        }
    }

    fn update_title(&mut self, window: &Window) {
        let title = match self.controller() {
            Some(controller) if self.config.debug.show_pose && controller.is_active() => {
                format!("{} | {}", self.config.window.title, controller.readout())
            }
            _ => self.config.window.title.clone(),
        };
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => {
                let size = window.inner_size();
                info!("Window created: {}x{}", size.width, size.height);
                window.request_redraw();
                self.window = Some(Arc::new(window));
                self.clock.reset();
            }
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.on_focus_lost();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::CursorEntered { .. } => {
                self.mouse.on_cursor_entered();
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse.on_cursor_left();
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse.on_raw_motion(delta.0, delta.1);
        }
    }
}

/// Creates an event loop and runs the viewer until the window closes or the
/// camera controls request a quit.
#[instrument(skip_all)]
pub fn run(config: Config, config_dir: PathBuf) -> Result<(), AppError> {
    let mut app = AppState::new(config, config_dir)?;
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
