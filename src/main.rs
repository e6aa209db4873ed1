//! DimensionalAV - a tesseract, hyperspheres and spacetime cubes that move with the music
//!
//! Four primitives from four and six dimensions, rotated in fixed planes,
//! projected down to 3-D and coloured by the frequency bands of whatever is playing.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use dimensional_av::audio::{AudioSource, AudioSystem, SilentSource};
use dimensional_av::camera::CameraSystem;
use dimensional_av::cli::{Args, AudioChoice};
use dimensional_av::error::AppError;
use dimensional_av::params::{RecordingConfig, Settings};
use dimensional_av::rendering::{RenderSystem, Uniforms};
use dimensional_av::visual::{Command, FpsMonitor, Frame, VisualizationState};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Visualization
    state: VisualizationState,
    camera: CameraSystem,
    audio: Option<AudioSystem>,
    silent: SilentSource,
    fps: FpsMonitor,

    // Configuration
    settings: Settings,
    recording_config: Option<RecordingConfig>,

    // Time tracking
    start_time: Instant,
    frame_num: usize,

    /// Error that ended the event loop early
    fatal: Option<AppError>,
}

impl App {
    fn new(
        settings: Settings,
        audio: Option<AudioSystem>,
        recording_config: Option<RecordingConfig>,
    ) -> Self {
        Self {
            window: None,
            render_system: None,
            state: VisualizationState::new(&settings),
            camera: CameraSystem::new(settings.camera.clone()),
            audio,
            silent: SilentSource {
                sensitivity: settings.features.default_sensitivity,
            },
            fps: FpsMonitor::new(),
            settings,
            recording_config,
            start_time: Instant::now(),
            frame_num: 0,
            fatal: None,
        }
    }

    /// Largest line and point buffers any primitive will emit
    fn buffer_capacities(&self) -> (usize, usize) {
        let scene = self.state.scene();
        let lines = scene.tesseract.lines().len().max(scene.time_cube.lines().len());
        let points = scene
            .hypersphere
            .instances()
            .len()
            .max(scene.time_sphere.instances().len());
        (lines, points)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.fatal = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let render_config = &self.settings.render;
        let window_attributes = Window::default_attributes()
            .with_title("DimensionalAV")
            .with_inner_size(winit::dpi::LogicalSize::new(
                render_config.window_width,
                render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, AppError::Window(e.to_string())),
        };

        let (line_capacity, point_capacity) = self.buffer_capacities();
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.settings.render,
            line_capacity,
            point_capacity,
            self.recording_config.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => return self.fail(event_loop, e),
        };

        if let Some(audio) = self.audio.as_mut() {
            audio.play();
        }

        log::info!("DimensionalAV is running (mode {})", self.state.mode());
        log::info!("Keys: T/S/C/U mode, Space play/pause, Backspace stop, Up/Down sensitivity");
        log::info!("      [ ] rotation speed, - = point size, M colour scheme, Esc quit");

        self.start_time = Instant::now();
        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.settings.render.window_width = size.width;
                self.settings.render.window_height = size.height;
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.camera.set_dragging(state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                self.camera.cursor_moved(position.x, position.y)
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

/// Mode-switch symbol for a key, if it is one
fn mode_symbol(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::KeyT => Some('t'),
        KeyCode::KeyS => Some('s'),
        KeyCode::KeyC => Some('c'),
        KeyCode::KeyU => Some('u'),
        _ => None,
    }
}

impl App {
    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        if let Some(key) = mode_symbol(code) {
            self.state.push_command(Command::ModeKey(key));
            return;
        }

        let controls = self.state.controls();
        let steps = &self.settings.controls;
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => match self.audio.as_mut() {
                Some(audio) => audio.toggle(),
                None => log::info!("No audio source (use --audio <WAV> or --synth)"),
            },
            KeyCode::Backspace => {
                if let Some(audio) = self.audio.as_mut() {
                    audio.stop();
                }
            }
            KeyCode::ArrowUp | KeyCode::ArrowDown => {
                let delta = if code == KeyCode::ArrowUp { 1 } else { -1 };
                if let Some(audio) = self.audio.as_mut() {
                    audio.adjust_sensitivity(delta);
                }
            }
            KeyCode::BracketLeft => self.state.push_command(Command::SetRotationSpeed(
                (controls.rotation_speed - steps.rotation_speed_step).max(0.0),
            )),
            KeyCode::BracketRight => self.state.push_command(Command::SetRotationSpeed(
                controls.rotation_speed + steps.rotation_speed_step,
            )),
            KeyCode::Minus => self.state.push_command(Command::SetPointSize(
                (controls.point_size - steps.point_size_step).max(steps.point_size_step),
            )),
            KeyCode::Equal => self.state.push_command(Command::SetPointSize(
                controls.point_size + steps.point_size_step,
            )),
            KeyCode::KeyM => self
                .state
                .push_command(Command::SetColorScheme(controls.color_scheme.toggled())),
            _ => {}
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        // Fixed timestep while recording, wall clock otherwise
        let time_s = match &self.recording_config {
            Some(config) => config.frame_time_s(self.frame_num),
            None => self.start_time.elapsed().as_secs_f64(),
        };

        self.camera.update();
        let (view_proj, _eye) = self.camera.create_view_proj_matrix(&self.settings.render);
        let (right, up) = self.camera.billboard_axes();

        let source: &mut dyn AudioSource = match self.audio.as_mut() {
            Some(audio) => audio,
            None => &mut self.silent,
        };
        let frame = self.state.update(time_s, source);

        let point_size = match frame {
            Frame::Points { size, .. } => size,
            Frame::Lines(_) => self.settings.controls.point_size,
        };
        render_system.update_uniforms(&Uniforms::new(view_proj, right, up, point_size));

        match render_system.render(&frame, self.frame_num) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = (
                    self.settings.render.window_width,
                    self.settings.render.window_height,
                );
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return self.fail(event_loop, AppError::Gpu("out of memory".to_string()));
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        if let Some(fps) = self.fps.record_frame(time_s) {
            let cache = self.state.cache();
            log::debug!("FPS: {:.1}", fps);
            log::trace!(
                "Angle cache: {}/{} entries, {} hits, {} misses",
                cache.len(),
                cache.capacity(),
                cache.hits(),
                cache.misses()
            );
        }

        self.frame_num += 1;
        if let Some(config) = &self.recording_config {
            if self.frame_num >= config.total_frames() {
                log::info!("Recorded {} frames to {}", self.frame_num, config.frames_dir());
                event_loop.exit();
            }
        }
    }
}

/// Start the requested audio source; any failure leaves the visualizer running idle
fn start_audio(args: &Args, settings: &Settings) -> Option<AudioSystem> {
    let analyzer = settings.analyzer.clone();
    let features = &settings.features;
    let result = match args.audio_choice() {
        AudioChoice::File(path) => AudioSystem::from_wav(&path, analyzer, features),
        AudioChoice::Synth => AudioSystem::synth(analyzer, features),
        AudioChoice::Silent => {
            log::info!("No audio source selected; visuals run idle");
            return None;
        }
    };

    match result {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("Audio unavailable ({}); visuals run idle", e);
            None
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let settings = args.load_settings()?;
    let recording_config = args.create_recording_config()?;
    let audio = start_audio(&args, &settings);

    log::info!(
        "Settings: mode {}, {} / {} cloud points, sensitivity {}, cache {}",
        settings.controls.initial_mode,
        settings.geometry.hypersphere_points,
        settings.geometry.time_sphere_points,
        settings.features.default_sensitivity,
        settings.angle_cache_capacity
    );

    let mut app = App::new(settings, audio, recording_config);
    let event_loop = EventLoop::new().map_err(|e| AppError::Window(e.to_string()))?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| AppError::Window(e.to_string()))?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
