//! Per-frame update: commands, clock, audio features, then the visible primitive.
//!
//! All animation state lives in [`VisualizationState`]; nothing is global. Each
//! call to [`VisualizationState::update`]:
//!
//! 1. applies queued control commands,
//! 2. advances the clock (monotonic, keeps running while audio is paused),
//! 3. samples audio features if a sample is due,
//! 4. rotates, projects and colours the active primitive only.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

use super::color::ColorScheme;
use super::mode::{Mode, ModeSwitch};
use super::primitives::{Frame, FrameInput, HyperSphereCloud, Tesseract, TimeCube, TimeSphereCloud};
use crate::audio::{AudioReading, AudioSource, FeatureExtractor};
use crate::geometry::{build_tesseract, build_time_cube, sample_hypersphere, sample_time_sphere};
use crate::params::{ControlSettings, GeometryConfig, Settings};
use crate::transform::AngleCache;

/// Control change accepted between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectMode(Mode),
    /// Mode-switch symbol from the keyboard; unknown symbols change nothing
    ModeKey(char),
    /// Multiplier on every baseline rotation rate
    SetRotationSpeed(f32),
    /// Base point size for the clouds
    SetPointSize(f32),
    SetColorScheme(ColorScheme),
}

/// The four primitives, built once
pub struct Scene {
    pub tesseract: Tesseract,
    pub hypersphere: HyperSphereCloud,
    pub time_cube: TimeCube,
    pub time_sphere: TimeSphereCloud,
}

impl Scene {
    /// Build every primitive. A configured seed makes the point clouds reproducible.
    pub fn build(config: &GeometryConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let scene = Self {
            tesseract: Tesseract::new(build_tesseract()),
            hypersphere: HyperSphereCloud::new(sample_hypersphere(config.hypersphere_points, &mut rng)),
            time_cube: TimeCube::new(build_time_cube()),
            time_sphere: TimeSphereCloud::new(sample_time_sphere(config.time_sphere_points, &mut rng)),
        };

        log::info!(
            "Scene built: tesseract {} edges, hypersphere {} points, time cube, time sphere {} points",
            scene.tesseract.edge_count(),
            config.hypersphere_points,
            config.time_sphere_points
        );
        scene
    }
}

/// Current values of the runtime controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub rotation_speed: f32,
    pub point_size: f32,
    pub color_scheme: ColorScheme,
}

impl From<&ControlSettings> for Controls {
    fn from(settings: &ControlSettings) -> Self {
        Self {
            rotation_speed: settings.rotation_speed,
            point_size: settings.point_size,
            color_scheme: settings.color_scheme,
        }
    }
}

/// Elapsed time plus the speed-scaled animation time derived from it
#[derive(Debug, Clone, Copy, Default)]
struct Clock {
    elapsed_s: f64,
    animation_s: f64,
}

impl Clock {
    /// Move to `elapsed_s`; earlier values are ignored
    fn advance(&mut self, elapsed_s: f64, speed: f32) {
        let dt = elapsed_s - self.elapsed_s;
        if dt > 0.0 {
            self.elapsed_s = elapsed_s;
            self.animation_s += dt * speed as f64;
        }
    }
}

pub struct VisualizationState {
    clock: Clock,
    cache: AngleCache,
    extractor: FeatureExtractor,
    scene: Scene,
    modes: ModeSwitch,
    controls: Controls,
    commands: VecDeque<Command>,
    audio: AudioReading,
}

impl VisualizationState {
    pub fn new(settings: &Settings) -> Self {
        Self::with_scene(Scene::build(&settings.geometry), settings)
    }

    pub fn with_scene(scene: Scene, settings: &Settings) -> Self {
        Self {
            clock: Clock::default(),
            cache: AngleCache::with_capacity(settings.angle_cache_capacity),
            extractor: FeatureExtractor::new(settings.features.clone()),
            scene,
            modes: ModeSwitch::new(settings.controls.initial_mode),
            controls: Controls::from(&settings.controls),
            commands: VecDeque::new(),
            audio: AudioReading::default(),
        }
    }

    /// Queue a command for the start of the next update
    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn mode(&self) -> Mode {
        self.modes.active()
    }

    pub fn is_visible(&self, mode: Mode) -> bool {
        self.modes.is_visible(mode)
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn elapsed_s(&self) -> f64 {
        self.clock.elapsed_s
    }

    /// Audio reading used by the last update
    pub fn audio(&self) -> AudioReading {
        self.audio
    }

    pub fn cache(&self) -> &AngleCache {
        &self.cache
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Run one frame and return the visible primitive's render state
    pub fn update(&mut self, elapsed_s: f64, source: &mut dyn AudioSource) -> Frame<'_> {
        self.apply_commands();
        self.clock.advance(elapsed_s, self.controls.rotation_speed);
        self.audio = self.extractor.update(self.clock.elapsed_s, source);

        let input = FrameInput {
            time_s: self.clock.animation_s,
            audio: self.audio,
            scheme: self.controls.color_scheme,
            point_size: self.controls.point_size,
        };

        let scene = &mut self.scene;
        match self.modes.active() {
            Mode::Tesseract => {
                scene.tesseract.update(&input, &mut self.cache);
                Frame::Lines(scene.tesseract.lines())
            }
            Mode::HyperSphereCloud => {
                scene.hypersphere.update(&input, &mut self.cache);
                Frame::Points {
                    points: scene.hypersphere.instances(),
                    size: scene.hypersphere.size(),
                }
            }
            Mode::TimeCube => {
                scene.time_cube.update(&input, &mut self.cache);
                Frame::Lines(scene.time_cube.lines())
            }
            Mode::TimeSphereCloud => {
                scene.time_sphere.update(&input, &mut self.cache);
                Frame::Points {
                    points: scene.time_sphere.instances(),
                    size: scene.time_sphere.size(),
                }
            }
        }
    }

    fn apply_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::SelectMode(mode) => {
                    if self.modes.select(mode) {
                        log::info!("Mode: {}", mode);
                    }
                }
                Command::ModeKey(key) => {
                    if self.modes.handle_key(key) {
                        log::info!("Mode: {}", self.modes.active());
                    }
                }
                Command::SetRotationSpeed(speed) => {
                    if speed.is_finite() && speed >= 0.0 {
                        self.controls.rotation_speed = speed;
                        log::info!("Rotation speed: {:.2}", speed);
                    } else {
                        log::warn!("Ignoring rotation speed {}", speed);
                    }
                }
                Command::SetPointSize(size) => {
                    if size.is_finite() && size > 0.0 {
                        self.controls.point_size = size;
                        log::info!("Point size: {:.3}", size);
                    } else {
                        log::warn!("Ignoring point size {}", size);
                    }
                }
                Command::SetColorScheme(scheme) => {
                    self.controls.color_scheme = scheme;
                    log::info!("Colour scheme: {:?}", scheme);
                }
            }
        }
    }
}
