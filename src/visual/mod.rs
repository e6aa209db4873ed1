//! Audio-reactive visualization: primitives, colour, mode selection and the frame pipeline.

mod color;
mod mode;
mod pipeline;
mod primitives;
mod stats;

pub use color::{grey, hsl_to_rgb, hsv_to_rgb, ColorScheme};
pub use mode::{Mode, ModeSwitch};
pub use pipeline::{Command, Controls, Scene, VisualizationState};
pub use primitives::{
    angles_4d, angles_6d, Frame, FrameInput, HyperSphereCloud, LineVertex, PointInstance,
    Tesseract, TimeCube, TimeSphereCloud,
};
pub use stats::FpsMonitor;
