//! The animation loop.
//!
//! [`MainLoop`] owns the scene and the camera state and is the only place either
//! changes. It is independent of the window system: anything implementing
//! [`FrameHost`] can drive it, which is how it is tested headless.

mod config;
mod host;
mod main_loop;

pub use config::{LoopConfig, StepPolicy};
pub use host::FrameHost;
pub use main_loop::{MainLoop, step_camera};
