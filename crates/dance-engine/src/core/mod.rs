//! Core engine-facing contracts.
//!
//! The interface between the window runtime and the animation: the runtime owns the
//! window and GPU, the app owns everything it draws.

mod app;
mod ctx;

pub use app::{App, LoopState};
pub use ctx::FrameCtx;
