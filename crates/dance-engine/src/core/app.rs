use crate::error::Result;
use crate::input::InputPoll;

use super::ctx::FrameCtx;

/// Lifecycle of the animation loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Application contract driven by the window runtime.
pub trait App {
    /// Called after every window event with the input polled so far.
    fn on_input(&mut self, poll: InputPoll) -> LoopState;

    /// Called once per redraw. An error ends the runtime and is returned from it.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<LoopState>;

    /// Called once, before the app and then the window are dropped.
    fn on_exit(&mut self) {}
}
