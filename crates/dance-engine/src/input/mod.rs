//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s and reduces them to an
//! `InputPoll` for the frame loop.

mod frame;
mod poll;
mod state;
mod types;

pub(crate) mod platform {
    pub(crate) mod winit;
}

pub use frame::InputFrame;
pub use poll::InputPoll;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
