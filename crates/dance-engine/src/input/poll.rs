use super::frame::InputFrame;
use super::state::InputState;
use super::types::Key;

/// Result of polling the window for termination requests.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputPoll {
    pub quit_key_pressed: bool,
    pub close_requested: bool,
}

impl InputPoll {
    /// Quit key held now or pressed at any point since the previous poll.
    pub fn from_state(state: &InputState, frame: &InputFrame, quit_key: Key, close_requested: bool) -> Self {
        Self {
            quit_key_pressed: state.key_down(quit_key) || frame.keys_pressed.contains(&quit_key),
            close_requested,
        }
    }

    pub fn should_terminate(&self) -> bool {
        self.quit_key_pressed || self.close_requested
    }
}
