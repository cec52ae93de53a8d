use crate::error::Result;
use crate::input::InputPoll;
use crate::render::{Color, DrawCommands, GraphicsApi};

/// What the main loop needs from its surroundings for one iteration.
pub trait FrameHost {
    type Api: GraphicsApi;

    /// Clears to `clear`, lets `record` issue the frame's draws, and presents.
    ///
    /// Presentation may block until vertical refresh.
    fn render(
        &mut self,
        clear: Color,
        record: &mut dyn FnMut(&mut dyn DrawCommands<Self::Api>),
    ) -> Result<()>;

    fn poll_input(&mut self) -> InputPoll;
}
