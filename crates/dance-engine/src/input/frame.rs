use std::collections::HashSet;

use super::types::Key;

/// Input transitions since the last poll.
///
/// A key pressed and released between two polls is still present in `keys_pressed`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }
}
