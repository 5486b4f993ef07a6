//! Cursor grab and visibility modes requested by camera controllers.

use serde::{Deserialize, Serialize};

/// Whether the cursor is captured for mouse-look or free for pointing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMode {
    /// Hidden and locked to the window; motion arrives as raw device deltas.
    Captured,
    /// Visible, normal cursor.
    #[default]
    Free,
}

impl CursorMode {
    /// Returns `true` for [`CursorMode::Captured`].
    #[must_use]
    pub fn is_captured(self) -> bool {
        matches!(self, CursorMode::Captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_free() {
        assert_eq!(CursorMode::default(), CursorMode::Free);
        assert!(!CursorMode::Free.is_captured());
        assert!(CursorMode::Captured.is_captured());
    }
}
