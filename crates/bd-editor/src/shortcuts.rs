//! Keyboard shortcut mapping.
//!
//! Maps keys to the same actions as the toolbar buttons. Bindings are plain
//! keys; any command modifier leaves the key to the browser.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    AddBlock,
    AddInputPort,
    AddOutputPort,
    AddLine,
    Delete,
    /// Abort line drawing, or drop the active selection.
    Cancel,
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"b"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        _shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        if ctrl || alt || meta {
            return None;
        }

        match key {
            "b" | "B" => Some(ShortcutAction::AddBlock),
            "i" | "I" => Some(ShortcutAction::AddInputPort),
            "o" | "O" => Some(ShortcutAction::AddOutputPort),
            "l" | "L" => Some(ShortcutAction::AddLine),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Cancel),
            _ => None,
        }
    }
}
