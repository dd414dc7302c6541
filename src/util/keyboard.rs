//! Global keyboard shortcuts.
//!
//! | Chord | Action |
//! |-------|--------|
//! | Ctrl/Cmd + `/` | toggle the sidebar |
//! | Ctrl/Cmd + Shift + `D` | toggle the theme |
//! | `Escape` | close the sidebar (narrow viewport, when open) |

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

/// Modifier keys held during a key event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub fn primary(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePanel,
    ToggleTheme,
    /// Escape: close the sidebar if it is open as an overlay.
    DismissPanel,
}

/// Map a `KeyboardEvent.key` value plus modifiers to a shortcut.
pub fn resolve_shortcut(key: &str, mods: Modifiers) -> Option<Shortcut> {
    if mods.primary() && key == "/" {
        return Some(Shortcut::TogglePanel);
    }
    if mods.primary() && mods.shift && key == "D" {
        return Some(Shortcut::ToggleTheme);
    }
    if key == "Escape" {
        return Some(Shortcut::DismissPanel);
    }
    None
}
