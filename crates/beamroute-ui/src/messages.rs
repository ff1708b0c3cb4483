//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved (no button state change).
    Move,
}

/// A message delivered to the application model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event at a cell position.
    Mouse { action: MouseAction, pos: Point },
    /// The screen / terminal was resized.
    Screen { width: i32, height: i32 },
    /// A timer requested with [`Effect::Tick`](crate::Effect::Tick) elapsed.
    Tick,
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    #[inline]
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    #[inline]
    pub fn click(pos: Point) -> Self {
        Self::Mouse {
            action: MouseAction::Main,
            pos,
        }
    }
}
