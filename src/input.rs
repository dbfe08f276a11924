//! Input event types consumed by the selection state machine
//!
//! These are surface-neutral: a render surface translates its own pointer and
//! key events into these before handing them to the grid.

use crate::grid::CellAddress;

/// Modifier keys held during a keystroke or press
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    /// Cmd on macOS
    pub const META: Modifiers = Modifiers(0b1000);

    const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the platform command key (Cmd on macOS, Ctrl elsewhere) is held
    pub fn has_cmd(self) -> bool {
        if cfg!(target_os = "macos") {
            self.contains(Modifiers::META)
        } else {
            self.contains(Modifiers::CTRL)
        }
    }

    /// Ctrl, Alt or Cmd turn a character key into a shortcut; Shift does not
    pub const fn has_shortcut_modifier(self) -> bool {
        self.contains(Modifiers(Modifiers::CTRL.0 | Modifiers::ALT.0 | Modifiers::META.0))
    }
}

/// Direction for cell movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row and column delta of one step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A key, case preserved for characters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Arrow(Direction),
    Home,
    End,
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// A keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// The character this keystroke types, if any
    pub fn printable(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if !c.is_control() && !self.mods.has_shortcut_modifier() => Some(c),
            _ => None,
        }
    }
}

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A data cell (header-row cells included)
    Cell(CellAddress),
    /// The header of a column
    ColumnHeader(usize),
    /// The row-index gutter of a row
    RowGutter(usize),
    /// The select-all corner
    Corner,
}

/// Pointer and focus events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { target: PointerTarget, mods: Modifiers },
    Move { target: PointerTarget },
    Up,
}
