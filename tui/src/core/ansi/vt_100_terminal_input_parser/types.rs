// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Input event types for VT-100 terminal input parsing.
//!
//! These are transient values: one is created per decoded input event and consumed by
//! dispatch right away.

use crate::{ASCII_CR, ASCII_DEL, ASCII_HT, ASCII_LF, ANSI_ESC};
use std::fmt::{Display, Formatter};

bitflags::bitflags! {
    /// Keyboard (and mouse) modifiers. The bit layout matches the CSI modifier
    /// parameter, `(param - 1) & 0b111`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierSet: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
    }
}

impl ModifierSet {
    /// Decode the CSI modifier parameter (`1..=8`). Values outside that range are
    /// masked, the caller validates the range.
    #[must_use]
    pub fn from_csi_param(param: u32) -> Self {
        let bits = u8::try_from(param.saturating_sub(1) & 0b111).unwrap_or_default();
        Self::from_bits_truncate(bits)
    }
}

/// Keyboard key codes. This is a closed set: printable characters plus the named keys a
/// VT-100 style terminal can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Regular character.
    Char(char),
    Tab,
    Enter,
    CarriageReturn,
    Escape,
    Backspace,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function keys F1-F12.
    Function(u8),
    /// Not a physical key. Returned by the decoder when the bytes it consumed were a
    /// mouse report (which was handed to the mouse sink instead).
    Mouse,
}

impl KeyCode {
    /// Map a single input byte to its key code. Control bytes with a dedicated key get
    /// that key, everything else is a character.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            ASCII_HT => Self::Tab,
            ASCII_LF => Self::Enter,
            ASCII_CR => Self::CarriageReturn,
            ANSI_ESC => Self::Escape,
            ASCII_DEL => Self::Backspace,
            _ => Self::Char(char::from(byte)),
        }
    }

    /// Same as [`Self::from_byte`] but for the unicode codepoint carried by a CSI-u
    /// sequence. Returns [None] for values that are not a [char].
    #[must_use]
    pub fn from_codepoint(codepoint: u32) -> Option<Self> {
        match u8::try_from(codepoint) {
            Ok(byte) => Some(Self::from_byte(byte)),
            Err(_) => char::from_u32(codepoint).map(Self::Char),
        }
    }
}

impl From<char> for KeyCode {
    fn from(ch: char) -> Self {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) => Self::from_byte(byte),
            Err(_) => Self::Char(ch),
        }
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", ch.escape_debug()),
            Self::Function(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A decoded keystroke.
///
/// Equality against a bare [`KeyCode`] or [char] only holds when no modifiers are
/// held: `Key::ctrl('a') != 'a'`. Equality between two keys compares both the code and
/// the modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub mods: ModifierSet,
}

impl Key {
    #[must_use]
    pub fn new(code: impl Into<KeyCode>, mods: ModifierSet) -> Self {
        Self {
            code: code.into(),
            mods,
        }
    }

    #[must_use]
    pub fn plain(code: impl Into<KeyCode>) -> Self { Self::new(code, ModifierSet::empty()) }

    #[must_use]
    pub fn ctrl(code: impl Into<KeyCode>) -> Self { Self::new(code, ModifierSet::CTRL) }

    #[must_use]
    pub fn alt(code: impl Into<KeyCode>) -> Self { Self::new(code, ModifierSet::ALT) }

    #[must_use]
    pub fn with_mods(mut self, mods: ModifierSet) -> Self {
        self.mods |= mods;
        self
    }

    /// The sentinel returned by the decoder after it emitted a mouse report.
    #[must_use]
    pub fn mouse_sentinel() -> Self { Self::plain(KeyCode::Mouse) }

    #[must_use]
    pub fn is_mouse_sentinel(&self) -> bool { self.code == KeyCode::Mouse }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self { Self::plain(code) }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, other: &KeyCode) -> bool { self.mods.is_empty() && self.code == *other }
}

impl PartialEq<char> for Key {
    fn eq(&self, other: &char) -> bool {
        self.mods.is_empty() && self.code == KeyCode::from(*other)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.mods.contains(ModifierSet::CTRL) {
            f.write_str("Ctrl+")?;
        }
        if self.mods.contains(ModifierSet::ALT) {
            f.write_str("Alt+")?;
        }
        if self.mods.contains(ModifierSet::SHIFT) {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.code)
    }
}
