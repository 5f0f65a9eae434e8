// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mouse input event parsing from SGR mouse reports.
//!
//! - Format: `CSI < Cb ; Cx ; Cy M/m`
//! - `M` is a press (or motion / scroll), `m` is a release.
//! - `Cx` and `Cy` are **1-based** on the wire. [`MouseReport`] stores them 0-based.
//!
//! The button byte `Cb` is decoded bit by bit in [`decode_mouse_button()`]:
//!
//! | Bit    | Meaning                                                |
//! | :----- | :----------------------------------------------------- |
//! | `0x01` | Scroll down (with `0x40`), or right button (with `0x20`) |
//! | `0x02` | Right button (otherwise left)                          |
//! | `0x04` | Shift                                                  |
//! | `0x08` | Alt                                                    |
//! | `0x10` | Ctrl                                                   |
//! | `0x20` | Motion                                                 |
//! | `0x40` | Scroll wheel                                           |
//!
//! [`MouseAction::Drag`] never comes off the wire. The terminal synthesizes it from a
//! [`MouseAction::Move`] while a button is held, see [`DragState`].
//!
//! [`DragState`]: crate::DragState

use super::{InputParseError, ModifierSet};
use crate::{ANSI_PARAM_SEPARATOR, SGR_BUTTON_RIGHT_MASK, SGR_LOW_BIT_MASK,
            SGR_MOD_ALT_MASK, SGR_MOD_CTRL_MASK, SGR_MOD_SHIFT_MASK, SGR_MOTION_MASK,
            SGR_MOUSE_PREFIX, SGR_MOUSE_PRESS_FINAL, SGR_MOUSE_RELEASE_FINAL,
            SGR_SCROLL_MASK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum MouseAction {
    Move,
    Down,
    Up,
    Drag,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum MouseButton {
    Left,
    Right,
}

/// A decoded SGR mouse report with 0-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseReport {
    pub action: MouseAction,
    pub button: MouseButton,
    pub mods: ModifierSet,
    pub x: i32,
    pub y: i32,
}

impl MouseReport {
    /// Parse the bytes collected after `ESC [`, including the final `M` or `m`. The first
    /// byte must be `<`.
    ///
    /// # Errors
    ///
    /// - [`InputParseError::InvalidArgument`] if the `<` prefix is missing, there aren't
    ///   exactly three `;` separated fields, or a field is not a number.
    /// - [`InputParseError::InvalidFinalChar`] if the final byte is neither `M` nor `m`.
    pub fn parse(wire: &[u8]) -> Result<Self, InputParseError> {
        let Some((&final_byte, rest)) = wire.split_last() else {
            return Err(InputParseError::invalid_argument("empty mouse report"));
        };
        let Some((&SGR_MOUSE_PREFIX, fields)) = rest.split_first() else {
            return Err(InputParseError::invalid_argument(
                "mouse report must start with '<'",
            ));
        };

        let fields: Vec<&[u8]> = fields.split(|&b| b == ANSI_PARAM_SEPARATOR).collect();
        let [num, x, y] = fields.as_slice() else {
            return Err(InputParseError::invalid_argument(format!(
                "mouse report needs 3 fields, got {}",
                fields.len()
            )));
        };

        let num: u32 = parse_field(num)?;
        let x = to_zero_based(parse_field(x)?)?;
        let y = to_zero_based(parse_field(y)?)?;

        let (action, button, mods) = decode_mouse_button(num, char::from(final_byte))?;

        Ok(Self {
            action,
            button,
            mods,
            x,
            y,
        })
    }
}

fn to_zero_based(one_based: i32) -> Result<i32, InputParseError> {
    one_based.checked_sub(1).ok_or_else(|| {
        InputParseError::invalid_argument(format!(
            "mouse report coordinate {one_based} is out of range"
        ))
    })
}

fn parse_field<T: std::str::FromStr>(field: &[u8]) -> Result<T, InputParseError> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|it| it.parse::<T>().ok())
        .ok_or_else(|| {
            InputParseError::invalid_argument(format!(
                "mouse report field {:?} is not a number",
                String::from_utf8_lossy(field)
            ))
        })
}

/// Decode the SGR button byte and final character.
///
/// # Errors
///
/// Returns [`InputParseError::InvalidFinalChar`] when a press / release report is not
/// terminated by `M` or `m`.
pub fn decode_mouse_button(
    num: u32,
    final_char: char,
) -> Result<(MouseAction, MouseButton, ModifierSet), InputParseError> {
    let mut button = if num & SGR_BUTTON_RIGHT_MASK != 0 {
        MouseButton::Right
    } else {
        MouseButton::Left
    };

    let mut mods = ModifierSet::empty();
    mods.set(ModifierSet::SHIFT, num & SGR_MOD_SHIFT_MASK != 0);
    mods.set(ModifierSet::ALT, num & SGR_MOD_ALT_MASK != 0);
    mods.set(ModifierSet::CTRL, num & SGR_MOD_CTRL_MASK != 0);

    let action = if num & SGR_SCROLL_MASK != 0 {
        if num & SGR_LOW_BIT_MASK != 0 {
            MouseAction::ScrollDown
        } else {
            MouseAction::ScrollUp
        }
    } else if num & SGR_MOTION_MASK != 0 {
        button = if num & SGR_LOW_BIT_MASK != 0 {
            MouseButton::Right
        } else {
            MouseButton::Left
        };
        MouseAction::Move
    } else {
        match u8::try_from(final_char) {
            Ok(SGR_MOUSE_PRESS_FINAL) => MouseAction::Down,
            Ok(SGR_MOUSE_RELEASE_FINAL) => MouseAction::Up,
            _ => return Err(InputParseError::InvalidFinalChar { final_char }),
        }
    };

    Ok((action, button, mods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn report(action: MouseAction, button: MouseButton, x: i32, y: i32) -> MouseReport {
        MouseReport {
            action,
            button,
            mods: ModifierSet::empty(),
            x,
            y,
        }
    }

    #[test]
    fn left_press_is_zero_based() {
        assert_eq!(
            MouseReport::parse(b"<0;10;20M").unwrap(),
            report(MouseAction::Down, MouseButton::Left, 9, 19)
        );
    }

    #[test]
    fn left_release() {
        assert_eq!(
            MouseReport::parse(b"<0;10;20m").unwrap(),
            report(MouseAction::Up, MouseButton::Left, 9, 19)
        );
    }

    #[test]
    fn top_left_corner() {
        let parsed = MouseReport::parse(b"<2;1;1M").unwrap();
        assert_eq!(parsed, report(MouseAction::Down, MouseButton::Right, 0, 0));
    }

    #[test]
    fn motion_is_move_not_drag() {
        // Drag is synthesized later by the terminal, never by the parser.
        let parsed = MouseReport::parse(b"<32;12;22M").unwrap();
        assert_eq!(parsed, report(MouseAction::Move, MouseButton::Left, 11, 21));
    }

    #[test_case(64, 'M', MouseAction::ScrollUp, MouseButton::Left)]
    #[test_case(65, 'M', MouseAction::ScrollDown, MouseButton::Left)]
    #[test_case(66, 'M', MouseAction::ScrollUp, MouseButton::Right)]
    #[test_case(33, 'M', MouseAction::Move, MouseButton::Right)]
    #[test_case(34, 'M', MouseAction::Move, MouseButton::Left ; "motion rederives button")]
    #[test_case(0, 'M', MouseAction::Down, MouseButton::Left)]
    #[test_case(2, 'm', MouseAction::Up, MouseButton::Right)]
    fn decode_action_and_button(
        num: u32,
        final_char: char,
        action: MouseAction,
        button: MouseButton,
    ) {
        let (got_action, got_button, _) = decode_mouse_button(num, final_char).unwrap();
        assert_eq!((got_action, got_button), (action, button));
    }

    #[test]
    fn decode_modifiers() {
        let (_, _, mods) = decode_mouse_button(4 | 8 | 16, 'M').unwrap();
        assert_eq!(mods, ModifierSet::all());

        let (_, _, mods) = decode_mouse_button(16, 'M').unwrap();
        assert_eq!(mods, ModifierSet::CTRL);
    }

    #[test]
    fn decode_rejects_unknown_final_char() {
        assert_eq!(
            decode_mouse_button(0, 'X'),
            Err(InputParseError::InvalidFinalChar { final_char: 'X' })
        );
    }

    #[test]
    fn scroll_ignores_final_char() {
        let (action, _, _) = decode_mouse_button(64, 'X').unwrap();
        assert_eq!(action, MouseAction::ScrollUp);
    }

    #[test_case(b"0;10;20M" ; "missing prefix")]
    #[test_case(b"<0;10M" ; "two fields")]
    #[test_case(b"<0;10;20;30M" ; "four fields")]
    #[test_case(b"<0;x;20M" ; "non numeric")]
    #[test_case(b"<0;;20M" ; "empty field")]
    #[test_case(b"<-1;10;20M" ; "negative button")]
    #[test_case(b"<0;-2147483648;1M" ; "x below i32 range after shift")]
    #[test_case(b"<0;1;-2147483648M" ; "y below i32 range after shift")]
    #[test_case(b"<0;2147483648;1M" ; "x above i32 range")]
    #[test_case(b"" ; "empty")]
    fn parse_rejects_malformed(wire: &[u8]) {
        assert!(matches!(
            MouseReport::parse(wire),
            Err(InputParseError::InvalidArgument { .. })
        ));
    }
}
