// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keyboard CSI sequence parsing.
//!
//! The key decoder collects the bytes between `ESC [` and the first final byte (inclusive)
//! and hands them to [`CsiRecord::parse()`]. Three shapes are understood:
//!
//! | Kind                         | Wire (after `ESC [`)         | Example                    |
//! | :--------------------------- | :--------------------------- | :------------------------- |
//! | [`CsiKind::U`]               | `<codepoint> ; <mod> u`      | `97;5u` → Ctrl+a           |
//! | [`CsiKind::Special`]         | `<n> ~` or `<n> ; <mod> ~`   | `5~` → Page Up             |
//! | [`CsiKind::ReallySpecial`]   | `<final>` or `1 ; <mod> <final>` | `1;3C` → Alt+Right     |
//!
//! `<mod>` is always a single digit `1..=8`, decoded by [`ModifierSet::from_csi_param()`].
//!
//! [`is_csiu()`] is a cheaper structural check used for classification. It does **not**
//! check the modifier digit range, so `is_csiu(b"42;0u")` is true while
//! `CsiRecord::parse(b"42;0u")` fails. Both behaviors are relied upon and tested.

use super::{InputParseError, Key, KeyCode, ModifierSet};
use crate::{ANSI_FUNCTION_KEY_TERMINATOR, ANSI_PARAM_SEPARATOR, ARROW_DOWN_FINAL,
            ARROW_LEFT_FINAL, ARROW_RIGHT_FINAL, ARROW_UP_FINAL, BACK_TAB_FINAL,
            CSI_U_TERMINATOR, END_FINAL, F1_FINAL, F2_FINAL, F3_FINAL, F4_FINAL,
            HOME_FINAL};

/// Which grammar a CSI record follows. Fully determined by the final byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiKind {
    /// `CSI <codepoint> ; <mod> u` (the "CSI u" extended keyboard encoding).
    U,
    /// `CSI <n> [; <mod>] ~`
    Special,
    /// `CSI [1 ; <mod>] {A,B,C,D,F,H,P,Q,R,S,Z}`
    ReallySpecial,
}

impl CsiKind {
    #[must_use]
    pub fn from_suffix(suffix: u8) -> Option<Self> {
        match suffix {
            CSI_U_TERMINATOR => Some(Self::U),
            ANSI_FUNCTION_KEY_TERMINATOR => Some(Self::Special),
            ARROW_UP_FINAL | ARROW_DOWN_FINAL | ARROW_RIGHT_FINAL | ARROW_LEFT_FINAL
            | END_FINAL | HOME_FINAL | F1_FINAL | F2_FINAL | F3_FINAL | F4_FINAL
            | BACK_TAB_FINAL => Some(Self::ReallySpecial),
            _ => None,
        }
    }
}

/// A validated keyboard CSI sequence.
///
/// `second` is the raw modifier parameter (`1..=8`, where `1` means none). Use
/// [`Self::modifiers()`] to decode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsiRecord {
    pub first: u32,
    pub second: u32,
    pub suffix: char,
    pub kind: CsiKind,
}

impl CsiRecord {
    /// Parse the bytes collected after `ESC [`, including the final byte.
    ///
    /// # Errors
    ///
    /// Returns [`InputParseError::InvalidSequence`] if the sequence is empty, its final
    /// byte is not one this parser knows, or its parameters don't match the grammar of
    /// its [`CsiKind`].
    pub fn parse(sequence: &[u8]) -> Result<Self, InputParseError> {
        let Some((&suffix, params)) = sequence.split_last() else {
            return Err(InputParseError::invalid_sequence(sequence, "empty sequence"));
        };

        let kind = CsiKind::from_suffix(suffix).ok_or_else(|| {
            InputParseError::invalid_sequence(sequence, "unknown final byte")
        })?;

        let (first, second) = match kind {
            CsiKind::U => parse_u_params(sequence, params)?,
            CsiKind::Special => parse_special_params(sequence, params)?,
            CsiKind::ReallySpecial => parse_really_special_params(sequence, params)?,
        };

        Ok(Self {
            first,
            second,
            suffix: char::from(suffix),
            kind,
        })
    }

    #[must_use]
    pub fn modifiers(&self) -> ModifierSet { ModifierSet::from_csi_param(self.second) }

    /// Map the record to the key it names, without applying [`Self::modifiers()`].
    /// The only key that carries modifiers of its own is back tab (`CSI Z`), which is
    /// Shift+Tab.
    ///
    /// # Errors
    ///
    /// Returns [`InputParseError::InvalidArgument`] when the number in a `~` or `u`
    /// sequence doesn't name a key.
    pub fn get_key(&self) -> Result<Key, InputParseError> {
        match self.kind {
            CsiKind::ReallySpecial => really_special_key(self.suffix).ok_or_else(|| {
                InputParseError::invalid_argument(format!(
                    "no key for CSI final {:?}",
                    self.suffix
                ))
            }),
            CsiKind::U => KeyCode::from_codepoint(self.first)
                .map(Key::plain)
                .ok_or_else(|| {
                    InputParseError::invalid_argument(format!(
                        "CSI u codepoint {} is not a character",
                        self.first
                    ))
                }),
            CsiKind::Special => special_key_code(self.first).map(Key::plain).ok_or_else(
                || {
                    InputParseError::invalid_argument(format!(
                        "no key for CSI {}~",
                        self.first
                    ))
                },
            ),
        }
    }

    /// [`Self::get_key()`] plus the record's modifiers. A key that already carries
    /// modifiers (Shift+Tab) keeps them as they are.
    ///
    /// # Errors
    ///
    /// See [`Self::get_key()`].
    pub fn to_key(&self) -> Result<Key, InputParseError> {
        let key = self.get_key()?;
        if key.mods.is_empty() {
            Ok(key.with_mods(self.modifiers()))
        } else {
            Ok(key)
        }
    }
}

/// Structural check for `<digits> ; <digits> u`. Unlike [`CsiRecord::parse()`] the
/// modifier is not range checked.
#[must_use]
pub fn is_csiu(sequence: &[u8]) -> bool {
    let Some((&CSI_U_TERMINATOR, params)) = sequence.split_last() else {
        return false;
    };
    let mut parts = params.split(|&byte| byte == ANSI_PARAM_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(codepoint), Some(modifier), None) => {
            is_all_digits(codepoint) && is_all_digits(modifier)
        }
        _ => false,
    }
}

fn is_all_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

/// `<n> ; <mod>`, checked at fixed offsets from the end, then `<n>` scanned backwards.
fn parse_u_params(sequence: &[u8], params: &[u8]) -> Result<(u32, u32), InputParseError> {
    let len = params.len();
    if len < 3 {
        return Err(InputParseError::invalid_sequence(sequence, "CSI u too short"));
    }
    if params[len - 2] != ANSI_PARAM_SEPARATOR {
        return Err(InputParseError::invalid_sequence(
            sequence,
            "expected ';' before the modifier",
        ));
    }
    let second = modifier_digit(params[len - 1]).ok_or_else(|| {
        InputParseError::invalid_sequence(sequence, "modifier must be 1-8")
    })?;
    let first = scan_number_backward(&params[..len - 2]).ok_or_else(|| {
        InputParseError::invalid_sequence(sequence, "codepoint is not a number")
    })?;
    Ok((first, second))
}

fn parse_special_params(
    sequence: &[u8],
    params: &[u8],
) -> Result<(u32, u32), InputParseError> {
    let (number, second) = match params.iter().position(|&b| b == ANSI_PARAM_SEPARATOR) {
        None => (params, 1),
        Some(pos) if pos + 1 == params.len() => {
            return Err(InputParseError::invalid_sequence(
                sequence,
                "missing number after ';'",
            ));
        }
        Some(pos) => {
            let modifier = &params[pos + 1..];
            let second = match modifier {
                [digit] => modifier_digit(*digit),
                _ => None,
            }
            .ok_or_else(|| {
                InputParseError::invalid_sequence(sequence, "modifier must be 1-8")
            })?;
            (&params[..pos], second)
        }
    };
    let first = scan_number_backward(number).ok_or_else(|| {
        InputParseError::invalid_sequence(sequence, "key number is not a number")
    })?;
    Ok((first, second))
}

fn parse_really_special_params(
    sequence: &[u8],
    params: &[u8],
) -> Result<(u32, u32), InputParseError> {
    match params {
        [] => Ok((1, 1)),
        [b'1', ANSI_PARAM_SEPARATOR, modifier] => modifier_digit(*modifier)
            .map(|second| (1, second))
            .ok_or_else(|| {
                InputParseError::invalid_sequence(sequence, "modifier must be 1-8")
            }),
        _ => Err(InputParseError::invalid_sequence(
            sequence,
            "expected a bare final byte or 1;<mod>",
        )),
    }
}

fn modifier_digit(byte: u8) -> Option<u32> {
    matches!(byte, b'1'..=b'8').then(|| u32::from(byte - b'0'))
}

/// Reads a decimal number from the last byte towards the first. Fails unless every
/// byte is a digit (the scan has to run off the front of the slice), the slice is
/// empty, or the value overflows.
fn scan_number_backward(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for (place, &byte) in digits.iter().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        let scale = 10_u32.checked_pow(u32::try_from(place).ok()?)?;
        value = value.checked_add(u32::from(byte - b'0').checked_mul(scale)?)?;
    }
    Some(value)
}

fn really_special_key(suffix: char) -> Option<Key> {
    let code = match u8::try_from(suffix).ok()? {
        ARROW_UP_FINAL => KeyCode::Up,
        ARROW_DOWN_FINAL => KeyCode::Down,
        ARROW_RIGHT_FINAL => KeyCode::Right,
        ARROW_LEFT_FINAL => KeyCode::Left,
        END_FINAL => KeyCode::End,
        HOME_FINAL => KeyCode::Home,
        F1_FINAL => KeyCode::Function(1),
        F2_FINAL => KeyCode::Function(2),
        F3_FINAL => KeyCode::Function(3),
        F4_FINAL => KeyCode::Function(4),
        BACK_TAB_FINAL => return Some(Key::new(KeyCode::Tab, ModifierSet::SHIFT)),
        _ => return None,
    };
    Some(Key::plain(code))
}

/// `CSI <n> ~` key numbers. Function key codes have gaps (16 and 22 are unused).
fn special_key_code(number: u32) -> Option<KeyCode> {
    let code = match number {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 | 147 => KeyCode::PageUp,
        6 | 148 => KeyCode::PageDown,
        11 => KeyCode::Function(1),
        12 => KeyCode::Function(2),
        13 => KeyCode::Function(3),
        14 => KeyCode::Function(4),
        15 => KeyCode::Function(5),
        17 => KeyCode::Function(6),
        18 => KeyCode::Function(7),
        19 => KeyCode::Function(8),
        20 => KeyCode::Function(9),
        21 => KeyCode::Function(10),
        23 => KeyCode::Function(11),
        24 => KeyCode::Function(12),
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests_is_csiu {
    use super::*;
    use test_case::test_case;

    #[test_case(b"1;1u", true)]
    #[test_case(b"97;5u", true)]
    #[test_case(b"42;0u", true ; "modifier range is not checked")]
    #[test_case(b"1;1a", false)]
    #[test_case(b";1u", false)]
    #[test_case(b"1;u", false)]
    #[test_case(b"1u", false)]
    #[test_case(b"1;2;3u", false)]
    #[test_case(b"", false)]
    fn structural_check(sequence: &[u8], expected: bool) {
        assert_eq!(is_csiu(sequence), expected);
    }

    #[test]
    fn structural_check_and_strict_parse_disagree_on_zero_modifier() {
        assert!(is_csiu(b"42;0u"));
        assert!(matches!(
            CsiRecord::parse(b"42;0u"),
            Err(InputParseError::InvalidSequence { .. })
        ));
    }
}


#[cfg(test)]
mod tests_get_key {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(b"A", Key::plain(KeyCode::Up))]
    #[test_case(b"B", Key::plain(KeyCode::Down))]
    #[test_case(b"C", Key::plain(KeyCode::Right))]
    #[test_case(b"D", Key::plain(KeyCode::Left))]
    #[test_case(b"F", Key::plain(KeyCode::End))]
    #[test_case(b"H", Key::plain(KeyCode::Home))]
    #[test_case(b"P", Key::plain(KeyCode::Function(1)))]
    #[test_case(b"S", Key::plain(KeyCode::Function(4)))]
    #[test_case(b"Z", Key::new(KeyCode::Tab, ModifierSet::SHIFT))]
    #[test_case(b"2~", Key::plain(KeyCode::Insert))]
    #[test_case(b"3~", Key::plain(KeyCode::Delete))]
    #[test_case(b"147~", Key::plain(KeyCode::PageUp))]
    #[test_case(b"148~", Key::plain(KeyCode::PageDown))]
    #[test_case(b"7~", Key::plain(KeyCode::Home))]
    #[test_case(b"8~", Key::plain(KeyCode::End))]
    #[test_case(b"15~", Key::plain(KeyCode::Function(5)))]
    #[test_case(b"17~", Key::plain(KeyCode::Function(6)))]
    #[test_case(b"24~", Key::plain(KeyCode::Function(12)))]
    #[test_case(b"97;1u", Key::plain('a'))]
    #[test_case(b"9;1u", Key::plain(KeyCode::Tab))]
    fn maps_to_key(sequence: &[u8], expected: Key) {
        let parsed = CsiRecord::parse(sequence).unwrap();
        assert_eq!(parsed.get_key().unwrap(), expected);
    }

    #[test_case(b"16~" ; "gap between F5 and F6")]
    #[test_case(b"22~" ; "gap between F10 and F11")]
    #[test_case(b"99~" ; "unassigned")]
    #[test_case(b"55296;1u" ; "surrogate codepoint")]
    fn unmapped(sequence: &[u8]) {
        let parsed = CsiRecord::parse(sequence).unwrap();
        assert!(matches!(
            parsed.get_key(),
            Err(InputParseError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn to_key_applies_modifiers() {
        let parsed = CsiRecord::parse(b"1;5A").unwrap();
        assert_eq!(parsed.to_key().unwrap(), Key::ctrl(KeyCode::Up));

        let parsed = CsiRecord::parse(b"97;7u").unwrap();
        assert_eq!(
            parsed.to_key().unwrap(),
            Key::new('a', ModifierSet::CTRL | ModifierSet::ALT)
        );
    }

    #[test]
    fn to_key_keeps_back_tab_shift() {
        let parsed = CsiRecord::parse(b"1;5Z").unwrap();
        assert_eq!(
            parsed.to_key().unwrap(),
            Key::new(KeyCode::Tab, ModifierSet::SHIFT)
        );
    }
}
