// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Automated Parser Validation Tests
//!
//! These tests use **literal ANSI sequences** captured from interactive terminals (with
//! `cat -v` or similar tools) and check what the [`Decoder`] makes of them.
//!
//! ## Key VT-100 Behaviors Validated
//!
//! 1. **Coordinate System**: SGR mouse reports are 1-based (top-left = 1,1), reports
//!    come out 0-based.
//! 2. **Modifier Encoding**: CSI parameter = 1 + bitfield (Shift=1, Alt=2, Ctrl=4).
//! 3. **Ctrl Modifier**: Parameter 5 = Ctrl (not 4), confirmed with `ESC[1;5A`.
//! 4. **Raw mode Enter**: the Enter key sends CR (`0x0D`), not LF.
//!
//! [`Decoder`]: super::super::Decoder

use crate::{Decoder, Key, KeyCode, ModifierSet, MouseAction, MouseButton, MouseReport,
            SliceByteSource};
use pretty_assertions::assert_eq;

/// What a whole byte stream decodes into. Every error collapses to [`Decoded::Error`] so
/// that a stream with a bad sequence in the middle can still be compared as a whole.
#[derive(Debug, PartialEq)]
enum Decoded {
    Key(Key),
    Mouse(MouseReport),
    Error,
}

fn decode_stream(bytes: &[u8]) -> Vec<Decoded> {
    let mut decoder = Decoder::default();
    let mut source = SliceByteSource::new(bytes);
    let mut acc = vec![];
    loop {
        let mut report = None;
        let result = decoder.decode(&mut source, &mut |it| report = Some(it));
        match result {
            Ok(Some(key)) if key.is_mouse_sentinel() => {
                acc.push(Decoded::Mouse(report.expect("sentinel without report")));
            }
            Ok(Some(key)) => acc.push(Decoded::Key(key)),
            Ok(None) => break,
            Err(_) => acc.push(Decoded::Error),
        }
    }
    acc
}

fn mouse(action: MouseAction, button: MouseButton, x: i32, y: i32) -> Decoded {
    Decoded::Mouse(MouseReport {
        action,
        button,
        mods: ModifierSet::empty(),
        x,
        y,
    })
}

#[test]
fn test_mouse_click_top_left_corner() {
    // Observed in Alacritty: click at row 1, column 1.
    assert_eq!(
        decode_stream(b"\x1b[<0;1;1M\x1b[<0;1;1m"),
        vec![
            mouse(MouseAction::Down, MouseButton::Left, 0, 0),
            mouse(MouseAction::Up, MouseButton::Left, 0, 0),
        ]
    );
}

#[test]
fn test_mouse_click_middle_of_screen() {
    assert_eq!(
        decode_stream(b"\x1b[<0;61;20M"),
        vec![mouse(MouseAction::Down, MouseButton::Left, 60, 19)]
    );
}

#[test]
fn test_mouse_scroll_wheel() {
    assert_eq!(
        decode_stream(b"\x1b[<64;40;12M\x1b[<65;40;12M"),
        vec![
            mouse(MouseAction::ScrollUp, MouseButton::Left, 39, 11),
            mouse(MouseAction::ScrollDown, MouseButton::Left, 39, 11),
        ]
    );
}

#[test]
fn test_mouse_ctrl_click() {
    let decoded = decode_stream(b"\x1b[<16;5;5M");
    assert_eq!(
        decoded,
        vec![Decoded::Mouse(MouseReport {
            action: MouseAction::Down,
            button: MouseButton::Left,
            mods: ModifierSet::CTRL,
            x: 4,
            y: 4,
        })]
    );
}

#[test]
fn test_arrow_keys_plain_and_modified() {
    assert_eq!(
        decode_stream(b"\x1b[A\x1b[B\x1b[1;5A\x1b[1;2D\x1b[1;3C"),
        vec![
            Decoded::Key(Key::plain(KeyCode::Up)),
            Decoded::Key(Key::plain(KeyCode::Down)),
            Decoded::Key(Key::ctrl(KeyCode::Up)),
            Decoded::Key(Key::new(KeyCode::Left, ModifierSet::SHIFT)),
            Decoded::Key(Key::alt(KeyCode::Right)),
        ]
    );
}

#[test]
fn test_function_keys() {
    assert_eq!(
        decode_stream(b"\x1b[P\x1b[15~\x1b[17~\x1b[24~\x1b[15;5~"),
        vec![
            Decoded::Key(Key::plain(KeyCode::Function(1))),
            Decoded::Key(Key::plain(KeyCode::Function(5))),
            Decoded::Key(Key::plain(KeyCode::Function(6))),
            Decoded::Key(Key::plain(KeyCode::Function(12))),
            Decoded::Key(Key::ctrl(KeyCode::Function(5))),
        ]
    );
}

#[test]
fn test_special_keys() {
    assert_eq!(
        decode_stream(b"\x1b[2~\x1b[3~\x1b[5~\x1b[6~\x1b[H\x1b[F\x1b[Z"),
        vec![
            Decoded::Key(Key::plain(KeyCode::Insert)),
            Decoded::Key(Key::plain(KeyCode::Delete)),
            Decoded::Key(Key::plain(KeyCode::PageUp)),
            Decoded::Key(Key::plain(KeyCode::PageDown)),
            Decoded::Key(Key::plain(KeyCode::Home)),
            Decoded::Key(Key::plain(KeyCode::End)),
            Decoded::Key(Key::new(KeyCode::Tab, ModifierSet::SHIFT)),
        ]
    );
}

#[test]
fn test_typed_text_with_enter() {
    assert_eq!(
        decode_stream(b"hi\r"),
        vec![
            Decoded::Key(Key::plain('h')),
            Decoded::Key(Key::plain('i')),
            Decoded::Key(Key::plain(KeyCode::CarriageReturn)),
        ]
    );
}

#[test]
fn test_csi_u_with_modifiers() {
    // Kitty style CSI u: Ctrl+Shift+a and Alt+Enter.
    assert_eq!(
        decode_stream(b"\x1b[97;6u\x1b[13;3u"),
        vec![
            Decoded::Key(Key::new('a', ModifierSet::CTRL | ModifierSet::SHIFT)),
            Decoded::Key(Key::alt(KeyCode::CarriageReturn)),
        ]
    );
}

#[test]
fn test_bad_sequence_in_the_middle_does_not_poison_the_stream() {
    assert_eq!(
        decode_stream(b"a\x1b[99~b\x1b[<0;x;1Mc"),
        vec![
            Decoded::Key(Key::plain('a')),
            Decoded::Error,
            Decoded::Key(Key::plain('b')),
            Decoded::Error,
            Decoded::Key(Key::plain('c')),
        ]
    );
}
