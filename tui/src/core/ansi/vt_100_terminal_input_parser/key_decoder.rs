// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte-at-a-time key decoder. See [`Decoder`] docs.

use super::{CsiRecord, DecodeError, InputParseError, Key, KeyCode, MouseReport};
use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ARROW_DOWN_FINAL, ARROW_LEFT_FINAL,
            ARROW_RIGHT_FINAL, ARROW_UP_FINAL, ASCII_CR, ASCII_HT, ASCII_LF, ByteSource,
            CSI_FINAL_BYTE_FIRST, CSI_FINAL_BYTE_LAST, CTRL_CHORD_FIRST, CTRL_CHORD_LAST,
            DEBUG_TUI_SHOW_INPUT_PIPELINE, MAX_CSI_SEQUENCE_LEN, SGR_MOUSE_PREFIX,
            SGR_MOUSE_PRESS_FINAL, SGR_MOUSE_RELEASE_FINAL};
use smallvec::SmallVec;

/// Where the decoder is inside an escape sequence.
///
/// Only [`AtStart`] and [`SawEscape`] survive between calls to [`Decoder::decode()`].
/// [`SawEscapeBracket`] is always resolved within the call that entered it.
///
/// [`AtStart`]: Self::AtStart
/// [`SawEscape`]: Self::SawEscape
/// [`SawEscapeBracket`]: Self::SawEscapeBracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    AtStart,
    /// An `ESC` was consumed and the next byte belongs to it.
    SawEscape,
    /// `ESC [` was consumed.
    SawEscapeBracket,
}

/// Turns a blocking byte stream into [`Key`]s, one key per [`decode()`] call.
///
/// # ESC ambiguity
///
/// There are no timeouts here: reads block indefinitely. An `ESC` byte is therefore
/// always treated as the start of something, and the following byte decides:
///
/// | Bytes           | Result                                                       |
/// | :-------------- | :----------------------------------------------------------- |
/// | `ESC ESC`       | [`KeyCode::Escape`], and the second `ESC` stays pending      |
/// | `ESC [ [`       | Alt+`[`                                                      |
/// | `ESC [ ESC`     | Alt+`[`                                                      |
/// | `ESC [ A..D`    | Arrow key, no modifiers                                      |
/// | `ESC [ ... fin` | CSI sequence (or SGR mouse report if `fin` is `M` / `m`)     |
/// | `ESC x`         | Alt+`x`                                                      |
///
/// So the user has to press Escape twice to get a literal Escape key. The pending second
/// `ESC` is kept in [`DecoderState::SawEscape`], which means the byte read by the next
/// call is interpreted as the byte following an `ESC`.
///
/// # Mouse reports
///
/// A complete SGR mouse report is handed to the `on_mouse` sink passed to
/// [`decode()`], and the call returns the [`KeyCode::Mouse`] sentinel.
///
/// # Errors
///
/// Malformed sequences come back as [`DecodeError::Parse`]. The decoder is always back in
/// [`DecoderState::AtStart`] after an error, so the caller can log it and keep going.
///
/// [`decode()`]: Self::decode
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: DecoderState,
    raw_mode: bool,
}

impl Decoder {
    #[must_use]
    pub fn new(raw_mode: bool) -> Self {
        Self {
            state: DecoderState::AtStart,
            raw_mode,
        }
    }

    #[must_use]
    pub fn state(&self) -> DecoderState { self.state }

    #[must_use]
    pub fn raw_mode(&self) -> bool { self.raw_mode }

    pub fn set_raw_mode(&mut self, raw_mode: bool) { self.raw_mode = raw_mode; }

    /// Read bytes from `source` until one key is complete.
    ///
    /// Returns `Ok(None)` when the source is closed before the first byte of a key.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Parse`] for malformed CSI sequences or mouse reports.
    /// - [`DecodeError::Io`] if the source fails.
    /// - [`DecodeError::UnexpectedEof`] if the source closes inside a CSI sequence.
    pub fn decode(
        &mut self,
        source: &mut impl ByteSource,
        on_mouse: &mut impl FnMut(MouseReport),
    ) -> Result<Option<Key>, DecodeError> {
        if self.raw_mode {
            return Ok(source.read_byte()?.map(|byte| Key::plain(KeyCode::from_byte(byte))));
        }

        loop {
            match self.state {
                DecoderState::AtStart => {
                    let Some(byte) = source.read_byte()? else {
                        return Ok(None);
                    };
                    if byte == ANSI_ESC {
                        self.state = DecoderState::SawEscape;
                    } else {
                        return Ok(Some(classify_plain_byte(byte)));
                    }
                }

                DecoderState::SawEscape => {
                    let Some(byte) = self.read_or_reset(source)? else {
                        // Closed right after ESC: that ESC was a key press.
                        return Ok(Some(Key::plain(KeyCode::Escape)));
                    };
                    match byte {
                        // The second ESC stays pending for the next call.
                        ANSI_ESC => return Ok(Some(Key::plain(KeyCode::Escape))),
                        ANSI_CSI_BRACKET => self.state = DecoderState::SawEscapeBracket,
                        other => {
                            self.state = DecoderState::AtStart;
                            return Ok(Some(Key::alt(KeyCode::from_byte(other))));
                        }
                    }
                }

                DecoderState::SawEscapeBracket => {
                    self.state = DecoderState::AtStart;
                    let Some(byte) = source.read_byte()? else {
                        return Ok(Some(Key::alt('[')));
                    };
                    return match byte {
                        ANSI_CSI_BRACKET | ANSI_ESC => Ok(Some(Key::alt('['))),
                        ARROW_UP_FINAL => Ok(Some(Key::plain(KeyCode::Up))),
                        ARROW_DOWN_FINAL => Ok(Some(Key::plain(KeyCode::Down))),
                        ARROW_RIGHT_FINAL => Ok(Some(Key::plain(KeyCode::Right))),
                        ARROW_LEFT_FINAL => Ok(Some(Key::plain(KeyCode::Left))),
                        first => decode_csi_body(first, source, on_mouse).map(Some),
                    };
                }
            }
        }
    }

    fn read_or_reset(
        &mut self,
        source: &mut impl ByteSource,
    ) -> Result<Option<u8>, DecodeError> {
        match source.read_byte() {
            Ok(Some(byte)) => Ok(Some(byte)),
            Ok(None) => {
                self.state = DecoderState::AtStart;
                Ok(None)
            }
            Err(error) => {
                self.state = DecoderState::AtStart;
                Err(error.into())
            }
        }
    }
}

fn classify_plain_byte(byte: u8) -> Key {
    match byte {
        ASCII_HT => Key::plain(KeyCode::Tab),
        ASCII_LF => Key::plain(KeyCode::Enter),
        ASCII_CR => Key::plain(KeyCode::CarriageReturn),
        CTRL_CHORD_FIRST..=CTRL_CHORD_LAST => {
            Key::ctrl(char::from(b'a' + byte - CTRL_CHORD_FIRST))
        }
        other => Key::plain(KeyCode::from_byte(other)),
    }
}

fn is_csi_final_byte(byte: u8) -> bool {
    (CSI_FINAL_BYTE_FIRST..=CSI_FINAL_BYTE_LAST).contains(&byte)
}

/// Collect the CSI body starting with `first` up to and including the final byte, then
/// turn it into a key, or a mouse report for the sink.
fn decode_csi_body(
    first: u8,
    source: &mut impl ByteSource,
    on_mouse: &mut impl FnMut(MouseReport),
) -> Result<Key, DecodeError> {
    let mut sequence: SmallVec<[u8; 16]> = SmallVec::new();
    sequence.push(first);

    while !sequence.last().copied().is_some_and(is_csi_final_byte) {
        if sequence.len() >= MAX_CSI_SEQUENCE_LEN {
            return Err(InputParseError::invalid_sequence(
                &sequence,
                "no final byte within the length limit",
            )
            .into());
        }
        let byte = source.read_byte()?.ok_or(DecodeError::UnexpectedEof)?;
        sequence.push(byte);
    }

    DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
        tracing::debug!(
            message = "key-decoder: CSI sequence",
            sequence = ?String::from_utf8_lossy(&sequence)
        );
    });

    match sequence.last().copied() {
        Some(SGR_MOUSE_PRESS_FINAL | SGR_MOUSE_RELEASE_FINAL) => {
            if sequence.first() != Some(&SGR_MOUSE_PREFIX) {
                return Err(InputParseError::invalid_argument(
                    "mouse report must start with '<'",
                )
                .into());
            }
            on_mouse(MouseReport::parse(&sequence)?);
            Ok(Key::mouse_sentinel())
        }
        _ => Ok(CsiRecord::parse(&sequence)?.to_key()?),
    }
}



#[cfg(test)]
mod tests_escape {
    use super::test_fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arrow_up_consumes_three_bytes_and_leaves_clean_state() {
        let mut decoder = Decoder::default();
        let mut source = SliceByteSource::new(b"\x1b[Ax");
        let key = decoder.decode(&mut source, &mut |_| {}).unwrap();
        assert_eq!(key, Some(Key::plain(KeyCode::Up)));
        assert_eq!(source.position(), 3);
        assert_eq!(decoder.state(), DecoderState::AtStart);

        let key = decoder.decode(&mut source, &mut |_| {}).unwrap();
        assert_eq!(key, Some(Key::plain('x')));
    }

    #[test]
    fn double_escape_is_escape_key() {
        let mut decoder = Decoder::default();
        let mut source = SliceByteSource::new(b"\x1b\x1b");
        let key = decoder.decode(&mut source, &mut |_| {}).unwrap();
        assert_eq!(key, Some(Key::plain(KeyCode::Escape)));
        assert_eq!(decoder.state(), DecoderState::SawEscape);
    }

    #[test]
    fn pending_escape_starts_next_sequence() {
        let mut decoder = Decoder::default();
        let (keys, _) = decode_all(&mut decoder, b"\x1b\x1b[B");
        assert_eq!(
            keys,
            vec![Ok(Key::plain(KeyCode::Escape)), Ok(Key::plain(KeyCode::Down))]
        );
    }

    #[test]
    fn pending_escape_turns_next_byte_into_alt_chord() {
        let mut decoder = Decoder::default();
        let (keys, _) = decode_all(&mut decoder, b"\x1b\x1bj");
        assert_eq!(keys, vec![Ok(Key::plain(KeyCode::Escape)), Ok(Key::alt('j'))]);
    }

    #[test]
    fn alt_chord() {
        assert_eq!(decode_one(b"\x1bx"), Key::alt('x'));
    }

    #[test]
    fn alt_bracket_via_double_bracket() {
        let mut decoder = Decoder::default();
        let (keys, _) = decode_all(&mut decoder, b"\x1b[[a");
        assert_eq!(keys, vec![Ok(Key::alt('[')), Ok(Key::plain('a'))]);
    }

    #[test]
    fn alt_bracket_via_eaten_escape_clears_pending_escape() {
        let mut decoder = Decoder::default();
        let mut source = SliceByteSource::new(b"\x1b[\x1ba");
        let key = decoder.decode(&mut source, &mut |_| {}).unwrap();
        assert_eq!(key, Some(Key::alt('[')));
        assert_eq!(decoder.state(), DecoderState::AtStart);
        let key = decoder.decode(&mut source, &mut |_| {}).unwrap();
        assert_eq!(key, Some(Key::plain('a')));
    }

    #[test]
    fn lone_escape_before_eof() {
        assert_eq!(decode_one(b"\x1b"), Key::plain(KeyCode::Escape));
    }

    #[test]
    fn eof_inside_csi() {
        let mut source = SliceByteSource::new(b"\x1b[1;5");
        let result = Decoder::default().decode(&mut source, &mut |_| {});
        assert!(matches!(result, Err(DecodeError::UnexpectedEof)));
    }
}
