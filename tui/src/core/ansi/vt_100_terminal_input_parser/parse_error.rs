// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors produced while turning input bytes into keys and mouse reports. See
//! [`InputParseError`] and [`DecodeError`].

/// Errors from the CSI parser and the SGR mouse parser.
///
/// | Variant              | Raised by                          | Typical cause                                   |
/// | :------------------- | :--------------------------------- | :---------------------------------------------- |
/// | [`InvalidSequence`]  | [`CsiRecord::parse()`]             | Bad terminator, misplaced `;`, modifier not 1-8 |
/// | [`InvalidFinalChar`] | [`decode_mouse_button()`]          | Mouse report not terminated by `M` or `m`       |
/// | [`InvalidArgument`]  | [`MouseReport::parse()`], key maps | Wrong field count, non-numeric field, no `<`    |
///
/// [`InvalidSequence`]: Self::InvalidSequence
/// [`InvalidFinalChar`]: Self::InvalidFinalChar
/// [`InvalidArgument`]: Self::InvalidArgument
/// [`CsiRecord::parse()`]: super::CsiRecord::parse
/// [`decode_mouse_button()`]: super::decode_mouse_button
/// [`MouseReport::parse()`]: super::MouseReport::parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum InputParseError {
    #[error("Malformed CSI sequence {sequence:?}: {reason}")]
    #[diagnostic(
        code(r3bl_term_input::parse::invalid_sequence),
        help("The terminal sent a control sequence this decoder does not understand.")
    )]
    InvalidSequence {
        sequence: String,
        reason: &'static str,
    },

    #[error("Mouse report terminated by {final_char:?}, expected 'M' or 'm'")]
    #[diagnostic(code(r3bl_term_input::parse::invalid_final_char))]
    InvalidFinalChar { final_char: char },

    #[error("Invalid argument: {reason}")]
    #[diagnostic(code(r3bl_term_input::parse::invalid_argument))]
    InvalidArgument { reason: String },
}

impl InputParseError {
    pub(crate) fn invalid_sequence(sequence: &[u8], reason: &'static str) -> Self {
        Self::InvalidSequence {
            sequence: String::from_utf8_lossy(sequence).into_owned(),
            reason,
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Errors from [`Decoder::decode()`].
///
/// [`Decoder::decode()`]: super::Decoder::decode
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] InputParseError),

    #[error("Failed to read from the input byte source")]
    #[diagnostic(code(r3bl_term_input::decode::io))]
    Io(#[from] std::io::Error),

    #[error("Input closed in the middle of an escape sequence")]
    #[diagnostic(code(r3bl_term_input::decode::unexpected_eof))]
    UnexpectedEof,
}
