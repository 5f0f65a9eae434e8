// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ANSI/VT100 input sequence constants.
//!
//! This module contains the byte values that the key decoder and the CSI / SGR mouse
//! parsers match on, organized by functional category.
//!
//! # ANSI Input Sequence Format
//!
//! Input sequences follow the CSI (Control Sequence Introducer) format:
//! - `CSI` = ESC [  (0x1B 0x5B)
//! - CSI-u: `CSI <codepoint> ; <modifier> u`
//! - CSI-special: `CSI <n> ~` or `CSI <n> ; <modifier> ~`
//! - CSI-really-special: `CSI <final>` or `CSI 1 ; <modifier> <final>`
//! - SGR mouse: `CSI < <button> ; <col> ; <row> M|m`
//!
//! ## Modifiers
//! The modifier parameter is `1 + bitfield`, where bitfield is
//! Shift(1) | Alt(2) | Ctrl(4). So `1` means "no modifiers" and `8` means all three.

// ==================== ANSI Sequence Components ====================

/// ESC byte (27 in decimal, 0x1B in hex)
pub const ANSI_ESC: u8 = 0x1B;

/// CSI bracket byte: `[` (91 in decimal, 0x5B in hex)
pub const ANSI_CSI_BRACKET: u8 = 0x5B;

/// Parameter separator byte: `;` (59 in decimal, 0x3B in hex)
pub const ANSI_PARAM_SEPARATOR: u8 = b';';

/// Function key terminator: `~` (126 in decimal, 0x7E in hex)
pub const ANSI_FUNCTION_KEY_TERMINATOR: u8 = b'~';

/// CSI-u terminator: `u`
pub const CSI_U_TERMINATOR: u8 = b'u';

/// First byte of the CSI final byte range `[0x40, 0x7E]`.
pub const CSI_FINAL_BYTE_FIRST: u8 = 0x40;

/// Last byte of the CSI final byte range `[0x40, 0x7E]`.
pub const CSI_FINAL_BYTE_LAST: u8 = 0x7E;

/// Upper bound on the bytes collected between `CSI` and its final byte. Real terminals
/// never come close to this; anything longer is treated as garbage.
pub const MAX_CSI_SEQUENCE_LEN: usize = 64;

// ==================== Arrow Keys (CSI A/B/C/D) ====================

/// CSI A: Up arrow key final byte
pub const ARROW_UP_FINAL: u8 = b'A';

/// CSI B: Down arrow key final byte
pub const ARROW_DOWN_FINAL: u8 = b'B';

/// CSI C: Right arrow key final byte
pub const ARROW_RIGHT_FINAL: u8 = b'C';

/// CSI D: Left arrow key final byte
pub const ARROW_LEFT_FINAL: u8 = b'D';

// ==================== Navigation (CSI H/F) ====================

/// CSI H: Home
pub const HOME_FINAL: u8 = b'H';

/// CSI F: End
pub const END_FINAL: u8 = b'F';

// ==================== Function Keys (CSI P/Q/R/S) ====================

pub const F1_FINAL: u8 = b'P';
pub const F2_FINAL: u8 = b'Q';
pub const F3_FINAL: u8 = b'R';
pub const F4_FINAL: u8 = b'S';

// ==================== Tab Keys ====================

/// CSI Z: Back tab (Shift+Tab)
pub const BACK_TAB_FINAL: u8 = b'Z';

// ==================== Control Characters ====================

/// Horizontal tab (Ctrl+I)
pub const ASCII_HT: u8 = 0x09;

/// Line feed (Ctrl+J)
pub const ASCII_LF: u8 = 0x0A;

/// Carriage return (Ctrl+M). Raw mode Enter sends this.
pub const ASCII_CR: u8 = 0x0D;

/// Delete. Historical quirk: the Backspace key sends DEL, not BS.
pub const ASCII_DEL: u8 = 0x7F;

/// Lowest byte that decodes as a Ctrl+letter chord (Ctrl+A).
pub const CTRL_CHORD_FIRST: u8 = 0x01;

/// Highest byte that decodes as a Ctrl+letter chord (Ctrl+Z).
pub const CTRL_CHORD_LAST: u8 = 0x1A;

// ==================== SGR Mouse ====================

/// SGR mouse parameter prefix: `<`
pub const SGR_MOUSE_PREFIX: u8 = b'<';

/// SGR mouse press final byte.
pub const SGR_MOUSE_PRESS_FINAL: u8 = b'M';

/// SGR mouse release final byte.
pub const SGR_MOUSE_RELEASE_FINAL: u8 = b'm';

/// Button bit: right button (otherwise left).
pub const SGR_BUTTON_RIGHT_MASK: u32 = 0x02;

/// Modifier bit: Shift.
pub const SGR_MOD_SHIFT_MASK: u32 = 0x04;

/// Modifier bit: Alt (Meta).
pub const SGR_MOD_ALT_MASK: u32 = 0x08;

/// Modifier bit: Ctrl.
pub const SGR_MOD_CTRL_MASK: u32 = 0x10;

/// Motion bit: pointer moved.
pub const SGR_MOTION_MASK: u32 = 0x20;

/// Scroll wheel bit.
pub const SGR_SCROLL_MASK: u32 = 0x40;

/// Low bit: selects scroll direction, or the button for motion reports.
pub const SGR_LOW_BIT_MASK: u32 = 0x01;
