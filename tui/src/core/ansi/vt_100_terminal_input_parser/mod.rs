// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT-100 Terminal Input Parsing Layer
//!
//! This module turns raw terminal input bytes into [`Key`]s and [`MouseReport`]s. It
//! knows nothing about threads, channels, or controls, it only needs something that
//! implements [`ByteSource`].
//!
//! ## Layered Architecture
//!
//! ```text
//! Raw Terminal Input (stdin)
//!    │
//! ┌──▼───────────────────────────────────────┐
//! │  InputReaderThread (blocking I/O)        │  ← tui/src/tui/terminal_window/
//! │  • Owns the ByteSource and a Decoder     │
//! │  • Logs parse errors and keeps going     │
//! │  • Sends TerminalEvents over a channel   │
//! └──────────────────────────────────────────┘
//!    │ (delegate parsing)
//! ┌──▼───────────────────────────────────────┐
//! │  vt_100_terminal_input_parser (pure)     │  ← tui/src/core/ansi/
//! │  • Decoder (ESC state machine)           │     vt_100_terminal_input_parser/
//! │  • CsiRecord::parse(), is_csiu()         │
//! │  • MouseReport::parse()                  │
//! └──────────────────────────────────────────┘
//!    │
//!    ▼
//! Key | MouseReport  →  Terminal::send_key() / Terminal::send_mouse()
//! ```
//!
//! ## Module Responsibilities
//!
//! ### `key_decoder.rs`
//! - Byte-at-a-time state machine, resolves `ESC` ambiguity without timeouts
//! - Plain bytes: Tab, Enter, carriage return, Ctrl+letter chords
//! - Collects CSI bodies and routes them to the CSI parser or the mouse parser
//!
//! ### `csi.rs`
//! - CSI-u, CSI-special (`~`) and CSI-really-special (`A`..`Z` finals) grammars
//! - Modifier parameter decoding, key mapping tables
//!
//! ### `mouse.rs`
//! - SGR mouse protocol: `CSI < Cb ; Cx ; Cy M/m`
//! - Button, action and modifier bits, 1-based to 0-based coordinates
//!
//! # Testing strategy
//!
//! Each module carries unit tests next to the code. `validation_tests` drives hardcoded
//! byte sequences, as a real terminal sends them, through the whole decoder.
//!
//! [`ByteSource`]: crate::ByteSource

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Conditionally public modules for documentation and testing.
// In test/doc builds: fully public (for rustdoc and test access)
// In release builds: private (encapsulated implementation details)
#[cfg(any(test, doc))]
pub mod csi;
#[cfg(not(any(test, doc)))]
mod csi;

#[cfg(any(test, doc))]
pub mod key_decoder;
#[cfg(not(any(test, doc)))]
mod key_decoder;

#[cfg(any(test, doc))]
pub mod mouse;
#[cfg(not(any(test, doc)))]
mod mouse;

#[cfg(any(test, doc))]
pub mod parse_error;
#[cfg(not(any(test, doc)))]
mod parse_error;

#[cfg(any(test, doc))]
pub mod types;
#[cfg(not(any(test, doc)))]
mod types;

// Re-export types for flat public API.
pub use csi::*;
pub use key_decoder::*;
pub use mouse::*;
pub use parse_error::*;
pub use types::*;

#[cfg(test)]
mod validation_tests;
