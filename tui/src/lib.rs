// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH keyview

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]
// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # Terminal input pipeline
//!
//! This crate turns the raw bytes a terminal sends into structured [`Key`]s and
//! [`MouseReport`]s, and routes them through a tree of controls with focus, bubbling
//! and a terminal-level fallback.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [Data flow](#data-flow)
//! - [Decoding](#decoding)
//! - [Dispatch](#dispatch)
//! - [Threads](#threads)
//! - [Logging](#logging)
//! <!-- /TOC -->
//!
//! # Data flow
//!
//! ```text
//! bytes ──► Decoder ──► Key ─────────────┐
//!              │                          ├──► Terminal::send_key / send_mouse ──► ControlTree
//!              └──► MouseReport ──► DragState
//! ```
//!
//! # Decoding
//!
//! [`Decoder`] is a byte-at-a-time state machine over a blocking [`ByteSource`]. It
//! understands:
//! - plain bytes and `Ctrl+letter` chords,
//! - `ESC x` as Alt+`x`, and `ESC ESC` as a literal Escape,
//! - CSI-u (`ESC [ 97 ; 5 u`), CSI-special (`ESC [ 15 ~`), and the lettered finals
//!   (`ESC [ 1 ; 5 A`), see [`CsiRecord`],
//! - SGR mouse reports (`ESC [ < 0 ; 10 ; 20 M`), see [`MouseReport`].
//!
//! Malformed sequences come back as errors and never poison the stream.
//!
//! # Dispatch
//!
//! [`Terminal`] owns a [`ControlTree`]. Keys go to the focused control (or the root),
//! mouse reports to the deepest control under the pointer. Unhandled events bubble up
//! the parent chain. Keys the root declines reach the terminal itself, which knows
//! `Ctrl+L` (redraw) and `Ctrl+Y` (log the control tree).
//!
//! # Threads
//!
//! An [`InputReaderThread`] owns the byte source and decodes, a [`ResizeWatcher`]
//! forwards `SIGWINCH`, and both send [`TerminalEvent`]s to [`run_event_loop()`],
//! which is the only code that touches the tree. See the `keyview` binary for the whole
//! thing wired to a real terminal.
//!
//! # Logging
//!
//! Everything logs through [`tracing`]. Use [`try_initialize_logging_global()`] with a
//! [`TracingConfig`] to send it to a file, stdout or stderr. Set
//! [`tui::DEBUG_TUI_SHOW_INPUT_PIPELINE`] to `true` to see every decoded sequence and
//! dispatch decision.

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod tui;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use core::*;
pub use tui::*;
