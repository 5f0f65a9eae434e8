// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`Terminal`] and everything around it: dispatch through the control tree, drag
//! synthesis, the input reader thread, the resize watcher and the event loop that ties
//! them together.
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │ InputReaderThread    │   │ ResizeWatcher        │
//! │ ByteSource → Decoder │   │ SIGWINCH             │
//! └──────────┬───────────┘   └──────────┬───────────┘
//!            │ TerminalEvent            │ TerminalEvent::Resize
//!            └────────────┬─────────────┘
//!                         ▼ (unbounded mpsc)
//!               run_event_loop(&mut Terminal)
//!                         │
//!                         ▼
//!      Terminal::handle_event → send_key / send_mouse / redraw
//! ```

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach sources.
mod dispatch;
mod dispatch_error;
mod drag_state;
mod event_loop;
mod event_types;
mod input_reader_thread;
mod painter;
mod terminal;
mod terminal_config;
mod terminal_window_type_aliases;

#[cfg(unix)]
mod resize_watcher;

// Re-export.
pub use dispatch_error::*;
pub use drag_state::*;
pub use event_loop::*;
pub use event_types::*;
pub use input_reader_thread::*;
pub use painter::*;
pub use terminal::*;
pub use terminal_config::*;
pub use terminal_window_type_aliases::*;

#[cfg(unix)]
pub use resize_watcher::*;
