// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the input pipeline: decoder, dispatch, reader
/// thread, resize watcher and event loop.
pub const DEBUG_TUI_SHOW_INPUT_PIPELINE: bool = false;

// Attach sources.
pub mod control_tree;
pub mod terminal_window;

// Re-export.
pub use control_tree::*;
pub use terminal_window::*;
