// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Low level building blocks that don't know about controls or the event loop: the input
//! byte decoder, terminal I/O devices, logging and error report setup.

// Connect to source file.
pub mod ansi;
pub mod common;
pub mod log;
pub mod terminal_io;

// Re-export.
pub use ansi::*;
pub use common::*;
pub use log::*;
pub use terminal_io::*;
