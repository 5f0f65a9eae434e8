// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach sources.
mod control;
mod control_tree_arena;
mod rect;

// Re-export.
pub use control::*;
pub use control_tree_arena::*;
pub use rect::*;
