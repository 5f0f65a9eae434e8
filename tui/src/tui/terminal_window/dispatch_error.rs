// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ControlId;

/// Errors from routing an event through the control tree.
///
/// Everything else that can go wrong during dispatch (no root, no control under the
/// mouse, a bubble chain that stops at a detached control) is a normal "nobody handled
/// it" outcome and comes back as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum DispatchError {
    #[error("Focused control {id} is not in the control tree")]
    #[diagnostic(
        code(r3bl_term_input::dispatch::focus_invariant_violation),
        help("Move focus with Terminal::focus() before removing the focused control.")
    )]
    FocusInvariantViolation { id: ControlId },
}
