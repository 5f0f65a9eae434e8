// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Continuation, DispatchError, Terminal, TerminalEventReceiver};
use crate::tui::DEBUG_TUI_SHOW_INPUT_PIPELINE;

/// Drains `receiver` and hands every event to [`Terminal::handle_event()`], on the
/// current task. This is the only place the control tree is touched while the input
/// and resize threads run, so nothing here needs a lock besides the output device's.
///
/// Returns when an event asks to stop (Ctrl+C, EOF, input failure) or every sender is
/// gone.
///
/// # Errors
///
/// [`DispatchError::FocusInvariantViolation`], which ends the loop.
pub async fn run_event_loop(
    terminal: &mut Terminal,
    receiver: &mut TerminalEventReceiver,
) -> Result<(), DispatchError> {
    while let Some(event) = receiver.recv().await {
        match terminal.handle_event(event)? {
            Continuation::Continue => {}
            Continuation::Stop => {
                DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                    tracing::debug!(message = "event-loop: stop requested", ?event);
                });
                break;
            }
        }
    }
    Ok(())
}
