// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH

use super::{TerminalEvent, TerminalEventSender};
use crate::tui::DEBUG_TUI_SHOW_INPUT_PIPELINE;
use signal_hook::{consts::SIGWINCH, iterator::{Handle, Signals}};
use std::thread::JoinHandle;

/// Forwards [`SIGWINCH`] (terminal resize) into the event channel as
/// [`TerminalEvent::Resize`].
///
/// Each watcher is an owned value tied to one channel, there is no process-wide list of
/// terminals. Call [`Self::unregister()`] or drop it to stop watching: the signal
/// iterator is closed and the watcher thread is joined.
///
/// [`SIGWINCH`]: signal_hook::consts::SIGWINCH
#[derive(Debug)]
pub struct ResizeWatcher {
    handle: Handle,
    join_handle: Option<JoinHandle<()>>,
}

impl ResizeWatcher {
    /// # Errors
    ///
    /// - The signal handler can't be installed.
    /// - The OS refused to spawn the thread.
    pub fn register(sender: TerminalEventSender) -> std::io::Result<Self> {
        let mut signals = Signals::new([SIGWINCH])?;
        let handle = signals.handle();

        let join_handle = std::thread::Builder::new()
            .name("resize-watcher".into())
            .spawn(move || {
                // Ends once the handle is closed.
                for signal in signals.forever() {
                    if signal != SIGWINCH {
                        continue;
                    }
                    DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                        tracing::debug!(message = "resize-watcher: SIGWINCH received");
                    });
                    if sender.send(TerminalEvent::Resize).is_err() {
                        // Receiver dropped - exit gracefully.
                        break;
                    }
                }
            })?;

        Ok(Self {
            handle,
            join_handle: Some(join_handle),
        })
    }

    #[must_use]
    pub fn is_registered(&self) -> bool { self.join_handle.is_some() }

    /// Stop watching. Safe to call more than once.
    pub fn unregister(&mut self) {
        self.handle.close();
        if let Some(join_handle) = self.join_handle.take()
            && join_handle.join().is_err()
        {
            tracing::error!(message = "resize-watcher: thread panicked");
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) { self.unregister(); }
}
