// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words EINTR

//! Dedicated thread that owns the blocking byte source.
//!
//! The thread only decodes. It never touches the control tree: every decoded key or
//! mouse report is sent over the channel to whoever runs [`run_event_loop()`].
//!
//! [`run_event_loop()`]: super::run_event_loop

use super::{TerminalEvent, TerminalEventReceiver, TerminalEventSender};
use crate::{ByteSource, DecodeError, Decoder, tui::DEBUG_TUI_SHOW_INPUT_PIPELINE};
use std::thread::JoinHandle;

/// Creates the channel shared by the [`InputReaderThread`], the [`ResizeWatcher`] and
/// the event loop.
///
/// [`ResizeWatcher`]: super::ResizeWatcher
#[must_use]
pub fn create_terminal_event_channel() -> (TerminalEventSender, TerminalEventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Decode the next event from `source`.
///
/// Returns `None` for input that is skipped: a malformed escape sequence (logged here)
/// or a mouse sentinel without a report. The decoder is ready for the next byte either
/// way.
pub fn read_terminal_event(
    decoder: &mut Decoder,
    source: &mut impl ByteSource,
) -> Option<TerminalEvent> {
    let mut maybe_report = None;
    let result = decoder.decode(source, &mut |report| maybe_report = Some(report));
    match result {
        Ok(Some(key)) if key.is_mouse_sentinel() => maybe_report.map(TerminalEvent::Mouse),
        Ok(Some(key)) => Some(TerminalEvent::Key(key)),
        Ok(None) => Some(TerminalEvent::Eof),
        Err(DecodeError::Io(error)) => Some(TerminalEvent::InputError(error.kind())),
        Err(error) => {
            tracing::warn!(message = "input-reader: skipping malformed input", error = %error);
            None
        }
    }
}

/// Handle to the reader thread.
///
/// The thread runs until:
/// - the source reaches EOF (sends [`TerminalEvent::Eof`]),
/// - the source fails (sends [`TerminalEvent::InputError`]),
/// - the receiver is dropped (the next send fails).
///
/// There is no way to interrupt a blocked read, so dropping this handle detaches the
/// thread rather than joining it. Use [`Self::join()`] when the source is known to end.
#[derive(Debug)]
pub struct InputReaderThread {
    join_handle: JoinHandle<()>,
}

impl InputReaderThread {
    /// # Errors
    ///
    /// The OS refused to spawn the thread.
    pub fn spawn(
        source: impl ByteSource + Send + 'static,
        decoder: Decoder,
        sender: TerminalEventSender,
    ) -> std::io::Result<Self> {
        let join_handle = std::thread::Builder::new()
            .name("input-reader".into())
            .spawn(move || input_reader_loop(source, decoder, &sender))?;
        Ok(Self { join_handle })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool { self.join_handle.is_finished() }

    /// Blocks until the thread exits.
    pub fn join(self) {
        if self.join_handle.join().is_err() {
            tracing::error!(message = "input-reader: thread panicked");
        }
    }
}

fn input_reader_loop(
    mut source: impl ByteSource,
    mut decoder: Decoder,
    sender: &TerminalEventSender,
) {
    loop {
        let Some(event) = read_terminal_event(&mut decoder, &mut source) else {
            continue;
        };

        let is_last = matches!(event, TerminalEvent::Eof | TerminalEvent::InputError(_));

        DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
            tracing::debug!(message = "input-reader: event", ?event);
        });

        if sender.send(event).is_err() {
            // Receiver dropped - exit gracefully.
            DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                tracing::debug!(message = "input-reader: receiver dropped, exiting");
            });
            break;
        }

        if is_last {
            break;
        }
    }
}
