// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ControlId, Key, MouseReport};

/// Everything the event loop reacts to. Produced by the [`InputReaderThread`] and the
/// [`ResizeWatcher`], consumed by [`Terminal::handle_event()`].
///
/// [`InputReaderThread`]: super::InputReaderThread
/// [`ResizeWatcher`]: super::ResizeWatcher
/// [`Terminal::handle_event()`]: super::Terminal::handle_event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(Key),
    Mouse(MouseReport),
    /// The terminal window changed size.
    Resize,
    /// The input byte source closed.
    Eof,
    /// The input byte source failed, nothing more will be read from it.
    InputError(std::io::ErrorKind),
}

/// Who ended up handling a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Control(ControlId),
    /// The terminal's own fallback handler (eg: `Ctrl+L` redraw).
    Terminal,
}

/// Control flow signal for the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Continuation {
    /// Continue to the next iteration.
    #[default]
    Continue,

    /// Stop processing and exit the loop.
    Stop,
}

/// Sender end of the event channel, held by the input reader and resize threads.
pub type TerminalEventSender = tokio::sync::mpsc::UnboundedSender<TerminalEvent>;

/// Receiver end of the event channel, drained by [`run_event_loop()`].
///
/// [`run_event_loop()`]: super::run_event_loop
pub type TerminalEventReceiver = tokio::sync::mpsc::UnboundedReceiver<TerminalEvent>;
