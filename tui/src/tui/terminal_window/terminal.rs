// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Continuation, DispatchError, DragState, InterruptPredicate, KeyPostListener,
            MousePostListener, NoopPainter, Painter, TerminalConfig, TerminalEvent,
            read_terminal_event};
use crate::{ByteSource, ControlId, ControlTree, Decoder, Key, MouseReport, OutputDevice,
            tui::DEBUG_TUI_SHOW_INPUT_PIPELINE};

/// Owns the control tree and everything input dispatch needs: the focus pointer, the
/// drag state, the key decoder, the listeners and the painter.
///
/// All mutation happens on whichever thread owns the `Terminal`. Input and resize
/// threads only send [`TerminalEvent`]s to it, see [`run_event_loop()`].
///
/// [`run_event_loop()`]: super::run_event_loop
#[allow(missing_debug_implementations)]
pub struct Terminal {
    pub(super) tree: ControlTree,
    pub(super) focused: Option<ControlId>,
    pub(super) drag_state: DragState,
    pub(super) decoder: Decoder,
    pub(super) key_post_listener: Option<KeyPostListener>,
    pub(super) mouse_post_listener: Option<MousePostListener>,
    pub(super) interrupt_predicate: InterruptPredicate,
    pub(super) painter: Box<dyn Painter>,
    pub(super) output_device: OutputDevice,
    pub(super) config: TerminalConfig,
}

impl Terminal {
    #[must_use]
    pub fn new(config: TerminalConfig, output_device: OutputDevice) -> Self {
        let exit_on_ctrl_c = config.exit_on_ctrl_c;
        Self {
            tree: ControlTree::new(),
            focused: None,
            drag_state: DragState::default(),
            decoder: Decoder::new(config.raw_mode),
            key_post_listener: None,
            mouse_post_listener: None,
            interrupt_predicate: Box::new(move || exit_on_ctrl_c),
            painter: Box::new(NoopPainter),
            output_device,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> TerminalConfig { self.config }

    #[must_use]
    pub fn tree(&self) -> &ControlTree { &self.tree }

    pub fn tree_mut(&mut self) -> &mut ControlTree { &mut self.tree }

    #[must_use]
    pub fn output_device(&self) -> &OutputDevice { &self.output_device }

    #[must_use]
    pub fn drag_state(&self) -> DragState { self.drag_state }

    #[must_use]
    pub fn decoder(&self) -> &Decoder { &self.decoder }

    pub fn set_painter(&mut self, painter: impl Painter + 'static) {
        self.painter = Box::new(painter);
    }

    pub fn set_key_post_listener(&mut self, listener: impl FnMut(&Key) + 'static) {
        self.key_post_listener = Some(Box::new(listener));
    }

    pub fn set_mouse_post_listener(
        &mut self,
        listener: impl FnMut(&MouseReport) + 'static,
    ) {
        self.mouse_post_listener = Some(Box::new(listener));
    }

    /// Replaces the default predicate (which is [`TerminalConfig::exit_on_ctrl_c`]).
    pub fn set_interrupt_predicate(&mut self, predicate: impl Fn() -> bool + 'static) {
        self.interrupt_predicate = Box::new(predicate);
    }

    /// Moves keyboard focus. Returns `false`, leaving focus alone, if `id` is not in the
    /// tree.
    pub fn focus(&mut self, id: ControlId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// The explicitly focused control. Dispatch falls back to the root when this is
    /// `None`.
    #[must_use]
    pub fn get_focused(&self) -> Option<ControlId> { self.focused }

    /// Asks the painter to paint the whole tree.
    ///
    /// # Errors
    ///
    /// Whatever the painter returns.
    pub fn redraw(&mut self) -> miette::Result<()> {
        DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
            tracing::debug!(message = "terminal: redraw", controls = self.tree.len());
        });
        self.painter.redraw(&self.tree, &self.output_device)
    }

    /// # Errors
    ///
    /// Whatever the painter's redraw returns.
    pub fn on_resize(&mut self) -> miette::Result<()> {
        self.painter.on_resize();
        self.redraw()
    }

    /// Terminal-level key handler, tried after the root declined a key.
    /// - `Ctrl+L` redraws.
    /// - `Ctrl+Y` logs the control tree.
    pub(super) fn fallback_on_key(&mut self, key: Key) -> bool {
        if key == Key::ctrl('l') {
            if let Err(report) = self.redraw() {
                tracing::warn!(message = "terminal: Ctrl+L redraw failed", error = ?report);
            }
            true
        } else if key == Key::ctrl('y') {
            tracing::info!(
                message = "terminal: control tree",
                focused = ?self.focused,
                tree = %self.tree.debug_tree_string()
            );
            true
        } else {
            false
        }
    }

    /// Act on one event. This is where every [`TerminalEvent`] ends up, whether it came
    /// through the channel or from [`Self::read_and_dispatch()`].
    ///
    /// # Errors
    ///
    /// [`DispatchError::FocusInvariantViolation`], which the event loop treats as fatal.
    pub fn handle_event(
        &mut self,
        event: TerminalEvent,
    ) -> Result<Continuation, DispatchError> {
        match event {
            TerminalEvent::Key(key) => {
                if key == Key::ctrl('c') && (self.interrupt_predicate)() {
                    DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                        tracing::debug!(message = "terminal: Ctrl+C, stopping");
                    });
                    return Ok(Continuation::Stop);
                }
                let target = self.send_key(key)?;
                DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                    tracing::debug!(message = "terminal: key dispatched", %key, ?target);
                });
            }
            TerminalEvent::Mouse(report) => {
                let report = self.drag_state.apply(report);
                let target = self.send_mouse(report);
                DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                    tracing::debug!(message = "terminal: mouse dispatched", ?report, ?target);
                });
            }
            TerminalEvent::Resize => {
                if let Err(report) = self.on_resize() {
                    tracing::warn!(message = "terminal: redraw after resize failed", error = ?report);
                }
            }
            TerminalEvent::Eof => {
                DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
                    tracing::debug!(message = "terminal: input closed, stopping");
                });
                return Ok(Continuation::Stop);
            }
            TerminalEvent::InputError(kind) => {
                tracing::error!(message = "terminal: input failed, stopping", ?kind);
                return Ok(Continuation::Stop);
            }
        }
        Ok(Continuation::Continue)
    }

    /// Synchronous read, decode and dispatch of one key (or mouse report) from
    /// `source`, using the terminal's own decoder. Use this when there is no separate
    /// input thread.
    ///
    /// A malformed escape sequence is logged and skipped, it does not stop the caller's
    /// loop.
    ///
    /// # Errors
    ///
    /// [`DispatchError::FocusInvariantViolation`].
    pub fn read_and_dispatch(
        &mut self,
        source: &mut impl ByteSource,
    ) -> Result<Continuation, DispatchError> {
        match read_terminal_event(&mut self.decoder, source) {
            Some(event) => self.handle_event(event),
            None => Ok(Continuation::Continue),
        }
    }
}
