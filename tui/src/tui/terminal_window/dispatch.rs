// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Routing of keys and mouse reports through the [`ControlTree`].
//!
//! ```text
//! send_key(key)                          send_mouse(report)
//!   target = focused or root               target = hit_test(x, y)
//!      │                                      │
//!      ▼                                      ▼
//!   target.on_key ── true ──► done         target.on_mouse ── true ──► done
//!      │ false                                │ false
//!      ▼                                      ▼
//!   parent.on_key  ...                     parent.on_mouse ...
//!      │ root declined                        │ root declined
//!      ▼                                      ▼
//!   Ctrl+L / Ctrl+Y fallback               (no mouse fallback)
//! ```
//!
//! The walk also stops, unhandled, at a control that has no parent and isn't the root.

use super::{DispatchError, EventTarget, Terminal};
use crate::{Control, ControlId, ControlTree, Key, MouseReport,
            tui::DEBUG_TUI_SHOW_INPUT_PIPELINE};

/// How a walk up the parent chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bubble {
    Handled(ControlId),
    RootDeclined,
    ChainBroken,
}

fn bubble_up(
    tree: &mut ControlTree,
    start: ControlId,
    root: ControlId,
    handler: &mut impl FnMut(&mut dyn Control) -> bool,
) -> Bubble {
    let mut current = start;
    loop {
        let Some(control) = tree.get_mut(current) else {
            return Bubble::ChainBroken;
        };
        if handler(control) {
            return Bubble::Handled(current);
        }
        if current == root {
            return Bubble::RootDeclined;
        }
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => return Bubble::ChainBroken,
        }
    }
}

impl Terminal {
    /// Deliver `key` to the focused control (or the root when nothing is focused) and
    /// bubble it up until something handles it.
    ///
    /// Returns who handled it, `Ok(None)` if nobody did or there is no root. The key
    /// post-listener runs exactly once per call, whatever the outcome.
    ///
    /// # Errors
    ///
    /// [`DispatchError::FocusInvariantViolation`] if the focused control was removed
    /// from the tree.
    pub fn send_key(&mut self, key: Key) -> Result<Option<EventTarget>, DispatchError> {
        let result = self.route_key(key);
        if let Some(listener) = self.key_post_listener.as_mut() {
            listener(&key);
        }
        result
    }

    fn route_key(&mut self, key: Key) -> Result<Option<EventTarget>, DispatchError> {
        let Some(root) = self.tree.root() else {
            return Ok(None);
        };

        let target = self.focused.unwrap_or(root);
        if !self.tree.contains(target) {
            return Err(DispatchError::FocusInvariantViolation { id: target });
        }

        let mut handler = |control: &mut dyn Control| control.on_key(key);
        let outcome = bubble_up(&mut self.tree, target, root, &mut handler);

        DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
            tracing::debug!(message = "dispatch: key", %key, ?target, ?outcome);
        });

        Ok(match outcome {
            Bubble::Handled(id) => Some(EventTarget::Control(id)),
            Bubble::RootDeclined => self
                .fallback_on_key(key)
                .then_some(EventTarget::Terminal),
            Bubble::ChainBroken => None,
        })
    }

    /// Deliver `report` to the deepest control under the pointer and bubble it up.
    /// Reports that hit no control are dropped. The mouse post-listener runs exactly
    /// once per call.
    ///
    /// Drag synthesis is not done here, see [`DragState`].
    ///
    /// [`DragState`]: super::DragState
    pub fn send_mouse(&mut self, report: MouseReport) -> Option<EventTarget> {
        let result = self.route_mouse(report);
        if let Some(listener) = self.mouse_post_listener.as_mut() {
            listener(&report);
        }
        result
    }

    fn route_mouse(&mut self, report: MouseReport) -> Option<EventTarget> {
        let root = self.tree.root()?;
        let target = self.tree.hit_test(report.x, report.y)?;

        let mut handler = |control: &mut dyn Control| control.on_mouse(report);
        let outcome = bubble_up(&mut self.tree, target, root, &mut handler);

        DEBUG_TUI_SHOW_INPUT_PIPELINE.then(|| {
            tracing::debug!(message = "dispatch: mouse", ?report, ?target, ?outcome);
        });

        match outcome {
            Bubble::Handled(id) => Some(EventTarget::Control(id)),
            Bubble::RootDeclined | Bubble::ChainBroken => None,
        }
    }
}
