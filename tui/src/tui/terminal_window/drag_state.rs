// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MouseAction, MouseButton, MouseReport};

/// Remembers whether a button is held, so that motion reports can be turned into drags.
///
/// The SGR wire format only says "the mouse moved". A [`MouseAction::Move`] that arrives
/// after a [`MouseAction::Down`] and before the matching [`MouseAction::Up`] is rewritten
/// to [`MouseAction::Drag`], carrying the button that went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub dragging: bool,
    pub drag_button: MouseButton,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            dragging: false,
            drag_button: MouseButton::Left,
        }
    }
}

impl DragState {
    /// Update the state from `report`, and return the report to dispatch.
    pub fn apply(&mut self, report: MouseReport) -> MouseReport {
        match report.action {
            MouseAction::Down => {
                self.dragging = true;
                self.drag_button = report.button;
                report
            }
            MouseAction::Up => {
                self.dragging = false;
                report
            }
            MouseAction::Move if self.dragging => MouseReport {
                action: MouseAction::Drag,
                button: self.drag_button,
                ..report
            },
            MouseAction::Move
            | MouseAction::Drag
            | MouseAction::ScrollUp
            | MouseAction::ScrollDown => report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModifierSet;
    use pretty_assertions::assert_eq;

    fn report(action: MouseAction, button: MouseButton) -> MouseReport {
        MouseReport {
            action,
            button,
            mods: ModifierSet::empty(),
            x: 11,
            y: 21,
        }
    }

    #[test]
    fn test_move_without_button_stays_move() {
        let mut state = DragState::default();
        let it = state.apply(report(MouseAction::Move, MouseButton::Left));
        assert_eq!(it.action, MouseAction::Move);
    }

    #[test]
    fn test_move_after_down_becomes_drag_with_remembered_button() {
        let mut state = DragState::default();
        state.apply(report(MouseAction::Down, MouseButton::Right));
        let it = state.apply(report(MouseAction::Move, MouseButton::Left));
        assert_eq!(it, report(MouseAction::Drag, MouseButton::Right));

        state.apply(report(MouseAction::Up, MouseButton::Right));
        assert!(!state.dragging);
        let it = state.apply(report(MouseAction::Move, MouseButton::Left));
        assert_eq!(it.action, MouseAction::Move);
    }

    #[test]
    fn test_scroll_does_not_touch_drag_state() {
        let mut state = DragState::default();
        state.apply(report(MouseAction::Down, MouseButton::Left));
        let it = state.apply(report(MouseAction::ScrollUp, MouseButton::Left));
        assert_eq!(it.action, MouseAction::ScrollUp);
        assert!(state.dragging);
    }
}
