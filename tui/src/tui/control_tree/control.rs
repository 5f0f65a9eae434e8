// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::Rect;
use crate::{Key, MouseReport};
use std::fmt::Debug;

/// Anything that lives in the [`ControlTree`] and can receive input.
///
/// Both handlers return `true` when the event was consumed. Returning `false` lets the
/// event bubble up to the parent. A control never needs to know who its parent is, the
/// tree tracks that.
///
/// The [`Debug`] output is what shows up in the `Ctrl+Y` tree dump, keep it short.
///
/// [`ControlTree`]: super::ControlTree
pub trait Control: Debug {
    /// Where this control is on screen, used for mouse hit testing.
    fn bounds(&self) -> Rect;

    fn on_key(&mut self, _key: Key) -> bool { false }

    fn on_mouse(&mut self, _report: MouseReport) -> bool { false }
}
