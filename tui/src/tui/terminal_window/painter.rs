// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ControlTree, OutputDevice};

/// Draws the control tree. Layout and rendering live outside this crate, the terminal
/// only tells the painter when to act.
pub trait Painter {
    /// Paint the whole tree. Called for `Ctrl+L` and after every resize.
    ///
    /// # Errors
    ///
    /// Whatever the painter fails with, eg: a write to `output_device`.
    fn redraw(&mut self, tree: &ControlTree, output_device: &OutputDevice)
    -> miette::Result<()>;

    /// The window changed size. Called before the redraw that follows it.
    fn on_resize(&mut self) {}
}

/// Paints nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPainter;

impl Painter for NoopPainter {
    fn redraw(&mut self, _: &ControlTree, _: &OutputDevice) -> miette::Result<()> { Ok(()) }
}
