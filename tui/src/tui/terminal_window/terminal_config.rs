// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Knobs for [`Terminal::new()`].
///
/// [`Terminal::new()`]: super::Terminal::new
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Every input byte becomes its own key, escape sequences are not interpreted.
    pub raw_mode: bool,
    /// The default interrupt predicate: whether `Ctrl+C` stops the event loop.
    pub exit_on_ctrl_c: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            raw_mode: false,
            exit_on_ctrl_c: true,
        }
    }
}
