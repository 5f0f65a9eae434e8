// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Installs the global [miette](https://docs.rs/miette/latest/miette/index.html) report
//! handler, used when `main() -> miette::Result<_>` returns an error.
//!
//! - The hook is lazy: it only runs when a report is actually displayed. So the terminal
//!   width is measured just before printing, after raw mode has been turned off.
//! - [`MietteHandlerOpts`] configures the default graphical handler, see
//!   [`GraphicalReportHandler`](https://docs.rs/miette/latest/miette/struct.GraphicalReportHandler.html).

use miette::MietteHandlerOpts;

pub const DEFAULT_REPORT_WIDTH: usize = 80;

/// Returns `false` if a hook was already installed, which is left in place.
pub fn setup_default_miette_global_report_handler(footer: Option<&'static str>) -> bool {
    miette::set_hook(Box::new(move |_report| {
        let terminal_width = crossterm::terminal::size()
            .map_or(DEFAULT_REPORT_WIDTH, |(columns, _rows)| usize::from(columns));
        tracing::debug!(message = "miette hook", terminal_width);

        let opts = MietteHandlerOpts::new()
            .width(terminal_width)
            .wrap_lines(true)
            .unicode(true)
            .context_lines(3)
            .with_cause_chain();

        Box::new(match footer {
            Some(footer) => opts.footer(footer.to_string()).build(),
            None => opts.build(),
        })
    }))
    .is_ok()
}
