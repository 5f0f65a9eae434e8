// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words keyview

//! Prints every key and mouse report the terminal sends, after it went through the
//! decoder and the dispatcher.
//!
//! ```text
//! cargo run --bin keyview -- --log-file /tmp/keyview.log --log-level debug
//! ```
//!
//! - The left pane has focus and consumes `h`. Every other key bubbles up to the screen
//!   and then to the terminal.
//! - Both panes consume mouse clicks, the screen behind them doesn't.
//! - `Ctrl+L` redraws, `Ctrl+Y` dumps the control tree to the log, `Ctrl+C` exits.

use clap::Parser;
use crossterm::{QueueableCommand as _, cursor::MoveTo,
                event::{DisableMouseCapture, EnableMouseCapture}, execute,
                terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode}};
use miette::IntoDiagnostic as _;
#[cfg(unix)]
use r3bl_term_input::ResizeWatcher;
use r3bl_term_input::{Control, ControlId, ControlTree, Decoder, InputReaderThread, Key,
                      MouseAction, MouseReport, OutputDevice, Painter, ReadByteSource,
                      Rect, Terminal, TerminalConfig, TracingConfig, WriterConfig,
                      create_terminal_event_channel, lock_output_device_as_mut,
                      run_event_loop, setup_default_miette_global_report_handler,
                      try_initialize_logging_global};
use std::{cell::RefCell, io::Write as _, rc::Rc};
use tracing_core::LevelFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_args = CLIArg::parse();

    setup_default_miette_global_report_handler(None);
    try_initialize_logging_global(cli_args.tracing_config())?;

    let terminal_config = TerminalConfig {
        raw_mode: cli_args.raw,
        exit_on_ctrl_c: !cli_args.no_ctrl_c_exit,
    };
    tracing::info!(message = "keyview: start", ?terminal_config);

    enable_raw_mode().into_diagnostic()?;
    if !cli_args.no_mouse {
        execute!(std::io::stdout(), EnableMouseCapture).into_diagnostic()?;
    }

    let result = run(terminal_config).await;
    let restored = restore_terminal(!cli_args.no_mouse);

    tracing::info!(message = "keyview: exit", ok = result.is_ok());
    result.and(restored)
}

/// Leaves mouse capture and raw mode. Both are attempted even if the first fails.
fn restore_terminal(mouse_enabled: bool) -> miette::Result<()> {
    run_all_restore_steps([
        restore_step("disable mouse capture", move || {
            if mouse_enabled {
                execute!(std::io::stdout(), DisableMouseCapture)?;
            }
            Ok(())
        }),
        restore_step("leave raw mode", disable_raw_mode),
    ])
}

type RestoreStep = (&'static str, Box<dyn FnOnce() -> std::io::Result<()>>);

fn restore_step(
    name: &'static str,
    step: impl FnOnce() -> std::io::Result<()> + 'static,
) -> RestoreStep {
    (name, Box::new(step))
}

/// Runs every step in order, logs each failure, and returns the first one.
fn run_all_restore_steps<const N: usize>(steps: [RestoreStep; N]) -> miette::Result<()> {
    let mut first_error = None;
    for (name, step) in steps {
        if let Err(error) = step() {
            tracing::error!(message = "keyview: restore step failed", step = name, %error);
            first_error.get_or_insert(error);
        }
    }
    first_error.map_or(Ok(()), |error| Err(error).into_diagnostic())
}

async fn run(terminal_config: TerminalConfig) -> miette::Result<()> {
    let output_device = OutputDevice::new_stdout();
    let mut terminal = Terminal::new(terminal_config, output_device.clone());
    let left_pane = build_tree(terminal.tree_mut())?;

    let last_event = Rc::new(RefCell::new(String::from("(none yet)")));
    terminal.set_painter(StatusPainter {
        last_event: last_event.clone(),
    });

    let key_log = last_event.clone();
    terminal.set_key_post_listener(move |key| *key_log.borrow_mut() = format!("key {key}"));
    let mouse_log = last_event.clone();
    let mouse_output = output_device.clone();
    terminal.set_mouse_post_listener(move |report| {
        let line = format!(
            "mouse {} {} at ({}, {})",
            report.action, report.button, report.x, report.y
        );
        let out = lock_output_device_as_mut!(mouse_output);
        _ = write!(out, "{line}\r\n");
        _ = out.flush();
        *mouse_log.borrow_mut() = line;
    });

    terminal.focus(left_pane);
    terminal.redraw()?;

    let (sender, mut receiver) = create_terminal_event_channel();
    let _input_reader = InputReaderThread::spawn(
        ReadByteSource::stdin(),
        Decoder::new(terminal_config.raw_mode),
        sender.clone(),
    )
    .into_diagnostic()?;
    #[cfg(unix)]
    let _resize_watcher = ResizeWatcher::register(sender).into_diagnostic()?;

    run_event_loop(&mut terminal, &mut receiver).await?;
    Ok(())
}

/// ```text
/// screen
/// ├── left  (left half)
/// └── right (right half)
/// ```
/// Returns the left pane, which gets focus.
fn build_tree(tree: &mut ControlTree) -> miette::Result<ControlId> {
    let (columns, rows) = crossterm::terminal::size().into_diagnostic()?;
    let (width, height) = (i32::from(columns), i32::from(rows));
    let half = width / 2;

    let root = tree.set_root(Pane::new("screen", Rect::new(0, 0, width, height), None));
    let left = tree
        .add_child(root, Pane::new("left", Rect::new(0, 0, half, height), Some('h')))
        .ok_or_else(|| miette::miette!("root vanished"))?;
    let right_bounds = Rect::new(half, 0, width - half, height);
    tree.add_child(root, Pane::new("right", right_bounds, None))
        .ok_or_else(|| miette::miette!("root vanished"))?;

    Ok(left)
}

#[derive(Debug)]
struct Pane {
    name: &'static str,
    bounds: Rect,
    hotkey: Option<char>,
}

impl Pane {
    fn new(name: &'static str, bounds: Rect, hotkey: Option<char>) -> Self {
        Self {
            name,
            bounds,
            hotkey,
        }
    }
}

impl Control for Pane {
    fn bounds(&self) -> Rect { self.bounds }

    fn on_key(&mut self, key: Key) -> bool {
        let handled = self.hotkey.is_some_and(|it| key == it);
        if handled {
            tracing::info!(message = "keyview: pane handled key", pane = self.name, %key);
        }
        handled
    }

    fn on_mouse(&mut self, report: MouseReport) -> bool {
        report.action == MouseAction::Down && self.name != "screen"
    }
}

#[derive(Debug)]
struct StatusPainter {
    last_event: Rc<RefCell<String>>,
}

impl Painter for StatusPainter {
    fn redraw(
        &mut self,
        tree: &ControlTree,
        output_device: &OutputDevice,
    ) -> miette::Result<()> {
        let out = lock_output_device_as_mut!(output_device);
        out.queue(Clear(ClearType::All))
            .and_then(|out| out.queue(MoveTo(0, 0)))
            .into_diagnostic()?;
        write!(
            out,
            "keyview: Ctrl+L redraws, Ctrl+Y logs the tree, Ctrl+C exits\r\n\
             last event: {}\r\n\r\n",
            self.last_event.borrow()
        )
        .into_diagnostic()?;
        for line in tree.debug_tree_string().lines() {
            write!(out, "{line}\r\n").into_diagnostic()?;
        }
        out.flush().into_diagnostic()
    }
}

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "keyview")]
#[command(about = "Shows decoded keys and mouse reports from your terminal")]
#[command(version)]
#[command(next_line_help = true)]
struct CLIArg {
    #[arg(long, help = "Don't interpret escape sequences, every byte is one key.")]
    raw: bool,

    #[arg(long, help = "Don't turn on mouse reporting.")]
    no_mouse: bool,

    #[arg(long, help = "Ctrl+C is dispatched like any other key instead of exiting.")]
    no_ctrl_c_exit: bool,

    #[arg(long, short = 'l', help = "Write logs to this file.")]
    log_file: Option<String>,

    #[arg(
        long,
        default_value = "info",
        help = "One of: off, error, warn, info, debug, trace."
    )]
    log_level: LevelFilter,
}

impl CLIArg {
    /// Stdout belongs to the UI, so logs only ever go to a file.
    fn tracing_config(&self) -> TracingConfig {
        match &self.log_file {
            Some(path) => TracingConfig {
                writer_config: WriterConfig::File(path.clone()),
                level_filter: self.log_level,
            },
            None => TracingConfig::disabled(),
        }
    }
}
