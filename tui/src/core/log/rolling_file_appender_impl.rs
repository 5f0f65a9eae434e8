// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Creates a file appender that never rotates, so one run of an app lands in one file.
///
/// Note that if you wrap this up in a non blocking writer, the log lines emitted right
/// before the process exits (eg: on `Ctrl+C`) get lost, since the worker guard would have
/// to outlive the event loop.
///
/// # Errors
///
/// `path` has no parent directory, or doesn't end in a file name (eg: `/` or `..`).
pub fn try_create(path: &str) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path);

    let Some(folder) = path.parent() else {
        return Err(miette::miette!("Log path {} has no parent folder", path.display()));
    };
    let Some(file_name) = path.file_name() else {
        return Err(miette::miette!("Log path {} does not name a file", path.display()));
    };

    Ok(tracing_appender::rolling::never(folder, file_name))
}
