// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::Write,
          sync::{Arc, Mutex, MutexGuard, PoisonError}};

pub type SendRawTerminal = dyn Write + Send;
pub type SafeRawTerminal = Arc<Mutex<Box<SendRawTerminal>>>;
pub type LockedOutputDevice<'a> = &'a mut dyn Write;

/// Macro to simplify locking and getting a mutable reference to the output device.
/// Don't call this again in the same scope, it will deadlock! A safe approach is
/// to use this macro in a separate block scope.
///
/// Usage example:
/// ```
/// use r3bl_term_input::{lock_output_device_as_mut, OutputDevice, LockedOutputDevice};
/// let device = OutputDevice::new_stdout();
/// { // Start a new block scope to avoid deadlock.
///     let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
///     let _ = mut_ref.write_all(b"Hello, world!\n");
/// } // The lock is released here.
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut **$device.lock()
    };
}

/// The byte sink that painters write to. This mutex is the output lock: every write
/// from any call site goes through [`Self::lock()`].
/// - It is safe to clone.
/// - A mock device keeps everything written to it, see [`Self::new_mock()`].
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(Mutex::new(Box::new(std::io::stdout()))),
            is_mock: false,
        }
    }

    #[must_use]
    pub fn new_stderr() -> Self {
        Self {
            resource: Arc::new(Mutex::new(Box::new(std::io::stderr()))),
            is_mock: false,
        }
    }

    /// Returns the device and a handle to the bytes written to it.
    #[must_use]
    pub fn new_mock() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let device = Self {
            resource: Arc::new(Mutex::new(Box::new(captured.clone()))),
            is_mock: true,
        };
        (device, captured)
    }

    /// Locks the output device for writing.
    ///
    /// A poisoned lock is recovered: the writer itself holds no invariant that a panic
    /// half way through a write could break.
    pub fn lock(&self) -> MutexGuard<'_, Box<SendRawTerminal>> {
        self.resource.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared buffer behind [`OutputDevice::new_mock()`].
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stdout_output_device_is_not_mock() {
        let device = OutputDevice::new_stdout();
        assert!(!device.is_mock);
    }

    #[test]
    fn test_mock_output_device_captures_writes_from_clones() {
        let (device, captured) = OutputDevice::new_mock();
        let clone = device.clone();
        {
            let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
            mut_ref.write_all(b"one ").unwrap();
        }
        {
            let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(clone);
            mut_ref.write_all(b"two").unwrap();
        }
        assert!(device.is_mock);
        assert_eq!(captured.contents(), "one two");
    }
}
