// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words EINTR

//! The blocking "read one byte" primitive the [`Decoder`] pulls from.
//!
//! The terminal is assumed to already be in raw mode. Nothing here touches termios.
//!
//! [`Decoder`]: crate::Decoder

use std::io::Read;

/// A synchronous source of input bytes.
pub trait ByteSource {
    /// Blocks until one byte is available. Returns `Ok(None)` once the source is closed.
    ///
    /// # Errors
    ///
    /// Any I/O error other than `EINTR` (which implementations retry).
    fn read_byte(&mut self) -> std::io::Result<Option<u8>>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_byte(&mut self) -> std::io::Result<Option<u8>> { (**self).read_byte() }
}

/// Adapts any [`Read`] into a [`ByteSource`], buffering reads so that a multi-byte escape
/// sequence delivered in one `read()` is not fetched one syscall at a time.
#[derive(Debug)]
pub struct ReadByteSource<R> {
    reader: R,
    buffer: Vec<u8>,
    start: usize,
    end: usize,
}

/// Matches what a terminal delivers in one burst, a paste can be larger but that just
/// takes a few more reads.
pub const BYTE_SOURCE_BUFFER_SIZE: usize = 1024;

impl<R: Read> ReadByteSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0; BYTE_SOURCE_BUFFER_SIZE],
            start: 0,
            end: 0,
        }
    }
}

impl ReadByteSource<std::io::Stdin> {
    #[must_use]
    pub fn stdin() -> Self { Self::new(std::io::stdin()) }
}

impl<R: Read> ByteSource for ReadByteSource<R> {
    fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        while self.start == self.end {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    self.start = 0;
                    self.end = n;
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    // EINTR - retry.
                }
                Err(e) => return Err(e),
            }
        }
        let byte = self.buffer[self.start];
        self.start += 1;
        Ok(Some(byte))
    }
}

/// In-memory [`ByteSource`], mostly for tests and replaying captured input.
#[derive(Debug, Clone)]
pub struct SliceByteSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceByteSource<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self { Self { bytes, position: 0 } }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize { self.position }
}

impl ByteSource for SliceByteSource<'_> {
    fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        let byte = self.bytes.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }
}
