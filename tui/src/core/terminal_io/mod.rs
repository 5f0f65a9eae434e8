// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod byte_source;
mod output_device;

// Re-exports for flat public API.
pub use byte_source::*;
pub use output_device::*;
