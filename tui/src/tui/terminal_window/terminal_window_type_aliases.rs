// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Key, MouseReport};

// Post listeners, called once per dispatch with the original event.
pub type KeyPostListener = Box<dyn FnMut(&Key)>;
pub type MousePostListener = Box<dyn FnMut(&MouseReport)>;

// Consulted before honoring Ctrl+C.
pub type InterruptPredicate = Box<dyn Fn() -> bool>;
