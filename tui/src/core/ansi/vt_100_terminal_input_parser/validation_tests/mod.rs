// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Protocol conformance testing.
//!
//! [`input_parser_validation_test`] drives **hardcoded** byte sequences, as real
//! terminal emulators send them, through the [`Decoder`]. The literals are the ground
//! truth: don't replace them with sequences built by helper functions.
//!
//! See the [parent module] for the overall testing strategy.
//!
//! [`Decoder`]: super::Decoder
//! [parent module]: super#testing-strategy

pub mod input_parser_validation_test;
