// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::new_without_default)]

pub mod cli;
pub mod client;
pub mod config;
pub mod detectors;
pub mod dictionary;
pub mod engine;
pub mod errors;
pub mod recorder;
pub mod report;
pub mod request;
pub mod response;
pub mod runstate;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod config_tests;
