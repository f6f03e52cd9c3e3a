// File: runstate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct RunState {
    attempts: u64,
    successful_attempts: u64,
    failed_attempts: u64,
    stopped_early: bool,
    started_at: DateTime<Local>,
    start: Instant,
    elapsed: Option<Duration>,
}

impl RunState {
    pub fn new() -> RunState {
        RunState {
            attempts: 0,
            successful_attempts: 0,
            failed_attempts: 0,
            stopped_early: false,
            started_at: Local::now(),
            start: Instant::now(),
            elapsed: None,
        }
    }

    pub fn add_success(&mut self) {
        self.attempts += 1;
        self.successful_attempts += 1;
    }

    pub fn add_failure(&mut self) {
        self.attempts += 1;
        self.failed_attempts += 1;
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn successful_attempts(&self) -> u64 {
        self.successful_attempts
    }

    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts
    }

    pub fn set_stopped_early(&mut self, stopped_early: bool) {
        self.stopped_early = stopped_early;
    }

    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn finish(&mut self) {
        self.elapsed = Some(self.start.elapsed());
    }

    /// Wall time of the run; still counting until `finish` is called.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start.elapsed())
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
