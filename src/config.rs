// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run-wide settings, built once from the command line and handed by
/// reference to the engine, the client and the recorder.
#[derive(Debug, Clone)]
pub struct RunConfig {
    host: String,
    port: u16,
    tls: bool,
    insecure: bool,
    stop_on_success: bool,
    record_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    timeout: Option<Duration>,
    max_continues: Option<usize>,
    rate_limit: Option<NonZeroU32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new("localhost", 80)
    }
}

impl RunConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            tls: false,
            insecure: false,
            stop_on_success: false,
            record_path: None,
            report_path: None,
            timeout: None,
            max_continues: None,
            rate_limit: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_tls(&mut self, tls: bool) {
        self.tls = tls;
    }

    pub fn tls(&self) -> bool {
        self.tls
    }

    pub fn set_insecure(&mut self, insecure: bool) {
        self.insecure = insecure;
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn set_stop_on_success(&mut self, stop_on_success: bool) {
        self.stop_on_success = stop_on_success;
    }

    pub fn stop_on_success(&self) -> bool {
        self.stop_on_success
    }

    pub fn set_record_path(&mut self, record_path: Option<PathBuf>) {
        self.record_path = record_path;
    }

    pub fn record_path(&self) -> Option<&Path> {
        self.record_path.as_deref()
    }

    pub fn set_report_path(&mut self, report_path: Option<PathBuf>) {
        self.report_path = report_path;
    }

    pub fn report_path(&self) -> Option<&Path> {
        self.report_path.as_deref()
    }

    /// `None` leaves every network wait unbounded.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `None` resends on every interim response, however many arrive.
    pub fn set_max_continues(&mut self, max_continues: Option<usize>) {
        self.max_continues = max_continues;
    }

    pub fn max_continues(&self) -> Option<usize> {
        self.max_continues
    }

    pub fn set_rate_limit(&mut self, rate_limit: Option<NonZeroU32>) {
        self.rate_limit = rate_limit;
    }

    pub fn rate_limit(&self) -> Option<NonZeroU32> {
        self.rate_limit
    }

    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
