// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::RunConfig;
use crate::detectors::Detector;
use crate::request::ValueRow;
use crate::runstate::RunState;
use serde::Serialize;
use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LengthCount {
    pub length: usize,
    pub responses: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub target: String,
    pub tls: bool,
    pub detector: &'static str,
    pub started_at: String,
    pub elapsed_ms: u64,
    pub attempts: u64,
    pub successes: u64,
    pub stopped_early: bool,
    pub hits: Vec<&'a ValueRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_histogram: Option<Vec<LengthCount>>,
}

impl<'a> RunReport<'a> {
    pub fn new(config: &RunConfig, state: &RunState, detector: &'a dyn Detector) -> Self {
        RunReport {
            target: config.target(),
            tls: config.tls(),
            detector: detector.name(),
            started_at: state.started_at().to_rfc3339(),
            elapsed_ms: state.elapsed().as_millis() as u64,
            attempts: state.attempts(),
            successes: state.successful_attempts(),
            stopped_early: state.stopped_early(),
            hits: detector.hits(),
            length_histogram: detector.histogram().map(|lengths| {
                lengths
                    .into_iter()
                    .map(|(length, responses)| LengthCount { length, responses })
                    .collect()
            }),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, output_path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(output_path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}
