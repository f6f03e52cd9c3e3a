// File: recorder.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::Local;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

const SEPARATOR_WIDTH: usize = 72;

/// Append-only transcript of every request and response in a run.
///
/// A recorder without a sink accepts every call and writes nothing.
pub struct Recorder {
    sink: Option<Box<dyn Write + Send>>,
    started: Instant,
}

impl Recorder {
    pub fn disabled() -> Self {
        Self {
            sink: None,
            started: Instant::now(),
        }
    }

    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::to_writer(Box::new(BufWriter::new(file)))
    }

    pub fn to_writer(mut sink: Box<dyn Write + Send>) -> io::Result<Self> {
        writeln!(
            sink,
            "Recording started at {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        Ok(Self {
            sink: Some(sink),
            started: Instant::now(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn request(&mut self, request: &str) -> io::Result<()> {
        self.block("REQUEST", &format!("{}\n", request))
    }

    pub fn interim(&mut self, headers: &str) -> io::Result<()> {
        self.block("Continue:", headers)
    }

    pub fn response(&mut self, response: &str) -> io::Result<()> {
        self.block("RESPONSE:", response)
    }

    pub fn separator(&mut self) -> io::Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            write!(sink, "{}\n\n", "-".repeat(SEPARATOR_WIDTH))?;
            sink.flush()?;
        }
        Ok(())
    }

    fn block(&mut self, tag: &str, text: &str) -> io::Result<()> {
        let elapsed = self.started.elapsed().as_secs_f64();
        if let Some(sink) = self.sink.as_mut() {
            write!(sink, "{:.6} seconds\n\n{}\n\n{}\n", elapsed, tag, text)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
