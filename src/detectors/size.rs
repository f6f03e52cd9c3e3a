// File: size.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use super::Detector;
use crate::request::ValueRow;
use crate::response::Response;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static CONTENT_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Content-Length: (\d+)").expect("valid length pattern"));

// Above this many distinct lengths a histogram stops being useful.
const MAX_HISTOGRAM_LENGTHS: usize = 10;

/// Reports header and content sizes for every attempt. It never declares
/// success; the end-of-run histogram hints at which responses stand out.
#[derive(Debug, Default)]
pub struct SizeDetector {
    hits: Vec<(usize, ValueRow)>,
}

impl SizeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(header length, content length)` for a response, counted
    /// in bytes received.
    pub fn measure(response: &Response) -> (usize, usize) {
        let content_length = CONTENT_LENGTH
            .captures(response.text())
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .unwrap_or(0);
        (
            response.wire_length().saturating_sub(content_length),
            content_length,
        )
    }

    fn mark(&mut self, content_length: usize, row: &ValueRow) {
        self.hits.push((content_length, row.clone()));
    }

    fn lengths(&self) -> Vec<(usize, usize)> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for (length, _) in &self.hits {
            *counts.entry(*length).or_insert(0) += 1;
        }
        let mut lengths: Vec<(usize, usize)> = counts.into_iter().collect();
        lengths.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        lengths
    }
}

impl Detector for SizeDetector {
    fn name(&self) -> &'static str {
        "size"
    }

    fn banner(&self) -> Option<String> {
        Some(format!(
            "{:>16} {:>16}       Parameters\n{}",
            "header len",
            "content length",
            "-".repeat(72)
        ))
    }

    fn process(&mut self, response: &Response, row: &ValueRow) -> bool {
        let (header_length, content_length) = Self::measure(response);
        println!(
            "{:>10} bytes {:>10} bytes\t{}",
            header_length, content_length, row
        );
        self.mark(content_length, row);
        false
    }

    fn hits(&self) -> Vec<&ValueRow> {
        Vec::new()
    }

    fn summarize(&self) -> String {
        let mut out = String::from("\n");
        match self.histogram() {
            Some(lengths) => {
                out.push_str("Summary of responses received\n");
                out.push_str(&"-".repeat(72));
                out.push('\n');
                for (length, count) in lengths {
                    out.push_str(&format!("{:>10} bytes -> {:>10} responses\n", length, count));
                }
            }
            None => {
                out.push_str("Too many response lengths to summarize -- recommend manual analysis\n");
            }
        }
        out
    }

    fn histogram(&self) -> Option<Vec<(usize, usize)>> {
        let lengths = self.lengths();
        if lengths.len() < MAX_HISTOGRAM_LENGTHS {
            Some(lengths)
        } else {
            None
        }
    }
}
