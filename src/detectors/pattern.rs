// File: pattern.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use super::Detector;
use crate::errors::ReformerResult;
use crate::request::ValueRow;
use crate::response::Response;
use colored::*;
use regex::Regex;

/// Regular expression detector. In the inverted form a match marks a
/// failed attempt instead of a successful one.
#[derive(Debug)]
pub struct PatternDetector {
    expr: Regex,
    inverted: bool,
    hits: Vec<ValueRow>,
}

impl PatternDetector {
    pub fn matching(pattern: &str) -> ReformerResult<Self> {
        Ok(Self {
            expr: Regex::new(pattern)?,
            inverted: false,
            hits: Vec::new(),
        })
    }

    pub fn not_matching(pattern: &str) -> ReformerResult<Self> {
        Ok(Self {
            expr: Regex::new(pattern)?,
            inverted: true,
            hits: Vec::new(),
        })
    }

    pub fn test(&self, response: &str) -> bool {
        self.expr.is_match(response) != self.inverted
    }

    fn mark(&mut self, row: &ValueRow) {
        self.hits.push(row.clone());
    }

    fn display(&self, success: bool, row: &ValueRow) {
        if success {
            println!("{}", format!("-> SUCCESS\t{}", row).green().bold());
        } else {
            println!("   failure\t{}", row);
        }
    }
}

impl Detector for PatternDetector {
    fn name(&self) -> &'static str {
        if self.inverted {
            "nreg"
        } else {
            "reg"
        }
    }

    fn process(&mut self, response: &Response, row: &ValueRow) -> bool {
        let success = self.test(response.text());
        if success {
            self.mark(row);
        }
        self.display(success, row);
        success
    }

    fn hits(&self) -> Vec<&ValueRow> {
        self.hits.iter().collect()
    }

    fn summarize(&self) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str("Success obtained with these parameters:\n");
        out.push_str(&"-".repeat(72));
        out.push('\n');
        for hit in &self.hits {
            out.push_str(&hit.to_string());
            out.push('\n');
        }
        out
    }
}
