// File: mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

pub mod pattern;
pub mod size;


use crate::errors::{ReformerError, ReformerResult};
use crate::request::ValueRow;
use crate::response::Response;
use std::fmt;
use std::str::FromStr;

pub use pattern::PatternDetector;
pub use size::SizeDetector;

/// Classifies one response per attempt and keeps its own hit log for the
/// end-of-run summary.
pub trait Detector: Send {
    fn name(&self) -> &'static str;

    /// Column header printed before the first attempt, if the detector has one.
    fn banner(&self) -> Option<String> {
        None
    }

    /// Returns `true` when the attempt succeeded.
    fn process(&mut self, response: &Response, row: &ValueRow) -> bool;

    fn hits(&self) -> Vec<&ValueRow>;

    fn summarize(&self) -> String;

    /// Content length histogram as `(length, count)` pairs, for detectors
    /// that collect one.
    fn histogram(&self) -> Option<Vec<(usize, usize)>> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    Reg,
    NReg,
    Size,
}

impl DetectorKind {
    pub fn all() -> &'static [DetectorKind] {
        &[DetectorKind::Reg, DetectorKind::NReg, DetectorKind::Size]
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DetectorKind::Reg => "reg",
            DetectorKind::NReg => "nreg",
            DetectorKind::Size => "size",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DetectorKind::Reg => "Use Regular Expression success detector",
            DetectorKind::NReg => "Use Regular Expression failure detector",
            DetectorKind::Size => "Use response size analyzer as success detector",
        }
    }

    pub fn requires_parameter(&self) -> bool {
        !matches!(self, DetectorKind::Size)
    }

    pub fn build(&self, parameter: Option<&str>) -> ReformerResult<Box<dyn Detector>> {
        let pattern = || {
            parameter.ok_or_else(|| {
                ReformerError::Configuration(format!(
                    "detector '{}' requires a regular expression parameter",
                    self.keyword()
                ))
            })
        };

        let detector: Box<dyn Detector> = match self {
            DetectorKind::Reg => Box::new(PatternDetector::matching(pattern()?)?),
            DetectorKind::NReg => Box::new(PatternDetector::not_matching(pattern()?)?),
            DetectorKind::Size => Box::new(SizeDetector::new()),
        };
        Ok(detector)
    }
}

impl FromStr for DetectorKind {
    type Err = ReformerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetectorKind::all()
            .iter()
            .copied()
            .find(|kind| kind.keyword() == s)
            .ok_or_else(|| ReformerError::Configuration(format!("Unknown detector {}", s)))
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
