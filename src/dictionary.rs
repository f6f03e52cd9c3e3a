// File: dictionary.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::errors::{ReformerError, ReformerResult};
use crate::request::{TokenMap, ValueRow};
use log::{debug, trace};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Supplies the placeholder mapping and then one value row per attempt.
pub trait Dictionary {
    fn token_map(&self) -> &TokenMap;

    /// `None` ends the run.
    fn next_row(&mut self) -> Option<ReformerResult<ValueRow>>;
}

/// Comma delimited symbol file.
///
/// ```text
/// user,pass
/// %USER%,%PASS%
/// admin,admin
/// admin,password1
/// ```
pub struct CsvDictionary<R> {
    names: Vec<String>,
    tokens: TokenMap,
    lines: Lines<R>,
    line_number: usize,
}

impl CsvDictionary<BufReader<File>> {
    pub fn open(path: &Path) -> ReformerResult<Self> {
        let file = File::open(path).map_err(|e| {
            ReformerError::Configuration(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: BufRead> CsvDictionary<R> {
    pub fn from_reader(reader: R) -> ReformerResult<Self> {
        let mut lines = reader.lines();

        let names = header_fields(lines.next(), "symbol names")?;
        let placeholders = header_fields(lines.next(), "substitution tokens")?;

        if names.len() != placeholders.len() {
            return Err(ReformerError::Configuration(format!(
                "dictionary declares {} symbol names but {} substitution tokens",
                names.len(),
                placeholders.len()
            )));
        }

        let tokens: TokenMap = names.iter().zip(placeholders.iter()).collect();
        debug!("Dictionary maps {} symbols", tokens.len());

        Ok(Self {
            names,
            tokens,
            lines,
            line_number: 2,
        })
    }
}

impl<R: BufRead> Dictionary for CsvDictionary<R> {
    fn token_map(&self) -> &TokenMap {
        &self.tokens
    }

    fn next_row(&mut self) -> Option<ReformerResult<ValueRow>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(ReformerError::Dictionary(format!(
                        "line {}: {}",
                        self.line_number + 1,
                        e
                    ))))
                }
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                trace!("Skipping blank dictionary line {}", self.line_number);
                continue;
            }

            let row = self
                .names
                .iter()
                .zip(line.split(',').map(str::trim))
                .collect::<ValueRow>();
            return Some(Ok(row));
        }
    }
}

fn header_fields(
    line: Option<std::io::Result<String>>,
    what: &str,
) -> ReformerResult<Vec<String>> {
    let line = line
        .ok_or_else(|| {
            ReformerError::Configuration(format!("dictionary is missing its {} line", what))
        })?
        .map_err(|e| ReformerError::Dictionary(e.to_string()))?;

    let fields: Vec<String> = line
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .map(|field| field.trim_end_matches(['\r', '\n']).to_string())
        .collect();

    if fields.iter().all(|f| f.is_empty()) {
        return Err(ReformerError::Configuration(format!(
            "dictionary {} line is empty",
            what
        )));
    }
    Ok(fields)
}

/// Dictionary backed by a caller supplied generator.
///
/// The generator is plain Rust code owned by the embedding application;
/// returning `None` tells the engine the sequence is exhausted.
pub struct GeneratorDictionary<F> {
    tokens: TokenMap,
    generator: F,
    finished: bool,
}

impl<F> GeneratorDictionary<F>
where
    F: FnMut() -> Option<ValueRow>,
{
    pub fn new(tokens: TokenMap, generator: F) -> Self {
        Self {
            tokens,
            generator,
            finished: false,
        }
    }
}

impl<F> Dictionary for GeneratorDictionary<F>
where
    F: FnMut() -> Option<ValueRow>,
{
    fn token_map(&self) -> &TokenMap {
        &self.tokens
    }

    fn next_row(&mut self) -> Option<ReformerResult<ValueRow>> {
        if self.finished {
            return None;
        }
        match (self.generator)() {
            Some(row) => Some(Ok(row)),
            None => {
                self.finished = true;
                None
            }
        }
    }
}
