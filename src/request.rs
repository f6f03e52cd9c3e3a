// File: request.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

static CONTENT_LENGTH_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^(Content-Length):[ \t]*\d+").expect("valid Content-Length pattern")
});

/// Field name to placeholder mapping, in the order the dictionary declared
/// the fields. Substitution follows that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: Vec<(String, String)>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `field` to `placeholder`. Re-binding a field replaces its
    /// placeholder but keeps the original position.
    pub fn insert(&mut self, field: &str, placeholder: &str) {
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = placeholder.to_string(),
            None => self
                .entries
                .push((field.to_string(), placeholder.to_string())),
        }
    }

    pub fn placeholder(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, p)| p.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, p)| (f.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: AsRef<str>, P: AsRef<str>> FromIterator<(F, P)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (F, P)>>(iter: I) -> Self {
        let mut map = TokenMap::new();
        for (field, placeholder) in iter {
            map.insert(field.as_ref(), placeholder.as_ref());
        }
        map
    }
}

/// Substitution values for a single attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueRow {
    values: Vec<(String, String)>,
}

impl ValueRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: &str) {
        match self.values.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.values.push((field.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<F: AsRef<str>, V: AsRef<str>> FromIterator<(F, V)> for ValueRow {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut row = ValueRow::new();
        for (field, value) in iter {
            row.insert(field.as_ref(), value.as_ref());
        }
        row
    }
}

// Rendered as "user = admin \tpass = secret" in console output.
impl fmt::Display for ValueRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .values
            .iter()
            .map(|(field, value)| format!("{} = {}", field, value))
            .collect();
        write!(f, "{}", parts.join(" \t"))
    }
}

impl Serialize for ValueRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in &self.values {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// A raw HTTP request with placeholder tokens.
///
/// The body, if any, must be the final line of the template: the
/// `Content-Length` correction measures only that line.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    raw: String,
    tokens: TokenMap,
}

impl RequestTemplate {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            tokens: TokenMap::new(),
        }
    }

    pub fn with_tokens(raw: &str, tokens: TokenMap) -> Self {
        Self {
            raw: raw.to_string(),
            tokens,
        }
    }

    pub fn set_token(&mut self, placeholder: &str, field: &str) {
        self.tokens.insert(field, placeholder);
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &TokenMap {
        &self.tokens
    }

    /// Request line method, e.g. `POST`.
    pub fn method(&self) -> &str {
        self.raw
            .trim_start()
            .split_whitespace()
            .next()
            .unwrap_or("")
    }

    /// HEAD responses carry no body, so the reader stops after the headers.
    pub fn expects_body(&self) -> bool {
        !self.method().eq_ignore_ascii_case("HEAD")
    }

    /// Materializes one request from `row`.
    ///
    /// Only the first occurrence of each placeholder is replaced, so a value
    /// that contains its own placeholder text is never substituted again.
    /// Fields missing from `row` become empty strings.
    pub fn generate(&self, row: &ValueRow) -> String {
        let mut raw = self.raw.clone();

        for (field, placeholder) in self.tokens.iter() {
            if placeholder.is_empty() {
                continue;
            }
            raw = raw.replacen(placeholder, row.get(field).unwrap_or(""), 1);
        }

        let raw = raw.replace('\r', "");
        let body_len = last_line(&raw).len();

        CONTENT_LENGTH_HEADER
            .replacen(&raw, 1, |caps: &regex::Captures| {
                format!("{}: {}", &caps[1], body_len)
            })
            .into_owned()
    }
}

// Trailing empty lines are not part of the body.
fn last_line(text: &str) -> &str {
    text.trim_end_matches('\n').rsplit('\n').next().unwrap_or("")
}
