// File: response.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

/// A framed response as it came off the wire. The text view is lossy for
/// non-UTF-8 bodies; sizes are always taken from the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    bytes: Vec<u8>,
    text: String,
}

impl Response {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Self { bytes, text }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of bytes received for this response, headers included.
    pub fn wire_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<&str> for Response {
    fn from(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
            text: text.to_string(),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
