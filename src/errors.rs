// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

#[derive(Debug)]
pub enum ReformerError {
    Configuration(String),
    Dictionary(String),
    Connection(String),
    Tls(String),
    Framing(String),
    InterimLimit(usize),
    Timeout(u64),
    Io(std::io::Error),
}

impl fmt::Display for ReformerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Self::Dictionary(msg) => write!(f, "Dictionary error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection failed: {}", msg),
            Self::Tls(msg) => write!(f, "TLS error: {}", msg),
            Self::Framing(msg) => write!(f, "Malformed response: {}", msg),
            Self::InterimLimit(n) => {
                write!(f, "Server sent more than {} interim 100 Continue responses", n)
            }
            Self::Timeout(ms) => write!(f, "Attempt timed out after {} ms", ms),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ReformerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReformerError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<regex::Error> for ReformerError {
    fn from(error: regex::Error) -> Self {
        Self::Configuration(format!("invalid regular expression: {}", error))
    }
}

impl From<rustls::client::InvalidDnsNameError> for ReformerError {
    fn from(error: rustls::client::InvalidDnsNameError) -> Self {
        Self::Tls(error.to_string())
    }
}

pub type ReformerResult<T> = Result<T, ReformerError>;
