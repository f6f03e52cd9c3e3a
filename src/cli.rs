// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::RunConfig;

const AFTER_HELP: &str = "\
Supported detectors:
  reg        Use Regular Expression success detector
  nreg       Use Regular Expression failure detector
  size       Use response size analyzer as success detector

Symbol file format:
  Line 1:  comma delimited symbol names (e.g., user,password)
  Line 2:  comma delimited substitutions (e.g., %USER%,%PASS%)
  Rest:    comma delimited values (e.g., admin,admin)

The request file is a raw HTTP request with the substitution symbols
inserted where the values belong, for example a body line such as:

  user=%USER%&pass=%PASS%&val=something

If the request has a body it must be the last line of the file.";

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    after_help = AFTER_HELP,
)]
pub struct Cli {
    #[arg(help = "Hostname or IP address of target system")]
    pub host: String,

    #[arg(help = "TCP port hosting target web server")]
    pub port: u16,

    #[arg(help = "Text file containing raw HTTP request to send")]
    pub request: PathBuf,

    #[arg(help = "Comma delimited text file containing symbol data")]
    pub symbols: PathBuf,

    #[arg(help = "Detector to use for identifying success (reg, nreg, size)")]
    pub detector: String,

    #[arg(help = "Optional parameter for success detector")]
    pub parameter: Option<String>,

    #[arg(short = 's', long = "ssl", help = "Enable SSL for HTTP connections")]
    pub ssl: bool,

    #[arg(
        short = 'k',
        long = "insecure",
        help = "Do not verify the server certificate when using SSL"
    )]
    pub insecure: bool,

    #[arg(
        short = 'r',
        long = "record",
        help = "Record requests and responses in <FILE>"
    )]
    pub record: Option<PathBuf>,

    #[arg(
        short = '1',
        long = "first",
        help = "Stop on first success response from detector"
    )]
    pub first: bool,

    #[arg(long = "report", help = "Write a JSON summary of the run to <FILE>")]
    pub report: Option<PathBuf>,

    #[arg(
        short = 't',
        long = "timeout",
        help = "Abort an attempt after this many seconds (default: wait forever)"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long = "max-continue",
        help = "Give up after this many interim 100 Continue responses per attempt"
    )]
    pub max_continue: Option<usize>,

    #[arg(
        long = "rate-limit",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum attempts per second"
    )]
    pub rate_limit: Option<u32>,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(
        long = "i-have-authorization",
        help = "Skip authorization prompt (requires explicit written permission)"
    )]
    pub i_have_authorization: bool,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new(&self.host, self.port);
        config.set_tls(self.ssl);
        config.set_insecure(self.insecure);
        config.set_stop_on_success(self.first);
        config.set_record_path(self.record.clone());
        config.set_report_path(self.report.clone());
        config.set_timeout(self.timeout.map(Duration::from_secs));
        config.set_max_continues(self.max_continue);
        config.set_rate_limit(self.rate_limit.and_then(NonZeroU32::new));
        config
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            return log::LevelFilter::Debug;
        }
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Warn)
    }
}
