// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log::{error, info};
use reformer::cli::Cli;
use reformer::config::RunConfig;
use reformer::detectors::DetectorKind;
use reformer::dictionary::{CsvDictionary, Dictionary};
use reformer::engine::Engine;
use reformer::recorder::Recorder;
use reformer::report::RunReport;
use reformer::request::RequestTemplate;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    print_banner();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("{} {:#}", "ERROR:".red().bold(), e);
        std::process::exit(1);
    }
}

fn print_banner() {
    println!();
    println!(
        "{}",
        format!(
            "{} version {}, licensed under {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_LICENSE")
        )
        .blue()
        .bold()
    );
    println!("{}", "This software comes with ABSOLUTELY NO WARRANTY.".blue());
    println!();
}

fn confirm_authorization(config: &RunConfig) -> Result<bool> {
    println!(
        "{}",
        "This tool submits credential guesses to the target system.".bright_yellow()
    );
    println!("   Only run it against systems you have explicit written permission to test.");
    println!(
        "{}",
        format!(
            "Do you have authorization to test {}? (yes/NO):",
            config.target()
        )
        .bright_yellow()
    );

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read authorization answer")?;
    Ok(input.trim().eq_ignore_ascii_case("yes"))
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.run_config();

    let kind: DetectorKind = cli.detector.parse()?;
    let mut detector = kind.build(cli.parameter.as_deref())?;

    let text = std::fs::read_to_string(&cli.request)
        .with_context(|| format!("Failed to read request file {}", cli.request.display()))?;

    let mut dictionary = CsvDictionary::open(&cli.symbols)?;
    let template = RequestTemplate::with_tokens(&text, dictionary.token_map().clone());

    if !cli.i_have_authorization && !confirm_authorization(&config)? {
        println!("{}", "Authorization not confirmed. Exiting.".red());
        return Ok(());
    }

    let mut recorder = match config.record_path() {
        Some(path) => Recorder::to_file(path)
            .with_context(|| format!("Failed to create record file {}", path.display()))?,
        None => Recorder::disabled(),
    };

    info!(
        "Attacking {} with detector '{}'{}",
        config.target(),
        kind,
        if config.tls() { " over TLS" } else { "" }
    );

    let engine = Engine::new(&config);
    let state = engine
        .run(&template, &mut dictionary, detector.as_mut(), &mut recorder)
        .await
        .with_context(|| format!("Attack against {} aborted", config.target()))?;

    print!("{}", detector.summarize());
    println!();
    println!(
        "{} attempts in {:.2}s. Successful: {}. Failed: {}.{}",
        state.attempts(),
        state.elapsed().as_secs_f64(),
        state.successful_attempts(),
        state.failed_attempts(),
        if state.stopped_early() {
            " Stopped on first success."
        } else {
            ""
        }
    );

    if let Some(path) = config.report_path() {
        RunReport::new(&config, &state, detector.as_ref())
            .write_json(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
