// File: engine.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::client::Client;
use crate::config::RunConfig;
use crate::detectors::Detector;
use crate::dictionary::Dictionary;
use crate::errors::ReformerResult;
use crate::recorder::Recorder;
use crate::request::RequestTemplate;
use crate::runstate::RunState;
use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use log::{debug, info};

/// Drives the attempt loop: one row, one request, one response, one verdict.
pub struct Engine<'a> {
    config: &'a RunConfig,
    client: Client,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            client: Client::new(config),
            rate_limiter: config
                .rate_limit()
                .map(|rate| RateLimiter::direct(Quota::per_second(rate))),
        }
    }

    /// Runs every row of `dictionary` through `template` and `detector`.
    ///
    /// Any connection or framing failure aborts the run.
    pub async fn run(
        &self,
        template: &RequestTemplate,
        dictionary: &mut dyn Dictionary,
        detector: &mut dyn Detector,
        recorder: &mut Recorder,
    ) -> ReformerResult<RunState> {
        let mut state = RunState::new();
        let want_body = template.expects_body();

        if let Some(banner) = detector.banner() {
            println!("{}", banner);
        }

        while let Some(row) = dictionary.next_row() {
            let row = row?;

            if let Some(limiter) = &self.rate_limiter {
                limiter.until_ready().await;
            }

            let request = template.generate(&row);
            recorder.request(&request)?;
            debug!("Attempt {} against {}", state.attempts() + 1, self.config.target());

            let response = self.client.send(&request, want_body, recorder).await?;

            if detector.process(&response, &row) {
                state.add_success();
                if self.config.stop_on_success() {
                    info!("Stopping after first success: {}", row);
                    state.set_stopped_early(true);
                    break;
                }
            } else {
                state.add_failure();
            }

            recorder.separator()?;
        }

        state.finish();
        Ok(state)
    }
}
