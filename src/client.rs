// File: client.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::RunConfig;
use crate::errors::{ReformerError, ReformerResult};
use crate::recorder::Recorder;
use crate::response::Response;
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_rustls::{rustls, TlsConnector};

static DECLARED_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Content-Length:\s*(\d+)").expect("valid length pattern"));

const INTERIM_MARKER: &str = "100 Continue";

pub trait Stream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Stream for T {}

/// Sends one materialized request per call to a fixed target and reads back
/// a single framed response.
#[derive(Clone)]
pub struct Client {
    host: String,
    port: u16,
    tls: Option<TlsConnector>,
    timeout: Option<std::time::Duration>,
    max_continues: Option<usize>,
}

impl Client {
    pub fn new(config: &RunConfig) -> Self {
        let tls = if config.tls() {
            Some(TlsConnector::from(tls_config(config.insecure())))
        } else {
            None
        };

        Self {
            host: config.host().to_string(),
            port: config.port(),
            tls,
            timeout: config.timeout(),
            max_continues: config.max_continues(),
        }
    }

    pub fn uses_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// Opens a fresh connection, writes `request` and returns the final
    /// response. The connection is closed before this returns,
    /// whatever the outcome.
    pub async fn send(
        &self,
        request: &str,
        want_body: bool,
        recorder: &mut Recorder,
    ) -> ReformerResult<Response> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(request, want_body, recorder))
                .await
                .map_err(|_| ReformerError::Timeout(limit.as_millis() as u64))?,
            None => self.exchange(request, want_body, recorder).await,
        }
    }

    async fn exchange(
        &self,
        request: &str,
        want_body: bool,
        recorder: &mut Recorder,
    ) -> ReformerResult<Response> {
        let stream = self.connect().await?;
        let mut connection =
            Connection::new(stream, request.as_bytes()).with_max_continues(self.max_continues);
        let result = connection.send(want_body, recorder).await;
        connection.close().await;
        result
    }

    async fn connect(&self) -> ReformerResult<Box<dyn Stream>> {
        let address = format!("{}:{}", self.host, self.port);
        let tcp_stream = TcpStream::connect(&address)
            .await
            .map_err(|e| ReformerError::Connection(format!("{}: {}", address, e)))?;
        debug!("Connected to {}", address);

        match &self.tls {
            Some(connector) => {
                let domain = rustls::ServerName::try_from(self.host.as_str())?;
                let tls_stream = connector
                    .connect(domain, tcp_stream)
                    .await
                    .map_err(|e| ReformerError::Tls(format!("{}: {}", address, e)))?;
                debug!("TLS handshake with {} complete", address);
                Ok(Box::new(tls_stream))
            }
            None => Ok(Box::new(tcp_stream)),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.uses_tls())
            .field("timeout", &self.timeout)
            .field("max_continues", &self.max_continues)
            .finish()
    }
}

/// One open connection plus the request bytes it replays when the server
/// answers with an interim `100 Continue`.
pub struct Connection<S> {
    reader: BufReader<S>,
    request: Vec<u8>,
    max_continues: Option<usize>,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    pub fn new(stream: S, request: &[u8]) -> Self {
        Self {
            reader: BufReader::new(stream),
            request: request.to_vec(),
            max_continues: None,
        }
    }

    pub fn with_max_continues(mut self, max_continues: Option<usize>) -> Self {
        self.max_continues = max_continues;
        self
    }

    pub async fn send(
        &mut self,
        want_body: bool,
        recorder: &mut Recorder,
    ) -> ReformerResult<Response> {
        self.write_request().await?;
        self.read_response(want_body, recorder).await
    }

    /// Replays the request on the still-open connection.
    pub async fn resend(
        &mut self,
        want_body: bool,
        recorder: &mut Recorder,
    ) -> ReformerResult<Response> {
        self.send(want_body, recorder).await
    }

    pub async fn close(mut self) {
        if let Err(e) = self.reader.get_mut().shutdown().await {
            trace!("Shutdown after exchange failed: {}", e);
        }
    }

    async fn write_request(&mut self) -> ReformerResult<()> {
        let stream = self.reader.get_mut();
        stream.write_all(&self.request).await?;
        stream.flush().await?;
        trace!("Wrote {} request bytes", self.request.len());
        Ok(())
    }

    async fn read_response(
        &mut self,
        want_body: bool,
        recorder: &mut Recorder,
    ) -> ReformerResult<Response> {
        let mut continues = 0usize;

        loop {
            let (mut raw, declared) = self.read_headers().await?;
            let headers = String::from_utf8_lossy(&raw);

            if headers.contains(INTERIM_MARKER) {
                continues += 1;
                if let Some(limit) = self.max_continues {
                    if continues > limit {
                        warn!("Giving up after {} interim responses", limit);
                        return Err(ReformerError::InterimLimit(limit));
                    }
                }
                debug!("Interim 100 Continue received, resending request");
                recorder.interim(&headers)?;
                self.write_request().await?;
                continue;
            }

            if want_body {
                self.read_body(declared, &mut raw).await?;
            }

            let response = Response::from_bytes(raw);
            recorder.response(response.text())?;
            return Ok(response);
        }
    }

    async fn read_headers(&mut self) -> ReformerResult<(Vec<u8>, Option<usize>)> {
        let mut raw = Vec::new();
        let mut declared = None;

        loop {
            let start = raw.len();
            let read = self.reader.read_until(b'\n', &mut raw).await?;
            if read == 0 {
                return Err(ReformerError::Framing(if raw.is_empty() {
                    "connection closed before any response was sent".to_string()
                } else {
                    "connection closed before the end of the headers".to_string()
                }));
            }

            let line = String::from_utf8_lossy(&raw[start..]);
            if let Some(caps) = DECLARED_LENGTH.captures(&line) {
                declared = caps[1].parse::<usize>().ok();
            }

            if line.trim().is_empty() {
                return Ok((raw, declared));
            }
        }
    }

    /// Appends the body to `raw`, either the declared number of bytes or
    /// everything up to the peer closing.
    async fn read_body(&mut self, declared: Option<usize>, raw: &mut Vec<u8>) -> ReformerResult<()> {
        let start = raw.len();

        let result = match declared {
            Some(length) => {
                trace!("Reading {} declared body bytes", length);
                (&mut self.reader)
                    .take(length as u64)
                    .read_to_end(raw)
                    .await
            }
            None => {
                debug!("No Content-Length in response, reading until the peer closes");
                self.reader.read_to_end(raw).await
            }
        };

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!(
                    "Peer closed without a clean shutdown after {} bytes",
                    raw.len() - start
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn tls_config(insecure: bool) -> Arc<rustls::ClientConfig> {
    let builder = rustls::ClientConfig::builder().with_safe_defaults();

    let config = if insecure {
        builder
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate))
            .with_no_client_auth()
    } else {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
            rustls::OwnedTrustAnchor::from_subject_spki_name_constraints(
                ta.subject,
                ta.spki,
                ta.name_constraints,
            )
        }));
        builder
            .with_root_certificates(root_store)
            .with_no_client_auth()
    };

    Arc::new(config)
}

struct AcceptAnyCertificate;

impl rustls::client::ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::Certificate,
        _intermediates: &[rustls::Certificate],
        _server_name: &rustls::ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<rustls::client::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::ServerCertVerified::assertion())
    }
}
