// File: client_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::client::{Client, Connection};
    use crate::config::RunConfig;
    use crate::detectors::SizeDetector;
    use crate::errors::ReformerError;
    use crate::recorder::Recorder;
    use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};

    const REQUEST: &str = "POST /login HTTP/1.1\nHost: t\nContent-Length: 7\n\nuser=a\n";

    async fn scripted(reply: &str) -> (Connection<DuplexStream>, DuplexStream) {
        let (client, mut server) = duplex(16 * 1024);
        server.write_all(reply.as_bytes()).await.unwrap();
        (Connection::new(client, REQUEST.as_bytes()), server)
    }

    async fn scripted_then_closed(reply: &str) -> (Connection<DuplexStream>, DuplexStream) {
        let (conn, mut server) = scripted(reply).await;
        server.shutdown().await.unwrap();
        (conn, server)
    }

    #[tokio::test]
    async fn test_reads_exactly_declared_length() {
        let (mut conn, _server) = scripted(
            "HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nHELLOtrailing-garbage",
        )
        .await;

        let response = conn.send(true, &mut Recorder::disabled()).await.unwrap();

        assert_eq!(response.text(), "HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nHELLO");
    }

    #[tokio::test]
    async fn test_interim_continue_triggers_resend() {
        let (mut conn, mut server) = scripted(
            "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK",
        )
        .await;

        let response = conn.send(true, &mut Recorder::disabled()).await.unwrap();
        conn.close().await;

        assert_eq!(response.text(), "HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK");
        assert!(!response.text().contains("100 Continue"));

        let mut written = String::new();
        server.read_to_string(&mut written).await.unwrap();
        assert_eq!(written, format!("{}{}", REQUEST, REQUEST));
    }

    #[tokio::test]
    async fn test_binary_body_keeps_wire_length() {
        let headers = "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 10\r\n\r\n";
        let (client, mut server) = duplex(16 * 1024);
        server.write_all(headers.as_bytes()).await.unwrap();
        server.write_all(&[0xff; 10]).await.unwrap();
        let mut conn = Connection::new(client, REQUEST.as_bytes());

        let response = conn.send(true, &mut Recorder::disabled()).await.unwrap();

        assert_eq!(response.wire_length(), headers.len() + 10);
        assert_eq!(&response.bytes()[headers.len()..], &[0xff; 10]);
        assert_eq!(
            SizeDetector::measure(&response),
            (headers.len(), 10)
        );
    }

    #[tokio::test]
    async fn test_reads_to_eof_without_content_length() {
        let (mut conn, _server) = scripted_then_closed(
            "HTTP/1.0 200 OK\r\nServer: legacy\r\n\r\n<html>no length here</html>\n",
        ).await;

        let response = conn.send(true, &mut Recorder::disabled()).await.unwrap();

        assert!(response.text().ends_with("\r\n\r\n<html>no length here</html>\n"));
    }

    #[tokio::test]
    async fn test_short_body_is_not_an_error() {
        let (mut conn, _server) =
            scripted_then_closed("HTTP/1.1 200 OK\r\nContent-Length: 50\r\n\r\nshort").await;

        let response = conn.send(true, &mut Recorder::disabled()).await.unwrap();

        assert!(response.text().ends_with("\r\n\r\nshort"));
    }

    #[tokio::test]
    async fn test_empty_body_at_eof() {
        let (mut conn, _server) = scripted_then_closed("HTTP/1.1 204 No Content\r\n\r\n").await;

        let response = conn.send(true, &mut Recorder::disabled()).await.unwrap();

        assert_eq!(response.text(), "HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[tokio::test]
    async fn test_headers_only_when_body_not_wanted() {
        let (mut conn, _server) =
            scripted("HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\nbody").await;

        let response = conn.send(false, &mut Recorder::disabled()).await.unwrap();

        assert_eq!(response.text(), "HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\n");
    }

    #[tokio::test]
    async fn test_truncated_headers_are_a_framing_error() {
        let (mut conn, _server) = scripted_then_closed("HTTP/1.1 200 OK\r\nContent-Len").await;

        let result = conn.send(true, &mut Recorder::disabled()).await;

        assert!(matches!(result, Err(ReformerError::Framing(_))));
    }

    #[tokio::test]
    async fn test_silent_peer_is_a_framing_error() {
        let (mut conn, _server) = scripted_then_closed("").await;

        let result = conn.send(true, &mut Recorder::disabled()).await;

        assert!(matches!(result, Err(ReformerError::Framing(_))));
    }

    #[tokio::test]
    async fn test_interim_limit_is_enforced() {
        let (client, mut server) = duplex(16 * 1024);
        server
            .write_all("HTTP/1.1 100 Continue\r\n\r\n".repeat(3).as_bytes())
            .await
            .unwrap();
        let mut conn = Connection::new(client, REQUEST.as_bytes()).with_max_continues(Some(1));

        let result = conn.send(true, &mut Recorder::disabled()).await;

        assert!(matches!(result, Err(ReformerError::InterimLimit(1))));
    }

    #[tokio::test]
    async fn test_resend_replays_request() {
        let (mut conn, mut server) = scripted(
            "HTTP/1.1 200 OK\r\nContent-Length: 1\r\n\r\nAHTTP/1.1 200 OK\r\nContent-Length: 1\r\n\r\nB",
        )
        .await;
        let mut recorder = Recorder::disabled();

        let first = conn.send(true, &mut recorder).await.unwrap();
        let second = conn.resend(true, &mut recorder).await.unwrap();
        conn.close().await;

        assert!(first.text().ends_with('A'));
        assert!(second.text().ends_with('B'));
        let mut written = String::new();
        server.read_to_string(&mut written).await.unwrap();
        assert_eq!(written.matches("POST /login").count(), 2);
    }

    #[tokio::test]
    async fn test_interim_and_final_responses_are_recorded() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut recorder = Recorder::to_file(file.path()).unwrap();
        let (mut conn, _server) = scripted(
            "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK",
        )
        .await;

        conn.send(true, &mut recorder).await.unwrap();
        drop(recorder);

        let transcript = std::fs::read_to_string(file.path()).unwrap();
        let continue_at = transcript.find("Continue:").unwrap();
        let response_at = transcript.find("RESPONSE:").unwrap();
        assert!(continue_at < response_at);
        assert!(transcript.contains("HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nOK"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_reported() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = Client::new(&RunConfig::new("127.0.0.1", port));
        let result = client
            .send(REQUEST, true, &mut Recorder::disabled())
            .await;

        assert!(matches!(result, Err(ReformerError::Connection(_))));
    }

    #[tokio::test]
    async fn test_tls_handshake_against_plaintext_server_fails() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = socket
                .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
                .await;
            let _ = socket.shutdown().await;
        });

        let mut config = RunConfig::new("127.0.0.1", port);
        config.set_tls(true);
        config.set_insecure(true);
        let result = Client::new(&config)
            .send(REQUEST, true, &mut Recorder::disabled())
            .await;

        assert!(matches!(result, Err(ReformerError::Tls(_))));
        server.await.unwrap();
    }

    #[test]
    fn test_client_tls_flag() {
        let mut config = RunConfig::new("example.com", 443);
        assert!(!Client::new(&config).uses_tls());

        config.set_tls(true);
        assert!(Client::new(&config).uses_tls());

        config.set_insecure(true);
        assert!(Client::new(&config).uses_tls());
    }
}
