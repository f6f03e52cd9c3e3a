// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

pub const INTERIM: &str = "HTTP/1.1 100 Continue\r\n\r\n";

/// What the scripted server sends back for one request.
pub struct Reply {
    pub interim: bool,
    pub raw: String,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply {
            interim: false,
            raw: format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
                body.len(),
                body
            ),
        }
    }

    pub fn unframed(body: &str) -> Self {
        Reply {
            interim: false,
            raw: format!("HTTP/1.0 200 OK\r\nServer: legacy\r\n\r\n{}", body),
        }
    }

    pub fn after_continue(mut self) -> Self {
        self.interim = true;
        self
    }
}

pub struct ScriptedServer {
    pub port: u16,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedServer {
    pub fn connections(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].clone()
    }
}

/// Listens on an ephemeral local port and answers every connection with
/// `handler(request)`, then closes it.
pub async fn spawn_server<F>(handler: F) -> ScriptedServer
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let seen = Arc::clone(&requests);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = Arc::clone(&handler);
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                serve(stream, handler.as_ref(), seen).await;
            });
        }
    });

    ScriptedServer { port, requests }
}

/// Accepts connections but never answers.
pub async fn spawn_silent_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    port
}

async fn serve<F>(stream: TcpStream, handler: &F, seen: Arc<Mutex<Vec<String>>>)
where
    F: Fn(&str) -> Reply,
{
    let mut reader = BufReader::new(stream);
    let Some(request) = read_request(&mut reader).await else {
        return;
    };
    seen.lock().unwrap().push(request.clone());

    let reply = handler(&request);
    if reply.interim {
        reader.get_mut().write_all(INTERIM.as_bytes()).await.unwrap();
        if read_request(&mut reader).await.is_none() {
            return;
        }
    }
    reader.get_mut().write_all(reply.raw.as_bytes()).await.unwrap();
    let _ = reader.get_mut().shutdown().await;
}

async fn read_request(reader: &mut BufReader<TcpStream>) -> Option<String> {
    let mut request = String::new();
    let mut length = 0usize;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.ok()? == 0 {
            return None;
        }
        if let Some(value) = line.strip_prefix("Content-Length: ") {
            length = value.trim().parse().unwrap_or(0);
        }
        request.push_str(&line);
        if line.trim().is_empty() {
            break;
        }
    }

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.ok()?;
    request.push_str(&String::from_utf8_lossy(&body));
    Some(request)
}

pub fn login_template() -> &'static str {
    "POST /login HTTP/1.1\r\n\
Host: 127.0.0.1\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
Content-Length: 23\r\n\
\r\n\
user=%USER%&pass=%PASS%"
}

pub fn login_dictionary() -> &'static str {
    "user,pass\n%USER%,%PASS%\nadmin,admin\nadmin,s3cret\nadmin,password\n"
}
