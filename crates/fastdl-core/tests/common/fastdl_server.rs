//! Minimal HTTP/1.1 file server for integration tests.
//!
//! Serves a fixed set of paths with 200, configured paths with a given error
//! status, and 404 for everything else. Records every request line's path and
//! User-Agent so tests can assert what was fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
    pub user_agent: Option<String>,
}

#[derive(Default)]
pub struct Files {
    ok: HashMap<String, Vec<u8>>,
    status: HashMap<String, u16>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    /// `path` is the full request path, e.g. `/cstrike/maps/de_dust2.bsp`.
    pub fn file(mut self, path: &str, body: &[u8]) -> Self {
        self.ok.insert(path.to_string(), body.to_vec());
        self
    }

    pub fn status(mut self, path: &str, code: u16) -> Self {
        self.status.insert(path.to_string(), code);
        self
    }
}

pub struct Server {
    pub base: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Server {
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

/// Starts the server in a background thread. `base` is e.g. "http://127.0.0.1:12345".
/// The server runs until the process exits.
pub fn start(files: Files) -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &files, &log));
        }
    });
    Server {
        base: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, files: &Files, log: &Mutex<Vec<Request>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let parsed = parse_request(request);
    let Some((method, req)) = parsed else {
        let _ = stream.write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    };
    log.lock().unwrap().push(req.clone());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    let (status, body): (String, &[u8]) = if let Some(body) = files.ok.get(&req.path) {
        ("200 OK".to_string(), body.as_slice())
    } else if let Some(code) = files.status.get(&req.path) {
        (format!("{} Error", code), &b"error"[..])
    } else {
        ("404 Not Found".to_string(), &b"not found"[..])
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Returns the method and the request (path + User-Agent).
fn parse_request(request: &str) -> Option<(String, Request)> {
    let mut lines = request.lines();
    let first = lines.next()?;
    let mut parts = first.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();
    let mut user_agent = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }
    Some((method, Request { path, user_agent }))
}
