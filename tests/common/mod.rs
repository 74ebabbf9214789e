//! Shared fixtures for the bikewatch integration tests.
//!
//! Provides a scripted in-process renderer (no network), a recording
//! notifier, a one-shot local HTTP responder, and a config with the settle
//! delay switched off.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bikewatch::{
    BikeWatchError, Config, Notifier, Profile, RenderSession, RenderedPage, Renderer, Result,
    YearRange,
};

/// Config suitable for tests: no settle delay, no delivery credentials.
pub fn test_config() -> Config {
    Config {
        settle_delay: (Duration::ZERO, Duration::ZERO),
        marketplace_base: "https://market.test".to_string(),
        ..Config::default()
    }
}

pub fn profile(brand: &str, model: &str, min: u16, max: u16) -> Profile {
    Profile::new(brand, brand, model, YearRange::new(min, max).unwrap())
}

pub fn fragments(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// ScriptedRenderer
// ---------------------------------------------------------------------------

/// What a page for a given search should do.
#[derive(Clone)]
pub enum Script {
    /// Page opens; these are the price candidates.
    Fragments(Vec<String>),
    /// Page opens; candidate selection runs over this HTML.
    Html(String),
    /// Navigation fails.
    OpenFails(String),
}

/// Renderer whose pages are chosen by a substring of the requested URL.
#[derive(Clone, Default)]
pub struct ScriptedRenderer {
    scripts: Arc<Vec<(String, Script)>>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
    pub visited: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRenderer {
    pub fn new(scripts: Vec<(&str, Script)>) -> Self {
        Self {
            scripts: Arc::new(
                scripts
                    .into_iter()
                    .map(|(needle, s)| (needle.to_string(), s))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Renderer for ScriptedRenderer {
    fn session(&self) -> Result<Box<dyn RenderSession>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            scripts: self.scripts.clone(),
            closed: self.closed.clone(),
            visited: self.visited.clone(),
            current: None,
        }))
    }
}

struct ScriptedSession {
    scripts: Arc<Vec<(String, Script)>>,
    closed: Arc<AtomicUsize>,
    visited: Arc<Mutex<Vec<String>>>,
    current: Option<Script>,
}

impl RenderSession for ScriptedSession {
    fn open(&mut self, url: &str) -> Result<RenderedPage> {
        self.visited.lock().unwrap().push(url.to_string());

        let script = self
            .scripts
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, s)| s.clone())
            .unwrap_or(Script::Fragments(Vec::new()));

        let html = match &script {
            Script::OpenFails(reason) => return Err(BikeWatchError::Render(reason.clone())),
            Script::Html(html) => html.clone(),
            Script::Fragments(_) => String::new(),
        };
        self.current = Some(script);

        Ok(RenderedPage {
            url: url.to_string(),
            html,
        })
    }

    fn find_text_candidates(&self, page: &RenderedPage) -> Result<Vec<String>> {
        match &self.current {
            Some(Script::Fragments(items)) => Ok(items.clone()),
            _ => bikewatch::render::price_candidates(&page.html),
        }
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(i64, String)>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, recipient: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((recipient, text.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// One-shot HTTP responder
// ---------------------------------------------------------------------------

/// Request seen by [`respond_once`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: String,
}

/// Serve exactly one HTTP request on a loopback port with a canned JSON
/// reply. Returns the base URL and a handle yielding the captured request.
pub fn respond_once(status: u16, json_body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let reply = format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{json_body}",
        json_body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = stream;
        stream.write_all(reply.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8(body).unwrap(),
        }
    });

    (base, handle)
}
