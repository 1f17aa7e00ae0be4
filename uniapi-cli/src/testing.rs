//! Test doubles for the terminal and the network.

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use uniapi_core::{
    ApiClient, Config, HttpRequest, HttpResponse, ProviderId, Transport, TransportError,
};

use crate::{
    console::{Accent, Console, ConsoleError},
    menu::MenuItem,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Clear,
    Menu,
    Prompt(String),
    Table { title: String, rows: Vec<(String, String)> },
    Info(String),
    Error(String),
    Pause(String),
    Working(String),
    Done,
}

#[derive(Debug)]
enum Scripted {
    Line(String),
    Interrupt,
    Cancel,
    /// Never answers, like a terminal nobody types into.
    Hang,
}

/// Replays prepared input lines and records everything shown.
///
/// `pause` consumes a line, as the terminal does. Once the script runs out, reads fail
/// with `EndOfInput`.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    script: VecDeque<Scripted>,
    pub events: Vec<Event>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().then_lines(lines)
    }

    pub fn then_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script.extend(lines.into_iter().map(|l| Scripted::Line(l.into())));
        self
    }

    pub fn then_interrupt(mut self) -> Self {
        self.script.push_back(Scripted::Interrupt);
        self
    }

    pub fn then_cancel(mut self) -> Self {
        self.script.push_back(Scripted::Cancel);
        self
    }

    pub fn then_hang(mut self) -> Self {
        self.script.push_back(Scripted::Hang);
        self
    }

    async fn read_line(&mut self) -> Result<String, ConsoleError> {
        match self.script.pop_front() {
            Some(Scripted::Line(line)) => Ok(line),
            Some(Scripted::Interrupt) => Err(ConsoleError::Interrupted),
            Some(Scripted::Cancel) => Err(ConsoleError::Cancelled),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(ConsoleError::EndOfInput),
        }
    }

    pub fn remaining_inputs(&self) -> usize {
        self.script.len()
    }

    pub fn prompts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Prompt(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn pauses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Pause(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Info(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Table { title, rows } => Some((title.clone(), rows.clone())),
                _ => None,
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl Console for ScriptedConsole {
    fn clear(&mut self) {
        self.events.push(Event::Clear);
    }

    fn show_menu(&mut self, _title: &str, _items: &[MenuItem]) {
        self.events.push(Event::Menu);
    }

    async fn prompt(&mut self, message: &str) -> Result<String, ConsoleError> {
        self.events.push(Event::Prompt(message.to_string()));
        self.read_line().await
    }

    fn show_table(&mut self, title: &str, rows: &[(String, String)], _accent: Accent) {
        self.events.push(Event::Table { title: title.to_string(), rows: rows.to_vec() });
    }

    fn show_info(&mut self, message: &str) {
        self.events.push(Event::Info(message.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_string()));
    }

    async fn pause(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.events.push(Event::Pause(message.to_string()));
        self.read_line().await.map(|_| ())
    }

    fn begin_work(&mut self, message: &str) {
        self.events.push(Event::Working(message.to_string()));
    }

    fn end_work(&mut self) {
        self.events.push(Event::Done);
    }
}

/// Answers every request with the same canned reply and counts the calls.
#[derive(Debug, Clone)]
pub struct CannedTransport {
    inner: Arc<CannedInner>,
}

#[derive(Debug)]
struct CannedInner {
    reply: Result<HttpResponse, TransportError>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl CannedTransport {
    pub fn reply(reply: Result<HttpResponse, TransportError>) -> Self {
        Self { inner: Arc::new(CannedInner { reply, seen: Mutex::new(Vec::new()) }) }
    }

    pub fn ok(body: &str) -> Self {
        Self::reply(Ok(HttpResponse::ok_json(body)))
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(Arc::new(self.clone()))
    }

    pub fn calls(&self) -> usize {
        self.inner.seen.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.inner.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.inner.seen.lock().unwrap().push(request.clone());
        self.inner.reply.clone()
    }
}

/// Configuration with a key for every provider.
pub fn all_keys() -> Config {
    let mut cfg = Config::default();
    for id in ProviderId::all() {
        cfg.upsert_provider_api_key(*id, format!("{id}-key"));
    }
    cfg
}
