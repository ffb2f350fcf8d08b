//! An in-memory backend that records every call instead of running yt-dlp.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tubefetch::{Backend, BackendOptions, BackendSession, Error, InfoDict, Result};

#[derive(Debug, Clone)]
pub struct Call {
    pub options: BackendOptions,
    pub url: String,
    pub download: bool,
}

#[derive(Debug, Default)]
struct StubState {
    response: Option<std::result::Result<InfoDict, String>>,
    calls: Vec<Call>,
    opened: usize,
    closed: usize,
}

/// Cloning shares the recorded state, so a test can keep a handle after
/// moving the backend into the code under test.
#[derive(Debug, Clone, Default)]
pub struct StubBackend {
    state: Arc<Mutex<StubState>>,
}

impl StubBackend {
    pub fn returning(response: Value) -> Self {
        let dict = match response {
            Value::Object(map) => map,
            other => panic!("stub response must be an object, got {other}"),
        };
        let backend = Self::default();
        backend.state.lock().unwrap().response = Some(Ok(dict));
        backend
    }

    pub fn failing(message: &str) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().response = Some(Err(message.to_string()));
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }
}

pub struct StubSession {
    state: Arc<Mutex<StubState>>,
    options: BackendOptions,
}

impl Backend for StubBackend {
    type Session = StubSession;

    fn open(&self, options: BackendOptions) -> Result<StubSession> {
        self.state.lock().unwrap().opened += 1;
        Ok(StubSession {
            state: Arc::clone(&self.state),
            options,
        })
    }
}

#[async_trait]
impl BackendSession for StubSession {
    async fn extract_info(&mut self, url: &str, download: bool) -> Result<InfoDict> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            options: self.options.clone(),
            url: url.to_string(),
            download,
        });
        match state.response.clone() {
            Some(Ok(dict)) => Ok(dict),
            Some(Err(message)) => Err(Error::Backend(message)),
            None => Ok(InfoDict::new()),
        }
    }
}

impl Drop for StubSession {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.closed += 1;
        }
    }
}
