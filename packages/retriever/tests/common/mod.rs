//! Shared helpers for the integration tests: a scripted browser and
//! canned Slov-Lex responses.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use slovlex_retriever::browser::{BrowserLauncher, BrowserSession, ResponseWatch};
use slovlex_retriever::{Retriever, RetrieverConfig, RetrieverError};
use tokio::sync::oneshot;
use wiremock::MockServer;

/// Portal markup of 595/2003 as effective on 2025-01-01.
pub const PORTAL_HTML: &str = include_str!("../fixtures/portal_595_2003.html");

pub const BASE_IRI: &str = "/SK/ZZ/2003/595";
pub const VERSION_IRI: &str = "/SK/ZZ/2003/595/20250101";
pub const PORTAL_PATH: &str = "/static/SK/ZZ/2003/595/20250101.portal";

/// Configuration pointing every upstream at `server`.
pub fn config_for(server: &MockServer) -> RetrieverConfig {
    RetrieverConfig::default()
        .with_api_base_url(server.uri())
        .with_static_base_url(format!("{}/static", server.uri()))
        .with_portal_host_url(format!("{}/ezbierky/", server.uri()))
        .with_fallback_timeout(Duration::from_secs(5))
}

pub fn retriever(config: RetrieverConfig, browser: &Arc<FakeLauncher>) -> Retriever {
    let launcher: Arc<dyn BrowserLauncher> = browser.clone();
    Retriever::new(config, launcher).unwrap()
}

pub fn version_response(iri: &str) -> Value {
    json!({ "numFound": 1, "start": 0, "numFoundExact": true, "docs": [{ "iri": iri }] })
}

pub fn empty_response() -> Value {
    json!({ "numFound": 0, "start": 0, "docs": [] })
}

pub fn metadata_response(iri: &str) -> Value {
    json!({
        "numFound": 1,
        "start": 0,
        "docs": [{
            "iri": iri,
            "cislo": "595/2003",
            "nazov": "Zákon o dani z príjmov",
            "typPredp_value": "Zákon",
            "vyhlaseny": "2003-12-31",
            "ucinnyOd": "2025-01-01",
            "ucinnyDo": "2025-03-31",
            "nadpisy": ["Predmet úpravy", "Sadzba dane"]
        }]
    })
}

/// What the scripted browser does once asked to fetch in page.
#[derive(Clone)]
pub enum Script {
    /// The watched response arrives with this body.
    Deliver(String),
    /// The watched response never arrives.
    Hang,
}

/// Browser launcher that records launches and closes.
pub struct FakeLauncher {
    script: Script,
    pub launches: AtomicUsize,
    pub closes: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            launches: AtomicUsize::new(0),
            closes: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// A launcher whose page delivers the fixture markup.
    pub fn delivering_fixture() -> Arc<Self> {
        Self::new(Script::Deliver(PORTAL_HTML.to_string()))
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, RetrieverError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            script: self.script.clone(),
            watched: None,
            sender: None,
            closes: Arc::clone(&self.closes),
        }))
    }
}

struct FakeSession {
    script: Script,
    watched: Option<String>,
    sender: Option<oneshot::Sender<String>>,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&mut self, _url: &str) -> Result<(), RetrieverError> {
        Ok(())
    }

    async fn watch_response(&mut self, url: &str) -> Result<ResponseWatch, RetrieverError> {
        let (tx, rx) = oneshot::channel();
        self.watched = Some(url.to_string());
        self.sender = Some(tx);
        Ok(Box::pin(async move {
            rx.await
                .map_err(|_| RetrieverError::Browser("listener dropped".to_string()))
        }))
    }

    async fn fetch_in_page(&mut self, url: &str) -> Result<(), RetrieverError> {
        assert_eq!(self.watched.as_deref(), Some(url), "fetch of an unwatched URL");
        if let Script::Deliver(body) = &self.script {
            if let Some(tx) = self.sender.take() {
                let _ = tx.send(body.clone());
            }
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), RetrieverError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
