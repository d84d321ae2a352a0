//! Automated-browsing fallback for downloading portal markup.
//!
//! Some environments block direct requests to the static host. A headless
//! Chromium session that has first visited the public portal can still
//! load the file, so the fetcher falls back to one.
//!
//! The `BrowserLauncher` and `BrowserSession` traits abstract over the
//! browser engine (Chromium via chromiumoxide in production, fakes in tests).

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFinished, EventResponseReceived, GetResponseBodyParams,
};
use chromiumoxide::page::Page;
use futures::future::BoxFuture;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::error::{Result, RetrieverError};

/// Upper bound on tearing a session down after the capture has settled.
pub const SESSION_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Future settling with the body of the watched response.
pub type ResponseWatch = BoxFuture<'static, Result<String>>;

/// Starts isolated browsing sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// One isolated browsing context.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to a page and wait for it to load.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Start watching network traffic. The returned future settles with the
    /// body of the first response whose URL equals `url` exactly.
    async fn watch_response(&mut self, url: &str) -> Result<ResponseWatch>;

    /// Have the page issue a `fetch` of `url` without awaiting it.
    async fn fetch_in_page(&mut self, url: &str) -> Result<()>;

    /// Tear the session down.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Download `target_url` through a fresh browser session.
///
/// The capture (watch for the target response, visit `host_url`, trigger an
/// in-page fetch) races a `timeout` timer; whichever settles first decides
/// the outcome. The session is closed before returning in every case; a
/// close that takes longer than [`SESSION_CLOSE_TIMEOUT`] is abandoned.
///
/// # Arguments
/// * `launcher` - Browser engine to start the session with
/// * `target_url` - Exact URL of the response to capture
/// * `host_url` - Page that gives the session a valid context
/// * `timeout` - Deadline for the whole capture
pub async fn fetch_via_browser(
    launcher: &dyn BrowserLauncher,
    target_url: &str,
    host_url: &str,
    timeout: Duration,
) -> Result<String> {
    let mut session = launcher.launch().await?;

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    let outcome = tokio::select! {
        result = capture(session.as_mut(), target_url, host_url) => result,
        () = &mut deadline => Err(RetrieverError::FallbackTimedOut {
            url: target_url.to_string(),
            timeout_secs: timeout.as_secs(),
        }),
    };

    match tokio::time::timeout(SESSION_CLOSE_TIMEOUT, session.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "Failed to close browser session"),
        Err(_) => tracing::warn!(
            timeout_secs = SESSION_CLOSE_TIMEOUT.as_secs(),
            "Browser session did not close in time, abandoning it"
        ),
    }

    outcome
}

async fn capture(
    session: &mut dyn BrowserSession,
    target_url: &str,
    host_url: &str,
) -> Result<String> {
    let watch = session.watch_response(target_url).await?;
    session.navigate(host_url).await?;
    session.fetch_in_page(target_url).await?;
    watch.await
}

/// Launcher used when no browser may be started.
pub struct NoBrowser;

#[async_trait]
impl BrowserLauncher for NoBrowser {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        Err(RetrieverError::Browser(
            "browser fallback is disabled".to_string(),
        ))
    }
}

/// Launches headless Chromium through chromiumoxide.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    chromium_path: Option<PathBuf>,
}

impl ChromiumLauncher {
    /// `chromium_path` overrides chromiumoxide's executable detection.
    #[must_use]
    pub fn new(chromium_path: Option<PathBuf>) -> Self {
        Self { chromium_path }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if let Some(path) = &self.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| RetrieverError::Browser(format!("invalid browser config: {e}")))?;

        let (mut browser, mut handler) = Browser::launch(config).await.map_err(browser_error)?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(browser_error(e));
            }
        };

        tracing::debug!("Launched headless Chromium session");
        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler_task,
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(browser_error)?;
        Ok(())
    }

    async fn watch_response(&mut self, url: &str) -> Result<ResponseWatch> {
        let mut responses = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(browser_error)?;
        let mut finished = self
            .page
            .event_listener::<EventLoadingFinished>()
            .await
            .map_err(browser_error)?;
        let page = self.page.clone();
        let target = url.to_string();

        Ok(Box::pin(async move {
            let request_id = loop {
                match responses.next().await {
                    Some(event) if event.response.url == target => break event.request_id.clone(),
                    Some(_) => continue,
                    None => {
                        return Err(RetrieverError::Browser(
                            "network event stream closed".to_string(),
                        ))
                    }
                }
            };

            // The body is only retrievable once loading has finished.
            while let Some(event) = finished.next().await {
                if event.request_id == request_id {
                    break;
                }
            }

            let response = page
                .execute(GetResponseBodyParams::new(request_id))
                .await
                .map_err(browser_error)?;
            decode_body(&response.result.body, response.result.base64_encoded)
        }))
    }

    async fn fetch_in_page(&mut self, url: &str) -> Result<()> {
        let literal = serde_json::to_string(url)
            .map_err(|e| RetrieverError::Browser(format!("cannot quote URL: {e}")))?;
        let script = format!("void fetch({literal}).catch(() => null)");
        self.page
            .evaluate(script.as_str())
            .await
            .map_err(browser_error)?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let mut this = *self;
        let closed = this.browser.close().await;
        let _ = this.browser.wait().await;
        this.handler_task.abort();
        closed.map(|_| ()).map_err(browser_error)
    }
}

fn browser_error(err: impl std::fmt::Display) -> RetrieverError {
    RetrieverError::Browser(err.to_string())
}

fn decode_body(body: &str, base64_encoded: bool) -> Result<String> {
    if !base64_encoded {
        return Ok(body.to_string());
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body)
        .map_err(|e| RetrieverError::Browser(format!("undecodable response body: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
