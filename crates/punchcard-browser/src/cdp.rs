use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);
/// Chrome needs a moment after startup to create its initial page.
const PAGE_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Connects to a launched Chrome instance over the DevTools protocol.
pub struct CdpConnector {
    debugging_port: u16,
}

impl CdpConnector {
    pub fn new(debugging_port: u16) -> Self {
        Self { debugging_port }
    }

    /// Connect with bounded retries (Chrome may not be fully ready) and
    /// spawn the protocol event-handler task, which must run for any page
    /// command to complete.
    pub async fn connect(&self) -> Result<(Browser, JoinHandle<()>)> {
        let ws_url = format!("http://localhost:{}", self.debugging_port);
        tracing::info!("connecting to Chrome on port {}", self.debugging_port);

        let (browser, mut handler) = {
            let mut retries = CONNECT_ATTEMPTS;
            loop {
                tracing::debug!("attempting CDP connection to {}...", ws_url);
                match Browser::connect(ws_url.as_str()).await {
                    Ok(result) => {
                        tracing::info!("CDP connection established");
                        break result;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(Error::Cdp(format!(
                                "Failed to connect to Chrome after {} attempts: {}",
                                CONNECT_ATTEMPTS, e
                            )));
                        }
                        tracing::info!("CDP connection attempt failed, retrying... ({} left)", retries);
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    // Some CDP events are not fully parseable; keep draining
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        Ok((browser, handler_task))
    }

    /// The browser's first open page, or a fresh blank one.
    pub async fn page(&self, browser: &Browser) -> Result<Page> {
        tokio::time::sleep(PAGE_SETTLE_DELAY).await;

        if let Some(page) = browser.pages().await?.first() {
            tracing::debug!("using existing page");
            Ok(page.clone())
        } else {
            tracing::debug!("no existing pages, creating a blank one");
            Ok(browser.new_page("about:blank").await?)
        }
    }
}
