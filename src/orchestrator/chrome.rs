use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use parking_lot::Mutex;
use tracing::debug;

use crate::app::{Result, SkimmerError};
use crate::orchestrator::config::BrowserConfig;
use crate::orchestrator::host::TabHost;
use crate::orchestrator::signals::{LoadSignals, TabId};

/// Hidden tabs backed by a Chrome instance driven through chromiumoxide
pub struct ChromeTabHost {
    browser: Arc<Browser>,
    config: BrowserConfig,
    pages: Mutex<HashMap<TabId, Page>>,
    next_tab: AtomicU64,
    signals: LoadSignals,
}

impl ChromeTabHost {
    /// Launch the browser with the given configuration
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let mut builder = LaunchConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !config.headless {
            builder = builder.with_head();
        }

        let launch_config = builder
            .build()
            .map_err(|e| SkimmerError::Platform(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(launch_config).await.map_err(|e| {
            SkimmerError::Platform(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self {
            browser: Arc::new(browser),
            config,
            pages: Mutex::new(HashMap::new()),
            next_tab: AtomicU64::new(1),
            signals: LoadSignals::new(),
        })
    }

    fn page(&self, tab: TabId) -> Result<Page> {
        self.pages
            .lock()
            .get(&tab)
            .cloned()
            .ok_or_else(|| SkimmerError::Platform(format!("No tab with id: {}", tab)))
    }
}

#[async_trait]
impl TabHost for ChromeTabHost {
    async fn open_hidden(&self) -> Result<TabId> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SkimmerError::Platform(format!("Failed to create page: {}", e)))?;

        if let Some(ref ua) = self.config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| SkimmerError::Platform(format!("Failed to set user agent: {}", e)))?;
        }

        let tab = TabId(self.next_tab.fetch_add(1, Ordering::Relaxed));
        self.pages.lock().insert(tab, page);
        debug!("Opened hidden {}", tab);
        Ok(tab)
    }

    async fn navigate(&self, tab: TabId, url: &str) -> Result<()> {
        let page = self.page(tab)?;
        let signals = self.signals.clone();
        let url = url.to_string();

        tokio::spawn(async move {
            // goto resolves once the navigation has finished loading
            let outcome = page
                .goto(url.as_str())
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            signals.complete(tab, outcome);
        });

        Ok(())
    }

    async fn inject(&self, tab: TabId, script: &str) -> Result<serde_json::Value> {
        let page = self.page(tab)?;
        page.evaluate(script.to_string())
            .await
            .map_err(|e| SkimmerError::Platform(format!("Script execution failed: {}", e)))?
            .into_value()
            .map_err(|e| SkimmerError::MalformedResult {
                details: format!("{:?}", e),
            })
    }

    async fn remove(&self, tab: TabId) -> Result<()> {
        let Some(page) = self.pages.lock().remove(&tab) else {
            debug!("{} already removed", tab);
            return Ok(());
        };
        page.close()
            .await
            .map_err(|e| SkimmerError::Platform(format!("Failed to close page: {}", e)))
    }

    fn load_signals(&self) -> &LoadSignals {
        &self.signals
    }
}
