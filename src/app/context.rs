use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, SkimmerError};
use crate::config::Config;
use crate::extract::Extractor;
use crate::orchestrator::{spawn_orchestrator, ChromeTabHost, Orchestrator, OrchestratorHandle};

pub struct AppContext {
    pub config: Config,
    pub extractor: Extractor,
}

impl AppContext {
    /// Load configuration from `config_path`, or the default location.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(&path),
            None => Config::load(),
        }
        .map_err(|e| SkimmerError::Config(e.to_string()))?;

        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let extractor = Extractor::new(config.extraction.clone());
        Self { config, extractor }
    }

    /// Launch Chrome and start serving extraction requests.
    pub async fn launch_orchestrator(&self) -> Result<OrchestratorHandle> {
        let host = Arc::new(ChromeTabHost::launch(self.config.browser.clone()).await?);
        let orchestrator =
            Orchestrator::new(host, self.config.browser.clone(), self.extractor.clone());
        Ok(spawn_orchestrator(
            orchestrator,
            self.config.bridge.queue_capacity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ImagePolicy;

    #[test]
    fn test_context_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[extraction]\nimage_policy = \"keep_all\"\n").unwrap();

        let ctx = AppContext::new(Some(path)).unwrap();
        assert_eq!(ctx.extractor.config().image_policy, ImagePolicy::KeepAll);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bridge\n").unwrap();

        let err = AppContext::new(Some(path)).err().unwrap();
        assert!(matches!(err, SkimmerError::Config(_)));
    }
}
