//! Client configuration
//!
//! Loaded from a TOML file, then overridden field by field from the command
//! line or environment:
//!
//! ```toml
//! base_url = "https://desk.example.com"
//! token = "..."
//! page_size = 25
//! ```

use std::path::Path;

use cadence_core::{DEFAULT_PAGE_SIZE, DeskError, DeskResult};
use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> DeskResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| DeskError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file
    pub fn load(path: &Path) -> DeskResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| DeskError::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded client config");
        Self::from_toml_str(&source)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> DeskResult<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DeskError::invalid_config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(DeskError::invalid_config("page_size must be at least 1"));
        }
        if matches!(&self.token, Some(token) if token.trim().is_empty()) {
            return Err(DeskError::invalid_config("token must not be blank"));
        }
        Ok(())
    }
}
