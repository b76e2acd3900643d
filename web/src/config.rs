use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Where a native client keeps its session between runs. Browsers use
    /// localStorage instead.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: compiled_api_url(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Reads `CORTAAI_API_URL` and `CORTAAI_SESSION_FILE`. In the browser
    /// there is no process environment, so the URL baked in at build time
    /// (or the local default) is used.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("CORTAAI_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(compiled_api_url);

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            session_file: lookup("CORTAAI_SESSION_FILE").map(PathBuf::from),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

fn compiled_api_url() -> String {
    option_env!("CORTAAI_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}
