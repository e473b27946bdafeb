use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const DEFAULT_API_BASE: &str = "https://api.twitch.tv/helix";
/// Largest page the clips endpoint serves.
pub const MAX_PAGE_SIZE: u8 = 100;

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct GrabberOptions {
    pub auth_url: String,
    pub api_base: String,
    pub page_size: u8,                 // 1..=100
    pub timeout: Option<Duration>,     // None keeps the transport default
    pub user_agent: Option<String>,
    pub credentials_path: PathBuf,     // optional {client_id, client_secret} file
    pub default_output: String,        // suggested file name
    pub progress: bool,                // spinner while fetching
}

impl Default for GrabberOptions {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout: None,
            user_agent: Some(concat!("clipgrabber/", env!("CARGO_PKG_VERSION")).to_string()),
            credentials_path: PathBuf::from("credentials.json"),
            default_output: "clips.txt".to_string(),
            progress: true,
        }
    }
}

impl GrabberOptions {
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }
    pub fn with_page_size(mut self, n: u8) -> Self {
        self.page_size = n.clamp(1, MAX_PAGE_SIZE);
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }
    pub fn with_credentials_path(mut self, path: impl AsRef<Path>) -> Self {
        self.credentials_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_default_output(mut self, name: impl Into<String>) -> Self {
        self.default_output = name.into();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}
