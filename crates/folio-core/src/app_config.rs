use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Base URL for the identity and project endpoints.
    pub api_base_url: String,
    /// Origin the fixed analytics paths are resolved against.
    pub app_origin: String,
    pub session_cookie: Option<String>,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub published_posts_limit: u32,
    pub cache_dir: PathBuf,
}

impl AppConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("app_origin", &self.app_origin)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[redacted]"),
            )
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("published_posts_limit", &self.published_posts_limit)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}
