use crate::extract::Site;
use serde::Deserialize;

/// Browser identity sent with every request; some comic hosts reject the
/// default client user agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/45.0.2454.101 Safari/537.36";

/// Main configuration structure for Comic-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "comic")]
    pub comics: Vec<ComicEntry>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with page and image requests
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory under which one folder per comic is created
    #[serde(rename = "root-directory")]
    pub root_directory: String,
}

/// One comic archive to crawl
#[derive(Debug, Clone, Deserialize)]
pub struct ComicEntry {
    /// Human-readable comic title, also the destination folder name
    pub title: String,

    /// Which extraction strategy understands this archive
    pub site: Site,

    /// First page of the archive
    #[serde(rename = "start-url")]
    pub start_url: String,
}
