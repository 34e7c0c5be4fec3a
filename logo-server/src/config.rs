//! Server configuration from command-line flags and environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Args, Parser};

/// Default port for the logo server.
pub const DEFAULT_PORT: u16 = 9474;
/// Public Generative Language API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Direct image synthesis model.
pub const DEFAULT_RASTER_MODEL: &str = "imagen-4.0-generate-001";
/// Image-capable multimodal model.
pub const DEFAULT_MULTIMODAL_MODEL: &str = "gemini-3-pro-image-preview";
/// Plain text model used for SVG markup and written concepts.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
/// Upper bound on any single upstream call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Top-level server configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "saorsa-logo",
    version,
    about = "Logo generation server with layered upstream fallbacks"
)]
pub struct ServerConfig {
    /// Address to bind. Defaults to localhost only.
    #[arg(long, env = "LOGO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "LOGO_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Provider API key. The server starts without one but cannot generate.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream provider settings.
    #[command(flatten)]
    pub gemini: GeminiSettings,
}

impl ServerConfig {
    /// The configured API key, treating a blank value as absent.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            api_key: None,
            gemini: GeminiSettings::default(),
        }
    }
}

/// Endpoint, model and timeout settings for the upstream provider.
#[derive(Debug, Clone, Args)]
pub struct GeminiSettings {
    /// Base URL of the Generative Language API.
    #[arg(long = "api-base-url", env = "GEMINI_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub base_url: String,

    /// Model used for direct raster synthesis.
    #[arg(long, env = "LOGO_RASTER_MODEL", default_value = DEFAULT_RASTER_MODEL)]
    pub raster_model: String,

    /// Model used for multimodal image generation.
    #[arg(long, env = "LOGO_MULTIMODAL_MODEL", default_value = DEFAULT_MULTIMODAL_MODEL)]
    pub multimodal_model: String,

    /// Model used for SVG markup and text concepts.
    #[arg(long, env = "LOGO_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL)]
    pub text_model: String,

    /// Timeout for each upstream call, in seconds.
    #[arg(long, env = "LOGO_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

impl GeminiSettings {
    /// Settings pointing at a different API host, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Per-call timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            raster_model: DEFAULT_RASTER_MODEL.to_string(),
            multimodal_model: DEFAULT_MULTIMODAL_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
