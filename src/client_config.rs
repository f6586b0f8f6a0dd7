//! Client Configuration
//!
//! Per-client base host and route table. Resolution never touches the
//! process-wide registry, so independently constructed configs can carry
//! different routes in the same process.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::endpoint::{Endpoint, HttpMethod, DEFAULT_BASE_URL};
use crate::routing_config::{RouteOverrides, RouteTable};

/// Environment variable holding a custom base host.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Environment variable holding a path to a JSON/YAML route override file.
pub const ROUTES_FILE_ENV: &str = "OPENAI_ROUTES_FILE";

/// Method and fully-qualified URL for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestTarget {
    pub method: HttpMethod,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Replaces `https://api.openai.com` when set. The path suffix is unaffected.
    #[serde(
        default,
        deserialize_with = "deserialize_base_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_base_url: Option<String>,

    #[serde(default)]
    pub routes: RouteTable,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `OPENAI_BASE_URL` and `OPENAI_ROUTES_FILE`.
    ///
    /// Empty or whitespace-only values are treated as unset. Fails only when
    /// the routes file is named but cannot be loaded.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = non_empty_env(BASE_URL_ENV) {
            config = config.with_base_url(base);
        }

        if let Some(path) = non_empty_env(ROUTES_FILE_ENV) {
            let overrides = RouteOverrides::load_from_file(&path)
                .with_context(|| format!("loading route overrides from {path}"))?;
            config = config.with_overrides(&overrides);
        }

        tracing::info!(
            base_url = config.base_url(),
            overridden = ?config.routes.overridden(),
            "client routing configured"
        );
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        warn_on_trailing_slash(&base_url);
        self.custom_base_url = Some(base_url);
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_overrides(mut self, overrides: &RouteOverrides) -> Self {
        overrides.apply_to(&mut self.routes);
        self
    }

    /// Effective base host.
    pub fn base_url(&self) -> &str {
        self.custom_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_path(&mut self, endpoint: Endpoint, path: impl Into<String>) {
        self.routes.set_path(endpoint, path);
    }

    pub fn path(&self, endpoint: Endpoint) -> &str {
        self.routes.path(endpoint)
    }

    pub fn method(&self, endpoint: Endpoint) -> HttpMethod {
        endpoint.method()
    }

    pub fn resolve_url(&self, endpoint: Endpoint) -> String {
        self.routes.resolve_url(endpoint, self.custom_base_url.as_deref())
    }

    pub fn target(&self, endpoint: Endpoint) -> RequestTarget {
        RequestTarget {
            method: self.method(endpoint),
            url: self.resolve_url(endpoint),
        }
    }

    /// Prepare (but do not send) a request for the endpoint.
    ///
    /// This is the first point where a malformed override surfaces as an
    /// error, since the resolved URL has to parse.
    pub fn request(
        &self,
        client: &reqwest::Client,
        endpoint: Endpoint,
    ) -> Result<reqwest::RequestBuilder> {
        let target = self.target(endpoint);
        let url = reqwest::Url::parse(&target.url)
            .with_context(|| format!("invalid URL for {endpoint}: {}", target.url))?;
        Ok(client.request(target.method.into(), url))
    }
}

fn warn_on_trailing_slash(base_url: &str) {
    if base_url.ends_with('/') {
        tracing::warn!(
            "Base URL {} ends with '/'; paths are appended verbatim",
            base_url
        );
    }
}

fn deserialize_base_url<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let base_url = Option::<String>::deserialize(deserializer)?;
    if let Some(base_url) = &base_url {
        warn_on_trailing_slash(base_url);
    }
    Ok(base_url)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
