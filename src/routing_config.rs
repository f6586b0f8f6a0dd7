//! Routing Configuration Module
//!
//! Provides per-endpoint path routing with:
//! - A route table that always holds one path per endpoint
//! - Runtime path overrides (proxies, API-compatible backends)
//! - Partial override sets loadable from JSON or YAML files
//! - Literal URL resolution against a default or overridden base host

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::endpoint::{Endpoint, HttpMethod, DEFAULT_BASE_URL};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported route file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Read/write access to the path of each endpoint.
///
/// Implemented by [`RouteTable`] and by the process-wide
/// [`GlobalRoutes`](crate::registry::GlobalRoutes) handle, so override sets
/// can be applied to either.
pub trait EndpointProvider {
    /// Current path for the endpoint.
    fn route(&self, endpoint: Endpoint) -> String;

    /// Replace the path for the endpoint. Any string is accepted unchanged.
    fn set_route(&mut self, endpoint: Endpoint, path: String);

    fn completions_route(&self) -> String {
        self.route(Endpoint::Completions)
    }

    fn set_completions_route(&mut self, path: String) {
        self.set_route(Endpoint::Completions, path);
    }

    fn chat_completions_route(&self) -> String {
        self.route(Endpoint::ChatCompletions)
    }

    fn set_chat_completions_route(&mut self, path: String) {
        self.set_route(Endpoint::ChatCompletions, path);
    }

    fn edits_route(&self) -> String {
        self.route(Endpoint::Edits)
    }

    fn set_edits_route(&mut self, path: String) {
        self.set_route(Endpoint::Edits, path);
    }

    fn image_generation_route(&self) -> String {
        self.route(Endpoint::ImageGeneration)
    }

    fn set_image_generation_route(&mut self, path: String) {
        self.set_route(Endpoint::ImageGeneration, path);
    }

    fn image_edit_route(&self) -> String {
        self.route(Endpoint::ImageEdit)
    }

    fn set_image_edit_route(&mut self, path: String) {
        self.set_route(Endpoint::ImageEdit, path);
    }
}

/// Partial set of path overrides, one optional field per endpoint.
///
/// Absent fields leave the target's current path untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_completions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edits: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_generation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_edit: Option<String>,
}

impl RouteOverrides {
    /// Load overrides from a `.json`, `.yaml` or `.yml` file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let overrides: RouteOverrides = match ext.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        tracing::info!(
            "Loaded {} route override(s) from {}",
            overrides.len(),
            path.display()
        );
        Ok(overrides)
    }

    pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
        match endpoint {
            Endpoint::Completions => self.completions.as_deref(),
            Endpoint::ChatCompletions => self.chat_completions.as_deref(),
            Endpoint::Edits => self.edits.as_deref(),
            Endpoint::ImageGeneration => self.image_generation.as_deref(),
            Endpoint::ImageEdit => self.image_edit.as_deref(),
        }
    }

    pub fn set(&mut self, endpoint: Endpoint, path: impl Into<String>) {
        let slot = match endpoint {
            Endpoint::Completions => &mut self.completions,
            Endpoint::ChatCompletions => &mut self.chat_completions,
            Endpoint::Edits => &mut self.edits,
            Endpoint::ImageGeneration => &mut self.image_generation,
            Endpoint::ImageEdit => &mut self.image_edit,
        };
        *slot = Some(path.into());
    }

    /// Number of endpoints this set overrides.
    pub fn len(&self) -> usize {
        Endpoint::ALL
            .iter()
            .filter(|ep| self.get(**ep).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every present override into the provider.
    pub fn apply_to<P: EndpointProvider + ?Sized>(&self, provider: &mut P) {
        for endpoint in Endpoint::ALL {
            if let Some(path) = self.get(endpoint) {
                provider.set_route(endpoint, path.to_string());
            }
        }
    }
}

/// Mapping from endpoint to its current URL path.
///
/// Always holds exactly one path per endpoint; entries are overwritten,
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RouteOverrides", into = "RouteOverrides")]
pub struct RouteTable {
    paths: BTreeMap<Endpoint, String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            paths: Endpoint::ALL
                .into_iter()
                .map(|ep| (ep, ep.default_path().to_string()))
                .collect(),
        }
    }
}

impl RouteTable {
    /// Table holding the default path of every endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the given overrides applied.
    pub fn with_overrides(overrides: &RouteOverrides) -> Self {
        let mut table = Self::default();
        overrides.apply_to(&mut table);
        table
    }

    pub fn path(&self, endpoint: Endpoint) -> &str {
        self.paths
            .get(&endpoint)
            .map(String::as_str)
            .unwrap_or_else(|| endpoint.default_path())
    }

    /// Overwrite the path for an endpoint. No validation is performed.
    pub fn set_path(&mut self, endpoint: Endpoint, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(endpoint = %endpoint, path = %path, "route path override");
        self.paths.insert(endpoint, path);
    }

    /// Restore the default path for an endpoint.
    pub fn reset(&mut self, endpoint: Endpoint) {
        self.set_path(endpoint, endpoint.default_path());
    }

    pub fn method(&self, endpoint: Endpoint) -> HttpMethod {
        endpoint.method()
    }

    /// `(base_override or DEFAULT_BASE_URL) + path`, concatenated literally.
    pub fn resolve_url(&self, endpoint: Endpoint, base_override: Option<&str>) -> String {
        let base = base_override.unwrap_or(DEFAULT_BASE_URL);
        format!("{}{}", base, self.path(endpoint))
    }

    pub fn is_overridden(&self, endpoint: Endpoint) -> bool {
        self.path(endpoint) != endpoint.default_path()
    }

    /// Endpoints whose path differs from the default.
    pub fn overridden(&self) -> Vec<Endpoint> {
        Endpoint::ALL
            .into_iter()
            .filter(|ep| self.is_overridden(*ep))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Endpoint, &str)> + '_ {
        self.paths.iter().map(|(ep, path)| (*ep, path.as_str()))
    }
}

impl EndpointProvider for RouteTable {
    fn route(&self, endpoint: Endpoint) -> String {
        self.path(endpoint).to_string()
    }

    fn set_route(&mut self, endpoint: Endpoint, path: String) {
        self.set_path(endpoint, path);
    }
}

impl From<RouteOverrides> for RouteTable {
    fn from(overrides: RouteOverrides) -> Self {
        RouteTable::with_overrides(&overrides)
    }
}

impl From<RouteTable> for RouteOverrides {
    fn from(table: RouteTable) -> Self {
        let mut overrides = RouteOverrides::default();
        for (endpoint, path) in table.iter() {
            overrides.set(endpoint, path);
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_resolves_against_default_host() {
        let table = RouteTable::new();
        for ep in Endpoint::ALL {
            assert_eq!(
                table.resolve_url(ep, None),
                format!("https://api.openai.com{}", ep.default_path())
            );
            assert_eq!(table.method(ep), HttpMethod::Post);
        }
        assert!(table.overridden().is_empty());
    }

    #[test]
    fn test_set_path_accepts_any_string() {
        let mut table = RouteTable::new();

        table.set_path(Endpoint::Edits, "");
        assert_eq!(table.path(Endpoint::Edits), "");
        assert_eq!(table.resolve_url(Endpoint::Edits, None), "https://api.openai.com");

        table.set_path(Endpoint::Edits, "no-leading-slash");
        assert_eq!(table.path(Endpoint::Edits), "no-leading-slash");
        assert_eq!(
            table.resolve_url(Endpoint::Edits, None),
            "https://api.openai.comno-leading-slash"
        );
    }

    #[test]
    fn test_set_path_is_idempotent() {
        let mut once = RouteTable::new();
        once.set_path(Endpoint::ChatCompletions, "/v2/chat");

        let mut twice = RouteTable::new();
        twice.set_path(Endpoint::ChatCompletions, "/v2/chat");
        twice.set_path(Endpoint::ChatCompletions, "/v2/chat");

        assert_eq!(once, twice);
        assert_eq!(
            twice.resolve_url(Endpoint::ChatCompletions, None),
            "https://api.openai.com/v2/chat"
        );
    }

    #[test]
    fn test_base_override_is_independent_of_path() {
        let mut table = RouteTable::new();
        table.set_path(Endpoint::ImageGeneration, "/images/new");

        assert_eq!(
            table.resolve_url(Endpoint::ImageGeneration, Some("https://my-proxy.example.com")),
            "https://my-proxy.example.com/images/new"
        );
        assert_eq!(
            table.resolve_url(Endpoint::Completions, Some("https://my-proxy.example.com")),
            "https://my-proxy.example.com/v1/completions"
        );
        // No slash reconciliation
        assert_eq!(
            table.resolve_url(Endpoint::Completions, Some("http://localhost:8080/")),
            "http://localhost:8080//v1/completions"
        );
    }

    #[test]
    fn test_independent_tables_do_not_interfere() {
        let mut a = RouteTable::new();
        let b = RouteTable::new();
        a.set_path(Endpoint::Completions, "/custom");

        assert_eq!(a.path(Endpoint::Completions), "/custom");
        assert_eq!(b.path(Endpoint::Completions), "/v1/completions");
    }

    #[test]
    fn test_reset_restores_default() {
        let mut table = RouteTable::new();
        table.set_path(Endpoint::ImageEdit, "/edit-image");
        assert_eq!(table.overridden(), vec![Endpoint::ImageEdit]);

        table.reset(Endpoint::ImageEdit);
        assert_eq!(table.path(Endpoint::ImageEdit), "/v1/images/edits");
        assert!(!table.is_overridden(Endpoint::ImageEdit));
    }

    #[test]
    fn test_provider_named_accessors() {
        let mut table = RouteTable::new();
        assert_eq!(table.chat_completions_route(), "/v1/chat/completions");
        assert_eq!(table.image_generation_route(), "/v1/images/generations");

        table.set_edits_route("/v1/custom-edits".to_string());
        table.set_image_edit_route("/img/edit".to_string());

        assert_eq!(table.edits_route(), "/v1/custom-edits");
        assert_eq!(table.path(Endpoint::ImageEdit), "/img/edit");
        assert_eq!(table.completions_route(), "/v1/completions");
    }

    #[test]
    fn test_overrides_apply_only_present_fields() {
        let overrides = RouteOverrides {
            chat_completions: Some("/openai/chat".to_string()),
            image_edit: Some("/openai/images/edit".to_string()),
            ..Default::default()
        };
        assert_eq!(overrides.len(), 2);

        let table = RouteTable::with_overrides(&overrides);
        assert_eq!(table.path(Endpoint::ChatCompletions), "/openai/chat");
        assert_eq!(table.path(Endpoint::ImageEdit), "/openai/images/edit");
        assert_eq!(table.path(Endpoint::Edits), "/v1/edits");
    }

    #[test]
    fn test_table_deserializes_from_partial_map() {
        let table: RouteTable =
            serde_json::from_str(r#"{"completions": "/engines/davinci/completions"}"#).unwrap();
        assert_eq!(
            table.path(Endpoint::Completions),
            "/engines/davinci/completions"
        );
        assert_eq!(table.path(Endpoint::ChatCompletions), "/v1/chat/completions");

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["image_generation"], "/v1/images/generations");
        assert_eq!(value["completions"], "/engines/davinci/completions");
    }

    #[test]
    fn test_unknown_override_key_rejected() {
        let err = serde_json::from_str::<RouteOverrides>(r#"{"embeddings": "/v1/embeddings"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_load_overrides_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"edits": "/v1/custom-edits"}}"#).unwrap();

        let overrides = RouteOverrides::load_from_file(file.path()).unwrap();
        assert_eq!(overrides.get(Endpoint::Edits), Some("/v1/custom-edits"));
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn test_load_overrides_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "chat_completions: /proxy/chat").unwrap();
        writeln!(file, "image_generation: /proxy/images").unwrap();

        let overrides = RouteOverrides::load_from_file(file.path()).unwrap();
        assert_eq!(overrides.get(Endpoint::ChatCompletions), Some("/proxy/chat"));
        assert_eq!(overrides.get(Endpoint::ImageGeneration), Some("/proxy/images"));
        assert_eq!(overrides.get(Endpoint::Completions), None);
    }

    #[test]
    fn test_load_overrides_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = RouteOverrides::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_overrides_missing_file() {
        let err = RouteOverrides::load_from_file("/nonexistent/routes.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
