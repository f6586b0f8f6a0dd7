//! Endpoint identities and HTTP methods
//!
//! `Endpoint` is the closed set of API capabilities this crate knows how to
//! route. It carries no mutable state: current paths live in a
//! [`RouteTable`](crate::routing_config::RouteTable).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Default API host used when no base URL override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),
    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),
}

/// Logical API operation, independent of the URL path it is served on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Text completion (/v1/completions)
    Completions,
    /// Chat completion (/v1/chat/completions)
    ChatCompletions,
    /// Edits (/v1/edits)
    Edits,
    /// Image generation (/v1/images/generations)
    ImageGeneration,
    /// Image editing (/v1/images/edits)
    ImageEdit,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Completions,
        Endpoint::ChatCompletions,
        Endpoint::Edits,
        Endpoint::ImageGeneration,
        Endpoint::ImageEdit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completions => "completions",
            Self::ChatCompletions => "chat_completions",
            Self::Edits => "edits",
            Self::ImageGeneration => "image_generation",
            Self::ImageEdit => "image_edit",
        }
    }

    /// Path this endpoint is served on when nothing overrides it.
    pub fn default_path(&self) -> &'static str {
        match self {
            Self::Completions => "/v1/completions",
            Self::ChatCompletions => "/v1/chat/completions",
            Self::Edits => "/v1/edits",
            Self::ImageGeneration => "/v1/images/generations",
            Self::ImageEdit => "/v1/images/edits",
        }
    }

    /// HTTP method used for this endpoint.
    ///
    /// Every current endpoint is a POST. Methods are fixed per endpoint and
    /// cannot be overridden.
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Completions
            | Self::ChatCompletions
            | Self::Edits
            | Self::ImageGeneration
            | Self::ImageEdit => HttpMethod::Post,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Endpoint::ALL
            .into_iter()
            .find(|ep| ep.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::UnknownEndpoint(s.to_string()))
    }
}

/// Standard HTTP request methods.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Connect,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "CONNECT" => Ok(Self::Connect),
            "TRACE" => Ok(Self::Trace),
            _ => Err(ParseError::UnknownMethod(s.to_string())),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Connect => http::Method::CONNECT,
            HttpMethod::Trace => http::Method::TRACE,
        }
    }
}
