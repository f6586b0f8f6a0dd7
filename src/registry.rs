//! Process-wide route registry
//!
//! A single shared [`RouteTable`] for callers that configure routes once for
//! the whole process. Overrides written here are visible to every later
//! lookup through this module, from any thread. Prefer a per-client
//! [`ClientConfig`](crate::client_config::ClientConfig) when clients in the
//! same process need different routes.

use once_cell::sync::Lazy;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::endpoint::{Endpoint, HttpMethod};
use crate::routing_config::{EndpointProvider, RouteOverrides, RouteTable};

static ROUTES: Lazy<RwLock<RouteTable>> = Lazy::new(|| RwLock::new(RouteTable::default()));

// Writes are a single map insert, so a poisoned table is still consistent.
fn read() -> RwLockReadGuard<'static, RouteTable> {
    ROUTES.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, RouteTable> {
    ROUTES.write().unwrap_or_else(PoisonError::into_inner)
}

pub fn get_method(endpoint: Endpoint) -> HttpMethod {
    endpoint.method()
}

pub fn get_path(endpoint: Endpoint) -> String {
    read().path(endpoint).to_string()
}

/// Overwrite the global path for an endpoint.
pub fn set_path(endpoint: Endpoint, path: impl Into<String>) {
    write().set_path(endpoint, path);
}

/// `(base_override or https://api.openai.com) + current global path`.
pub fn resolve_url(endpoint: Endpoint, base_override: Option<&str>) -> String {
    read().resolve_url(endpoint, base_override)
}

/// Apply a set of overrides atomically.
pub fn apply(overrides: &RouteOverrides) {
    let mut table = write();
    overrides.apply_to(&mut *table);
}

/// Restore every endpoint to its default path.
pub fn reset() {
    *write() = RouteTable::default();
    tracing::debug!("global routes reset to defaults");
}

/// Copy of the current global table.
pub fn snapshot() -> RouteTable {
    read().clone()
}

/// Zero-sized handle exposing the global table as an [`EndpointProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRoutes;

impl EndpointProvider for GlobalRoutes {
    fn route(&self, endpoint: Endpoint) -> String {
        get_path(endpoint)
    }

    fn set_route(&mut self, endpoint: Endpoint, path: String) {
        set_path(endpoint, path);
    }
}
