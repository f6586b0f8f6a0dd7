#![forbid(unsafe_code)]
#![doc = r#"
OpenAI Routes

Endpoint routing for OpenAI-compatible HTTP clients: which method and URL a request for a given operation is sent to.

Crate highlights
- Per-client routing: `ClientConfig` owns a base host override and a `RouteTable`; `resolve_url` is literal `host + path`.
- Process-wide routing: `registry` keeps one shared table for callers that configure routes once for the whole process.
- Overrides: `RouteOverrides` loads partial path overrides from JSON or YAML and applies them to any `EndpointProvider`.

Modules
- `endpoint`: The closed set of endpoints, their default paths and HTTP methods.
- `routing_config`: Route tables, override sets and the provider trait.
- `registry`: The process-wide route table.
- `client_config`: Per-client configuration, env loading and request targets.
- `util`: Shared helpers (tracing, env).

Note: Paths and hosts are never validated or normalized. A malformed override only fails once a transport tries to parse the URL.
"#]

pub mod client_config;
pub mod endpoint;
pub mod registry;
pub mod routing_config;
pub mod util;

pub use crate::client_config::{ClientConfig, RequestTarget};
pub use crate::endpoint::{Endpoint, HttpMethod, ParseError, DEFAULT_BASE_URL};
pub use crate::registry::GlobalRoutes;
pub use crate::routing_config::{ConfigError, EndpointProvider, RouteOverrides, RouteTable};
