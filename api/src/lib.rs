// Module layout (Clean Architecture style)
// - bootstrap: configuration and service wiring
// - infrastructure: Postgres repositories and the page title fetcher
// - presentation: HTTP handlers and routing
// - application: ports, use cases and association policies
// - domain: links, tags, groups and the link filter

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
