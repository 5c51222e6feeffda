//! Integration tests for the health endpoints.
//!
//! Each test binds a server to an ephemeral port in-process and talks to
//! it over real HTTP.

mod helpers;

mod health_endpoints;
mod predicates;
