//! Request-scoped helpers that belong to the HTTP boundary.

pub mod trace_ctx;
