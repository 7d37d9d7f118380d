//! # Observability & Tracing
//!
//! Structured logging for resources, managers and expansion, built on `tracing`.
//!
//! ## What Gets Traced
//!
//! - **Persistence**: `save` and `delete` spans carry the target URL; a created
//!   resource logs its derived `absolute_url`.
//! - **Retrieval**: manager `get` / `list` spans with the request URL.
//! - **Expansion**: one span per `expand` call with the schema name and whether a
//!   batch or per-item dispatch was chosen.
//! - **Failures**: non-success statuses are logged at `warn` with URL and status
//!   before the error is returned.
//!
//! ## Usage
//!
//! ```bash
//! # Lifecycle transitions only
//! RUST_LOG=info cargo run
//!
//! # Request payloads and interactor arguments
//! RUST_LOG=debug cargo run
//!
//! # Only expansion
//! RUST_LOG=resource_expand::expander=debug cargo run
//! ```

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
