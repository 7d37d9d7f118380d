#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Resource Expand
//!
//! > **Expandable REST resources for JSON serialization.**
//!
//! This crate binds serialization schemas to a REST resource model. A schema
//! knows where its resources live (item / list / create / delete endpoints),
//! how to persist them, and how to **expand** relations: instead of emitting a
//! foreign key, an expanded relation is fetched through an interactor and
//! inlined into the serialized output.
//!
//! ## 🚀 Core Concepts
//!
//! ### Resources
//! A [`Resource`](resource::Resource) is one remote entity. `save()` POSTs when
//! it is new and PUTs to its `absolute_url` once persisted; `delete()` removes
//! it. Status codes are partitioned once: 200/201/204 succeed, 400 is a
//! validation error, anything else is a server error.
//!
//! ### Expansion
//! A schema's expand paths (`["author.profile", "comments"]`) mark relations to
//! inline. Each nested schema declares how its entities are fetched:
//! - **`batch`**: one call for a whole collection.
//! - **`retrieve`**: one call per entity.
//!
//! Interactors return an explicit
//! [`InteractorOutput`](interactor::InteractorOutput): either the entity itself
//! or a deferred step that still has to be executed.
//!
//! ### Mocking
//! Persistence is tested against [`MockHttpClient`](framework::mock::MockHttpClient),
//! an in-memory client with queued expectations; interactors are plain closures.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Transport ([`framework`])
//! - **Role**: The [`HttpClient`](framework::HttpClient) seam, status
//!   classification, the mock client and tracing setup.
//!
//! ### 2. Resources ([`resource`])
//! - **Role**: Metadata with defaulted templates, URL patterns, `save` / `delete`,
//!   and the [`ResourceManager`](resource::ResourceManager).
//!
//! ### 3. Interactors ([`interactor`]) and Dispatch ([`expander`])
//! - **Role**: Declaring fetchers, building their arguments, choosing batch or
//!   per-item dispatch.
//!
//! ### 4. Schemas ([`schema`])
//! - **Role**: Declared fields, expand normalization and serialization.
//!
//! ### 5. Clients ([`clients`])
//! - **Role**: [`ReqwestClient`](clients::ReqwestClient), the production transport.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod clients;
pub mod expander;
pub mod framework;
pub mod interactor;
pub mod resource;
pub mod schema;
