//! Transport-facing building blocks shared by every resource.
//!
//! # Main Components
//!
//! - [`HttpClient`] - The remote surface resources persist through
//! - [`HttpResponse`] / [`StatusClass`] - A completed exchange and its status partition
//! - [`TransportError`] - Failures below the HTTP status level
//!
//! # Testing
//!
//! See [`mock`] module for an in-memory client with expectations.

pub mod client;
pub mod error;
pub mod mock;
pub mod tracing;

pub use client::{HttpClient, HttpResponse, SharedClient, StatusClass};
pub use error::TransportError;
