//! Production implementations of [`HttpClient`](crate::framework::HttpClient).

pub mod reqwest_client;

pub use reqwest_client::ReqwestClient;
