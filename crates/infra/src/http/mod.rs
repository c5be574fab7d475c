//! HTTP transport and the request gateway built on it

pub mod client;
pub mod gateway;

pub use client::{HttpClient, HttpClientBuilder};
pub use gateway::{Gateway, GatewayResponse, RequestOptions};
