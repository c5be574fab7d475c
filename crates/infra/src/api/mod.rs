//! Typed REST client for the meetings API

pub mod client;

pub use client::ApiClient;
