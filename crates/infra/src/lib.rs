//! # Minutes Infrastructure
//!
//! Infrastructure implementations of the `minutes-core` ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport and the request gateway
//! - The typed REST client implementing [`minutes_core::MeetingsApi`]
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `minutes-core`
//! - Contains all I/O; the core crate stays pure
//!
//! ## Wiring
//! ```no_run
//! use std::sync::Arc;
//!
//! use minutes_core::{Navigator, SessionStore};
//! use minutes_infra::{config, observability, ApiClient};
//!
//! # async fn run(navigator: Arc<dyn Navigator>) -> minutes_domain::Result<()> {
//! let config = config::load()?;
//! observability::init_tracing(&config.log_level);
//!
//! let api = Arc::new(ApiClient::from_config(&config)?);
//! let session = SessionStore::attach(api, navigator);
//! session.boot().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::ApiClient;
pub use errors::InfraError;
pub use http::{Gateway, GatewayResponse, HttpClient, RequestOptions};
