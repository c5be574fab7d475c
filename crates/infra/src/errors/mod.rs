//! Error conversions from third-party crates into [`minutes_domain::MinutesError`]

pub mod conversions;

pub use conversions::InfraError;
