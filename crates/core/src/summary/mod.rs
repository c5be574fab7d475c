//! Per-meeting summary caching

pub mod cache;

pub use cache::SummaryCache;
