//! logvault-index: external full-text index adapters for logvault.
//!
//! Each adapter implements [`logvault_core::SearchBackend`] so the search
//! gateway can be pointed at a real index in production and at a fake in
//! tests.

pub mod elasticsearch;

pub use elasticsearch::ElasticsearchBackend;
