//! Slov-Lex Retriever - Fetch Slovak legislation as effective on a date.
//!
//! This crate resolves a law reference and a date to the version of the law
//! effective on that date, downloads its portal markup from the Slov-Lex
//! collection and renders it (whole or one section) as indented plain text.
//!
//! # Example
//!
//! ```
//! use slovlex_retriever::{config, identifier};
//!
//! // Both reference forms name the same law
//! let a = identifier::parse_law_reference("595/2003").unwrap();
//! let b = identifier::parse_law_reference("/SK/ZZ/2003/595").unwrap();
//! assert_eq!(a.base_iri, b.base_iri);
//! assert!(config::validate_date("2025-01-01").is_ok());
//! ```
//!
//! # Architecture
//!
//! The retriever is organized into several modules:
//!
//! - [`config`]: Configuration constants, validation and [`RetrieverConfig`]
//! - [`types`]: Search API payloads and result types
//! - [`error`]: Error types and Result alias
//! - [`identifier`]: Law reference parsing
//! - [`http`]: HTTP client helpers
//! - [`cache`]: Bounded TTL cache
//! - [`metadata`]: Cached metadata lookup
//! - [`version`]: Version-as-of-date resolution
//! - [`fetcher`]: Portal markup download with browser fallback
//! - [`browser`]: Automated-browsing sessions
//! - [`render`]: Markup parsing and plain-text rendering
//! - [`search`]: Autocomplete and full-text search
//! - [`cli`]: Command-line interface
//! - [`service`]: Main retriever service

pub mod browser;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod identifier;
pub mod metadata;
pub mod render;
pub mod search;
pub mod service;
pub mod types;
pub mod version;

// Re-export the service
pub use service::{LawText, Retriever, SearchHits, SectionText};

// Re-export commonly used items
pub use config::{validate_date, RetrieverConfig};
pub use error::{ErrorKind, Result, RetrieverError};
pub use identifier::{parse_law_reference, LawIdentifier};
pub use search::SearchMode;
pub use types::{DocumentMetadata, Suggestion, VersionDescriptor};
