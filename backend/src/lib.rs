//! Stockbot Backend service
//!
//! HTTP API answering questions about Saudi Exchange listings, backed by a
//! stock data provider and an OpenAI-compatible LLM.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Response language negotiation
pub mod i18n;

/// LLM client and tool calling
pub mod llm;

/// Request pipeline middleware
pub mod middleware;

/// Route handlers
pub mod routes;

/// Server assembly and startup
pub mod server;

/// Chat service
pub mod service;

/// Stock data provider client
pub mod stock;

/// Shared types: configuration, environment, errors, envelope
pub mod types;
