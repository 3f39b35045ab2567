//! HTTP facade over the Microsoft Graph calendar and to-do APIs.
//!
//! Every inbound request flows route -> handler -> manager -> repository ->
//! Graph client and back. The external API is the system of record; nothing
//! is persisted here and every name lookup is re-resolved per request.

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod events;
pub mod graph;
pub mod todo;
