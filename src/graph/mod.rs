//! Microsoft Graph plumbing: token acquisition, the generic authenticated
//! client, endpoint paths, and user identity resolution.

pub mod auth;
pub mod client;
pub mod types;
pub mod urls;
pub mod users;

pub use auth::{ClientCredentials, TokenProvider};
pub use client::GraphClient;
pub use users::UserRepository;
