mod config;
pub mod time;
pub mod validate;

pub use config::AppConfig;
