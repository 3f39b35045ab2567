//! Calendar events: Graph wire types, data access, and business rules.

pub mod manager;
pub mod repository;
pub mod types;

pub use manager::EventsManager;
pub use repository::EventsRepository;
