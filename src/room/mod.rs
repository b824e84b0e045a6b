// Public API - what other modules can use
pub use handlers::{create_room, list_public_rooms, random_public_room};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
