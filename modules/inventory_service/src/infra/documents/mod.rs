//! Document storage layer - item documents in MongoDB

pub mod document;
pub mod repository;

pub use repository::MongoItemRepository;
