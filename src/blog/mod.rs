//! Blog posts and their storage

pub mod models;
pub mod store;

pub use models::{Blog, BlogIdParam, BlogPayload, ListQuery};
pub use store::{BlogStore, MemoryBlogStore, Mutation, Pagination};
