//! Blog document store
//!
//! Update and delete take the caller's id and apply the ownership check in
//! the same step as the mutation, so no other write can land between the
//! check and the change.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::blog::models::{Blog, BlogPayload};
use crate::error::Result;

/// Offset/limit window over a listing
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
        }
    }
}

/// Result of an ownership-checked mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
    OwnerMismatch,
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Newest first
    async fn find(&self, page: Pagination) -> Result<Vec<Blog>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Blog>>;
    async fn insert(&self, blog: Blog) -> Result<()>;
    /// Replace title and content if `id` exists and is owned by `owner`
    async fn update_owned(&self, id: &str, owner: &str, patch: &BlogPayload) -> Result<Mutation>;
    /// Delete `id` if it exists and is owned by `owner`
    async fn delete_owned(&self, id: &str, owner: &str) -> Result<Mutation>;
}

/// In-process blog collection, kept in insertion order
#[derive(Clone, Default)]
pub struct MemoryBlogStore {
    blogs: Arc<RwLock<Vec<Blog>>>,
}

impl MemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn blog_count(&self) -> usize {
        self.blogs.read().await.len()
    }
}

/// Existence first, then ownership
fn check_owner(blog: Option<&Blog>, owner: &str) -> Mutation {
    match blog {
        None => Mutation::NotFound,
        Some(blog) if blog.created_by != owner => Mutation::OwnerMismatch,
        Some(_) => Mutation::Applied,
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn find(&self, page: Pagination) -> Result<Vec<Blog>> {
        let blogs = self.blogs.read().await;
        let mut newest: Vec<&Blog> = blogs.iter().rev().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(newest
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Blog>> {
        Ok(self.blogs.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<()> {
        self.blogs.write().await.push(blog);
        Ok(())
    }

    async fn update_owned(&self, id: &str, owner: &str, patch: &BlogPayload) -> Result<Mutation> {
        let mut blogs = self.blogs.write().await;
        let blog = blogs.iter_mut().find(|b| b.id == id);
        let outcome = check_owner(blog.as_deref(), owner);
        if let (Mutation::Applied, Some(blog)) = (outcome, blog) {
            blog.title = patch.title.clone();
            blog.content = patch.content.clone();
        }
        Ok(outcome)
    }

    async fn delete_owned(&self, id: &str, owner: &str) -> Result<Mutation> {
        let mut blogs = self.blogs.write().await;
        let position = blogs.iter().position(|b| b.id == id);
        let outcome = check_owner(position.map(|i| &blogs[i]), owner);
        if let (Mutation::Applied, Some(i)) = (outcome, position) {
            blogs.remove(i);
        }
        Ok(outcome)
    }
}
