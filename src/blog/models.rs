//! Blog documents and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::{is_object_id, Rule, Validate, Validator};

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// Id of the user who owns the post
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Blog {
    /// New post owned by `owner`, stamped with the current time
    pub fn new(title: String, content: String, owner: String) -> Self {
        let created_at = Utc::now();
        Self {
            id: new_blog_id(created_at),
            title,
            content,
            created_by: owner,
            created_at,
        }
    }
}

/// 24 hex chars: creation seconds followed by 64 random bits
pub fn new_blog_id(at: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().as_u128() as u64;
    format!("{:08x}{:016x}", at.timestamp() as u32, random)
}

/// Fields a create or update replaces
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Validate for BlogPayload {
    fn validate(&self) -> Result<()> {
        Validator::new()
            .check_str("Title", &self.title, &[Rule::Required, Rule::Min(10)])
            .check_str("Content", &self.content, &[Rule::Required])
            .finish()
    }
}

/// Path parameter naming one blog
#[derive(Debug, Clone, Deserialize)]
pub struct BlogIdParam {
    pub id: String,
}

impl Validate for BlogIdParam {
    fn validate(&self) -> Result<()> {
        Validator::new()
            .check_str("ID", &self.id, &[Rule::ObjectId])
            .finish()
    }
}

/// Listing query: offset into the newest-first feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub from: i64,
}

impl Validate for ListQuery {
    fn validate(&self) -> Result<()> {
        Validator::new()
            .check_int("From", self.from, &[Rule::Gte(0)])
            .finish()
    }
}
