//! Authentication models

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::{Rule, Validate, Validator};

/// Identity bound to a live session, stored as JSON in the session cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Stable user identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Stored user account
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier
    pub id: String,
    /// Login email, unique across users
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// When the account was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserRecord {
    /// Create a new user record with a fresh identifier
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            email,
            password_hash,
            name,
            created_at: chrono::Utc::now(),
        }
    }

    /// The identity a session for this user carries
    pub fn session_record(&self) -> SessionRecord {
        SessionRecord {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Login credentials
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        Validator::new()
            .check_str("Email", &self.email, &[Rule::Required, Rule::Email])
            .check_str(
                "Password",
                &self.password,
                &[Rule::Required, Rule::Min(6), Rule::Max(32)],
            )
            .finish()
    }
}

/// Registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<()> {
        Validator::new()
            .check_str("Email", &self.email, &[Rule::Required, Rule::Email])
            .check_str(
                "Password",
                &self.password,
                &[Rule::Required, Rule::Min(6), Rule::Max(32)],
            )
            .check_str("Name", &self.name, &[Rule::Required])
            .finish()
    }
}
