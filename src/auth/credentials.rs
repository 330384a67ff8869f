//! Credential store and the login/registration flows built on it

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::models::{SessionRecord, UserRecord};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{Error, Result};

/// User persistence capability
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Insert a new user. Fails with [`Error::EmailConflict`] if the email is taken.
    async fn insert_user(&self, email: &str, password_hash: &str, name: &str) -> Result<UserRecord>;
}

/// In-process user collection, unique on email
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserLookup for MemoryUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert_user(&self, email: &str, password_hash: &str, name: &str) -> Result<UserRecord> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(Error::EmailConflict);
        }
        let user = UserRecord::new(email.to_string(), password_hash.to_string(), name.to_string());
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }
}

/// Check credentials and return the identity to bind to a session.
///
/// An unknown email and a wrong password both yield
/// [`Error::InvalidCredentials`].
pub async fn authenticate(
    users: &dyn UserLookup,
    email: &str,
    password: &str,
) -> Result<SessionRecord> {
    let Some(user) = users.find_user_by_email(email).await? else {
        tracing::debug!("Login attempt for unknown email");
        return Err(Error::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash).await? {
        tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
        return Err(Error::InvalidCredentials);
    }

    Ok(user.session_record())
}

/// Create an account. Does not start a session.
pub async fn register(
    users: &dyn UserLookup,
    email: &str,
    password: &str,
    name: &str,
    bcrypt_cost: u32,
) -> Result<UserRecord> {
    if users.find_user_by_email(email).await?.is_some() {
        return Err(Error::EmailConflict);
    }

    let password_hash = hash_password(password, bcrypt_cost).await?;
    let user = users.insert_user(email, &password_hash, name).await?;
    tracing::info!(user_id = %user.id, "Registered new user");
    Ok(user)
}
