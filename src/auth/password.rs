//! One-way password hashing

use tokio::task::JoinError;

use crate::error::{Error, Result};

/// Lowest cost bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Hash a password with bcrypt. Runs on the blocking pool, bcrypt is CPU bound.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();
    let cost = cost.max(MIN_COST);
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(task_failed)?
        .map_err(Into::into)
}

/// Compare a password against a stored hash. A malformed hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(task_failed)?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            Ok(false)
        }
    }
}

fn task_failed(e: JoinError) -> Error {
    Error::UpstreamStoreFailure(format!("Password task failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("secret1", MIN_COST).await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash).await.unwrap());
        assert!(!verify_password("secret2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_never_matches() {
        assert!(!verify_password("secret1", "not-a-hash").await.unwrap());
    }

    #[tokio::test]
    async fn test_task_failure_is_internal() {
        let join_error = tokio::task::spawn_blocking(|| panic!("worker died"))
            .await
            .unwrap_err();

        let err = task_failed(join_error);
        assert!(matches!(err, Error::UpstreamStoreFailure(_)));
        assert!(err.is_internal());
    }
}
