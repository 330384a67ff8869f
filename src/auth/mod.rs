//! Authentication and session management

pub mod cache;
pub mod cookie;
pub mod credentials;
pub mod middleware;
pub mod models;
pub mod password;
pub mod session;

pub use cache::{MemorySessionStore, SessionStore};
pub use cookie::SessionId;
pub use credentials::{authenticate, register, MemoryUserStore, UserLookup};
pub use middleware::{require_auth, CurrentUser};
pub use models::{LoginRequest, RegisterRequest, SessionRecord, UserRecord};
pub use session::SessionManager;
