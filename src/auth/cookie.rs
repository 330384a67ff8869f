//! Session cookie parsing and `Set-Cookie` construction

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Utc;
use cookie::time::OffsetDateTime;
use cookie::{Cookie, SameSite};
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Opaque identifier correlating a browser cookie with a cached session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh identifier from 122 random bits
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Accept only values shaped like ones we issue
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == 32
            && value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        well_formed.then(|| Self(value.to_string()))
    }

    /// Key the session record is cached under
    pub fn cache_key(&self) -> String {
        format!("sess:{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes of the session cookie
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age: Duration,
    pub secure: bool,
}

impl CookieSettings {
    /// First well-formed session id among the request's cookies with this name
    pub fn read(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.name)
            .find_map(|(_, value)| SessionId::parse(value.trim_matches('"')))
    }

    /// `Set-Cookie` value carrying `id`, expiring with the session
    pub fn issue(&self, id: &SessionId) -> Result<HeaderValue> {
        let lifetime = chrono::Duration::from_std(self.max_age)
            .map_err(|e| Error::Config(format!("Invalid session lifetime: {}", e)))?;
        let expiry = Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| Error::Config("Session lifetime is out of range".to_string()))?;
        let expires = OffsetDateTime::from_unix_timestamp(expiry.timestamp())
            .map_err(|e| Error::Config(format!("Invalid session expiry: {}", e)))?;
        let max_age = i64::try_from(self.max_age.as_secs())
            .map_err(|e| Error::Config(format!("Invalid session lifetime: {}", e)))?;

        let cookie = self
            .cookie(id.as_str().to_string())
            .max_age(cookie::time::Duration::seconds(max_age))
            .expires(expires)
            .build();
        Self::header(&cookie)
    }

    /// `Set-Cookie` value telling the browser to drop the cookie
    pub fn clear(&self) -> Result<HeaderValue> {
        let mut cookie = self.cookie(String::new()).build();
        cookie.make_removal();
        Self::header(&cookie)
    }

    fn cookie(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
    }

    fn header(cookie: &Cookie<'_>) -> Result<HeaderValue> {
        HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| Error::Config(format!("Invalid session cookie: {}", e)))
    }
}
