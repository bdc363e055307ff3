//! Versioned URL prefix.

use std::borrow::Cow;
use std::fmt;

use crate::error::RouteError;

/// Path segment prepended to every versioned route, e.g. `/api/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiPrefix(Cow<'static, str>);

impl ApiPrefix {
    /// The current major version.
    pub const V1: ApiPrefix = ApiPrefix(Cow::Borrowed("/api/v1"));

    /// Validate and wrap a prefix.
    ///
    /// A prefix must start with `/` and must not end with `/`. Empty
    /// segments, whitespace and path parameters are rejected.
    pub fn parse(prefix: &str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason,
        };

        if !prefix.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if prefix.len() > 1 && prefix.ends_with('/') {
            return Err(invalid("must not end with '/'"));
        }
        if prefix == "/" {
            return Err(invalid("must contain at least one segment"));
        }
        if prefix[1..].split('/').any(str::is_empty) {
            return Err(invalid("must not contain empty segments"));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        if prefix.contains([':', '*', '{', '}']) {
            return Err(invalid("must not contain path parameters"));
        }

        Ok(Self(Cow::Owned(prefix.to_string())))
    }

    /// The prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append `path` (which must start with `/`) to the prefix.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl Default for ApiPrefix {
    fn default() -> Self {
        Self::V1
    }
}

impl fmt::Display for ApiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
