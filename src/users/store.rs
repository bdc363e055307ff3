//! User storage backends.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};

use tracing::info;

use super::types::User;
use crate::error::UserError;

/// Source of users for the listing endpoint.
pub trait UserStore: Send + Sync {
    /// All users, ordered by id.
    fn list(&self) -> Result<Vec<User>, UserError>;
}

/// In-memory user store keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<u64, User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `users`, rejecting duplicate ids.
    pub fn with_users(users: Vec<User>) -> Result<Self, UserError> {
        let mut map = BTreeMap::new();
        for user in users {
            let id = user.id;
            if map.insert(id, user).is_some() {
                return Err(UserError::DuplicateId(id));
            }
        }

        Ok(Self {
            users: RwLock::new(map),
        })
    }

    /// Parse a JSON array of users.
    pub fn from_json_str(json: &str) -> Result<Self, UserError> {
        let users: Vec<User> = serde_json::from_str(json)?;
        Self::with_users(users)
    }

    /// Load a JSON array of users from `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, UserError> {
        let contents = fs::read_to_string(path).map_err(|e| UserError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let store = Self::from_json_str(&contents)?;
        let count = store.len()?;
        info!(path = %path.display(), users = count, "loaded users");
        Ok(store)
    }

    /// Number of stored users.
    pub fn len(&self) -> Result<usize, UserError> {
        Ok(self.read()?.len())
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> Result<bool, UserError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<u64, User>>, UserError> {
        self.users
            .read()
            .map_err(|_| UserError::Unavailable("user store lock poisoned".to_string()))
    }
}

impl UserStore for InMemoryUserStore {
    fn list(&self) -> Result<Vec<User>, UserError> {
        Ok(self.read()?.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Arc;

    #[test]
    fn list_is_ordered_by_id() {
        let store = InMemoryUserStore::with_users(vec![
            User::new(3, "carol", "carol@example.com"),
            User::new(1, "alice", "alice@example.com"),
            User::new(2, "bob", "bob@example.com"),
        ])
        .unwrap();

        let ids: Vec<u64> = store.list().unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = InMemoryUserStore::with_users(vec![
            User::new(1, "alice", "alice@example.com"),
            User::new(1, "alias", "alias@example.com"),
        ])
        .unwrap_err();
        assert!(matches!(err, UserError::DuplicateId(1)));

        let json = r#"[
            {"id":5,"name":"eve","email":"eve@example.com"},
            {"id":5,"name":"eve","email":"eve@example.com"}
        ]"#;
        let err = InMemoryUserStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, UserError::DuplicateId(5)));
    }

    #[test]
    fn loads_users_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":1,"name":"alice","email":"alice@example.com"}}]"#
        )
        .unwrap();

        let store = InMemoryUserStore::from_json_file(file.path()).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(
            store.list().unwrap(),
            vec![User::new(1, "alice", "alice@example.com")]
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = InMemoryUserStore::from_json_file(&path).unwrap_err();

        match err {
            UserError::Load { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = InMemoryUserStore::from_json_str(r#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, UserError::Parse(_)));
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = InMemoryUserStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn poisoned_lock_reports_unavailable() {
        let store = Arc::new(
            InMemoryUserStore::with_users(vec![User::new(1, "alice", "alice@example.com")])
                .unwrap(),
        );

        let holder = Arc::clone(&store);
        let joined = std::thread::spawn(move || {
            let _guard = holder.users.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert!(matches!(store.len(), Err(UserError::Unavailable(_))));
        assert!(matches!(store.is_empty(), Err(UserError::Unavailable(_))));
        assert!(matches!(store.list(), Err(UserError::Unavailable(_))));
    }
}
