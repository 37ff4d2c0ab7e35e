// ============================
// credgate-backend-lib/src/storage.rs
// ============================
//! Credential storage abstraction with an in-memory implementation.
use std::{fmt, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credgate_common::UserSummary;
use dashmap::{mapref::entry::Entry, DashMap};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Account role. Fixed at creation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored credentials for one username. No plaintext password is kept.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub salt: String,
    pub hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(salt: String, hash: String, role: Role) -> Self {
        Self {
            salt,
            hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Public view of this record
    pub fn summary(&self, username: &str) -> UserSummary {
        UserSummary {
            username: username.to_string(),
            role: self.role.to_string(),
            created_at: self.created_at,
        }
    }
}

/// Trait for credential storage backends
#[async_trait]
pub trait Storage: Send + Sync + Clone + 'static {
    /// Insert a record unless the username is already taken.
    ///
    /// The existence check and the insert are one atomic step.
    async fn insert_if_absent(&self, username: &str, record: CredentialRecord)
        -> Result<(), AppError>;

    /// Look up the record for a username
    async fn get(&self, username: &str) -> Result<Option<CredentialRecord>, AppError>;

    /// Whether a username is registered
    async fn contains(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.get(username).await?.is_some())
    }

    /// Public summaries of every record, oldest first
    async fn list(&self) -> Result<Vec<UserSummary>, AppError>;

    /// Number of stored records
    async fn len(&self) -> Result<usize, AppError>;
}

/// Process-lifetime storage backed by a concurrent map
#[derive(Clone, Default)]
pub struct MemoryStorage {
    records: Arc<DashMap<String, CredentialRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert_if_absent(
        &self,
        username: &str,
        record: CredentialRecord,
    ) -> Result<(), AppError> {
        match self.records.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AppError::UsernameTaken),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            },
        }
    }

    async fn get(&self, username: &str) -> Result<Option<CredentialRecord>, AppError> {
        Ok(self.records.get(username).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<UserSummary>, AppError> {
        let mut users: Vec<UserSummary> = self
            .records
            .iter()
            .map(|entry| entry.value().summary(entry.key()))
            .collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(users)
    }

    async fn len(&self) -> Result<usize, AppError> {
        Ok(self.records.len())
    }
}
