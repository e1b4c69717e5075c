//! In-memory record store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKeyId, ApiKeyRecord, NewApiKeyRecord, RecordStore, StoreError};
use crate::domain::identity::PrincipalId;

/// In-memory implementation of RecordStore
///
/// Enforces the same constraints as the `api_keys` table: non-blank
/// descriptions, descriptions unique per owner, and unique keys.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    /// Records in insertion order
    records: Arc<RwLock<Vec<ApiKeyRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, owner: &PrincipalId) -> Result<Vec<ApiKeyRecord>, StoreError> {
        let records = self.records.read().await;

        // Reverse insertion order first so equal timestamps stay newest-first
        let mut owned: Vec<ApiKeyRecord> = records
            .iter()
            .rev()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(owned)
    }

    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKeyRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, record: NewApiKeyRecord) -> Result<ApiKeyRecord, StoreError> {
        if record.description.trim().is_empty() {
            return Err(StoreError::CheckViolation {
                constraint: "api_keys_description_check".to_string(),
            });
        }

        let mut records = self.records.write().await;

        let duplicate_description = records
            .iter()
            .any(|r| r.is_owned_by(&record.user_id) && r.description() == record.description);

        if duplicate_description {
            return Err(StoreError::UniqueViolation {
                constraint: "api_keys_user_id_description_key".to_string(),
            });
        }

        if records.iter().any(|r| r.key() == record.key) {
            return Err(StoreError::UniqueViolation {
                constraint: "api_keys_key_key".to_string(),
            });
        }

        let stored = ApiKeyRecord::new(ApiKeyId::new(), record, Utc::now());
        records.push(stored.clone());

        Ok(stored)
    }

    async fn revoke(
        &self,
        id: &ApiKeyId,
        owner: &PrincipalId,
        revoked_at: DateTime<Utc>,
    ) -> Result<ApiKeyRecord, StoreError> {
        let mut records = self.records.write().await;

        let record = records
            .iter_mut()
            .find(|r| r.id() == id && r.is_owned_by(owner))
            .ok_or_else(|| StoreError::not_found(format!("API key '{}'", id)))?;

        if !record.revoke(owner, revoked_at) {
            return Err(StoreError::not_found(format!("active API key '{}'", id)));
        }

        Ok(record.clone())
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|r| r.id() != id);

        Ok(records.len() < before)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> PrincipalId {
        PrincipalId::new(id).unwrap()
    }

    fn new_record(owner: &str, description: &str, key: &str) -> NewApiKeyRecord {
        NewApiKeyRecord {
            description: description.to_string(),
            key: key.to_string(),
            user_id: principal(owner),
            created_by: principal(owner),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let store = InMemoryRecordStore::new();

        store.insert(new_record("user-1", "first", "sk-1")).await.unwrap();
        store.insert(new_record("user-1", "second", "sk-2")).await.unwrap();

        let listed = store.list(&principal("user-1")).await.unwrap();
        let descriptions: Vec<&str> = listed.iter().map(|r| r.description()).collect();

        assert_eq!(descriptions, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let store = InMemoryRecordStore::new();

        store.insert(new_record("user-1", "mine", "sk-1")).await.unwrap();
        store.insert(new_record("user-2", "theirs", "sk-2")).await.unwrap();

        let listed = store.list(&principal("user-1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description(), "mine");
    }

    #[tokio::test]
    async fn test_duplicate_description_per_owner() {
        let store = InMemoryRecordStore::new();

        store.insert(new_record("user-1", "CI", "sk-1")).await.unwrap();

        let err = store
            .insert(new_record("user-1", "CI", "sk-2"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        // Same description under another owner is fine
        assert!(store.insert(new_record("user-2", "CI", "sk-3")).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_description_rejected() {
        let store = InMemoryRecordStore::new();

        let err = store
            .insert(new_record("user-1", "  ", "sk-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CheckViolation { .. }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_revoke_once() {
        let store = InMemoryRecordStore::new();
        let owner = principal("user-1");
        let created = store.insert(new_record("user-1", "CI", "sk-1")).await.unwrap();

        let revoked = store.revoke(created.id(), &owner, Utc::now()).await.unwrap();
        assert!(revoked.revoked_at().is_some());

        let again = store.revoke(created.id(), &owner, Utc::now()).await;
        assert!(matches!(again, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_revoke_other_owner_not_found() {
        let store = InMemoryRecordStore::new();
        let created = store.insert(new_record("user-1", "CI", "sk-1")).await.unwrap();

        let result = store
            .revoke(created.id(), &principal("user-2"), Utc::now())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryRecordStore::new();
        let created = store.insert(new_record("user-1", "CI", "sk-1")).await.unwrap();

        assert!(store.delete(created.id()).await.unwrap());
        assert!(!store.delete(created.id()).await.unwrap());
        assert!(store.get(created.id()).await.unwrap().is_none());
    }
}
