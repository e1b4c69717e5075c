//! API Key service
//!
//! Lifecycle operations against an injected record store and identity
//! provider, independent of any UI or HTTP framework.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::api_key::{
    normalize_description, ApiKeyId, ApiKeyRecord, KeyError, NewApiKeyRecord, RecordStore,
    StoreError,
};
use crate::domain::identity::{IdentityProvider, Principal};

use super::generator::KeyGenerator;
use super::single_flight::{FlightGuard, SingleFlight};

/// Result of generating a new API key
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    /// The stored record
    pub record: ApiKeyRecord,
    /// The full key, handed out only here
    pub key: String,
}

/// API Key service for managing the signed-in principal's keys
#[derive(Clone)]
pub struct ApiKeyService {
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityProvider>,
    generator: KeyGenerator,
    flight: SingleFlight,
}

impl ApiKeyService {
    /// Create a new API key service
    pub fn new(store: Arc<dyn RecordStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            generator: KeyGenerator::default(),
            flight: SingleFlight::new(),
        }
    }

    /// Same store, generator and in-flight tracking, different identity.
    ///
    /// Used to bind the caller of one HTTP request.
    pub fn for_identity(&self, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store: Arc::clone(&self.store),
            identity,
            generator: self.generator,
            flight: self.flight.clone(),
        }
    }

    /// All keys of the current principal, newest first
    pub async fn list(&self) -> Result<Vec<ApiKeyRecord>, KeyError> {
        let principal = self.resolve_principal().await?;
        debug!("Listing API keys for principal={}", principal.id());

        self.store.list(principal.id()).await.map_err(KeyError::Load)
    }

    /// Create a key for the current principal.
    ///
    /// The description is trimmed; a blank one is rejected before any
    /// principal lookup or store call.
    pub async fn generate(&self, description: &str) -> Result<GeneratedKey, KeyError> {
        let description = normalize_description(description).ok_or_else(|| {
            KeyError::Validation(StoreError::NotNullViolation {
                column: "description".to_string(),
            })
        })?;

        let principal = self.resolve_principal().await?;
        let _guard = self.acquire(&principal)?;

        info!(
            "Generating API key: principal={}, description={}",
            principal.id(),
            description
        );

        let key = self.generator.generate();
        let record = NewApiKeyRecord {
            description: description.clone(),
            key: key.clone(),
            user_id: principal.id().clone(),
            created_by: principal.id().clone(),
        };

        let record = self
            .store
            .insert(record)
            .await
            .map_err(|e| KeyError::from_insert(&description, e))?;

        info!("API key generated: id={}", record.id());

        Ok(GeneratedKey { record, key })
    }

    /// Revoke an active key owned by the current principal
    pub async fn revoke(&self, id: &ApiKeyId) -> Result<ApiKeyRecord, KeyError> {
        let principal = self.resolve_principal().await?;
        let _guard = self.acquire(&principal)?;

        info!("Revoking API key: id={}, principal={}", id, principal.id());

        let existing = self
            .owned_record(id, &principal)
            .await
            .map_err(|source| KeyError::Revoke { id: *id, source })?
            .ok_or_else(|| KeyError::Revoke {
                id: *id,
                source: StoreError::not_found(format!("API key '{}'", id)),
            })?;

        if !existing.is_active() {
            return Err(KeyError::AlreadyRevoked(*id));
        }

        self.store
            .revoke(id, principal.id(), Utc::now())
            .await
            .map_err(|source| KeyError::Revoke { id: *id, source })
    }

    /// Delete a revoked key owned by the current principal.
    ///
    /// Deleting a key that is already gone succeeds and returns `false`.
    pub async fn delete(&self, id: &ApiKeyId) -> Result<bool, KeyError> {
        let principal = self.resolve_principal().await?;
        let _guard = self.acquire(&principal)?;

        info!("Deleting API key: id={}, principal={}", id, principal.id());

        let existing = self
            .owned_record(id, &principal)
            .await
            .map_err(|source| KeyError::Delete { id: *id, source })?;

        let Some(existing) = existing else {
            debug!("API key already gone: id={}", id);
            return Ok(false);
        };

        if existing.is_active() {
            return Err(KeyError::StillActive(*id));
        }

        self.store
            .delete(id)
            .await
            .map_err(|source| KeyError::Delete { id: *id, source })
    }

    async fn resolve_principal(&self) -> Result<Principal, KeyError> {
        match self.identity.current_principal().await {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => Err(KeyError::NotAuthenticated),
            Err(e) => Err(KeyError::Auth(e)),
        }
    }

    fn acquire(&self, principal: &Principal) -> Result<FlightGuard, KeyError> {
        self.flight.try_acquire(principal.id().as_str()).ok_or_else(|| {
            warn!("Rejected overlapping key mutation: principal={}", principal.id());
            KeyError::Busy(principal.id().to_string())
        })
    }

    /// Records of other principals are reported as absent
    async fn owned_record(
        &self,
        id: &ApiKeyId,
        principal: &Principal,
    ) -> Result<Option<ApiKeyRecord>, StoreError> {
        let record = self.store.get(id).await?;
        Ok(record.filter(|r| r.is_owned_by(principal.id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::{validate_key_format, KeyErrorKind, KeyStatus, KEY_LENGTH};
    use crate::domain::identity::{MockIdentityProvider, PrincipalId};
    use crate::domain::DomainError;
    use crate::infrastructure::api_key::in_memory::testing::{FlakyRecordStore, StoreOp};
    use crate::infrastructure::identity::FixedIdentityProvider;

    fn create_service(store: Arc<FlakyRecordStore>) -> ApiKeyService {
        ApiKeyService::new(store, Arc::new(FixedIdentityProvider::signed_in("user-1")))
    }

    #[tokio::test]
    async fn test_generate_key() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        let generated = service.generate("CI pipeline").await.unwrap();

        assert!(validate_key_format(&generated.key).is_ok());
        assert_eq!(generated.record.key(), generated.key);
        assert_eq!(generated.record.key().len(), KEY_LENGTH);
        assert_eq!(generated.record.description(), "CI pipeline");
        assert_eq!(generated.record.user_id().as_str(), "user-1");
        assert_eq!(generated.record.created_by().as_str(), "user-1");
        assert_eq!(generated.record.status(), KeyStatus::Active);
    }

    #[tokio::test]
    async fn test_generate_trims_description() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        let generated = service.generate("  CI pipeline  ").await.unwrap();
        assert_eq!(generated.record.description(), "CI pipeline");
    }

    #[tokio::test]
    async fn test_generate_blank_description_makes_no_calls() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        let err = service.generate("   ").await.unwrap_err();

        assert_eq!(err.kind(), KeyErrorKind::Validation);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_duplicate_description() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        let first = service.generate("CI pipeline").await.unwrap();
        service.revoke(first.record.id()).await.unwrap();

        // Revoked records still hold their description
        let err = service.generate("CI pipeline").await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::DuplicateDescription);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_store_failures_are_classified() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        store.fail_on(
            StoreOp::Insert,
            StoreError::from_sqlstate("23502", "user_id"),
        );
        let err = service.generate("CI").await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Validation);

        store.fail_on(StoreOp::Insert, StoreError::backend("connection reset"));
        let err = service.generate("CI").await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Generate);
    }

    #[tokio::test]
    async fn test_generate_not_authenticated() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = ApiKeyService::new(
            store.clone(),
            Arc::new(FixedIdentityProvider::anonymous()),
        );

        let err = service.generate("CI").await.unwrap_err();

        assert_eq!(err.kind(), KeyErrorKind::NotAuthenticated);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_identity_failure() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = ApiKeyService::new(
            store.clone(),
            Arc::new(FixedIdentityProvider::failing("session expired")),
        );

        let err = service.generate("CI").await.unwrap_err();

        assert_eq!(err.kind(), KeyErrorKind::Auth);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        service.generate("first").await.unwrap();
        service.generate("second").await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].description(), "second");
        assert_eq!(listed[1].description(), "first");
    }

    #[tokio::test]
    async fn test_list_failure_is_load_error() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        store.fail_on(StoreOp::List, StoreError::backend("timeout"));

        let err = service.list().await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Load);
    }

    #[tokio::test]
    async fn test_revoke_keeps_description_and_key() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        let generated = service.generate("CI pipeline").await.unwrap();
        let revoked = service.revoke(generated.record.id()).await.unwrap();

        assert_eq!(revoked.status(), KeyStatus::Revoked);
        assert!(revoked.revoked_at().is_some());
        assert_eq!(revoked.description(), "CI pipeline");
        assert_eq!(revoked.key(), generated.key);
    }

    #[tokio::test]
    async fn test_revoke_twice_fails_and_keeps_timestamp() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        let generated = service.generate("CI").await.unwrap();
        let revoked = service.revoke(generated.record.id()).await.unwrap();

        let err = service.revoke(generated.record.id()).await.unwrap_err();
        assert!(matches!(err, KeyError::AlreadyRevoked(_)));

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].revoked_at(), revoked.revoked_at());
    }

    #[tokio::test]
    async fn test_revoke_unknown_id() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        let err = service.revoke(&ApiKeyId::new()).await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Revoke);
    }

    #[tokio::test]
    async fn test_revoke_other_principals_key() {
        let store = Arc::new(FlakyRecordStore::new());
        let owner = create_service(store.clone());
        let other = owner.for_identity(Arc::new(FixedIdentityProvider::signed_in("user-2")));

        let generated = owner.generate("CI").await.unwrap();

        let err = other.revoke(generated.record.id()).await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Revoke);
        assert!(owner.list().await.unwrap()[0].is_active());
    }

    #[tokio::test]
    async fn test_delete_requires_revoked() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        let generated = service.generate("CI").await.unwrap();

        let err = service.delete(generated.record.id()).await.unwrap_err();
        assert!(matches!(err, KeyError::StillActive(_)));
        assert_eq!(err.kind(), KeyErrorKind::Delete);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store);

        let generated = service.generate("CI").await.unwrap();
        service.revoke(generated.record.id()).await.unwrap();

        assert!(service.delete(generated.record.id()).await.unwrap());
        assert!(!service.delete(generated.record.id()).await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_store_failure() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        let generated = service.generate("CI").await.unwrap();
        service.revoke(generated.record.id()).await.unwrap();

        store.fail_on(StoreOp::Delete, StoreError::backend("connection reset"));

        let err = service.delete(generated.record.id()).await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Delete);
    }

    #[tokio::test]
    async fn test_overlapping_mutation_rejected() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());
        let principal = Principal::new(PrincipalId::new("user-1").unwrap());

        let _held = service.acquire(&principal).unwrap();

        let err = service.generate("CI").await.unwrap_err();
        assert_eq!(err.kind(), KeyErrorKind::Busy);
        assert!(store.inner().is_empty().await);
    }

    #[tokio::test]
    async fn test_guard_released_after_failure() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = create_service(store.clone());

        store.fail_on(StoreOp::Insert, StoreError::backend("down"));
        assert!(service.generate("CI").await.is_err());

        store.clear_failure();
        assert!(service.generate("CI").await.is_ok());
    }

    #[tokio::test]
    async fn test_identity_error_is_kept_as_source() {
        let store = Arc::new(FlakyRecordStore::new());
        let service = ApiKeyService::new(
            store,
            Arc::new(FixedIdentityProvider::failing("bad signature")),
        );

        match service.list().await.unwrap_err() {
            KeyError::Auth(DomainError::Authentication { message }) => {
                assert_eq!(message, "bad signature")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_principal_resolved_per_call() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_current_principal().times(2).returning(|| {
            Ok(Some(Principal::new(PrincipalId::new("user-7").unwrap())))
        });

        let store = Arc::new(FlakyRecordStore::new());
        let service = ApiKeyService::new(store, Arc::new(identity));

        let generated = service.generate("Zendesk bridge").await.unwrap();
        assert_eq!(generated.record.user_id().as_str(), "user-7");

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
