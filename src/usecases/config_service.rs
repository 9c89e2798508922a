//! Configuration mutations: add a recipient, replace the sender identity.
//!
//! Each one loads the latest persisted state, changes it and rewrites it whole.

use crate::domain::DomainError;
use crate::ports::ConfigStorePort;
use std::sync::Arc;
use tracing::{error, info};

pub struct ConfigService {
    store: Arc<dyn ConfigStorePort>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn ConfigStorePort>) -> Self {
        Self { store }
    }

    /// Append `address` unless already listed (exact match). No syntax check.
    /// Returns whether it was added.
    pub async fn add_recipient(&self, address: &str) -> Result<bool, DomainError> {
        self.try_add_recipient(address)
            .await
            .inspect_err(|e| error!(recipient = %address, error = %e, "failed to add recipient"))
    }

    /// Overwrite sender address and credential; the recipient list is untouched.
    pub async fn set_sender(&self, address: &str, credential: &str) -> Result<(), DomainError> {
        self.try_set_sender(address, credential)
            .await
            .inspect_err(|e| error!(sender = %address, error = %e, "failed to update sender"))
    }

    async fn try_add_recipient(&self, address: &str) -> Result<bool, DomainError> {
        let mut config = self.store.load().await?;
        if !config.add_recipient(address) {
            info!(recipient = %address, "recipient already present");
            return Ok(false);
        }
        self.store.save(&config).await?;
        info!(recipient = %address, "recipient added");
        Ok(true)
    }

    async fn try_set_sender(&self, address: &str, credential: &str) -> Result<(), DomainError> {
        let mut config = self.store.load().await?;
        config.set_sender(address, credential);
        self.store.save(&config).await?;
        info!(sender = %address, "sender updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::JsonConfigStore;

    const CONFIG: &str = r#"{
    "email_from": "old@example.com",
    "email_password": "old-pw",
    "recipients": ["a@example.com"]
}"#;

    fn service() -> (tempfile::TempDir, Arc<JsonConfigStore>, ConfigService) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, CONFIG).unwrap();
        let store = Arc::new(JsonConfigStore::new(path));
        let service = ConfigService::new(store.clone());
        (dir, store, service)
    }

    #[tokio::test]
    async fn test_add_recipient_twice_keeps_one() {
        let (_dir, store, service) = service();
        assert!(service.add_recipient("b@example.com").await.unwrap());
        assert!(!service.add_recipient("b@example.com").await.unwrap());

        let config = store.load().await.unwrap();
        assert_eq!(config.recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn test_set_sender_replaces_identity_only() {
        let (_dir, store, service) = service();
        service.set_sender("new@example.com", "new-pw").await.unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.email_from, "new@example.com");
        assert_eq!(config.email_password, "new-pw");
        assert_eq!(config.recipients, vec!["a@example.com"]);
    }

    #[tokio::test]
    async fn test_mutation_without_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonConfigStore::new(dir.path().join("config.json")));
        let service = ConfigService::new(store);
        assert!(matches!(
            service.add_recipient("x@example.com").await,
            Err(DomainError::ConfigMissing(_))
        ));
        assert!(matches!(
            service.set_sender("x@example.com", "pw").await,
            Err(DomainError::ConfigMissing(_))
        ));
    }
}
