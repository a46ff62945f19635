//! Process-local OTP store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpStore;

/// In-memory OTP store
///
/// Records live for the lifetime of the process. Cloning shares the map.
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn upsert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;

        let stored = match records.get(&record.identifier) {
            Some(existing) => existing.superseded_by(record),
            None => record,
        };

        records.insert(stored.identifier.clone(), stored.clone());
        Ok(stored)
    }

    async fn find(&self, identifier: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(identifier).cloned())
    }

    async fn delete(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.remove(&record.identifier);
        Ok(())
    }

    async fn delete_if_matches(&self, expected: &OtpRecord) -> Result<bool, DomainError> {
        // Check and removal happen under one write guard
        let mut records = self.records.write().await;

        match records.get(&expected.identifier) {
            Some(current) if current.same_version(expected) => {
                records.remove(&expected.identifier);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
