//! OTP store trait defining the interface for OTP record persistence.
//!
//! The store holds at most one record per identifier and never filters by
//! expiry; expiry is a verification concern.

use async_trait::async_trait;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

/// Persistence contract for OTP records
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Insert `record`, or overwrite the existing record for its identifier
    ///
    /// An existing record keeps its `created_at`. Never fails on duplicates.
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The record as stored
    /// * `Err(DomainError)` - Back-end failure
    async fn upsert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Fetch the current record for `identifier`, expired or not
    async fn find(&self, identifier: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Remove whatever record is stored for `record.identifier`
    async fn delete(&self, record: &OtpRecord) -> Result<(), DomainError>;

    /// Atomically remove the stored record only if it is still `expected`
    ///
    /// Code and `updated_at` must both match. Returns `true` when this call
    /// removed the record; a concurrent caller that lost the race, or a
    /// caller holding a superseded record, gets `false`.
    async fn delete_if_matches(&self, expected: &OtpRecord) -> Result<bool, DomainError>;
}
