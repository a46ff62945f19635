//! Main OTP service implementation

use std::sync::Arc;

use dl_shared::email::is_valid_email;
use dl_shared::identifier::{mask_identifier, normalize_identifier};
use dl_shared::phone::is_valid_phone_number;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::{Purpose, Transport};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::otp::OtpStore;
use crate::services::clock::{Clock, SystemClock};

use super::config::OtpServiceConfig;
use super::dispatcher::NotificationDispatcher;
use super::types::{IssueOutcome, IssueRequest, OtpMessage};
use super::verifier::{self, VerifyOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IssueKind {
    Issue,
    Resend,
}

impl IssueKind {
    fn event(&self) -> &'static str {
        match self {
            IssueKind::Issue => "otp_issued",
            IssueKind::Resend => "otp_resent",
        }
    }
}

/// OTP lifecycle facade consumed by account flows
///
/// Generates a code, stores it against the identifier, and hands it to the
/// dispatcher. Verification deletes the record on success so every code is
/// single-use.
pub struct OtpService<S: OtpStore> {
    /// Record persistence
    store: Arc<S>,
    /// Email/SMS delivery
    dispatcher: Arc<NotificationDispatcher>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Time source for issuance and expiry checks
    clock: Arc<dyn Clock>,
}

impl<S: OtpStore> OtpService<S> {
    /// Create a new OTP service using the wall clock
    pub fn new(
        store: Arc<S>,
        dispatcher: Arc<NotificationDispatcher>,
        config: OtpServiceConfig,
    ) -> Self {
        Self::with_clock(store, dispatcher, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<S>,
        dispatcher: Arc<NotificationDispatcher>,
        config: OtpServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Whether `transport` has a configured sender
    pub fn supports(&self, transport: Transport) -> bool {
        self.dispatcher.supports(transport)
    }

    /// Issue a code for an identifier
    ///
    /// This method:
    /// 1. Validates the identifier against the transport
    /// 2. Generates a code with the purpose's configuration
    /// 3. Upserts the record, replacing any live code
    /// 4. Dispatches the code
    ///
    /// A failed dispatch is reported in the outcome and the stored record is
    /// kept, so a later resend simply overwrites it.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Record stored; check `dispatch.success`
    /// * `Err(DomainError)` - Validation failed or the store is unavailable
    pub async fn issue(&self, request: IssueRequest) -> DomainResult<IssueOutcome> {
        self.issue_with(request, IssueKind::Issue).await
    }

    /// Send a fresh code for an identifier
    ///
    /// Same effect as [`issue`](Self::issue); kept separate so callers and
    /// rate limiters can tell the two apart.
    pub async fn resend(&self, request: IssueRequest) -> DomainResult<IssueOutcome> {
        self.issue_with(request, IssueKind::Resend).await
    }

    /// Verify a presented code
    ///
    /// On success the record is removed with a compare-and-delete, so two
    /// concurrent verifications of the same code cannot both succeed; the
    /// loser sees `NotFound`. Failed checks leave the record untouched.
    pub async fn verify(
        &self,
        identifier: &str,
        code: &str,
        purpose: Purpose,
    ) -> DomainResult<VerifyOutcome> {
        let identifier = normalize_identifier(identifier);
        if identifier.is_empty() {
            return Err(ValidationError::required("identifier").into());
        }
        if code.is_empty() {
            return Err(ValidationError::required("code").into());
        }

        let masked = mask_identifier(&identifier);
        let record = self.store.find(&identifier).await.map_err(|e| {
            tracing::error!(
                identifier = %masked,
                error = %e,
                event = "otp_lookup_failed",
                "Failed to load OTP record"
            );
            e
        })?;

        let now = self.clock.now();
        let mut outcome = verifier::verify(
            record.as_ref(),
            code,
            purpose,
            now,
            self.config.enforce_purpose,
        );

        if let (VerifyOutcome::Verified, Some(record)) = (outcome, record.as_ref()) {
            if !self.store.delete_if_matches(record).await? {
                // Consumed or reissued between find and delete
                tracing::warn!(
                    identifier = %masked,
                    event = "otp_already_consumed",
                    "OTP record changed before it could be consumed"
                );
                outcome = VerifyOutcome::NotFound;
            }
        }

        if outcome.is_verified() {
            tracing::info!(
                identifier = %masked,
                purpose = %purpose,
                event = "otp_verified",
                "OTP verified and consumed"
            );
        } else {
            tracing::warn!(
                identifier = %masked,
                purpose = %purpose,
                outcome = %outcome,
                event = "otp_verification_failed",
                "OTP verification failed"
            );
        }

        Ok(outcome)
    }

    async fn issue_with(&self, request: IssueRequest, kind: IssueKind) -> DomainResult<IssueOutcome> {
        let identifier = self.validate_issue(&request)?;
        let masked = mask_identifier(&identifier);

        let otp_config = *self.config.for_purpose(request.purpose);
        let code = otp_config.generate();
        let now = self.clock.now();
        let expires_at = otp_config.expiry_from(now);

        let record = OtpRecord::new(
            identifier.clone(),
            code,
            Some(request.purpose),
            expires_at,
            now,
        );

        let stored = self.store.upsert(record).await.map_err(|e| {
            tracing::error!(
                identifier = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store OTP record"
            );
            e
        })?;

        tracing::info!(
            identifier = %masked,
            purpose = %request.purpose,
            transport = %request.transport,
            expires_at = %stored.expires_at,
            event = kind.event(),
            "Stored new OTP"
        );

        let message = OtpMessage {
            identifier: &stored.identifier,
            code: &stored.code,
            purpose: request.purpose,
            ttl_minutes: otp_config.ttl_minutes,
            app_name: &self.config.app_name,
            options: &request.options,
        };
        let dispatch = self.dispatcher.send(request.transport, &message).await;

        if !dispatch.success {
            tracing::warn!(
                identifier = %masked,
                transport = %request.transport,
                event = "otp_dispatch_unsuccessful",
                "OTP stored but not delivered; record kept for resend"
            );
        }

        Ok(IssueOutcome {
            identifier,
            purpose: request.purpose,
            transport: request.transport,
            expires_at: stored.expires_at,
            dispatch,
        })
    }

    /// Validate before touching the store; returns the normalised identifier
    fn validate_issue(&self, request: &IssueRequest) -> Result<String, DomainError> {
        let identifier = normalize_identifier(&request.identifier);
        if identifier.is_empty() {
            return Err(ValidationError::required("identifier").into());
        }

        match request.transport {
            Transport::Email if !is_valid_email(&identifier) => {
                return Err(ValidationError::InvalidEmail.into());
            }
            Transport::Sms if !is_valid_phone_number(&identifier) => {
                return Err(ValidationError::InvalidPhone.into());
            }
            _ => {}
        }

        if !self.dispatcher.supports(request.transport) {
            return Err(ValidationError::UnsupportedTransport {
                transport: request.transport.to_string(),
            }
            .into());
        }

        Ok(identifier)
    }
}
