//! # Inbound Ports (Driving Ports / API)
//!
//! The verification API consumed by every transport (HTTP today; any
//! request/stream transport can drive the same trait).

use crate::domain::bulk::BulkSession;
use crate::domain::entities::VerificationOutcome;
use shared_types::SmsRequest;

/// Primary SMS verification API.
///
/// Implementations must be thread-safe (`Send + Sync`): a single instance is
/// shared by all concurrent requests and bulk sessions.
pub trait SmsVerificationApi: Send + Sync {
    /// Verify one signed message.
    ///
    /// Never fails: malformed input, mismatches and internal errors are all
    /// reported through the outcome's status.
    fn verify_request(&self, request: &SmsRequest) -> VerificationOutcome;

    /// Boolean shorthand for [`verify_request`](Self::verify_request).
    fn is_signature_valid(&self, request: &SmsRequest) -> bool {
        self.verify_request(request).verified()
    }

    /// Open a bulk session that verifies messages against this service.
    fn open_bulk_session(&self) -> BulkSession<'_, Self>
    where
        Self: Sized,
    {
        BulkSession::new(self)
    }
}
