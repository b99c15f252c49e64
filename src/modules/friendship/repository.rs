use uuid::Uuid;

use crate::api::error;
use crate::modules::account::model::AccountResponse;
use crate::modules::activity::model::NewActivity;
use crate::modules::friendship::model::PendingRequestResponse;
use crate::modules::friendship::schema::{FriendshipEntity, FriendshipStatus};

/// The relationship store. Write verbs each own one transaction spanning the
/// status mutation and the audit entries handed to them; a committed
/// mutation therefore always carries its activity trail, and a rolled-back
/// one leaves nothing behind.
#[async_trait::async_trait]
pub trait FriendshipRepository {
    /// Exact ordered-pair lookup. `(from, to)` and `(to, from)` are distinct
    /// records.
    async fn find(
        &self,
        from: &Uuid,
        to: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// The ordered-pair record if and only if it is REJECTED; its
    /// `updated_at` anchors the resend cooldown.
    async fn find_rejected(
        &self,
        from: &Uuid,
        to: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Creates a PENDING record for the ordered pair, or revives an existing
    /// REJECTED record back to PENDING. Fails Conflict when the record is
    /// already PENDING or ACCEPTED, and Cooldown when the rejection is still
    /// fresh; both are re-validated under a row lock at write time, so the
    /// losing side of two concurrent sends gets Conflict rather than a
    /// duplicate row.
    async fn upsert_pending(
        &self,
        from: &Uuid,
        to: &Uuid,
        activity: &NewActivity,
    ) -> Result<FriendshipEntity, error::SystemError>;

    /// Conditional transition keyed on `(from, to, expected)`. NotFound when
    /// no record matches; that is the concurrency guard, the second of two
    /// racing resolutions observes "no longer pending" instead of clobbering
    /// the first.
    async fn transition(
        &self,
        from: &Uuid,
        to: &Uuid,
        new_status: FriendshipStatus,
        expected: FriendshipStatus,
        activities: &[NewActivity],
    ) -> Result<FriendshipEntity, error::SystemError>;

    /// Accounts on either side of an ACCEPTED record with `account`, minus
    /// `excluded`, ordered by account id.
    async fn list_accepted(
        &self,
        account: &Uuid,
        excluded: &[Uuid],
    ) -> Result<Vec<AccountResponse>, error::SystemError>;

    /// Senders of PENDING records addressed to `recipient`, minus `excluded`,
    /// oldest first.
    async fn list_pending(
        &self,
        recipient: &Uuid,
        excluded: &[Uuid],
    ) -> Result<Vec<PendingRequestResponse>, error::SystemError>;
}
