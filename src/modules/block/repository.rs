use uuid::Uuid;

use crate::api::error;
use crate::modules::activity::model::NewActivity;

/// The block registry. Records are directional; the interaction-forbidden
/// predicate derived from them is symmetric.
#[async_trait::async_trait]
pub trait BlockRepository {
    /// True if a record exists with `(blocker=a, blocked=b)` or
    /// `(blocker=b, blocked=a)`.
    async fn is_blocked(&self, a: &Uuid, b: &Uuid) -> Result<bool, error::SystemError>;

    /// Creates the directional record and appends the actor's audit entry in
    /// one transaction. Conflict if the exact record already exists. Existing
    /// friendship rows are left untouched.
    async fn block(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
        activity: &NewActivity,
    ) -> Result<(), error::SystemError>;

    /// Deletes the exact directional record and appends the actor's audit
    /// entry in one transaction. NotBlocked if no such record exists; a block
    /// in the opposite direction does not match.
    async fn unblock(
        &self,
        blocker: &Uuid,
        blocked: &Uuid,
        activity: &NewActivity,
    ) -> Result<(), error::SystemError>;

    /// Every account in a block relation with `account`, either direction.
    async fn blocked_counterparts(
        &self,
        account: &Uuid,
    ) -> Result<Vec<Uuid>, error::SystemError>;
}
