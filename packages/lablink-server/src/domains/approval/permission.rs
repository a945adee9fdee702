use crate::common::{Actor, DomainError};

/// Per-entity-type authorization strategy, invoked after the pending check
/// and before a decision is persisted.
///
/// Implementations read the resolved roles and attributes on the [`Actor`];
/// they do not hit the database.
pub trait ApprovalPermission<E>: Send + Sync {
    fn check(&self, entity: &E, actor: &Actor) -> Result<(), DomainError>;
}

/// Default hook: no additional checks. The boundary layer's coarse
/// authorization is considered sufficient.
pub struct AllowAll;

impl<E> ApprovalPermission<E> for AllowAll {
    fn check(&self, _entity: &E, _actor: &Actor) -> Result<(), DomainError> {
        Ok(())
    }
}
