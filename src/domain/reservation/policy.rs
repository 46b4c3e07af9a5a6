//! Role-based change policy
//!
//! Decides which privileged fields an actor may touch. Transition legality
//! is the status machine's job, not the policy's.

use super::change::{ChangeField, ReservationChange};
use super::model::ReservationStatus;
use crate::domain::actor::ActorRole;
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePolicy {
    Guest,
    Manager,
}

impl ChangePolicy {
    pub fn for_role(role: ActorRole) -> Self {
        match role {
            ActorRole::Guest => Self::Guest,
            ActorRole::Manager => Self::Manager,
        }
    }

    pub fn allow_change_room_type(&self) -> bool {
        match self {
            Self::Guest => false,
            Self::Manager => true,
        }
    }

    pub fn allow_assign_concrete_room(&self) -> bool {
        match self {
            Self::Guest => false,
            Self::Manager => true,
        }
    }

    pub fn allow_status_change_to(&self, _target: ReservationStatus) -> bool {
        match self {
            Self::Guest => false,
            Self::Manager => true,
        }
    }

    /// Reject the change if it touches a field this role may not touch.
    ///
    /// Fields are checked in the order room type, room, status and only the
    /// first violation is reported. A change with no privileged field present
    /// always passes.
    pub fn verify(&self, change: &ReservationChange) -> DomainResult<()> {
        if change.touches(ChangeField::RoomType) && !self.allow_change_room_type() {
            return Err(DomainError::ForbiddenField {
                field: ChangeField::RoomType,
                target: None,
            });
        }
        if change.touches(ChangeField::Room) && !self.allow_assign_concrete_room() {
            return Err(DomainError::ForbiddenField {
                field: ChangeField::Room,
                target: None,
            });
        }
        if let Some(target) = change.status {
            if !self.allow_status_change_to(target) {
                return Err(DomainError::ForbiddenField {
                    field: ChangeField::Status,
                    target: Some(target),
                });
            }
        }
        Ok(())
    }
}

impl From<ActorRole> for ChangePolicy {
    fn from(role: ActorRole) -> Self {
        Self::for_role(role)
    }
}
