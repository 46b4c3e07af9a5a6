//! Reservation and upgrade status machines
//!
//! | from       | allowed to                     |
//! |------------|--------------------------------|
//! | Pending    | Confirmed, Canceled            |
//! | Confirmed  | CheckedIn, Canceled, NoShow    |
//! | CheckedIn  | CheckedOut                     |
//! | Canceled, CheckedOut, NoShow | terminal     |

use super::model::{ReservationStatus, UpgradeStatus};
use crate::domain::{DomainError, DomainResult};

impl ReservationStatus {
    pub fn allowed_transitions(&self) -> &'static [ReservationStatus] {
        use ReservationStatus::*;
        match self {
            Pending => &[Confirmed, Canceled],
            Confirmed => &[CheckedIn, Canceled, NoShow],
            CheckedIn => &[CheckedOut],
            Canceled | CheckedOut | NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, to: ReservationStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// Fails with `InvalidTransition` unless `from -> to` is in the table.
pub fn ensure_transition(from: ReservationStatus, to: ReservationStatus) -> DomainResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition { from, to })
    }
}

impl UpgradeStatus {
    pub fn allowed_transitions(&self) -> &'static [UpgradeStatus] {
        use UpgradeStatus::*;
        match self {
            NotEligible => &[Eligible],
            Eligible => &[Queued, Applied, Declined],
            Queued => &[Applied, Declined],
            Applied | Declined => &[],
        }
    }

    pub fn can_transition_to(&self, to: UpgradeStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }
}

pub fn ensure_upgrade_transition(from: UpgradeStatus, to: UpgradeStatus) -> DomainResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "Invalid upgrade status transition: {} -> {}",
            from, to
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::*;

    #[test]
    fn pending_to_confirmed_succeeds() {
        assert!(ensure_transition(Pending, Confirmed).is_ok());
    }

    #[test]
    fn pending_cannot_check_in() {
        assert_eq!(
            ensure_transition(Pending, CheckedIn),
            Err(DomainError::InvalidTransition {
                from: Pending,
                to: CheckedIn
            })
        );
    }

    #[test]
    fn confirmed_must_pass_through_checked_in() {
        assert!(ensure_transition(Confirmed, CheckedOut).is_err());
        assert!(ensure_transition(Confirmed, CheckedIn).is_ok());
        assert!(ensure_transition(CheckedIn, CheckedOut).is_ok());
    }

    #[test]
    fn confirmed_may_become_no_show() {
        assert!(ensure_transition(Confirmed, NoShow).is_ok());
        assert!(ensure_transition(Pending, NoShow).is_err());
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for terminal in [Canceled, CheckedOut, NoShow] {
            assert!(terminal.is_terminal());
            for to in ReservationStatus::ALL {
                assert!(ensure_transition(terminal, to).is_err(), "{terminal} -> {to}");
            }
        }
        assert!(ensure_transition(CheckedOut, Confirmed).is_err());
    }

    #[test]
    fn self_transitions_are_not_in_the_table() {
        for status in ReservationStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn upgrade_machine_is_linear_with_decline_branch() {
        use UpgradeStatus as U;
        assert!(ensure_upgrade_transition(U::NotEligible, U::Eligible).is_ok());
        assert!(ensure_upgrade_transition(U::Eligible, U::Queued).is_ok());
        assert!(ensure_upgrade_transition(U::Queued, U::Applied).is_ok());
        assert!(ensure_upgrade_transition(U::Queued, U::Declined).is_ok());
        assert!(ensure_upgrade_transition(U::NotEligible, U::Applied).is_err());
        assert!(ensure_upgrade_transition(U::Applied, U::Declined).is_err());
        assert!(ensure_upgrade_transition(U::Declined, U::Eligible).is_err());
    }
}
