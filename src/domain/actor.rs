//! Who is acting on a reservation

use serde::{Deserialize, Serialize};

/// Role of the acting user. Selects the change policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRole {
    Guest,
    Manager,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Manager => "manager",
        }
    }

    /// Token role claim -> actor role. Anything but `manager` is a guest.
    pub fn from_claim(role: &str) -> Self {
        if role.eq_ignore_ascii_case("manager") {
            Self::Manager
        } else {
            Self::Guest
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: ActorRole,
}

impl Actor {
    pub fn guest(user_id: i64) -> Self {
        Self {
            user_id,
            role: ActorRole::Guest,
        }
    }

    pub fn manager(user_id: i64) -> Self {
        Self {
            user_id,
            role: ActorRole::Manager,
        }
    }

    pub fn is_manager(&self) -> bool {
        self.role == ActorRole::Manager
    }
}
