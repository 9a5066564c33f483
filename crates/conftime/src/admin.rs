//! Admin seniority levels.

use serde::{Deserialize, Serialize};

use crate::error::ConfError;

/// Admin seniority, stored as 1 (most senior) to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AdminLevel {
    Owner = 1,
    Manager = 2,
    Staff = 3,
}

impl AdminLevel {
    pub fn label(self) -> &'static str {
        match self {
            AdminLevel::Owner => "Owner",
            AdminLevel::Manager => "Manager",
            AdminLevel::Staff => "Staff",
        }
    }

    /// Only owners and managers may edit booths and sessions.
    pub fn can_manage_content(self) -> bool {
        self <= AdminLevel::Manager
    }
}

impl TryFrom<i64> for AdminLevel {
    type Error = ConfError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(AdminLevel::Owner),
            2 => Ok(AdminLevel::Manager),
            3 => Ok(AdminLevel::Staff),
            other => Err(ConfError::UnknownAdminLevel(other)),
        }
    }
}

impl From<AdminLevel> for i64 {
    fn from(level: AdminLevel) -> Self {
        level as i64
    }
}

impl std::fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
