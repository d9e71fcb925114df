use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AuthError;

/// The two portal roles. Anything else is rejected, never mapped to a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Government Officer", alias = "Government")]
    GovernmentOfficer,
    #[serde(rename = "Railway Officer")]
    RailwayOfficer,
}

/// Identity badge color in the nav bar, one per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Government,
    Officer,
}

impl BadgeColor {
    pub fn css_var(&self) -> &'static str {
        match self {
            BadgeColor::Government => "var(--gov-color)",
            BadgeColor::Officer => "var(--officer-color)",
        }
    }
}

impl Role {
    pub const ALL: [Role; 2] = [Role::GovernmentOfficer, Role::RailwayOfficer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::GovernmentOfficer => "Government Officer",
            Role::RailwayOfficer => "Railway Officer",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        match self {
            Role::GovernmentOfficer => BadgeColor::Government,
            Role::RailwayOfficer => BadgeColor::Officer,
        }
    }

    /// Dashboard theme class.
    pub fn theme_class(&self) -> &'static str {
        match self {
            Role::GovernmentOfficer => "gov-theme",
            Role::RailwayOfficer => "officer-theme",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    /// Accepts the canonical names and the legacy `Government` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Government Officer" | "Government" => Ok(Role::GovernmentOfficer),
            "Railway Officer" => Ok(Role::RailwayOfficer),
            "" => Err(AuthError::RoleRequired),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}
