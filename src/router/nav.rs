use crate::identity::{BadgeColor, Session};

/// Identity badge shown next to the protected links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBadge {
    pub label: String,
    pub color: BadgeColor,
}

/// Which nav groups are shown. A pure function of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavProjection {
    pub protected_links: bool,
    pub public_links: bool,
    pub badge: Option<RoleBadge>,
}

impl NavProjection {
    pub fn project(session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self {
                protected_links: true,
                public_links: false,
                badge: Some(RoleBadge { label: s.identity.role.to_string(), color: s.identity.role.badge_color() }),
            },
            None => Self { protected_links: false, public_links: true, badge: None },
        }
    }

    /// True if this projection is the one `session` yields.
    pub fn matches(&self, session: Option<&Session>) -> bool {
        *self == Self::project(session)
    }
}
