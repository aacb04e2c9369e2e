use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::activation::GuardState;
use crate::models::Role;

/// Path the root guard sends anonymous or rejected visitors to
pub const LOGIN_PATH: &str = "/login";

/// Which route a guard protects; the variants differ only in who they accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardPolicy {
    /// Entry route: never shows content, only redirects
    Root,
    Admin,
    Customer,
}

/// Who a denial page is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Admin,
    Customer,
}

impl Audience {
    #[must_use]
    pub const fn denial_message(self) -> &'static str {
        match self {
            Self::Admin => "This page is for admin only.",
            Self::Customer => "This page is for customers only.",
        }
    }
}

/// What a page shows for a given guard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderOutcome {
    Loading,
    Redirect {
        target: &'static str,
    },
    Denied {
        audience: Audience,
        message: &'static str,
    },
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown guard: {0:?}")]
pub struct UnknownGuard(pub String);

impl GuardPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }

    /// Acceptance predicate applied to a resolved role
    ///
    /// Customer routes accept every role that is not admin.
    #[must_use]
    pub const fn accepts(self, role: Role) -> bool {
        match self {
            Self::Root => true,
            Self::Admin => matches!(role, Role::Admin),
            Self::Customer => !matches!(role, Role::Admin),
        }
    }

    /// Audience named on this guard's denial page; the root guard has none
    #[must_use]
    pub const fn audience(self) -> Option<Audience> {
        match self {
            Self::Root => None,
            Self::Admin => Some(Audience::Admin),
            Self::Customer => Some(Audience::Customer),
        }
    }

    /// Map a guard state to what the page shows
    ///
    /// Denials render the same regardless of their cause.
    #[must_use]
    pub fn render(self, state: &GuardState) -> RenderOutcome {
        match (state, self.audience()) {
            (GuardState::Pending, _) => RenderOutcome::Loading,
            (GuardState::Authorized(role), None) => RenderOutcome::Redirect {
                target: role.home_path(),
            },
            (GuardState::Denied(_), None) => RenderOutcome::Redirect { target: LOGIN_PATH },
            (GuardState::Authorized(_), Some(_)) => RenderOutcome::Content,
            (GuardState::Denied(_), Some(audience)) => RenderOutcome::Denied {
                audience,
                message: audience.denial_message(),
            },
        }
    }
}

impl fmt::Display for GuardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuardPolicy {
    type Err = UnknownGuard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" => Ok(Self::Root),
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            other => Err(UnknownGuard(other.to_string())),
        }
    }
}
