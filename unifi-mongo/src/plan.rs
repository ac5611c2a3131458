//! Users to provision and the roles they receive

use crate::error::BootstrapError;
use crate::{UNIFI_DB, UNIFI_PASSWORD, UNIFI_STAT_DB, UNIFI_USER};
use common::ConfigExt;
use serde::Serialize;
use std::fmt;

/// A role granted on a specific database.
///
/// Serializes to the `{ role, db }` shape `createUser` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            db: db.into(),
        }
    }
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.db)
    }
}

/// A user to create, together with the database it is created in.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub database: String,
    pub username: String,
    pub password: String,
    pub roles: Vec<RoleGrant>,
}

impl UserCredential {
    /// `user@database`, the way the server names a principal in errors.
    pub fn principal(&self) -> String {
        format!("{}@{}", self.username, self.database)
    }

    /// Reject credentials the server would refuse anyway.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        let reason = if self.database.is_empty() {
            Some("database name is empty")
        } else if self.username.is_empty() {
            Some("username is empty")
        } else if self.password.is_empty() {
            Some("password is empty")
        } else if self.roles.is_empty() {
            Some("at least one role grant is required")
        } else if self
            .roles
            .iter()
            .any(|r| r.role.is_empty() || r.db.is_empty())
        {
            Some("role grant has an empty role or database")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(BootstrapError::MalformedRequest {
                principal: self.principal(),
                message: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Optional replacements for the built-in credentials.
///
/// Anything left `None` keeps the built-in value.
#[derive(Debug, Default, Clone)]
pub struct PlanOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub app_db: Option<String>,
    pub stat_db: Option<String>,
}

impl PlanOverrides {
    /// Read overrides from `UNIFI_DB_USER`, `UNIFI_DB_PASSWORD`,
    /// `UNIFI_DB_NAME` and `UNIFI_STAT_DB_NAME`.
    pub fn from_env() -> Self {
        Self {
            username: String::env_opt("UNIFI_DB_USER"),
            password: String::env_opt("UNIFI_DB_PASSWORD"),
            app_db: String::env_opt("UNIFI_DB_NAME"),
            stat_db: String::env_opt("UNIFI_STAT_DB_NAME"),
        }
    }

    /// True when the built-in password will be used, whatever else is overridden.
    pub fn uses_builtin_password(&self) -> bool {
        self.password.is_none()
    }
}

/// Ordered list of users to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPlan {
    pub users: Vec<UserCredential>,
}

impl Default for BootstrapPlan {
    fn default() -> Self {
        Self::with_overrides(&PlanOverrides::default())
    }
}

impl BootstrapPlan {
    /// The UniFi layout: `readWrite` on the application database, then
    /// `dbOwner` on the statistics database, same user and password in both.
    pub fn with_overrides(overrides: &PlanOverrides) -> Self {
        let username = overrides.username.as_deref().unwrap_or(UNIFI_USER);
        let password = overrides.password.as_deref().unwrap_or(UNIFI_PASSWORD);
        let app_db = overrides.app_db.as_deref().unwrap_or(UNIFI_DB);
        let stat_db = overrides.stat_db.as_deref().unwrap_or(UNIFI_STAT_DB);

        let user_in = |db: &str, role: &str| UserCredential {
            database: db.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            roles: vec![RoleGrant::new(role, db)],
        };

        Self {
            users: vec![user_in(app_db, "readWrite"), user_in(stat_db, "dbOwner")],
        }
    }

    /// Validate every user before anything is sent to the server.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        self.users.iter().try_for_each(UserCredential::validate)
    }
}
