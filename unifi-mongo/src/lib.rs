//! MongoDB access provisioning for the UniFi controller
//!
//! Creates the `unifi` principal in the application database and in its
//! statistics companion, once, when a fresh MongoDB instance comes up.

pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod plan;

#[cfg(test)]
mod fake;

pub use admin::{MongoUserAdmin, UserAdmin};
pub use bootstrap::{run_bootstrap, BootstrapOutcome};
pub use config::ConnectionConfig;
pub use error::BootstrapError;
pub use plan::{BootstrapPlan, PlanOverrides, RoleGrant, UserCredential};

/// Primary application database
pub const UNIFI_DB: &str = "unifi";

/// Statistics companion database
pub const UNIFI_STAT_DB: &str = "unifi_stat";

/// Username created in both databases
pub const UNIFI_USER: &str = "unifi";

/// Password for the `unifi` principal
pub const UNIFI_PASSWORD: &str = "unifiPassword";
