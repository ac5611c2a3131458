//! The one-shot provisioning sequence
//!
//! Users are created strictly in plan order. The first failure aborts the
//! run; users created before it are left in place.

use crate::admin::UserAdmin;
use crate::error::BootstrapError;
use crate::plan::BootstrapPlan;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// What a successful run created
#[derive(Debug)]
pub struct BootstrapOutcome {
    /// `user@database` for every created user, in creation order
    pub users_created: Vec<String>,
    pub duration: Duration,
}

/// Create every user in `plan`, in order, stopping at the first failure.
///
/// There is no existence check, so running against an already provisioned
/// server fails with [`BootstrapError::UserAlreadyExists`].
pub async fn run_bootstrap<A: UserAdmin>(
    admin: &A,
    plan: &BootstrapPlan,
) -> Result<BootstrapOutcome, BootstrapError> {
    let start = Instant::now();
    plan.validate()?;

    let mut users_created = Vec::with_capacity(plan.users.len());

    for user in &plan.users {
        let principal = user.principal();
        let roles: Vec<String> = user.roles.iter().map(ToString::to_string).collect();

        info!(principal = %principal, roles = ?roles, "Creating user");

        if let Err(e) = admin.create_user(user).await {
            error!(
                principal = %principal,
                kind = e.kind(),
                created = ?users_created,
                "User creation failed, aborting"
            );
            return Err(e);
        }

        users_created.push(principal);
    }

    Ok(BootstrapOutcome {
        users_created,
        duration: start.elapsed(),
    })
}
