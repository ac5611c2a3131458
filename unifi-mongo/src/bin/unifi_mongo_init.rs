//! UniFi MongoDB init
//!
//! Runs ONCE against a fresh MongoDB instance, typically from the mongo
//! image's /docker-entrypoint-initdb.d hook. Not idempotent: a second run
//! fails because the users already exist, and the exit code says so.

use anyhow::{Context, Result};
use common::init_logging;
use mongodb::Client;
use std::process::ExitCode;
use tracing::{error, info, warn};
use unifi_mongo::{run_bootstrap, BootstrapPlan, ConnectionConfig, MongoUserAdmin, PlanOverrides};

const COMPONENT: &str = "unifi-mongo-init";

async fn run(component: &str) -> Result<()> {
    let config = ConnectionConfig::from_env()?;
    let overrides = PlanOverrides::from_env();

    if overrides.uses_builtin_password() {
        warn!("Using the built-in UniFi password; set UNIFI_DB_PASSWORD to override");
    }

    let plan = BootstrapPlan::with_overrides(&overrides);

    info!(
        component,
        uri = %config.uri,
        admin_user = config.admin_user.as_deref().unwrap_or("<none>"),
        users = plan.users.len(),
        "UniFi MongoDB init starting..."
    );

    let options = config.client_options(component).await?;
    let client = Client::with_options(options).context("Failed to create MongoDB client")?;
    let admin = MongoUserAdmin::new(client);

    admin.ping().await.context("MongoDB is not reachable")?;

    let outcome = run_bootstrap(&admin, &plan).await?;

    info!(
        users_created = ?outcome.users_created,
        duration_ms = outcome.duration.as_millis() as u64,
        "UniFi MongoDB init completed"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let guard = init_logging(COMPONENT);

    match run(guard.component()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "UniFi MongoDB init failed");
            ExitCode::FAILURE
        }
    }
}
