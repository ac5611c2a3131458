//! Connection settings for the ambient admin session

use anyhow::{bail, Context, Result};
use common::ConfigExt;
use mongodb::options::{ClientOptions, Credential};
use std::time::Duration;

pub const DEFAULT_MONGO_URI: &str = "mongodb://127.0.0.1:27017";

/// How to reach MongoDB with administrative rights
pub struct ConnectionConfig {
    pub uri: String,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub auth_source: String,
    pub connect_timeout: Duration,
}

impl ConnectionConfig {
    /// Load configuration from environment variables.
    ///
    /// The admin credentials use the same names as the official mongo image,
    /// so the tool can run from its init hook without extra wiring.
    pub fn from_env() -> Result<Self> {
        let admin_user = String::env_opt("MONGO_INITDB_ROOT_USERNAME");
        let admin_password = match admin_user {
            Some(_) => Some(String::env_required("MONGO_INITDB_ROOT_PASSWORD").context(
                "MONGO_INITDB_ROOT_PASSWORD is required when MONGO_INITDB_ROOT_USERNAME is set",
            )?),
            None => None,
        };

        Ok(Self {
            uri: String::env_or("MONGO_URI", DEFAULT_MONGO_URI),
            admin_user,
            admin_password,
            auth_source: String::env_or("MONGO_AUTH_SOURCE", "admin"),
            connect_timeout: Duration::from_secs(u64::env_parse("MONGO_CONNECT_TIMEOUT_SECS", 10)),
        })
    }

    /// Build driver options, applying admin credentials if configured.
    pub async fn client_options(&self, app_name: &str) -> Result<ClientOptions> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .context(format!("Invalid MONGO_URI: {}", self.uri))?;

        self.apply(&mut options)?;
        options.app_name = Some(app_name.to_string());
        Ok(options)
    }

    fn apply(&self, options: &mut ClientOptions) -> Result<()> {
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.connect_timeout);

        match (&self.admin_user, &self.admin_password) {
            (Some(user), Some(password)) => {
                options.credential = Some(
                    Credential::builder()
                        .username(user.clone())
                        .password(password.clone())
                        .source(self.auth_source.clone())
                        .build(),
                );
            }
            // from_env already requires the password; this guards hand-built configs
            (Some(_), None) => bail!("Admin user configured without a password"),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            uri: DEFAULT_MONGO_URI.to_string(),
            admin_user: None,
            admin_password: None,
            auth_source: "admin".to_string(),
            connect_timeout: Duration::from_secs(3),
        }
    }

    async fn parsed() -> ClientOptions {
        ClientOptions::parse(DEFAULT_MONGO_URI).await.unwrap()
    }

    #[tokio::test]
    async fn test_apply_without_admin_leaves_credential_unset() {
        let mut options = parsed().await;
        config().apply(&mut options).unwrap();
        assert!(options.credential.is_none());
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_apply_sets_admin_credential() {
        let mut options = parsed().await;
        let cfg = ConnectionConfig {
            admin_user: Some("root".to_string()),
            admin_password: Some("example".to_string()),
            ..config()
        };
        cfg.apply(&mut options).unwrap();

        let credential = options.credential.unwrap();
        assert_eq!(credential.username.as_deref(), Some("root"));
        assert_eq!(credential.source.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_apply_rejects_user_without_password() {
        let mut options = parsed().await;
        let cfg = ConnectionConfig {
            admin_user: Some("root".to_string()),
            ..config()
        };
        assert!(cfg.apply(&mut options).is_err());
    }

    #[tokio::test]
    async fn test_client_options_parses_uri() {
        let options = config().client_options("unifi-mongo-init").await.unwrap();
        assert_eq!(options.app_name.as_deref(), Some("unifi-mongo-init"));
        assert_eq!(options.hosts.len(), 1);
    }
}
