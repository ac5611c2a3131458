//! User administration against a MongoDB server

use crate::error::BootstrapError;
use crate::plan::UserCredential;
use mongodb::bson::{doc, to_bson, Document};
use mongodb::Client;
use std::future::Future;
use tracing::debug;

/// The one administrative operation the bootstrap needs.
pub trait UserAdmin {
    /// Create `credential.username` in `credential.database`.
    ///
    /// Must fail with [`BootstrapError::UserAlreadyExists`] rather than
    /// update an existing user.
    fn create_user(
        &self,
        credential: &UserCredential,
    ) -> impl Future<Output = Result<(), BootstrapError>> + Send;
}

/// [`UserAdmin`] backed by the official driver
pub struct MongoUserAdmin {
    client: Client,
}

impl MongoUserAdmin {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Round-trip to the server so connection and auth problems show up
    /// before any database is touched.
    pub async fn ping(&self) -> Result<(), BootstrapError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| BootstrapError::from_driver("admin", e))?;
        Ok(())
    }
}

impl UserAdmin for MongoUserAdmin {
    async fn create_user(&self, credential: &UserCredential) -> Result<(), BootstrapError> {
        let principal = credential.principal();
        let command = create_user_command(credential)?;

        debug!(principal = %principal, "Running createUser");

        self.client
            .database(&credential.database)
            .run_command(command)
            .await
            .map_err(|e| BootstrapError::from_driver(&principal, e))?;
        Ok(())
    }
}

/// Build the `createUser` command document for a credential.
pub fn create_user_command(credential: &UserCredential) -> Result<Document, BootstrapError> {
    let roles = to_bson(&credential.roles).map_err(|e| BootstrapError::MalformedRequest {
        principal: credential.principal(),
        message: e.to_string(),
    })?;

    Ok(doc! {
        "createUser": credential.username.as_str(),
        "pwd": credential.password.as_str(),
        "roles": roles,
    })
}
