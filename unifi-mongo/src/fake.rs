//! In-memory stand-in for a MongoDB server's user table

use crate::admin::UserAdmin;
use crate::error::BootstrapError;
use crate::plan::{RoleGrant, UserCredential};
use std::collections::HashMap;
use std::sync::Mutex;

struct InjectedFailure {
    code: i32,
    code_name: String,
    message: String,
}

#[derive(Default)]
struct State {
    users: HashMap<(String, String), Vec<RoleGrant>>,
    attempts: Vec<String>,
    failures: HashMap<String, InjectedFailure>,
}

pub struct FakeServer {
    privileged: bool,
    reachable: bool,
    state: Mutex<State>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            privileged: true,
            reachable: true,
            state: Mutex::new(State::default()),
        }
    }

    pub fn unprivileged() -> Self {
        Self {
            privileged: false,
            ..Self::new()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Make every createUser in `database` fail with the given server error.
    pub fn fail_database(&self, database: &str, code: i32, code_name: &str, message: &str) {
        self.state.lock().unwrap().failures.insert(
            database.to_string(),
            InjectedFailure {
                code,
                code_name: code_name.to_string(),
                message: message.to_string(),
            },
        );
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn roles_of(&self, database: &str, username: &str) -> Option<Vec<RoleGrant>> {
        self.state
            .lock()
            .unwrap()
            .users
            .get(&(database.to_string(), username.to_string()))
            .cloned()
    }

    /// Principals createUser was attempted for, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.state.lock().unwrap().attempts.clone()
    }
}

impl UserAdmin for FakeServer {
    async fn create_user(&self, credential: &UserCredential) -> Result<(), BootstrapError> {
        if !self.reachable {
            return Err(BootstrapError::Connection {
                message: "Server selection timeout: No available servers".to_string(),
            });
        }

        let principal = credential.principal();
        let mut state = self.state.lock().unwrap();
        state.attempts.push(principal.clone());

        if !self.privileged {
            return Err(BootstrapError::from_command(
                &principal,
                13,
                "Unauthorized",
                &format!("not authorized on {} to execute command", credential.database),
            ));
        }

        if let Some(f) = state.failures.get(&credential.database) {
            return Err(BootstrapError::from_command(
                &principal,
                f.code,
                &f.code_name,
                &f.message,
            ));
        }

        let key = (credential.database.clone(), credential.username.clone());
        if state.users.contains_key(&key) {
            return Err(BootstrapError::from_command(
                &principal,
                51003,
                "Location51003",
                &format!("User \"{}\" already exists", principal),
            ));
        }

        state.users.insert(key, credential.roles.clone());
        Ok(())
    }
}
