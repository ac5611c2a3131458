//! Failure taxonomy for the bootstrap
//!
//! Server command failures are classified by their numeric code so callers
//! can tell "already provisioned" apart from "not allowed" or "unreachable".

use mongodb::error::{Error as MongoError, ErrorKind};
use thiserror::Error;

/// `Unauthorized`
const CODE_UNAUTHORIZED: i32 = 13;
/// `AuthenticationFailed`
const CODE_AUTHENTICATION_FAILED: i32 = 18;
/// `createUser` on an existing user
const CODE_USER_EXISTS: i32 = 51003;
/// `BadValue`, `FailedToParse`, `RoleNotFound`, `InvalidOptions`
const CODES_MALFORMED: [i32; 4] = [2, 9, 31, 72];

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("cannot reach or authenticate to MongoDB: {message}")]
    Connection { message: String },

    #[error("not allowed to create {principal}: {message}")]
    PermissionDenied { principal: String, message: String },

    #[error("user {principal} already exists")]
    UserAlreadyExists { principal: String },

    #[error("invalid request for {principal}: {message}")]
    MalformedRequest { principal: String, message: String },

    #[error("creating {principal} failed ({code_name}, code {code}): {message}")]
    Server {
        principal: String,
        code: i32,
        code_name: String,
        message: String,
    },
}

impl BootstrapError {
    /// Classify a failed server command by its error code.
    pub fn from_command(principal: &str, code: i32, code_name: &str, message: &str) -> Self {
        let principal = principal.to_string();
        let message = message.to_string();
        match code {
            CODE_USER_EXISTS => Self::UserAlreadyExists { principal },
            // An unauthenticated session gets the same code as an
            // authenticated one without privilege.
            CODE_UNAUTHORIZED if message.contains("requires authentication") => {
                Self::Connection { message }
            }
            CODE_UNAUTHORIZED => Self::PermissionDenied { principal, message },
            CODE_AUTHENTICATION_FAILED => Self::Connection { message },
            c if CODES_MALFORMED.contains(&c) => Self::MalformedRequest { principal, message },
            _ => Self::Server {
                principal,
                code,
                code_name: code_name.to_string(),
                message,
            },
        }
    }

    /// Classify a driver error raised while working on `principal`.
    pub fn from_driver(principal: &str, err: MongoError) -> Self {
        match *err.kind {
            ErrorKind::Command(ref cmd) => {
                Self::from_command(principal, cmd.code, &cmd.code_name, &cmd.message)
            }
            ErrorKind::Authentication { .. }
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => Self::Connection {
                message: err.to_string(),
            },
            ErrorKind::InvalidArgument { .. } | ErrorKind::BsonSerialization(_) => {
                Self::MalformedRequest {
                    principal: principal.to_string(),
                    message: err.to_string(),
                }
            }
            _ => Self::Server {
                principal: principal.to_string(),
                code: -1,
                code_name: "DriverError".to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "connection",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::UserAlreadyExists { .. } => "user_already_exists",
            Self::MalformedRequest { .. } => "malformed_request",
            Self::Server { .. } => "server",
        }
    }
}
