//! Registration request/response bodies.
//!
//! `POST {base}/new-user` with [`RegisterRequest`]; the server answers with a
//! [`RegisterResponse`] discriminated by `status`.

use serde::{Deserialize, Serialize};

use crate::User;

/// Body of the registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Requested nickname.
    pub name: String,
}

/// Body of the registration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RegisterResponse {
    /// Nickname accepted.
    Ok {
        /// The newly registered user.
        user: User,
    },
    /// Nickname rejected.
    Error {
        /// Server explanation, if any.
        #[serde(default)]
        message: Option<String>,
    },
}
