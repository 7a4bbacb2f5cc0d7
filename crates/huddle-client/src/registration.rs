//! Nickname registration over HTTP.

use huddle_core::RegistrationError;
use huddle_proto::{RegisterRequest, RegisterResponse, User};

/// Path of the registration endpoint, relative to the API base URL.
pub const REGISTER_PATH: &str = "/new-user";

/// Registers nicknames with `POST {base}/new-user`.
#[derive(Debug, Clone)]
pub struct HttpRegistrar {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpRegistrar {
    /// Create a registrar for the API at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a registrar that shares an existing HTTP client.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        let endpoint = format!("{}{REGISTER_PATH}", base_url.trim_end_matches('/'));
        Self { endpoint, http }
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Register `name`.
    ///
    /// Succeeds only for a 2xx response whose body has `status == "ok"`.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Transport`] if no response was received
    /// - [`RegistrationError::Rejected`] if the server refused, with its
    ///   message when it sent one
    /// - [`RegistrationError::InvalidResponse`] if the body is not a
    ///   registration response
    pub async fn register(&self, name: &str) -> Result<User, RegistrationError> {
        let request = RegisterRequest { name: name.to_owned() };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RegistrationError::Transport(e.to_string()))?;

        let parsed: RegisterResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(%status, "unparseable registration body: {e}");
            RegistrationError::InvalidResponse(e.to_string())
        })?;

        match parsed {
            RegisterResponse::Ok { user } if status.is_success() => Ok(user),
            RegisterResponse::Ok { .. } => {
                tracing::warn!(%status, "ok body with error status");
                Err(RegistrationError::Rejected { message: None })
            },
            RegisterResponse::Error { message } => Err(RegistrationError::Rejected { message }),
        }
    }
}
