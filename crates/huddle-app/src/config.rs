//! Client configuration.

/// Default duplex connection endpoint.
pub const DEFAULT_SERVER_ADDR: &str = "ws://localhost:3000";

/// Default base URL of the registration endpoint.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket address of the chat server
    pub server_addr: String,
    /// Base URL for `POST /new-user`
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
        }
    }
}
