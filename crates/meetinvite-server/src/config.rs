//! HTTP server configuration.

/// Configuration for the HTTP trigger surface.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Default bind address.
    pub const DEFAULT_BIND_ADDR: &'static str = "127.0.0.1:5000";

    /// Creates a config with the default bind address.
    pub fn new() -> Self {
        Self {
            bind_addr: Self::DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Sets the bind address.
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
