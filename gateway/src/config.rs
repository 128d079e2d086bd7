//! Gateway configuration.

/// HTTP gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Address of the ledger server to forward to.
    pub ledger_addr: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1".to_string(),
            listen_port: 8080,
            ledger_addr: "127.0.0.1:50051".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("GATEWAY_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(port) = std::env::var("GATEWAY_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Ok(addr) = std::env::var("LEDGER_SERVER_ADDR") {
            config.ledger_addr = addr;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("Listen address cannot be empty".to_string());
        }

        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if self.ledger_addr.is_empty() {
            return Err("Ledger server address cannot be empty".to_string());
        }

        Ok(())
    }

    /// The address to bind, as `addr:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.listen_port)
    }
}
