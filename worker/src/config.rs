use std::env;

/// The environment variable holding the address to listen at.
pub const ADDR_VAR: &str = "SAMPLES_TCP_URL";

/// The address used when `SAMPLES_TCP_URL` is not set, every interface on port 6969.
pub const DEFAULT_ADDR: &str = "*:6969";

/// Immutable settings for a worker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    addr: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDR)
    }
}

impl WorkerConfig {
    /// Creates a new worker configuration.
    ///
    /// # Args
    /// * `addr` - The `host:port` to listen at, optionally prefixed by `tcp://`.
    ///            A `*` host stands for every interface.
    ///
    /// # Returns
    /// A `WorkerConfig` instance.
    pub fn new(addr: &str) -> Self {
        let addr = addr.strip_prefix("tcp://").unwrap_or(addr);
        let addr = match addr.strip_prefix("*:") {
            Some(port) => format!("0.0.0.0:{port}"),
            None => addr.to_string(),
        };

        Self { addr }
    }

    /// Reads the configuration from the environment, falling back to `DEFAULT_ADDR`.
    pub fn from_env() -> Self {
        match env::var(ADDR_VAR) {
            Ok(addr) => Self::new(&addr),
            Err(_) => Self::default(),
        }
    }

    /// Returns the address to listen at, ready to be bound.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}
