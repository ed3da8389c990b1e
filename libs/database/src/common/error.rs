/// Error type shared by the connectors and the cache layer.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Connection could not be established, even after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A cached payload could not be encoded or decoded
    #[error("Cache payload error: {0}")]
    Payload(String),
}

impl DatabaseError {
    /// True for failures of the backing service itself (as opposed to bad
    /// configuration or a corrupt payload).
    pub fn is_unavailable(&self) -> bool {
        match self {
            #[cfg(feature = "redis")]
            Self::Redis(_) => true,
            Self::ConnectionFailed(_) | Self::HealthCheckFailed(_) => true,
            Self::ConfigError(_) | Self::Payload(_) => false,
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
