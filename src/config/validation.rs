//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, addresses non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first

use crate::config::schema::BalancerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBindAddress,
    BadProbePath(String),
    ZeroInterval(&'static str),
    BadMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyBindAddress => write!(f, "listener.bind_address is empty"),
            ValidationError::BadProbePath(p) => {
                write!(f, "health.probe_path {:?} must start with '/'", p)
            }
            ValidationError::ZeroInterval(which) => {
                write!(f, "health.{} must be greater than zero", which)
            }
            ValidationError::BadMetricsAddress(a) => {
                write!(f, "observability.metrics_address {:?} is not a socket address", a)
            }
        }
    }
}

/// Validate a loaded configuration, accumulating every error found.
pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if !config.health.probe_path.starts_with('/') {
        errors.push(ValidationError::BadProbePath(config.health.probe_path.clone()));
    }
    if config.health.fast_interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval("fast_interval_secs"));
    }
    if config.health.slow_interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval("slow_interval_secs"));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::BadMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
