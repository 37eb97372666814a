//! Unit configuration.

/// Value committed by the unprotected operation regardless of its input.
pub const SENTINEL_VALUE: &str = "surprise!";

/// Deployment-time settings for a Target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetConfig {
    /// Protected value before any mutation commits.
    pub initial_value: String,
}

impl TargetConfig {
    /// Config with the given initial protected value.
    pub fn with_initial_value(initial_value: impl Into<String>) -> Self {
        Self { initial_value: initial_value.into() }
    }
}
