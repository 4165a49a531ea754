/// Utilities for loading config from the environment.
pub mod from_env;

/// Tracing setup.
pub mod tracing;
