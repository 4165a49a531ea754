use std::{env::VarError, fmt::Display, str::FromStr};

/// Details about an environment variable. This is used to generate
/// documentation for the environment variables and by the [`FromEnv`] trait to
/// check if necessary environment variables are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvItemInfo {
    /// The environment variable name.
    pub var: &'static str,
    /// A description of the environment variable function in the CFG.
    pub description: &'static str,
    /// Whether the environment variable is optional or not.
    pub optional: bool,
}

/// Error type for loading from the environment. See the [`FromEnv`] trait for
/// more information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FromEnvErr {
    /// The environment variable is missing.
    #[error("Error reading variable {0}: {1}")]
    EnvError(String, VarError),
    /// The environment variable is empty.
    #[error("Environment variable {0} is empty")]
    Empty(String),
    /// The environment variable is present, but the value could not be parsed.
    #[error("Failed to parse environment variable {0}: {1}")]
    ParseError(String, String),
}

impl FromEnvErr {
    /// Missing env var.
    pub fn env_err(var: &str, e: VarError) -> Self {
        Self::EnvError(var.to_string(), e)
    }

    /// Empty env var.
    pub fn empty(var: &str) -> Self {
        Self::Empty(var.to_string())
    }

    /// Error while parsing.
    pub fn parse_error(var: &str, err: impl Display) -> Self {
        Self::ParseError(var.to_string(), err.to_string())
    }

    /// True if the variable was absent or empty. A value that is present but
    /// not unicode, or that fails to parse, is not missing.
    pub const fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::EnvError(_, VarError::NotPresent) | Self::Empty(_)
        )
    }
}

/// Convenience function for parsing a value from the environment, if present
/// and non-empty.
pub fn parse_env_if_present<T>(env_var: &str) -> Result<T, FromEnvErr>
where
    T: FromStr,
    T::Err: Display,
{
    let s = std::env::var(env_var).map_err(|e| FromEnvErr::env_err(env_var, e))?;

    if s.is_empty() {
        Err(FromEnvErr::empty(env_var))
    } else {
        s.parse().map_err(|e| FromEnvErr::parse_error(env_var, e))
    }
}

/// Trait for loading from the environment.
///
/// This trait is for structs or other complex objects, that need to be loaded
/// from the environment. It expects that
///
/// - The struct is [`Sized`] and `'static`.
/// - The struct elements can be parsed from strings.
/// - Struct elements are at fixed env vars, known by the type at compile time.
///
/// As such, unless the env is modified, these are essentially static runtime
/// values.
pub trait FromEnv: core::fmt::Debug + Sized + 'static {
    /// Get the environment variable names for this type.
    ///
    /// ## Note
    ///
    /// This MUST include the environment variable names for all fields in the
    /// struct, including optional vars.
    fn inventory() -> Vec<&'static EnvItemInfo>;

    /// Get a list of missing environment variables.
    ///
    /// This will check all environment variables in the inventory, and return
    /// a list of those that are non-optional and missing or empty. This is
    /// useful for reporting missing environment variables.
    fn check_inventory() -> Result<(), Vec<&'static EnvItemInfo>> {
        let missing: Vec<_> = Self::inventory()
            .into_iter()
            .filter(|item| !item.optional)
            .filter(|item| match std::env::var(item.var) {
                Ok(s) => s.is_empty(),
                Err(VarError::NotPresent) => true,
                Err(VarError::NotUnicode(_)) => false,
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// Load from the environment.
    fn from_env() -> Result<Self, FromEnvErr>;
}

/// Trait for loading primitives from the environment. These are simple types
/// that should correspond to a single environment variable. It has been
/// implemented for [`u64`], [`String`], [`bool`], and
/// [`std::time::Duration`].
pub trait FromEnvVar: core::fmt::Debug + Sized + 'static {
    /// Load the primitive from the environment at the given variable.
    fn from_env_var(env_var: &str) -> Result<Self, FromEnvErr>;
}

impl<T> FromEnvVar for Option<T>
where
    T: FromEnvVar,
{
    fn from_env_var(env_var: &str) -> Result<Self, FromEnvErr> {
        match std::env::var(env_var) {
            Ok(s) if s.is_empty() => Ok(None),
            Ok(_) => T::from_env_var(env_var).map(Some),
            Err(_) => Ok(None),
        }
    }
}

impl FromEnvVar for String {
    fn from_env_var(env_var: &str) -> Result<Self, FromEnvErr> {
        std::env::var(env_var).map_err(|e| FromEnvErr::env_err(env_var, e))
    }
}

/// Durations are read as a whole number of milliseconds.
impl FromEnvVar for std::time::Duration {
    fn from_env_var(env_var: &str) -> Result<Self, FromEnvErr> {
        u64::from_env_var(env_var).map(Self::from_millis)
    }
}

impl FromEnvVar for u64 {
    fn from_env_var(env_var: &str) -> Result<Self, FromEnvErr> {
        parse_env_if_present(env_var)
    }
}

/// Any non-empty value is `true`.
impl FromEnvVar for bool {
    fn from_env_var(env_var: &str) -> Result<Self, FromEnvErr> {
        let s: String = std::env::var(env_var).map_err(|e| FromEnvErr::env_err(env_var, e))?;
        Ok(!s.is_empty())
    }
}
