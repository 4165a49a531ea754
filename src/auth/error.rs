use crate::utils::from_env::FromEnvErr;
use core::error::Error;

/// Message printed when any of the required credential variables is absent.
pub const MISSING_CONFIG_MESSAGE: &str =
    "Environment variables CLIENT_ID_FWV, CLIENT_SECRET_FWV or TENANT_ID are not set.";

/// Boxed error used for failures raised by the token provider.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors that can occur while configuring or acquiring an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required credential variable is absent or empty.
    #[error("{}", MISSING_CONFIG_MESSAGE)]
    MissingConfiguration(#[source] FromEnvErr),
    /// An optional setting is present but could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[source] FromEnvErr),
    /// The authority derived from the tenant is not a valid URL.
    #[error("malformed authority URL: {authority}")]
    MalformedAuthority {
        /// The offending authority string.
        authority: String,
        /// The parse failure, if the URL failed to parse at all.
        #[source]
        source: Option<url::ParseError>,
    },
    /// Any other failure during token acquisition.
    #[error("failed to acquire access token")]
    Authentication(#[source] BoxError),
}

impl AuthError {
    /// Classify an env loading error as missing or invalid configuration.
    pub fn config(err: FromEnvErr) -> Self {
        if err.is_missing() {
            Self::MissingConfiguration(err)
        } else {
            Self::InvalidConfiguration(err)
        }
    }

    /// Wrap an arbitrary error as an authentication failure.
    pub fn authentication(err: impl Into<BoxError>) -> Self {
        Self::Authentication(err.into())
    }

    /// True for errors detected before any network activity.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingConfiguration(_) | Self::InvalidConfiguration(_)
        )
    }
}

/// Render the `source()` chain of an error, excluding the error itself.
///
/// The oauth library nests errors quite deeply, so the top-level message
/// alone rarely says what went wrong.
pub fn source_chain(err: &(dyn Error + 'static)) -> String {
    let mut current = err;
    let mut chain = Vec::new();
    while let Some(source) = current.source() {
        chain.push(source.to_string());
        current = source;
    }
    chain.join("\n\n Caused by: \n")
}
