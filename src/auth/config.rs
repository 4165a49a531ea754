use crate::{
    auth::AuthError,
    utils::from_env::{EnvItemInfo, FromEnv, FromEnvErr, FromEnvVar},
};
use oauth2::{ClientId, ClientSecret};
use std::time::Duration;

const CLIENT_ID: &str = "CLIENT_ID_FWV";
const CLIENT_SECRET: &str = "CLIENT_SECRET_FWV";
const TENANT_ID: &str = "TENANT_ID";
const TOKEN_REQUEST_TIMEOUT_MS: &str = "TOKEN_REQUEST_TIMEOUT_MS";

/// Default bound on the token request, used when
/// `TOKEN_REQUEST_TIMEOUT_MS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application credentials registered with the identity provider.
///
/// All three values are guaranteed non-empty. The secret is redacted in the
/// [`Debug`] output.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: ClientId,
    client_secret: ClientSecret,
    tenant_id: String,
}

impl Credentials {
    /// Validate and build a set of credentials. Fails with
    /// [`FromEnvErr::Empty`] naming the first empty value, checked in the
    /// order client id, client secret, tenant id.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Result<Self, FromEnvErr> {
        let client_id = non_empty(CLIENT_ID, client_id.into())?;
        let client_secret = non_empty(CLIENT_SECRET, client_secret.into())?;
        let tenant_id = non_empty(TENANT_ID, tenant_id.into())?;

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            tenant_id,
        })
    }

    /// The application (client) ID.
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// The client secret.
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// The tenant (directory) ID.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

fn non_empty(var: &str, value: String) -> Result<String, FromEnvErr> {
    if value.is_empty() {
        Err(FromEnvErr::empty(var))
    } else {
        Ok(value)
    }
}

impl FromEnv for Credentials {
    fn inventory() -> Vec<&'static EnvItemInfo> {
        vec![
            &EnvItemInfo {
                var: CLIENT_ID,
                description: "Application (client) ID registered with the identity provider",
                optional: false,
            },
            &EnvItemInfo {
                var: CLIENT_SECRET,
                description: "Client secret for the application",
                optional: false,
            },
            &EnvItemInfo {
                var: TENANT_ID,
                description: "Tenant (directory) ID, used to build the authority URL",
                optional: false,
            },
        ]
    }

    fn from_env() -> Result<Self, FromEnvErr> {
        let client_id = String::from_env_var(CLIENT_ID)?;
        let client_secret = String::from_env_var(CLIENT_SECRET)?;
        let tenant_id = String::from_env_var(TENANT_ID)?;

        Self::new(client_id, client_secret, tenant_id)
    }
}

/// Configuration for a single token fetch. Loaded once at process start and
/// passed to the [`TokenFetcher`].
///
/// [`TokenFetcher`]: crate::auth::TokenFetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Application credentials.
    pub credentials: Credentials,
    /// Upper bound on the token request, including connect time.
    pub request_timeout: Duration,
}

impl FetcherConfig {
    /// Create a config with the default request timeout.
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load from the environment, classifying failures as [`AuthError`]
    /// configuration errors.
    pub fn load() -> Result<Self, AuthError> {
        Self::from_env().map_err(AuthError::config)
    }
}

impl FromEnv for FetcherConfig {
    fn inventory() -> Vec<&'static EnvItemInfo> {
        let mut items = Credentials::inventory();
        items.push(&EnvItemInfo {
            var: TOKEN_REQUEST_TIMEOUT_MS,
            description: "Token request timeout in milliseconds. Defaults to 30000.",
            optional: true,
        });
        items
    }

    fn from_env() -> Result<Self, FromEnvErr> {
        let credentials = Credentials::from_env()?;
        let request_timeout = Option::<Duration>::from_env_var(TOKEN_REQUEST_TIMEOUT_MS)?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            credentials,
            request_timeout,
        })
    }
}
