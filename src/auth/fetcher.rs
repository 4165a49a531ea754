use crate::{
    auth::{
        authority::AUTHORITY_HOST,
        error::source_chain,
        provider::{OAuthProvider, Token, TokenProvider, TokenRequest},
        AuthError, Authority, Credentials, FetcherConfig,
    },
    utils::from_env::FromEnv,
};
use oauth2::TokenResponse;
use std::{borrow::Cow, io::Write, process::ExitCode};
use tracing::{debug, error, info};

/// The result of a single [`TokenFetcher::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A token was acquired and written out.
    Acquired,
    /// The required configuration was missing or invalid.
    Misconfigured,
    /// Token acquisition failed.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Acquired => Self::SUCCESS,
            Outcome::Failed => Self::from(1),
            Outcome::Misconfigured => Self::from(2),
        }
    }
}

/// Acquires exactly one access token for a set of credentials.
#[derive(Debug)]
pub struct TokenFetcher<P> {
    credentials: Credentials,
    authority_host: Cow<'static, str>,
    provider: P,
}

impl<P: TokenProvider> TokenFetcher<P> {
    /// Create a fetcher against the Microsoft identity platform.
    pub fn new(credentials: Credentials, provider: P) -> Self {
        Self {
            credentials,
            authority_host: Cow::Borrowed(AUTHORITY_HOST),
            provider,
        }
    }

    /// Point the fetcher at a different authority host. Intended for local
    /// test servers.
    pub fn with_authority_host(mut self, host: impl Into<Cow<'static, str>>) -> Self {
        self.authority_host = host.into();
        self
    }

    /// Fetch a token. Makes at most one provider call, and none if the
    /// authority cannot be derived.
    #[tracing::instrument(skip_all, fields(tenant = self.credentials.tenant_id()))]
    pub async fn fetch_token(&self) -> Result<Token, AuthError> {
        let authority =
            Authority::with_host(&self.authority_host, self.credentials.tenant_id())?;
        let request = TokenRequest::new(authority, &self.credentials);

        debug!(
            authority = %request.authority(),
            client_id = request.client_id().as_str(),
            "requesting access token"
        );
        self.provider.acquire(&request).await
    }

    /// Fetch a token and report the result.
    ///
    /// On success the access token is written to `out` as a single line, and
    /// token metadata is logged at `info`. The token itself is never logged.
    /// On failure one `error` line is logged.
    pub async fn run<W: Write>(&self, out: &mut W) -> Outcome {
        let result = self.fetch_token().await;
        report(result, out)
    }
}

/// Load the [`FetcherConfig`] from the environment and fetch one token with
/// an [`OAuthProvider`], reporting to `out`.
///
/// Configuration is validated before the provider is built. If it is
/// missing or invalid, no request is made.
pub async fn fetch_from_env<W: Write>(out: &mut W) -> Outcome {
    let config = match FetcherConfig::load() {
        Ok(config) => config,
        Err(err) => {
            if let Err(missing) = FetcherConfig::check_inventory() {
                for item in missing {
                    debug!(
                        var = item.var,
                        description = item.description,
                        "missing environment variable"
                    );
                }
            }
            return report(Err(err), out);
        }
    };

    let provider = match OAuthProvider::new(config.request_timeout) {
        Ok(provider) => provider,
        Err(err) => return report(Err(err), out),
    };

    TokenFetcher::new(config.credentials, provider)
        .run(out)
        .await
}

/// Report the result of a fetch, returning the matching [`Outcome`].
///
/// Missing configuration is reported by writing the fixed configuration
/// message to `out`, rather than logging it.
pub fn report<W: Write>(result: Result<Token, AuthError>, out: &mut W) -> Outcome {
    let err = match result {
        Ok(token) => {
            if let Err(err) = writeln!(out, "{}", token.access_token().secret()) {
                error!(%err, "failed to write access token");
                return Outcome::Failed;
            }
            info!(
                token_type = ?token.token_type(),
                expires_in_secs = token.expires_in().map(|d| d.as_secs()),
                "acquired access token"
            );
            return Outcome::Acquired;
        }
        Err(err) => err,
    };

    let source_chain = source_chain(&err);
    match &err {
        AuthError::MissingConfiguration(_) => {
            if let Err(err) = writeln!(out, "{err}") {
                error!(%err, "failed to write configuration message");
            }
            debug!(%source_chain, "missing configuration");
            Outcome::Misconfigured
        }
        AuthError::InvalidConfiguration(_) => {
            error!(%err, %source_chain, "invalid configuration");
            Outcome::Misconfigured
        }
        AuthError::MalformedAuthority { authority, .. } => {
            error!(%authority, %source_chain, "malformed authority URL");
            Outcome::Failed
        }
        AuthError::Authentication(_) => {
            error!(%source_chain, "failed to acquire access token");
            Outcome::Failed
        }
    }
}
