//! Token providers: the single outbound call made by the fetcher.
use crate::auth::{authority::default_scopes, AuthError, Authority, Credentials};
use core::future::Future;
use oauth2::{
    basic::{BasicClient, BasicTokenType},
    AuthType, ClientId, ClientSecret, EmptyExtraTokenFields, Scope, StandardTokenResponse,
};
use std::time::Duration;

/// The token response returned by the identity provider.
pub type Token = StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>;

/// A client-credentials token request for one authority.
///
/// The scope set is fixed at construction and cannot be changed.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    authority: Authority,
    client_id: ClientId,
    client_secret: ClientSecret,
    scopes: Vec<Scope>,
}

impl TokenRequest {
    /// Build a request for the given authority using the credentials.
    pub fn new(authority: Authority, credentials: &Credentials) -> Self {
        Self {
            authority,
            client_id: credentials.client_id().clone(),
            client_secret: credentials.client_secret().clone(),
            scopes: default_scopes(),
        }
    }

    /// The tenant authority.
    pub const fn authority(&self) -> &Authority {
        &self.authority
    }

    /// The application (client) ID.
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// The client secret.
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// The requested scopes.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }
}

/// Something that can exchange a [`TokenRequest`] for a [`Token`].
///
/// Implementations make exactly one attempt per call.
pub trait TokenProvider {
    /// Acquire a token, resolving once the provider has responded.
    fn acquire(
        &self,
        request: &TokenRequest,
    ) -> impl Future<Output = Result<Token, AuthError>> + Send;
}

/// Provider backed by the [`oauth2`] crate over [`reqwest`].
#[derive(Debug, Clone)]
pub struct OAuthProvider {
    http: reqwest::Client,
}

impl OAuthProvider {
    /// Create a provider whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, AuthError> {
        // NB: this is MANDATORY
        // https://docs.rs/oauth2/latest/oauth2/#security-warning
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(AuthError::authentication)?;

        Ok(Self { http })
    }
}

impl TokenProvider for OAuthProvider {
    async fn acquire(&self, request: &TokenRequest) -> Result<Token, AuthError> {
        let client = BasicClient::new(request.client_id().clone())
            .set_client_secret(request.client_secret().clone())
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(request.authority().token_url()?);

        client
            .exchange_client_credentials()
            .add_scopes(request.scopes().iter().cloned())
            .request_async(&self.http)
            .await
            .map_err(AuthError::authentication)
    }
}
