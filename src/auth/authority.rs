//! Tenant authority and token endpoint derivation.
use crate::auth::AuthError;
use core::fmt;
use oauth2::{Scope, TokenUrl};
use url::Url;

/// Host of the Microsoft identity platform.
pub const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// The only scope ever requested: default permissions on Microsoft Graph.
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Path of the v2 token endpoint, relative to the authority.
const TOKEN_PATH: &str = "oauth2/v2.0/token";

/// The scope set sent with every token request.
pub fn default_scopes() -> Vec<Scope> {
    vec![Scope::new(DEFAULT_SCOPE.to_owned())]
}

/// The identity-provider URL for a single tenant, e.g.
/// `https://login.microsoftonline.com/<tenant>`.
///
/// The tenant always occupies exactly one path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority(Url);

impl Authority {
    /// Derive the authority for a tenant on [`AUTHORITY_HOST`].
    pub fn for_tenant(tenant_id: &str) -> Result<Self, AuthError> {
        Self::with_host(AUTHORITY_HOST, tenant_id)
    }

    /// Derive the authority for a tenant on an arbitrary host. Trailing
    /// slashes on the host are ignored.
    pub fn with_host(host: &str, tenant_id: &str) -> Result<Self, AuthError> {
        let authority = format!("{}/{}", host.trim_end_matches('/'), tenant_id);

        let url = Url::parse(&authority).map_err(|e| AuthError::MalformedAuthority {
            authority: authority.clone(),
            source: Some(e),
        })?;

        // Reject tenants that the parser split, escaped, or normalized away.
        let single_segment = url
            .path_segments()
            .and_then(|segments| segments.last())
            .is_some_and(|last| !last.is_empty() && last == tenant_id)
            && url.path() == format!("/{tenant_id}")
            && url.query().is_none()
            && url.fragment().is_none();

        if !single_segment {
            return Err(AuthError::MalformedAuthority {
                authority,
                source: None,
            });
        }

        Ok(Self(url))
    }

    /// The authority as a string, without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The v2 token endpoint for this authority.
    pub fn token_url(&self) -> Result<TokenUrl, AuthError> {
        let endpoint = format!("{}/{}", self.as_str(), TOKEN_PATH);
        TokenUrl::new(endpoint.clone()).map_err(|e| AuthError::MalformedAuthority {
            authority: endpoint,
            source: Some(e),
        })
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
