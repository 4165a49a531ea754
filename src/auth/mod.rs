pub mod authority;
pub use authority::{Authority, AUTHORITY_HOST, DEFAULT_SCOPE};

pub(crate) mod config;
pub use config::{Credentials, FetcherConfig, DEFAULT_REQUEST_TIMEOUT};

pub(crate) mod error;
pub use error::{source_chain, AuthError, BoxError, MISSING_CONFIG_MESSAGE};

pub(crate) mod fetcher;
pub use fetcher::{fetch_from_env, report, Outcome, TokenFetcher};

pub mod provider;
pub use provider::{OAuthProvider, Token, TokenProvider, TokenRequest};
