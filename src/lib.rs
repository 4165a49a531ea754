//! Fetch a single OAuth2 access token from the Microsoft identity platform
//! using the client-credentials grant.
//!
//! The crate is split into
//! - [`utils::from_env`]: loading config from environment variables.
//! - [`utils::tracing`]: subscriber setup.
//! - [`auth`]: credentials, authority derivation, and the [`TokenFetcher`].
//!
//! [`TokenFetcher`]: auth::TokenFetcher
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// Client-credentials token acquisition.
pub mod auth;

/// Utilities for config and tracing.
pub mod utils;
