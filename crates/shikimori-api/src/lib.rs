//! Typed client for the Shikimori REST API
//!
//! Every endpoint method is a thin path template over one shared transport
//! (`Rest`): the method joins its path onto the version root, merges its
//! required fields into the query or body, and makes exactly one HTTP call.
//! The transport attaches `Authorization: Bearer <token>` and
//! `User-Agent: <app name>` to every request and turns status codes into
//! `Error::Request(..)` values.
//!
//! ```no_run
//! # async fn run() -> shikimori_api::Result<()> {
//! use shikimori_api::{Client, Query};
//!
//! let client = Client::builder()
//!     .app_name("My App")
//!     .access_token("token")
//!     .build()?;
//! let anime = client.v1().anime(1, ()).await?;
//! let page = client.v1().animes(Query::from([("page", 1), ("limit", 10)])).await?;
//! # let _ = (anime, page);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod params;
mod payload;
pub mod rest;
pub mod uri;
pub mod v1;
pub mod v2;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{Client, ClientBuilder, DEFAULT_SITE_URL};
pub use error::{Error, RequestError, Result};
pub use params::{Body, Form, FormValue, Headers, Query, RequestOptions, Upload};
pub use rest::{Credentials, ProxyConfig, Rest};
pub use v1::{FavoriteKind, V1};
pub use v2::V2;
