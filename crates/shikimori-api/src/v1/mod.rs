//! First-generation API (`/api/`)
//!
//! `V1` is a single facade; its methods are spread over files by resource
//! family. Each method joins its path onto the `/api/` root and makes one
//! transport call.

mod catalog;
mod community;
mod library;
mod reference;
mod social;

pub use community::TOPIC_TYPES;
pub use library::FavoriteKind;

use url::Url;

use crate::error::Result;
use crate::rest::Rest;
use crate::uri;

/// Endpoint methods of API v1.
#[derive(Debug, Clone)]
pub struct V1 {
    rest: Rest,
    base_url: Url,
}

impl V1 {
    pub fn new(base_url: Url, rest: Rest) -> Self {
        Self { rest, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn rest(&self) -> &Rest {
        &self.rest
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        uri::join(&self.base_url, segments)
    }
}
