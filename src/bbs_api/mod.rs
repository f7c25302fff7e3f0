//! Client for the image post endpoints of the miHoYo BBS web API.
//!
//! A [`Query`] describes one of the four ways the web frontend lists image
//! posts. It turns into a [`QueryRequest`] (endpoint, query string and the
//! shape of the response envelope) which either [`BbsClient`] or
//! [`blocking::BbsClient`] can execute, yielding the image URLs of every
//! returned post in response order.

pub mod blocking;
mod client;

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::catalog::{ForumCategory, GameCategory, LatestSort, RankPeriod};

pub use self::client::BbsClient;

pub const DEFAULT_API_BASE: &str = "https://bbs-api.mihoyo.com/post/wapi/";

/// Number of posts requested when the caller doesn't ask for a specific
/// amount. Applies to every query kind, rankings included.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/93.0.4577.82 Safari/537.36";
const WEB_ORIGIN: &str = "https://bbs.mihoyo.com/";

#[derive(Debug, Error)]
pub enum BbsApiError {
    #[error("BBS API HTTP error")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("BBS API returned HTTP {status} with body: {body}")]
    ResponseError { status: StatusCode, body: String },

    #[error("BBS API error {retcode}: {message}")]
    ApiError { retcode: i64, message: String },

    #[error("BBS API returned success, but had malformed JSON response: {body}")]
    BadResponseJson {
        body: String,
        source: serde_json::Error,
    },

    #[error("BBS API response is missing '{path}'")]
    MissingField { path: String },

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("invalid API base URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

pub type Result<T, E = BbsApiError> = std::result::Result<T, E>;

/// The wrapper key holding the post list in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `{"data": {"list": [...]}}`
    List,
    /// `{"data": {"posts": [...]}}`
    Posts,
}

impl EnvelopeShape {
    pub fn key(self) -> &'static str {
        match self {
            EnvelopeShape::List => "list",
            EnvelopeShape::Posts => "posts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Image ranking of a forum over a period.
    Rank {
        forum: ForumCategory,
        period: RankPeriod,
    },
    /// Posts currently marked hot.
    Hot { forum: ForumCategory },
    /// Curated ("good") posts.
    Good { forum: ForumCategory },
    /// Newest posts, by reply or by creation time.
    Latest {
        forum: ForumCategory,
        sort: LatestSort,
    },
}

impl Query {
    pub fn forum(&self) -> ForumCategory {
        match *self {
            Query::Rank { forum, .. }
            | Query::Hot { forum }
            | Query::Good { forum }
            | Query::Latest { forum, .. } => forum,
        }
    }

    pub fn game(&self) -> GameCategory {
        self.forum().game()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Query::Rank { .. } => "rank",
            Query::Hot { .. } => "hot",
            Query::Good { .. } => "good",
            Query::Latest { .. } => "latest",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Query::Rank { .. } => "getImagePostList",
            Query::Hot { .. } | Query::Latest { .. } => "getForumPostList",
            Query::Good { .. } => "forumGoodPostFullList",
        }
    }

    pub fn shape(&self) -> EnvelopeShape {
        match self {
            Query::Good { .. } => EnvelopeShape::Posts,
            _ => EnvelopeShape::List,
        }
    }

    /// Builds the request for a single page of `page_size` posts.
    pub fn request(&self, page_size: u32) -> Result<QueryRequest> {
        if page_size == 0 {
            return Err(BbsApiError::InvalidPageSize);
        }

        let forum = self.forum();
        let mut params = vec![
            ("forum_id", forum.id().to_string()),
            ("gids", forum.game().id().to_string()),
        ];

        match *self {
            Query::Rank { period, .. } => {
                params.push(("page_size", page_size.to_string()));
                params.push(("type", period.id().to_string()));
            }
            Query::Hot { .. } => {
                params.push(("is_good", false.to_string()));
                params.push(("is_hot", true.to_string()));
                params.push(("page_size", page_size.to_string()));
            }
            Query::Good { .. } => {
                params.push(("page_size", page_size.to_string()));
            }
            Query::Latest { sort, .. } => {
                params.push(("page_size", page_size.to_string()));
                params.push(("is_good", false.to_string()));
                params.push(("is_hot", false.to_string()));
                params.push(("sort_type", sort.id().to_string()));
            }
        }

        Ok(QueryRequest {
            endpoint: self.endpoint(),
            params,
            page_size,
            shape: self.shape(),
        })
    }
}

/// A fully resolved request, consumed by one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
    pub page_size: u32,
    pub shape: EnvelopeShape,
}

impl QueryRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    fn url(&self, base_url: &Url) -> Result<Url> {
        base_url
            .join(self.endpoint)
            .map_err(|source| BbsApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })
    }
}

/// Parses an API base, making sure endpoints are joined below it rather than
/// replacing its last segment.
pub(crate) fn parse_base_url(base: &str) -> Result<Url> {
    let mut normalized = base.to_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    Url::parse(&normalized).map_err(|source| BbsApiError::InvalidBaseUrl {
        url: base.to_owned(),
        source,
    })
}

/// Headers the web frontend sends. The API rejects requests that don't look
/// like they come from the forum's own origin.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::REFERER, HeaderValue::from_static(WEB_ORIGIN));
    headers.insert(header::ORIGIN, HeaderValue::from_static(WEB_ORIGIN));
    headers
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    retcode: i64,
    #[serde(default)]
    message: String,
}

/// Shared by both clients once the body has been read.
pub(crate) fn handle_response(
    status: StatusCode,
    body: String,
    shape: EnvelopeShape,
) -> Result<Vec<String>> {
    if !status.is_success() {
        return Err(BbsApiError::ResponseError { status, body });
    }

    let response: Value = match serde_json::from_str(&body) {
        Ok(response) => response,
        Err(source) => return Err(BbsApiError::BadResponseJson { body, source }),
    };

    // Errors like an unknown forum still come back as HTTP 200.
    if let Ok(api_status) = ApiStatus::deserialize(&response) {
        if api_status.retcode != 0 {
            return Err(BbsApiError::ApiError {
                retcode: api_status.retcode,
                message: api_status.message,
            });
        }
    }

    extract_image_urls(&response, shape)
}

/// Flattens the `post.images` list of every post in the envelope into one
/// list, keeping response order and duplicates.
///
/// A post without an image list fails the whole response.
pub fn extract_image_urls(response: &Value, shape: EnvelopeShape) -> Result<Vec<String>> {
    let key = shape.key();

    let posts = response
        .get("data")
        .and_then(|data| data.get(key))
        .and_then(Value::as_array)
        .ok_or_else(|| BbsApiError::MissingField {
            path: format!("data.{}", key),
        })?;

    let mut urls = Vec::new();
    for (index, entry) in posts.iter().enumerate() {
        let images = entry
            .get("post")
            .and_then(|post| post.get("images"))
            .and_then(Value::as_array)
            .ok_or_else(|| BbsApiError::MissingField {
                path: format!("data.{}[{}].post.images", key, index),
            })?;

        for (image_index, image) in images.iter().enumerate() {
            let Some(url) = image.as_str() else {
                return Err(BbsApiError::MissingField {
                    path: format!("data.{}[{}].post.images[{}]", key, index, image_index),
                });
            };

            urls.push(url.to_owned());
        }
    }

    log::trace!("extracted {} image URLs from {} posts", urls.len(), posts.len());

    Ok(urls)
}
