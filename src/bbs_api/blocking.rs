//! Blocking flavor of [`BbsClient`](super::BbsClient). Builds requests and
//! reads responses exactly like the async client; only the transport differs.
//!
//! Like `reqwest::blocking`, this must not be used from inside an async
//! runtime.

use log::debug;
use reqwest::blocking::Client;
use url::Url;

use super::{
    default_headers, handle_response, parse_base_url, Query, QueryRequest, Result,
    DEFAULT_API_BASE,
};

#[derive(Debug, Clone)]
pub struct BbsClient {
    client: Client,
    base_url: Url,
}

impl BbsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .default_headers(default_headers())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn image_urls(&self, query: &Query, page_size: u32) -> Result<Vec<String>> {
        let request = query.request(page_size)?;
        self.execute(&request)
    }

    pub fn execute(&self, request: &QueryRequest) -> Result<Vec<String>> {
        let url = request.url(&self.base_url)?;
        debug!("GET {} {:?}", url, request.params);

        let response = self.client.get(url).query(&request.params).send()?;
        let status = response.status();
        let body = response.text()?;

        handle_response(status, body, request.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::bbs_api::{self, BbsApiError};
    use crate::catalog::{ForumCategory, LatestSort};

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn latest_body() -> serde_json::Value {
        json!({
            "retcode": 0,
            "data": {
                "list": [
                    {"post": {"images": ["https://img.example/1.png"]}},
                    {"post": {"images": []}},
                    {"post": {"images": ["https://img.example/2.png", "https://img.example/1.png"]}},
                ]
            }
        })
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blocking_and_async_clients_agree() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getForumPostList"))
            .and(query_param("sort_type", "1"))
            .and(query_param("is_hot", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(latest_body()))
            .expect(2)
            .mount(&server)
            .await;

        let query = Query::Latest {
            forum: ForumCategory::TearsOfThemisPic,
            sort: LatestSort::LatestComment,
        };

        let uri = server.uri();
        let blocking_urls = tokio::task::spawn_blocking(move || {
            BbsClient::with_base_url(&uri)
                .unwrap()
                .image_urls(&query, 20)
                .unwrap()
        })
        .await
        .unwrap();

        let async_urls = bbs_api::BbsClient::with_base_url(&server.uri())
            .unwrap()
            .image_urls(&query, 20)
            .await
            .unwrap();

        assert_eq!(blocking_urls, async_urls);
        assert_eq!(
            blocking_urls,
            [
                "https://img.example/1.png",
                "https://img.example/2.png",
                "https://img.example/1.png"
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn not_found_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            BbsClient::with_base_url(&uri).unwrap().image_urls(
                &Query::Hot {
                    forum: ForumCategory::Honkai3rdPic,
                },
                20,
            )
        })
        .await
        .unwrap();

        match result {
            Err(BbsApiError::ResponseError { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected response error, got {:?}", other),
        }
    }
}
