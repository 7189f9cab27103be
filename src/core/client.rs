use crate::core::facade::{HttpFacade, Page};
use crate::core::query::{build_query, Pagination};
use crate::error::{Error, Result};
use async_trait::async_trait;
use colored_json::to_colored_json_auto;
use reqwest::{header, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use url::Url;
use super::config::Config;

const NEXT_PAGE_HEADER: &str = "x-next-page";

pub struct Client<'a> {
    http_client: reqwest::Client,
    api_root: Url,
    config: &'a Config,
}

impl<'a> Client<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()?;

        Ok(Self {
            http_client,
            api_root: config.api_root()?,
            config,
        })
    }

    fn default_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        headers
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        self.api_root
            .join(path.trim_start_matches('/'))
            .map_err(Error::from)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.config.auth_token())
            .send()
            .await?;

        check_status(response).await
    }

    async fn send_json<T>(&self, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.send(request).await?.bytes().await?;

        serde_json::from_slice(&bytes).map_err(Error::from)
    }
}

#[async_trait]
impl<'a> HttpFacade for Client<'a> {
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let u = self.url(path)?;

        info!("GET {u}");

        self.send_json(self.http_client.get(u)).await
    }

    async fn get_page<T>(&self, path: &str, page: Pagination) -> Result<Page<T>>
    where
        T: DeserializeOwned + Send,
    {
        let u = self.url(&build_query(path, &page))?;

        info!("GET {u}");

        let response = self.send(self.http_client.get(u)).await?;
        let next_page = next_page(response.headers());
        let bytes = response.bytes().await?;

        Ok(Page {
            items: serde_json::from_slice(&bytes)?,
            next_page,
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let u = self.url(path)?;

        info!("POST {u}");
        debug!("{}", pretty_body(body));

        self.send_json(self.http_client.post(u).json(body)).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let u = self.url(path)?;

        info!("PUT {u}");
        debug!("{}", pretty_body(body));

        self.send_json(self.http_client.put(u).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let u = self.url(path)?;

        info!("DELETE {u}");

        self.send(self.http_client.delete(u)).await.map(|_| ())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;

    Err(Error::Api {
        status: status.as_u16(),
        message: api_message(status, &body),
    })
}

/// GitLab puts the reason in `message` (a string, or a map of field errors)
/// or, for auth failures, in `error`.
fn api_message(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status.canonical_reason().unwrap_or("Unknown").to_owned();
    }

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").or_else(|| v.get("error")).cloned())
        .map(|m| match m {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or_else(|| body.to_owned())
}

/// `X-Next-Page` is present but empty on the last page.
fn next_page(headers: &header::HeaderMap) -> Option<u32> {
    headers
        .get(NEXT_PAGE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

fn pretty_body<B: Serialize + ?Sized>(body: &B) -> String {
    #[cfg(windows)]
    let _enabled = colored_json::enable_ansi_support();

    serde_json::to_value(body)
        .and_then(|v| to_colored_json_auto(&v))
        .unwrap_or_else(|e| format!("<unprintable body: {e}>"))
}
