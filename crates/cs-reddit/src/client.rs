//! Reddit implementation of the comment API

use crate::auth::AccessToken;
use crate::endpoints::Endpoints;
use crate::listing::decode_page;
use async_trait::async_trait;
use cs_core::error::{Result, ScrubError};
use cs_core::types::Fullname;
use cs_core::{CommentApi, EditOutcome, Page};
use reqwest::header::RETRY_AFTER;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker key present in a successful `editusertext` response
const EDIT_SUCCESS_MARKER: &str = "jquery";

/// Build the shared HTTP client; the platform rejects requests without a
/// descriptive user agent
pub fn build_http_client(user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ScrubError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Authenticated client for one account
pub struct RedditClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    username: String,
    token: AccessToken,
}

impl RedditClient {
    pub fn new(
        http: reqwest::Client,
        endpoints: Endpoints,
        username: impl Into<String>,
        token: AccessToken,
    ) -> Self {
        Self {
            http,
            endpoints,
            username: username.into(),
            token,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    async fn post_form(
        &self,
        endpoint: &'static str,
        url: reqwest::Url,
        form: &[(&str, &str)],
    ) -> Result<Response> {
        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.secret())
            .form(form)
            .send()
            .await
            .map_err(|e| transport(endpoint, e))?;
        check_status(endpoint, response)
    }
}

#[async_trait]
impl CommentApi for RedditClient {
    async fn fetch_page(&self, after: Option<&str>) -> Result<Page> {
        let url = self.endpoints.listing(&self.username, after);
        debug!(url = %url, "GET listing");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport("listing", e))?;
        let body = check_status("listing", response)?
            .bytes()
            .await
            .map_err(|e| transport("listing", e))?;

        decode_page("listing", &body)
    }

    async fn edit(&self, fullname: &Fullname, text: &str) -> Result<EditOutcome> {
        let response = self
            .post_form(
                "edit",
                self.endpoints.edit(),
                &[("thing_id", fullname.as_str()), ("text", text)],
            )
            .await?;
        let body = response.bytes().await.map_err(|e| transport("edit", e))?;
        let value: Value = serde_json::from_slice(&body).map_err(|e| ScrubError::Decode {
            endpoint: "edit".to_string(),
            message: e.to_string(),
        })?;

        if value.get(EDIT_SUCCESS_MARKER).is_some() {
            Ok(EditOutcome::Edited)
        } else {
            Ok(EditOutcome::Rejected(value.to_string()))
        }
    }

    async fn delete(&self, fullname: &Fullname) -> Result<()> {
        self.post_form("delete", self.endpoints.delete(), &[("id", fullname.as_str())])
            .await?;
        Ok(())
    }
}

fn transport(endpoint: &str, err: reqwest::Error) -> ScrubError {
    ScrubError::Http {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    }
}

fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(ScrubError::RateLimited {
            endpoint: endpoint.to_string(),
            retry_after,
        });
    }
    if !status.is_success() {
        return Err(ScrubError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}
