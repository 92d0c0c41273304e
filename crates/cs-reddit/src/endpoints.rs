//! Endpoint URLs

use cs_core::config::EndpointsConfig;
use cs_core::error::{Result, ScrubError};
use reqwest::Url;

/// Base URLs for the public and OAuth hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    www: Url,
    oauth: Url,
}

impl Endpoints {
    /// Create endpoints from base URLs
    pub fn new(www: &str, oauth: &str) -> Result<Self> {
        Ok(Self {
            www: parse_base(www)?,
            oauth: parse_base(oauth)?,
        })
    }

    /// Endpoints from the `[endpoints]` config section
    pub fn from_config(config: &EndpointsConfig) -> Result<Self> {
        Self::new(&config.www, &config.oauth)
    }

    /// `GET /user/{username}/comments.json[?after=..]`
    pub fn listing(&self, username: &str, after: Option<&str>) -> Url {
        let mut url = join(&self.www, &["user", username, "comments.json"]);
        if let Some(after) = after.filter(|a| !a.is_empty()) {
            url.query_pairs_mut().append_pair("after", after);
        }
        url
    }

    /// `POST /api/v1/access_token`
    pub fn access_token(&self) -> Url {
        join(&self.www, &["api", "v1", "access_token"])
    }

    /// `POST /api/editusertext?raw_json=1`
    pub fn edit(&self) -> Url {
        let mut url = join(&self.oauth, &["api", "editusertext"]);
        url.query_pairs_mut().append_pair("raw_json", "1");
        url
    }

    /// `POST /api/del`
    pub fn delete(&self) -> Url {
        join(&self.oauth, &["api", "del"])
    }
}

fn parse_base(base: &str) -> Result<Url> {
    let url = Url::parse(base)
        .map_err(|e| ScrubError::Config(format!("invalid endpoint URL '{}': {}", base, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ScrubError::Config(format!(
            "endpoint URL '{}' must be an http(s) base URL",
            base
        )));
    }
    Ok(url)
}

fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
