//! Page title extraction
//!
//! Reaction events carry a link; the task title is the linked page's
//! `<title>`. Extraction is a collaborator behind [`TitleExtractor`] so the
//! reaction handler can be tested with a stub.

use crate::error::{IntakeError, IntakeResult};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolves a URL to a page title
#[async_trait]
pub trait TitleExtractor: Send + Sync {
    /// Fetch `url` and return its trimmed title, or `TitleUnavailable`
    async fn extract(&self, url: &str) -> IntakeResult<String>;
}

/// Fetches pages over HTTP and reads their first `<title>` element
#[derive(Debug, Clone)]
pub struct HttpTitleExtractor {
    client: Client,
}

impl HttpTitleExtractor {
    pub fn new(timeout: Duration) -> IntakeResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IntakeError::transport(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TitleExtractor for HttpTitleExtractor {
    async fn extract(&self, url: &str) -> IntakeResult<String> {
        let target = url.trim();
        let parsed = parse_page_url(target)?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| IntakeError::title_unavailable(target, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::title_unavailable(
                target,
                format!("page answered with status {status}"),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| IntakeError::title_unavailable(target, e.to_string()))?;

        let title = find_title(&html)
            .ok_or_else(|| IntakeError::title_unavailable(target, "page has no title"))?;
        debug!(url = target, title = %title, "Extracted page title");
        Ok(title)
    }
}

/// Accept only absolute http(s) URLs
fn parse_page_url(raw: &str) -> IntakeResult<Url> {
    let url = Url::parse(raw).map_err(|e| IntakeError::title_unavailable(raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(IntakeError::title_unavailable(
            raw,
            format!("unsupported scheme {other}"),
        )),
    }
}

static HEAD_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("head > title").expect("head title selector is valid"));

static ANY_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector is valid"));

/// Text of the document's `<title>`, decoded and whitespace-collapsed (pure function)
///
/// The head title wins; a stray `<title>` in the body is used only when the
/// head has none. Returns `None` when there is no title or it is blank.
pub fn find_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let element = document
        .select(&HEAD_TITLE)
        .next()
        .or_else(|| document.select(&ANY_TITLE).next())?;

    let text = element.text().collect::<String>();
    let title = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}
