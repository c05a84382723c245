/*!
 * MediaWiki Action API client.
 *
 * One client serves a family of wikis (one per configured language) plus
 * Wikidata for sitelinks. Pages are fetched together with their
 * inter-language links so the equivalent-page lookup needs no extra request.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

use super::{LangLink, Page, WikiClient, linksite_for};
use crate::app_config::WikiConfig;
use crate::errors::WikiError;

/// MediaWiki client for a set of language wikis
pub struct MediaWikiClient {
    /// HTTP client for API requests
    client: Client,
    /// Site settings (endpoints, site naming, summaries)
    config: WikiConfig,
    /// Languages that may be queried
    languages: HashSet<String>,
}

/// Top-level API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    query: Option<T>,
    error: Option<ApiErrorBody>,
}

/// Error object returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

/// `query` block of a page request (formatversion=2)
#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    revisions: Vec<ApiRevision>,
    #[serde(default)]
    langlinks: Vec<ApiLangLink>,
}

#[derive(Debug, Deserialize)]
struct ApiRevision {
    slots: ApiSlots,
}

#[derive(Debug, Deserialize)]
struct ApiSlots {
    main: ApiSlot,
}

#[derive(Debug, Deserialize)]
struct ApiSlot {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiLangLink {
    lang: String,
    title: String,
}

/// `query` block of a token request
#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: Tokens,
}

#[derive(Debug, Deserialize)]
struct Tokens {
    csrftoken: String,
}

/// Response of a write action (`edit`, `wbsetsitelink`)
#[derive(Debug, Deserialize)]
struct WriteResponse {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

impl MediaWikiClient {
    /// Create a client for the given languages
    pub fn new(config: WikiConfig, languages: &[String]) -> Result<Self, WikiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WikiError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            languages: languages.iter().cloned().collect(),
        })
    }

    fn endpoint_for(&self, language: &str) -> Result<String, WikiError> {
        if !self.languages.contains(language) {
            return Err(WikiError::WikiUnavailable(language.to_string()));
        }
        Ok(self.config.api_url(language))
    }

    fn map_transport_error(error: reqwest::Error, language: &str) -> WikiError {
        if error.is_connect() || error.is_timeout() {
            WikiError::WikiUnavailable(language.to_string())
        } else {
            WikiError::RequestFailed(error.to_string())
        }
    }

    async fn csrf_token(&self, endpoint: &str, language: &str) -> Result<String, WikiError> {
        let response = self.client
            .get(endpoint)
            .query(&[("action", "query"), ("meta", "tokens"), ("type", "csrf"), ("format", "json"), ("formatversion", "2")])
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, language))?;

        let body: ApiResponse<TokenQuery> = response
            .json()
            .await
            .map_err(|e| WikiError::ParseError(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(WikiError::ApiError { code: err.code, info: err.info });
        }

        body.query
            .map(|q| q.tokens.csrftoken)
            .ok_or_else(|| WikiError::ParseError("token response without query block".to_string()))
    }

    async fn post_write(&self, endpoint: &str, language: &str, params: &[(&str, &str)]) -> Result<(), WikiError> {
        let response = self.client
            .post(endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, language))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Wiki API error ({}): {}", status, error_text);
            return Err(WikiError::RequestFailed(format!("HTTP {}: {}", status, error_text)));
        }

        let body: WriteResponse = response
            .json()
            .await
            .map_err(|e| WikiError::ParseError(e.to_string()))?;

        match body.error {
            Some(err) => Err(WikiError::ApiError { code: err.code, info: err.info }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WikiClient for MediaWikiClient {
    async fn fetch_page(&self, title: &str, language: &str) -> Result<Page, WikiError> {
        let endpoint = self.endpoint_for(language)?;
        debug!("Fetching '{}' from {}", title, endpoint);

        let response = self.client
            .get(&endpoint)
            .query(&[
                ("action", "query"),
                ("prop", "revisions|langlinks"),
                ("rvprop", "content"),
                ("rvslots", "main"),
                ("lllimit", "max"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, language))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::RequestFailed(format!("HTTP {} from {}", status, endpoint)));
        }

        let body: ApiResponse<PageQuery> = response
            .json()
            .await
            .map_err(|e| WikiError::ParseError(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(WikiError::ApiError { code: err.code, info: err.info });
        }

        let not_found = || WikiError::PageNotFound {
            title: title.to_string(),
            language: language.to_string(),
        };

        let api_page = body.query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(not_found)?;

        if api_page.missing || api_page.invalid {
            return Err(not_found());
        }

        let text = api_page.revisions
            .into_iter()
            .next()
            .map(|rev| rev.slots.main.content)
            .unwrap_or_default();

        let langlinks = api_page.langlinks
            .into_iter()
            .map(|link| {
                let site = linksite_for(&self.config.wikipedia_linksite, &link.lang);
                LangLink::new(site, link.lang, link.title)
            })
            .collect();

        Ok(Page {
            title: api_page.title,
            language: language.to_string(),
            text,
            langlinks,
        })
    }

    fn linksite_template(&self) -> &str {
        &self.config.wikipedia_linksite
    }

    async fn save_page(&self, page: &Page, summary: &str) -> Result<(), WikiError> {
        let endpoint = self.endpoint_for(&page.language)?;
        let token = self.csrf_token(&endpoint, &page.language).await?;

        self.post_write(&endpoint, &page.language, &[
            ("action", "edit"),
            ("format", "json"),
            ("formatversion", "2"),
            ("title", page.title.as_str()),
            ("text", page.text.as_str()),
            ("summary", summary),
            ("token", token.as_str()),
        ]).await
    }

    async fn link_wikidata(&self, original: &Page, new_page: &Page, target_language: &str) -> Result<(), WikiError> {
        let endpoint = self.config.wikidata_endpoint.clone();
        let token = self.csrf_token(&endpoint, "wikidata").await?;

        let site = self.config.sitelink(&original.language);
        let linksite = self.config.sitelink(target_language);
        let summary = self.config.wikidata_summary.replace("{target_language}", target_language);

        self.post_write(&endpoint, "wikidata", &[
            ("action", "wbsetsitelink"),
            ("format", "json"),
            ("site", site.as_str()),
            ("title", original.title.as_str()),
            ("linksite", linksite.as_str()),
            ("linktitle", new_page.title.as_str()),
            ("summary", summary.as_str()),
            ("token", token.as_str()),
        ]).await
    }
}
