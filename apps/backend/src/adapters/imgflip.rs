//! HTTP adapter for Imgflip-compatible template catalogs.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Template, TemplateId};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::services::templates::TemplateSource;

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    success: bool,
    #[serde(default)]
    data: Option<CatalogData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogData {
    memes: Vec<CatalogMeme>,
}

#[derive(Debug, Deserialize)]
struct CatalogMeme {
    id: String,
    #[serde(default)]
    name: String,
    url: String,
}

fn upstream(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::TemplateSource, detail)
}

impl CatalogResponse {
    fn into_templates(self) -> Result<Vec<Template>, DomainError> {
        if !self.success {
            return Err(upstream(
                self.error_message
                    .unwrap_or_else(|| "Template catalog reported failure".to_string()),
            ));
        }
        let data = self
            .data
            .ok_or_else(|| upstream("Template catalog returned no data"))?;
        Ok(data
            .memes
            .into_iter()
            .map(|m| Template {
                id: TemplateId::new(m.id),
                image_url: m.url,
                name: m.name,
            })
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct ImgflipClient {
    client: reqwest::Client,
    url: String,
}

impl ImgflipClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| upstream(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TemplateSource for ImgflipClient {
    async fn fetch_templates(&self) -> Result<Vec<Template>, DomainError> {
        debug!(url = %self.url, "Fetching template catalog");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "Template catalog request failed");
                upstream(format!("Template catalog unavailable: {e}"))
            })?;

        let body: CatalogResponse = response
            .json()
            .await
            .map_err(|e| upstream(format!("Template catalog returned malformed JSON: {e}")))?;

        let templates = body.into_templates()?;
        debug!(count = templates.len(), "Fetched template catalog");
        Ok(templates)
    }
}
