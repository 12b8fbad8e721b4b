//! Template catalog seam.

use async_trait::async_trait;

use crate::domain::Template;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Source of the template pool a game is seeded with.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch_templates(&self) -> Result<Vec<Template>, DomainError>;
}

/// Fixed in-process catalog. Can be told to fail for upstream-outage paths.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: Vec<Template>,
    failure: Option<String>,
}

impl StaticTemplates {
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            templates,
            failure: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            templates: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl TemplateSource for StaticTemplates {
    async fn fetch_templates(&self) -> Result<Vec<Template>, DomainError> {
        match &self.failure {
            Some(reason) => Err(DomainError::infra(
                InfraErrorKind::TemplateSource,
                reason.clone(),
            )),
            None => Ok(self.templates.clone()),
        }
    }
}
