use serde::{Deserialize, Serialize};

use super::ids::TemplateId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub image_url: String,
    #[serde(default)]
    pub name: String,
}
