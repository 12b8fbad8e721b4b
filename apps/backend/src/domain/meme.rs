use serde::{Deserialize, Serialize};

use super::ids::{MemeId, TemplateId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub text: String,
    pub position: Position,
}

/// A player's captioned template submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meme {
    pub id: MemeId,
    pub user_id: UserId,
    pub template_id: TemplateId,
    pub color: String,
    pub font_size: u32,
    pub text_boxes: Vec<TextBox>,
}

/// Client-supplied meme content. The template comes from the route, the id is
/// assigned on first submission when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeme {
    #[serde(default)]
    pub id: Option<MemeId>,
    pub user_id: UserId,
    pub color: String,
    pub font_size: u32,
    #[serde(default)]
    pub text_boxes: Vec<TextBox>,
}

impl NewMeme {
    pub fn into_meme(self, template_id: TemplateId) -> Meme {
        Meme {
            id: self.id.unwrap_or_else(MemeId::generate),
            user_id: self.user_id,
            template_id,
            color: self.color,
            font_size: self.font_size,
            text_boxes: self.text_boxes,
        }
    }
}

/// Client-supplied rating. The meme comes from the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    pub score: u8,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub score: u8,
    pub user_id: UserId,
    pub meme_id: MemeId,
}
