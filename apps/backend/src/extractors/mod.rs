pub mod current_user;
pub mod meme_id;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use meme_id::MemeIdParam;
pub use validated_json::ValidatedJson;
