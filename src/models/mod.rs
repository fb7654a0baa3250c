//! Data models for chirpmock

mod color_theme;
mod comment;
mod field;
mod post;

pub use color_theme::{ColorTheme, ThemeParseError};
pub use comment::{Comment, DEFAULT_AVATAR_URL, DEFAULT_RELATIVE_TIME};
pub use field::{CommentField, FieldError, FieldKind, FieldValue, PostField};
pub use post::Post;
