//! Reply comment model

use serde::{Deserialize, Serialize};

use super::{CommentField, FieldError, FieldValue};

/// Placeholder avatar used by the default post and every fresh draft
pub const DEFAULT_AVATAR_URL: &str = "https://images.unsplash.com/photo-1633332755192-727a05c4013d?w=64&h=64&fit=crop&crop=faces";

/// Relative time given to a fresh draft
pub const DEFAULT_RELATIVE_TIME: &str = "4h";

/// A reply shown beneath the post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Author display name
    pub display_name: String,
    /// Author handle (without `@`)
    pub handle: String,
    /// Author avatar URL or local path
    pub avatar_url: String,
    /// Comment text
    pub body_text: String,
    /// Relative time label ("4h")
    pub relative_time: String,
    /// Whether the like action is highlighted
    pub liked: bool,
    /// Whether the repost action is highlighted
    pub reposted: bool,
}

impl Default for Comment {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            handle: String::new(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            body_text: String::new(),
            relative_time: DEFAULT_RELATIVE_TIME.to_string(),
            liked: false,
            reposted: false,
        }
    }
}

impl Comment {
    /// Create a comment with the given author and text, other fields default
    pub fn new(display_name: &str, handle: &str, body_text: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            handle: handle.to_string(),
            body_text: body_text.to_string(),
            ..Self::default()
        }
    }

    /// A draft can be committed once name, handle and text are all filled in
    pub fn is_complete(&self) -> bool {
        !self.body_text.is_empty() && !self.display_name.is_empty() && !self.handle.is_empty()
    }

    /// Read a field
    pub fn get(&self, field: CommentField) -> FieldValue {
        match field {
            CommentField::DisplayName => FieldValue::Text(self.display_name.clone()),
            CommentField::Handle => FieldValue::Text(self.handle.clone()),
            CommentField::AvatarUrl => FieldValue::Text(self.avatar_url.clone()),
            CommentField::BodyText => FieldValue::Text(self.body_text.clone()),
            CommentField::RelativeTime => FieldValue::Text(self.relative_time.clone()),
            CommentField::Liked => FieldValue::Flag(self.liked),
            CommentField::Reposted => FieldValue::Flag(self.reposted),
        }
    }

    /// Replace a field. Fails only when the value has the wrong kind.
    pub fn set(&mut self, field: CommentField, value: FieldValue) -> Result<(), FieldError> {
        let label = field.label();
        match field {
            CommentField::DisplayName => self.display_name = value.into_text(label)?,
            CommentField::Handle => self.handle = value.into_text(label)?,
            CommentField::AvatarUrl => self.avatar_url = value.into_text(label)?,
            CommentField::BodyText => self.body_text = value.into_text(label)?,
            CommentField::RelativeTime => self.relative_time = value.into_text(label)?,
            CommentField::Liked => self.liked = value.into_flag(label)?,
            CommentField::Reposted => self.reposted = value.into_flag(label)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = Comment::default();
        assert!(draft.display_name.is_empty());
        assert_eq!(draft.avatar_url, DEFAULT_AVATAR_URL);
        assert_eq!(draft.relative_time, "4h");
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_complete_needs_all_three() {
        assert!(Comment::new("A", "a", "hi").is_complete());
        assert!(!Comment::new("", "a", "hi").is_complete());
        assert!(!Comment::new("A", "", "hi").is_complete());
        assert!(!Comment::new("A", "a", "").is_complete());
    }

    #[test]
    fn test_set_and_get() {
        let mut comment = Comment::default();
        comment.set(CommentField::Handle, "bob".into()).unwrap();
        comment.set(CommentField::Liked, true.into()).unwrap();
        assert_eq!(comment.get(CommentField::Handle), FieldValue::from("bob"));
        assert_eq!(comment.get(CommentField::Liked), FieldValue::Flag(true));
    }

    #[test]
    fn test_set_wrong_kind_leaves_comment() {
        let mut comment = Comment::new("A", "a", "hi");
        let before = comment.clone();
        assert!(comment.set(CommentField::Liked, "yes".into()).is_err());
        assert_eq!(comment, before);
    }
}
