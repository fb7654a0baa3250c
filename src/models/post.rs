//! Mocked post model

use serde::{Deserialize, Serialize};

use super::comment::DEFAULT_AVATAR_URL;
use super::{ColorTheme, Comment, FieldError, FieldValue, PostField};

/// The post being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Author display name
    pub display_name: String,
    /// Author handle (without `@`)
    pub handle: String,
    /// Post text
    pub body_text: String,
    /// Author avatar URL or local path
    pub avatar_url: String,
    /// Attached image URL or local path
    pub attached_image_url: Option<String>,
    /// Whether the verification badge is shown
    pub verified_badge: bool,
    /// Preview palette
    pub color_theme: ColorTheme,
    /// Time label ("4:17 PM")
    pub time_label: String,
    /// Date label ("Jan 08, 2024")
    pub date_label: String,
    /// Posting client label
    pub client_label: String,
    /// Repost count, display only
    pub repost_count_label: String,
    /// Like count, display only
    pub like_count_label: String,
    /// Whether the like action is highlighted
    pub liked: bool,
    /// Whether the repost action is highlighted
    pub reposted: bool,
    /// Whether the fact-check banner is shown
    pub show_fact_check_banner: bool,
    /// Replies in append order
    pub comments: Vec<Comment>,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            display_name: "Zeoob".to_string(),
            handle: "zeooboffical".to_string(),
            body_text: "Build your own Twitter Tweet now! Check it out @Zeoob".to_string(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            attached_image_url: None,
            verified_badge: true,
            color_theme: ColorTheme::Light,
            time_label: "4:17 PM".to_string(),
            date_label: "Jan 08, 2024".to_string(),
            client_label: "Twitter for Android".to_string(),
            repost_count_label: "18k".to_string(),
            like_count_label: "14k".to_string(),
            liked: false,
            reposted: false,
            show_fact_check_banner: false,
            comments: Vec::new(),
        }
    }
}

impl Post {
    /// Default post in the given theme
    pub fn with_theme(color_theme: ColorTheme) -> Self {
        Self {
            color_theme,
            ..Self::default()
        }
    }

    /// Attached image, if one is set and non-empty
    pub fn attached_image(&self) -> Option<&str> {
        self.attached_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// Read a field
    pub fn get(&self, field: PostField) -> FieldValue {
        match field {
            PostField::AvatarUrl => FieldValue::Text(self.avatar_url.clone()),
            PostField::AttachedImageUrl => {
                FieldValue::Text(self.attached_image_url.clone().unwrap_or_default())
            }
            PostField::DisplayName => FieldValue::Text(self.display_name.clone()),
            PostField::Handle => FieldValue::Text(self.handle.clone()),
            PostField::BodyText => FieldValue::Text(self.body_text.clone()),
            PostField::ClientLabel => FieldValue::Text(self.client_label.clone()),
            PostField::VerifiedBadge => FieldValue::Flag(self.verified_badge),
            PostField::ColorTheme => FieldValue::Theme(self.color_theme),
            PostField::TimeLabel => FieldValue::Text(self.time_label.clone()),
            PostField::DateLabel => FieldValue::Text(self.date_label.clone()),
            PostField::RepostCount => FieldValue::Text(self.repost_count_label.clone()),
            PostField::LikeCount => FieldValue::Text(self.like_count_label.clone()),
            PostField::Liked => FieldValue::Flag(self.liked),
            PostField::Reposted => FieldValue::Flag(self.reposted),
            PostField::ShowFactCheck => FieldValue::Flag(self.show_fact_check_banner),
        }
    }

    /// Replace a field. Fails only when the value has the wrong kind.
    ///
    /// An empty attached image URL clears the attachment.
    pub fn set(&mut self, field: PostField, value: FieldValue) -> Result<(), FieldError> {
        let label = field.label();
        match field {
            PostField::AvatarUrl => self.avatar_url = value.into_text(label)?,
            PostField::AttachedImageUrl => {
                let url = value.into_text(label)?;
                self.attached_image_url = if url.is_empty() { None } else { Some(url) };
            }
            PostField::DisplayName => self.display_name = value.into_text(label)?,
            PostField::Handle => self.handle = value.into_text(label)?,
            PostField::BodyText => self.body_text = value.into_text(label)?,
            PostField::ClientLabel => self.client_label = value.into_text(label)?,
            PostField::VerifiedBadge => self.verified_badge = value.into_flag(label)?,
            PostField::ColorTheme => self.color_theme = value.into_theme(label)?,
            PostField::TimeLabel => self.time_label = value.into_text(label)?,
            PostField::DateLabel => self.date_label = value.into_text(label)?,
            PostField::RepostCount => self.repost_count_label = value.into_text(label)?,
            PostField::LikeCount => self.like_count_label = value.into_text(label)?,
            PostField::Liked => self.liked = value.into_flag(label)?,
            PostField::Reposted => self.reposted = value.into_flag(label)?,
            PostField::ShowFactCheck => self.show_fact_check_banner = value.into_flag(label)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let mut post = Post::with_theme(ColorTheme::Dim);
        post.attached_image_url = Some("/tmp/cat.png".to_string());
        post.comments.push(Comment::new("Ann", "ann", "first"));
        post.comments.push(Comment::new("Bob", "bob", "two\nlines"));

        let text = toml::to_string(&post).unwrap();
        assert!(text.contains("color_theme = \"dim\""));
        let back: Post = toml::from_str(&text).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn test_toml_without_attachment() {
        let post = Post::default();
        let back: Post = toml::from_str(&toml::to_string(&post).unwrap()).unwrap();
        assert_eq!(back.attached_image_url, None);
        assert_eq!(back, post);
    }

    #[test]
    fn test_defaults() {
        let post = Post::default();
        assert_eq!(post.display_name, "Zeoob");
        assert_eq!(post.handle, "zeooboffical");
        assert_eq!(post.color_theme, ColorTheme::Light);
        assert!(post.verified_badge);
        assert!(post.attached_image().is_none());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_get_returns_what_set_wrote() {
        let mut post = Post::default();
        for field in PostField::all() {
            let value = match field.kind() {
                crate::models::FieldKind::Text => FieldValue::from(format!("{field:?}")),
                crate::models::FieldKind::Toggle => FieldValue::Flag(true),
                crate::models::FieldKind::Theme => FieldValue::Theme(ColorTheme::Dim),
            };
            post.set(*field, value.clone()).unwrap();
            assert_eq!(post.get(*field), value, "field {field:?}");
        }
    }

    #[test]
    fn test_empty_attachment_clears() {
        let mut post = Post::default();
        post.set(PostField::AttachedImageUrl, "cat.png".into()).unwrap();
        assert_eq!(post.attached_image(), Some("cat.png"));
        post.set(PostField::AttachedImageUrl, "".into()).unwrap();
        assert_eq!(post.attached_image_url, None);
    }

    #[test]
    fn test_counts_are_free_form() {
        let mut post = Post::default();
        post.set(PostField::LikeCount, "lots".into()).unwrap();
        assert_eq!(post.like_count_label, "lots");
    }

    #[test]
    fn test_theme_field_rejects_text() {
        let mut post = Post::default();
        assert!(post.set(PostField::ColorTheme, "dark".into()).is_err());
        assert_eq!(post.color_theme, ColorTheme::Light);
    }
}
