//! Addressable form fields for posts and comments

use thiserror::Error;

use super::ColorTheme;

/// What kind of input a field takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text
    Text,
    /// On/off switch
    Toggle,
    /// Three-way theme selector
    Theme,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Toggle => "toggle",
            Self::Theme => "theme",
        };
        f.write_str(name)
    }
}

/// A value written into (or read from) a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Switch value
    Flag(bool),
    /// Theme value
    Theme(ColorTheme),
}

/// Errors raised by field setters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value does not match the field's kind
    #[error("Field '{field}' expects a {expected} value, got {found}")]
    KindMismatch {
        /// Field label
        field: &'static str,
        /// Kind the field accepts
        expected: FieldKind,
        /// Kind that was supplied
        found: FieldKind,
    },
}

impl FieldValue {
    /// Kind of this value
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Flag(_) => FieldKind::Toggle,
            Self::Theme(_) => FieldKind::Theme,
        }
    }

    pub(crate) fn into_text(self, field: &'static str) -> Result<String, FieldError> {
        match self {
            Self::Text(text) => Ok(text),
            other => Err(other.mismatch(field, FieldKind::Text)),
        }
    }

    pub(crate) fn into_flag(self, field: &'static str) -> Result<bool, FieldError> {
        match self {
            Self::Flag(flag) => Ok(flag),
            other => Err(other.mismatch(field, FieldKind::Toggle)),
        }
    }

    pub(crate) fn into_theme(self, field: &'static str) -> Result<ColorTheme, FieldError> {
        match self {
            Self::Theme(theme) => Ok(theme),
            other => Err(other.mismatch(field, FieldKind::Theme)),
        }
    }

    fn mismatch(&self, field: &'static str, expected: FieldKind) -> FieldError {
        FieldError::KindMismatch {
            field,
            expected,
            found: self.kind(),
        }
    }

    /// Short text for list display
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Flag(true) => "on".to_string(),
            Self::Flag(false) => "off".to_string(),
            Self::Theme(theme) => theme.name().to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<ColorTheme> for FieldValue {
    fn from(theme: ColorTheme) -> Self {
        Self::Theme(theme)
    }
}

/// Editable attributes of a post (the comment list is managed separately)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    /// Author avatar URL or local path
    AvatarUrl,
    /// Attached image URL or local path (empty = none)
    AttachedImageUrl,
    /// Author display name
    DisplayName,
    /// Author handle, without the leading `@`
    Handle,
    /// Body text
    BodyText,
    /// Posting client label ("Twitter for Android")
    ClientLabel,
    /// Verification badge switch
    VerifiedBadge,
    /// Preview color theme
    ColorTheme,
    /// Time label ("4:17 PM")
    TimeLabel,
    /// Date label ("Jan 08, 2024")
    DateLabel,
    /// Repost count label
    RepostCount,
    /// Like count label
    LikeCount,
    /// Liked switch
    Liked,
    /// Reposted switch
    Reposted,
    /// Fact-check banner switch
    ShowFactCheck,
}

impl PostField {
    /// All fields in form order
    pub const fn all() -> &'static [Self] {
        &[
            Self::AvatarUrl,
            Self::AttachedImageUrl,
            Self::DisplayName,
            Self::Handle,
            Self::BodyText,
            Self::ClientLabel,
            Self::VerifiedBadge,
            Self::ColorTheme,
            Self::TimeLabel,
            Self::DateLabel,
            Self::RepostCount,
            Self::LikeCount,
            Self::Liked,
            Self::Reposted,
            Self::ShowFactCheck,
        ]
    }

    /// Form label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AvatarUrl => "Profile image",
            Self::AttachedImageUrl => "Attached image",
            Self::DisplayName => "Name",
            Self::Handle => "Username",
            Self::BodyText => "Text",
            Self::ClientLabel => "Device",
            Self::VerifiedBadge => "Verified badge",
            Self::ColorTheme => "Theme",
            Self::TimeLabel => "Time",
            Self::DateLabel => "Date",
            Self::RepostCount => "Reposts",
            Self::LikeCount => "Likes",
            Self::Liked => "Liked",
            Self::Reposted => "Reposted",
            Self::ShowFactCheck => "Fact-check warning",
        }
    }

    /// Input kind
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::VerifiedBadge | Self::Liked | Self::Reposted | Self::ShowFactCheck => {
                FieldKind::Toggle
            }
            Self::ColorTheme => FieldKind::Theme,
            _ => FieldKind::Text,
        }
    }
}

/// Editable attributes of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentField {
    /// Author display name
    DisplayName,
    /// Author handle, without the leading `@`
    Handle,
    /// Author avatar URL or local path
    AvatarUrl,
    /// Body text
    BodyText,
    /// Relative time label ("4h")
    RelativeTime,
    /// Liked switch
    Liked,
    /// Reposted switch
    Reposted,
}

impl CommentField {
    /// All fields in form order
    pub const fn all() -> &'static [Self] {
        &[
            Self::DisplayName,
            Self::Handle,
            Self::AvatarUrl,
            Self::BodyText,
            Self::RelativeTime,
            Self::Liked,
            Self::Reposted,
        ]
    }

    /// Form label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DisplayName => "Name",
            Self::Handle => "Username",
            Self::AvatarUrl => "Profile image",
            Self::BodyText => "Comment text",
            Self::RelativeTime => "Time",
            Self::Liked => "Liked",
            Self::Reposted => "Reposted",
        }
    }

    /// Input kind
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Liked | Self::Reposted => FieldKind::Toggle,
            _ => FieldKind::Text,
        }
    }
}
