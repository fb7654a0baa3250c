//! Preview projection
//!
//! [`render`] turns a [`Post`] into a [`VisualTree`]: a description of what
//! the preview shows, independent of where it is drawn. The terminal UI and
//! the PNG exporter both draw from the same tree.

use crate::models::{ColorTheme, Comment, Post};
use crate::store::PostObserver;

/// Fixed label of the fact-check banner
pub const FACT_CHECK_LABEL: &str = "Fact-check warning";

/// Fixed text of the fact-check banner
pub const FACT_CHECK_TEXT: &str = "This tweet contains potentially misleading information.";

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Opaque RGBA bytes
    pub const fn rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

/// Colors used by one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Card background
    pub background: Rgb,
    /// Primary text
    pub text: Rgb,
    /// Secondary text (handle, metadata, idle actions)
    pub muted: Rgb,
    /// Card border and separators
    pub border: Rgb,
    /// Verification badge
    pub verified: Rgb,
    /// Highlighted like action
    pub liked: Rgb,
    /// Highlighted repost action
    pub reposted: Rgb,
    /// Fact-check panel background
    pub fact_check_background: Rgb,
    /// Fact-check label chip background
    pub badge_background: Rgb,
}

const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
const GRAY_500: Rgb = Rgb(0x6b, 0x72, 0x80);
const BLUE_500: Rgb = Rgb(0x3b, 0x82, 0xf6);
const RED_500: Rgb = Rgb(0xef, 0x44, 0x44);
const GREEN_500: Rgb = Rgb(0x22, 0xc5, 0x5e);

impl Palette {
    /// Palette for a theme
    pub const fn for_theme(theme: ColorTheme) -> Self {
        let (background, text, border, fact_check_background, badge_background) = match theme {
            ColorTheme::Light => (
                WHITE,
                BLACK,
                Rgb(0xe5, 0xe7, 0xeb),
                Rgb(0xf9, 0xfa, 0xfb),
                Rgb(0xf3, 0xf4, 0xf6),
            ),
            ColorTheme::Dim => (
                Rgb(0x1a, 0x26, 0x34),
                WHITE,
                Rgb(0x38, 0x44, 0x4d),
                Rgb(0x11, 0x18, 0x27),
                Rgb(0x27, 0x27, 0x2a),
            ),
            ColorTheme::Dark => (
                Rgb(0x15, 0x20, 0x2b),
                WHITE,
                Rgb(0x38, 0x44, 0x4d),
                Rgb(0x11, 0x18, 0x27),
                Rgb(0x27, 0x27, 0x2a),
            ),
        };
        Self {
            background,
            text,
            muted: GRAY_500,
            border,
            verified: BLUE_500,
            liked: RED_500,
            reposted: GREEN_500,
            fact_check_background,
            badge_background,
        }
    }
}

/// Whether a card is the post itself or a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// The main post
    Post,
    /// A comment beneath it
    Comment,
}

/// Avatar slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    /// Image URL or local path
    pub source: String,
    /// Letter drawn when the image is unavailable
    pub initial: char,
    /// Diameter in logical pixels
    pub size: u32,
}

/// Name line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Display name
    pub display_name: String,
    /// Handle with the leading `@`
    pub handle: String,
    /// Whether the verification badge follows the name
    pub verified: bool,
    /// Relative time shown after the handle (comments only)
    pub relative_time: Option<String>,
}

/// Time, date and client line under the post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLine {
    /// Time label
    pub time: String,
    /// Date label
    pub date: String,
    /// Client label
    pub client: String,
}

impl MetaLine {
    /// Joined text
    pub fn text(&self) -> String {
        format!("{} · {} · {}", self.time, self.date, self.client)
    }
}

/// Fact-check banner contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactCheck {
    /// Chip label
    pub label: &'static str,
    /// Explanation text
    pub text: &'static str,
}

/// Engagement action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reply
    Reply,
    /// Repost
    Repost,
    /// Like
    Like,
    /// Share
    Share,
}

impl Action {
    /// Terminal symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Reply => "💬",
            Self::Repost => "🔁",
            Self::Like => "♥",
            Self::Share => "⤴",
        }
    }
}

/// How an action is tinted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Muted gray
    None,
    /// Liked red
    Liked,
    /// Reposted green
    Reposted,
}

/// A decorative engagement button. It has no behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    /// Which action
    pub action: Action,
    /// Count label next to the icon
    pub label: Option<String>,
    /// Tint
    pub highlight: Highlight,
}

/// One post or comment block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Post or comment
    pub kind: CardKind,
    /// Avatar slot
    pub avatar: Avatar,
    /// Name line
    pub header: Header,
    /// Body text
    pub body: String,
    /// Attached image (post only)
    pub media: Option<String>,
    /// Time/date/client line (post only)
    pub meta: Option<MetaLine>,
    /// Fact-check banner (post only)
    pub fact_check: Option<FactCheck>,
    /// Reply, repost, like, share
    pub actions: [ActionButton; 4],
}

/// Everything the preview shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualTree {
    /// Theme the palette came from
    pub theme: ColorTheme,
    /// Colors
    pub palette: Palette,
    /// The post
    pub post: Card,
    /// Comments in list order
    pub comments: Vec<Card>,
}

/// Post avatar diameter
pub const POST_AVATAR_SIZE: u32 = 48;
/// Comment avatar diameter
pub const COMMENT_AVATAR_SIZE: u32 = 40;

/// Project a post into its preview
pub fn render(post: &Post) -> VisualTree {
    VisualTree {
        theme: post.color_theme,
        palette: Palette::for_theme(post.color_theme),
        post: post_card(post),
        comments: post.comments.iter().map(comment_card).collect(),
    }
}

fn post_card(post: &Post) -> Card {
    Card {
        kind: CardKind::Post,
        avatar: avatar(&post.avatar_url, &post.display_name, POST_AVATAR_SIZE),
        header: Header {
            display_name: post.display_name.clone(),
            handle: format!("@{}", post.handle),
            verified: post.verified_badge,
            relative_time: None,
        },
        body: post.body_text.clone(),
        media: post.attached_image().map(str::to_string),
        meta: Some(MetaLine {
            time: post.time_label.clone(),
            date: post.date_label.clone(),
            client: post.client_label.clone(),
        }),
        fact_check: post.show_fact_check_banner.then_some(FactCheck {
            label: FACT_CHECK_LABEL,
            text: FACT_CHECK_TEXT,
        }),
        actions: actions(
            post.liked,
            post.reposted,
            Some(&post.repost_count_label),
            Some(&post.like_count_label),
        ),
    }
}

fn comment_card(comment: &Comment) -> Card {
    Card {
        kind: CardKind::Comment,
        avatar: avatar(&comment.avatar_url, &comment.display_name, COMMENT_AVATAR_SIZE),
        header: Header {
            display_name: comment.display_name.clone(),
            handle: format!("@{}", comment.handle),
            verified: false,
            relative_time: Some(comment.relative_time.clone()),
        },
        body: comment.body_text.clone(),
        media: None,
        meta: None,
        fact_check: None,
        actions: actions(comment.liked, comment.reposted, None, None),
    }
}

fn avatar(source: &str, display_name: &str, size: u32) -> Avatar {
    Avatar {
        source: source.to_string(),
        initial: display_name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map_or('?', |c| c.to_ascii_uppercase()),
        size,
    }
}

fn actions(
    liked: bool,
    reposted: bool,
    repost_label: Option<&str>,
    like_label: Option<&str>,
) -> [ActionButton; 4] {
    [
        ActionButton {
            action: Action::Reply,
            label: None,
            highlight: Highlight::None,
        },
        ActionButton {
            action: Action::Repost,
            label: repost_label.map(str::to_string),
            highlight: if reposted {
                Highlight::Reposted
            } else {
                Highlight::None
            },
        },
        ActionButton {
            action: Action::Like,
            label: like_label.map(str::to_string),
            highlight: if liked {
                Highlight::Liked
            } else {
                Highlight::None
            },
        },
        ActionButton {
            action: Action::Share,
            label: None,
            highlight: Highlight::None,
        },
    ]
}

/// Observer that keeps the latest rendered preview
#[derive(Debug, Default)]
pub struct PreviewCache {
    tree: Option<VisualTree>,
}

impl PreviewCache {
    /// Latest preview, if the post has been rendered
    pub fn current(&self) -> Option<&VisualTree> {
        self.tree.as_ref()
    }
}

impl PostObserver for PreviewCache {
    fn post_changed(&mut self, post: &Post) {
        self.tree = Some(render(post));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostField;
    use crate::store::EditorStore;

    #[test]
    fn test_theme_palettes() {
        let light = Palette::for_theme(ColorTheme::Light);
        assert_eq!((light.background, light.text), (WHITE, BLACK));

        let dim = Palette::for_theme(ColorTheme::Dim);
        assert_eq!((dim.background, dim.text), (Rgb(0x1a, 0x26, 0x34), WHITE));

        let dark = Palette::for_theme(ColorTheme::Dark);
        assert_eq!((dark.background, dark.text), (Rgb(0x15, 0x20, 0x2b), WHITE));
    }

    #[test]
    fn test_theme_change_only_changes_colors() {
        let mut post = Post::default();
        post.comments.push(Comment::new("A", "a", "hi"));
        let light = render(&post);
        post.color_theme = ColorTheme::Dark;
        let dark = render(&post);

        assert_eq!(dark.palette, Palette::for_theme(ColorTheme::Dark));
        assert_ne!(light.palette, dark.palette);
        assert_eq!(light.post, dark.post);
        assert_eq!(light.comments, dark.comments);
    }

    #[test]
    fn test_optional_blocks() {
        let mut post = Post::default();
        post.verified_badge = false;
        let tree = render(&post);
        assert!(!tree.post.header.verified);
        assert!(tree.post.media.is_none());
        assert!(tree.post.fact_check.is_none());

        post.verified_badge = true;
        post.attached_image_url = Some("photo.png".to_string());
        post.show_fact_check_banner = true;
        let tree = render(&post);
        assert!(tree.post.header.verified);
        assert_eq!(tree.post.media.as_deref(), Some("photo.png"));
        let banner = tree.post.fact_check.unwrap();
        assert_eq!(banner.label, FACT_CHECK_LABEL);
        assert_eq!(banner.text, FACT_CHECK_TEXT);
    }

    #[test]
    fn test_empty_attachment_not_rendered() {
        let mut post = Post::default();
        post.attached_image_url = Some(String::new());
        assert!(render(&post).post.media.is_none());
    }

    #[test]
    fn test_actions_reflect_flags_and_counts() {
        let mut post = Post::default();
        post.liked = true;
        let tree = render(&post);
        let [reply, repost, like, share] = &tree.post.actions;
        assert_eq!(reply.action, Action::Reply);
        assert_eq!(repost.label.as_deref(), Some("18k"));
        assert_eq!(repost.highlight, Highlight::None);
        assert_eq!(like.label.as_deref(), Some("14k"));
        assert_eq!(like.highlight, Highlight::Liked);
        assert_eq!(share.action, Action::Share);
    }

    #[test]
    fn test_comments_follow_list_order() {
        let mut post = Post::default();
        post.show_fact_check_banner = true;
        post.attached_image_url = Some("photo.png".to_string());
        post.comments.push(Comment::new("First", "one", "1"));
        post.comments.push(Comment::new("Second", "two", "2"));
        let tree = render(&post);

        assert_eq!(tree.comments.len(), 2);
        assert_eq!(tree.comments[0].header.display_name, "First");
        assert_eq!(tree.comments[1].header.handle, "@two");
        for card in &tree.comments {
            assert_eq!(card.kind, CardKind::Comment);
            assert!(card.media.is_none());
            assert!(card.fact_check.is_none());
            assert_eq!(card.header.relative_time.as_deref(), Some("4h"));
            assert!(card.actions.iter().all(|a| a.label.is_none()));
            assert_eq!(card.avatar.size, COMMENT_AVATAR_SIZE);
        }
    }

    #[test]
    fn test_avatar_initial() {
        let mut post = Post::default();
        post.display_name = "  @zed".to_string();
        assert_eq!(render(&post).post.avatar.initial, 'Z');
        post.display_name = String::new();
        assert_eq!(render(&post).post.avatar.initial, '?');
    }

    #[test]
    fn test_cache_tracks_store() {
        let mut store = EditorStore::with_observer(Post::default(), PreviewCache::default());
        assert_eq!(
            store.observer().current().map(|t| t.theme),
            Some(ColorTheme::Light)
        );
        store
            .set_post_field(PostField::ColorTheme, ColorTheme::Dim.into())
            .unwrap();
        assert_eq!(
            store.observer().current().map(|t| t.theme),
            Some(ColorTheme::Dim)
        );
    }
}
