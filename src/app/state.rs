//! Application state

use std::path::PathBuf;

use crate::config::Config;
use crate::models::{CommentField, FieldKind, FieldValue, Post, PostField};
use crate::preview::{PreviewCache, VisualTree};
use crate::store::EditorStore;
use crate::theme::Theme;

/// Which form tab is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// The post form
    #[default]
    Post,
    /// Draft comment and comment list
    Comments,
}

impl Tab {
    /// The other tab
    pub fn next(&self) -> Self {
        match self {
            Self::Post => Self::Comments,
            Self::Comments => Self::Post,
        }
    }

    /// Tab title
    pub fn name(&self) -> &'static str {
        match self {
            Self::Post => "Tweet",
            Self::Comments => "Comments",
        }
    }
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigating the form
    #[default]
    Normal,
    /// Typing into the selected text field
    Editing,
    /// Help popup
    Help,
}

/// The field under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedField {
    /// A post field
    Post(PostField),
    /// A draft comment field
    Draft(CommentField),
}

impl SelectedField {
    /// Input kind of the field
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Post(field) => field.kind(),
            Self::Draft(field) => field.kind(),
        }
    }

    /// Whether Enter inserts a newline while editing
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::Post(PostField::BodyText) | Self::Draft(CommentField::BodyText)
        )
    }
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Whether to quit
    pub should_quit: bool,
    /// Editor chrome theme
    pub theme: Theme,
    /// Input mode
    pub mode: Mode,
    /// Visible form tab
    pub tab: Tab,

    /// Post, draft comment and rendered preview
    pub store: EditorStore<PreviewCache>,
    /// Cursor in the post form
    pub post_cursor: usize,
    /// Cursor in the draft comment form
    pub draft_cursor: usize,
    /// Selected entry in the comment list
    pub selected_comment: usize,

    /// Status message (bottom bar)
    pub status: String,
    /// Whether the status message reports a failure
    pub status_is_error: bool,
    /// First visible row of the preview panel
    pub preview_scroll: u16,
    /// Exports sent to the worker and not answered yet
    pub exports_in_flight: usize,
    /// Path of the last successful export
    pub last_export: Option<PathBuf>,

    /// Tick counter for animations
    tick: u64,
}

impl AppState {
    /// Create a new app state
    pub fn new(config: Config) -> Self {
        let post = Post::with_theme(config.initial_theme);
        Self {
            theme: config.theme,
            config,
            should_quit: false,
            mode: Mode::Normal,
            tab: Tab::Post,
            store: EditorStore::with_observer(post, PreviewCache::default()),
            post_cursor: 0,
            draft_cursor: 0,
            selected_comment: 0,
            status: String::new(),
            status_is_error: false,
            preview_scroll: 0,
            exports_in_flight: 0,
            last_export: None,
            tick: 0,
        }
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Get current tick
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
        self.status_is_error = false;
    }

    /// Set a status message that reports a failure
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
        self.status_is_error = true;
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status.clear();
        self.status_is_error = false;
    }

    /// Scroll the preview down. The renderer stops at the last page.
    pub fn scroll_preview_down(&mut self, rows: u16) {
        self.preview_scroll = self.preview_scroll.saturating_add(rows);
    }

    /// Scroll the preview up
    pub fn scroll_preview_up(&mut self, rows: u16) {
        self.preview_scroll = self.preview_scroll.saturating_sub(rows);
    }

    /// Latest rendered preview
    pub fn preview(&self) -> Option<&VisualTree> {
        self.store.observer().current()
    }

    /// Copy of the preview as it is right now, for export
    pub fn preview_snapshot(&self) -> Option<VisualTree> {
        self.preview().cloned()
    }

    /// Switch form tab
    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// Field under the cursor in the visible tab
    pub fn selected_field(&self) -> SelectedField {
        match self.tab {
            Tab::Post => SelectedField::Post(PostField::all()[self.post_cursor]),
            Tab::Comments => SelectedField::Draft(CommentField::all()[self.draft_cursor]),
        }
    }

    /// Move the field cursor down
    pub fn select_next_field(&mut self) {
        match self.tab {
            Tab::Post => {
                self.post_cursor = (self.post_cursor + 1).min(PostField::all().len() - 1);
            }
            Tab::Comments => {
                self.draft_cursor = (self.draft_cursor + 1).min(CommentField::all().len() - 1);
            }
        }
    }

    /// Move the field cursor up
    pub fn select_prev_field(&mut self) {
        match self.tab {
            Tab::Post => self.post_cursor = self.post_cursor.saturating_sub(1),
            Tab::Comments => self.draft_cursor = self.draft_cursor.saturating_sub(1),
        }
    }

    /// Current value of the selected field
    pub fn selected_value(&self) -> FieldValue {
        match self.selected_field() {
            SelectedField::Post(field) => self.store.post().get(field),
            SelectedField::Draft(field) => self.store.draft().get(field),
        }
    }

    fn write_selected(&mut self, value: FieldValue) {
        let result = match self.selected_field() {
            SelectedField::Post(field) => self.store.set_post_field(field, value),
            SelectedField::Draft(field) => self.store.set_draft_field(field, value),
        };
        if let Err(e) = result {
            tracing::warn!("{e}");
        }
    }

    /// Enter on a field: edit text, flip a switch, or advance the theme
    pub fn activate_field(&mut self) {
        match self.selected_value() {
            FieldValue::Text(_) => self.mode = Mode::Editing,
            FieldValue::Flag(flag) => self.write_selected(FieldValue::Flag(!flag)),
            FieldValue::Theme(theme) => self.write_selected(FieldValue::Theme(theme.next())),
        }
    }

    /// Step the theme selector backwards (no-op on other fields)
    pub fn cycle_theme_back(&mut self) {
        if let FieldValue::Theme(theme) = self.selected_value() {
            self.write_selected(FieldValue::Theme(theme.prev()));
        }
    }

    /// Step the theme selector forwards (no-op on other fields)
    pub fn cycle_theme_forward(&mut self) {
        if let FieldValue::Theme(theme) = self.selected_value() {
            self.write_selected(FieldValue::Theme(theme.next()));
        }
    }

    /// Append a character to the field being edited
    pub fn edit_push(&mut self, c: char) {
        if let FieldValue::Text(mut text) = self.selected_value() {
            text.push(c);
            self.write_selected(FieldValue::Text(text));
        }
    }

    /// Delete the last character of the field being edited
    pub fn edit_pop(&mut self) {
        if let FieldValue::Text(mut text) = self.selected_value() {
            text.pop();
            self.write_selected(FieldValue::Text(text));
        }
    }

    /// Leave editing mode
    pub fn stop_editing(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Append the draft to the comments. Incomplete drafts are ignored.
    pub fn commit_draft(&mut self) {
        if self.store.commit_draft_comment() {
            self.selected_comment = self.store.post().comments.len() - 1;
            self.set_status("✓ Comment added");
        }
    }

    /// Remove the selected comment
    pub fn remove_selected_comment(&mut self) {
        if let Some(removed) = self.store.remove_comment(self.selected_comment) {
            let remaining = self.store.post().comments.len();
            self.selected_comment = self.selected_comment.min(remaining.saturating_sub(1));
            self.set_status(format!("🗑 Removed comment by @{}", removed.handle));
        }
    }

    /// Move the comment selection down
    pub fn select_next_comment(&mut self) {
        let len = self.store.post().comments.len();
        if len > 0 {
            self.selected_comment = (self.selected_comment + 1).min(len - 1);
        }
    }

    /// Move the comment selection up
    pub fn select_prev_comment(&mut self) {
        self.selected_comment = self.selected_comment.saturating_sub(1);
    }

    /// Cycle through chrome themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorTheme;

    fn state() -> AppState {
        AppState::new(Config::default())
    }

    fn goto(state: &mut AppState, field: PostField) {
        state.tab = Tab::Post;
        state.post_cursor = PostField::all().iter().position(|f| *f == field).unwrap();
    }

    #[test]
    fn test_initial_preview_uses_config_theme() {
        let config = Config {
            initial_theme: ColorTheme::Dim,
            ..Config::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.preview().unwrap().theme, ColorTheme::Dim);
    }

    #[test]
    fn test_typing_updates_preview_live() {
        let mut state = state();
        goto(&mut state, PostField::DisplayName);
        state.activate_field();
        assert_eq!(state.mode, Mode::Editing);

        state.edit_push('!');
        assert_eq!(state.preview().unwrap().post.header.display_name, "Zeoob!");
        state.edit_pop();
        state.edit_pop();
        assert_eq!(state.store.post().display_name, "Zeoo");
    }

    #[test]
    fn test_activate_toggles_and_cycles() {
        let mut state = state();
        goto(&mut state, PostField::VerifiedBadge);
        assert_eq!(state.selected_field().kind(), FieldKind::Toggle);
        state.activate_field();
        assert!(!state.store.post().verified_badge);
        assert_eq!(state.mode, Mode::Normal);

        goto(&mut state, PostField::ColorTheme);
        state.activate_field();
        assert_eq!(state.store.post().color_theme, ColorTheme::Dim);
        state.cycle_theme_back();
        state.cycle_theme_back();
        assert_eq!(state.store.post().color_theme, ColorTheme::Dark);
    }

    #[test]
    fn test_error_status_flag() {
        let mut state = state();
        state.set_error("❌ nope");
        assert!(state.status_is_error);
        state.set_status("fine");
        assert!(!state.status_is_error);
        state.set_error("❌ nope");
        state.clear_status();
        assert!(!state.status_is_error);
        assert!(state.status.is_empty());
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut state = state();
        for _ in 0..100 {
            state.select_next_field();
        }
        assert_eq!(state.post_cursor, PostField::all().len() - 1);
        state.next_tab();
        state.select_prev_field();
        assert_eq!(state.draft_cursor, 0);
    }

    #[test]
    fn test_comment_flow() {
        let mut state = state();
        state.next_tab();
        state.commit_draft();
        assert!(state.store.post().comments.is_empty());
        assert!(state.status.is_empty());

        for (field, text) in [
            (CommentField::DisplayName, "A"),
            (CommentField::Handle, "a"),
            (CommentField::BodyText, "hi"),
        ] {
            state.store.set_draft_field(field, text.into()).unwrap();
        }
        state.commit_draft();
        assert_eq!(state.store.post().comments.len(), 1);
        assert_eq!(state.preview().unwrap().comments.len(), 1);

        state.remove_selected_comment();
        assert!(state.store.post().comments.is_empty());
        assert_eq!(state.selected_comment, 0);
    }
}
