//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, Mode, Tab};

/// Rows moved per preview scroll step
const PREVIEW_PAGE: u16 = 5;

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    // Ctrl+C quits from any mode
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return None;
    }

    match state.mode {
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::Editing => {
            handle_editing_key(state, key);
            return None;
        }
        Mode::Normal => {}
    }

    // Global shortcuts (work in normal mode)
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            return None;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) | (_, KeyCode::Char('e')) => {
            return Some(request_export(state));
        }
        (_, KeyCode::Char('?')) | (_, KeyCode::F(1)) => {
            state.mode = Mode::Help;
            return None;
        }
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            state.next_tab();
            return None;
        }
        (_, KeyCode::Char('t')) => {
            state.next_theme();
            state.set_status(format!("Theme: {}", state.theme.name()));
            return None;
        }
        (_, KeyCode::Char('o')) => {
            open_last_export(state);
            return None;
        }
        // Scroll the preview panel
        (KeyModifiers::CONTROL, KeyCode::Char('d')) | (_, KeyCode::PageDown) => {
            state.scroll_preview_down(PREVIEW_PAGE);
            return None;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) | (_, KeyCode::PageUp) => {
            state.scroll_preview_up(PREVIEW_PAGE);
            return None;
        }
        (_, KeyCode::Esc) => {
            state.clear_status();
            return None;
        }
        _ => {}
    }

    handle_form_key(state, key);

    if state.tab == Tab::Comments {
        handle_comments_key(state, key);
    }

    None
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.select_next_field(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev_field(),
        KeyCode::Enter | KeyCode::Char(' ') => state.activate_field(),
        KeyCode::Left | KeyCode::Char('h') => state.cycle_theme_back(),
        KeyCode::Right | KeyCode::Char('l') => state.cycle_theme_forward(),
        _ => {}
    }
}

fn handle_comments_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => state.commit_draft(),
        KeyCode::Char('d') | KeyCode::Delete => state.remove_selected_comment(),
        KeyCode::Char('J') => state.select_next_comment(),
        KeyCode::Char('K') => state.select_prev_comment(),
        _ => {}
    }
}

fn handle_editing_key(state: &mut AppState, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => state.stop_editing(),
        (_, KeyCode::Enter) => {
            if state.selected_field().is_multiline() {
                state.edit_push('\n');
            } else {
                state.stop_editing();
            }
        }
        (_, KeyCode::Backspace) => state.edit_pop(),
        (KeyModifiers::CONTROL, _) => {}
        (_, KeyCode::Char(c)) => state.edit_push(c),
        _ => {}
    }
}

fn request_export(state: &mut AppState) -> AsyncCommand {
    state.exports_in_flight += 1;
    state.set_status("Exporting...");
    AsyncCommand::Export {
        tree: state.preview_snapshot(),
    }
}

fn open_last_export(state: &mut AppState) {
    let Some(path) = state.last_export.clone() else {
        state.set_status("Nothing exported yet (press e)");
        return;
    };
    match open::that(&path) {
        Ok(()) => state.set_status(format!("Opened {}", path.display())),
        Err(e) => {
            tracing::warn!("Failed to open {}: {e}", path.display());
            state.set_error(format!("❌ Could not open {}", path.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::app::state::SelectedField;
    use crate::models::{ColorTheme, CommentField, PostField};

    fn press(state: &mut AppState, code: KeyCode) -> Option<AsyncCommand> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Editing);

        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
        assert_eq!(state.store.post().avatar_url, crate::models::DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_ctrl_c_quits_from_help() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Char('?'));
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn test_preview_scroll_keys() {
        let mut state = AppState::new(Config::default());
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
        );
        assert_eq!(state.preview_scroll, PREVIEW_PAGE);
        press(&mut state, KeyCode::PageDown);
        assert_eq!(state.preview_scroll, PREVIEW_PAGE * 2);
        press(&mut state, KeyCode::PageUp);
        press(&mut state, KeyCode::PageUp);
        press(&mut state, KeyCode::PageUp);
        assert_eq!(state.preview_scroll, 0);
    }

    #[test]
    fn test_q_is_text_while_editing() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Editing);
        type_text(&mut state, "q");
        assert!(!state.should_quit);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_body_enter_inserts_newline() {
        let mut state = AppState::new(Config::default());
        state.next_tab();
        while state.selected_field() != SelectedField::Draft(CommentField::BodyText) {
            press(&mut state, KeyCode::Down);
        }
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "a");
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "b");
        assert_eq!(state.store.draft().body_text, "a\nb");
        assert_eq!(state.mode, Mode::Editing);
    }

    #[test]
    fn test_export_snapshots_preview() {
        let mut state = AppState::new(Config::default());
        let cmd = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        match cmd {
            Some(AsyncCommand::Export { tree: Some(tree) }) => {
                assert_eq!(tree.post.header.display_name, "Zeoob");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(state.exports_in_flight, 1);
    }

    #[test]
    fn test_add_and_remove_comment_with_keys() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Tab);

        // display name, handle, avatar, body
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "A");
        press(&mut state, KeyCode::Esc);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "a");
        press(&mut state, KeyCode::Esc);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "hi");
        press(&mut state, KeyCode::Esc);

        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.store.post().comments.len(), 1);
        assert_eq!(state.store.draft().display_name, "");

        press(&mut state, KeyCode::Char('d'));
        assert!(state.store.post().comments.is_empty());
    }

    #[test]
    fn test_theme_field_cycles_with_arrows() {
        let mut state = AppState::new(Config::default());
        while state.selected_field() != SelectedField::Post(PostField::ColorTheme) {
            press(&mut state, KeyCode::Down);
        }
        press(&mut state, KeyCode::Right);
        assert_eq!(state.store.post().color_theme, ColorTheme::Dim);
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.store.post().color_theme, ColorTheme::Dark);
    }
}
