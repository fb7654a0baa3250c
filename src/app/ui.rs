//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::state::{AppState, Mode, Tab};
use crate::models::{ColorTheme, CommentField, FieldValue, PostField};
use crate::preview::{Card, Highlight, Palette, Rgb, VisualTree};
use crate::theme::ThemeColors;

/// App icon
const ICON: &str = "🐦";

/// Width of the label column in the forms
const LABEL_WIDTH: usize = 20;

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_tabs(frame, state, chunks[0]);
    render_main(frame, state, chunks[1]);
    render_status_bar(frame, state, chunks[2]);

    if state.mode == Mode::Help {
        render_help_popup(frame, state);
    }
}

fn render_tabs(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let titles: Vec<Line> = [Tab::Post, Tab::Comments]
        .iter()
        .map(|tab| {
            let marker = if *tab == state.tab { "●" } else { "○" };
            Line::from(format!("{marker}  {}", tab.name()))
        })
        .collect();

    let selected = match state.tab {
        Tab::Post => 0,
        Tab::Comments => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block())
                .title(format!(" {ICON} chirpmock "))
                .title_style(colors.text_primary()),
        )
        .select(selected)
        .style(colors.tab())
        .highlight_style(colors.tab_active())
        .divider(Span::styled(" │ ", colors.text_dim()));

    frame.render_widget(tabs, area);
}

fn render_main(frame: &mut Frame, state: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    match state.tab {
        Tab::Post => render_post_form(frame, state, columns[0]),
        Tab::Comments => render_comments_form(frame, state, columns[0]),
    }
    render_preview(frame, state, columns[1]);
}

fn render_post_form(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = PostField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field_item(
                &colors,
                field.label(),
                &state.store.post().get(*field),
                i == state.post_cursor,
                i == state.post_cursor && state.mode == Mode::Editing,
                width,
            )
        })
        .collect();

    let list = List::new(items).block(form_block(&colors, " ✎ Tweet ", state.mode));
    frame.render_widget(list, area);
}

fn render_comments_form(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let width = area.width.saturating_sub(2) as usize;
    let draft_height = CommentField::all().len() as u16 + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(draft_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let items: Vec<ListItem> = CommentField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field_item(
                &colors,
                field.label(),
                &state.store.draft().get(*field),
                i == state.draft_cursor,
                i == state.draft_cursor && state.mode == Mode::Editing,
                width,
            )
        })
        .collect();
    let draft = List::new(items).block(form_block(&colors, " ✎ New comment ", state.mode));
    frame.render_widget(draft, rows[0]);

    let ready = state.store.draft().is_complete();
    let hint = Paragraph::new(Line::from(vec![
        Span::styled(" a", colors.key_hint()),
        Span::styled(": add comment ", colors.text_dim()),
        if ready {
            Span::styled("✓ ready", colors.text_success())
        } else {
            Span::styled("(name, username and text required)", colors.text_warning())
        },
    ]));
    frame.render_widget(hint, rows[1]);

    let comments = &state.store.post().comments;
    let items: Vec<ListItem> = if comments.is_empty() {
        vec![ListItem::new(Line::styled("  No comments yet", colors.text_dim()))]
    } else {
        comments
            .iter()
            .enumerate()
            .map(|(i, comment)| {
                let is_selected = i == state.selected_comment;
                let cursor = if is_selected { "▸" } else { " " };
                let text = format!(
                    "{cursor} {} @{}: {}",
                    comment.display_name,
                    comment.handle,
                    comment.body_text.replace('\n', " ")
                );
                let style = if is_selected {
                    colors.selected()
                } else {
                    colors.text()
                };
                ListItem::new(Line::styled(fit(&text, width), style))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block())
            .title(format!(" 💬 Current comments ({}) ", comments.len()))
            .title_style(colors.text_primary()),
    );

    // Keep the selected comment in view
    let mut list_state = ListState::default();
    if !comments.is_empty() {
        list_state.select(Some(state.selected_comment));
    }
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}

fn form_block<'a>(colors: &ThemeColors, title: &'a str, mode: Mode) -> Block<'a> {
    let border = if mode == Mode::Editing {
        colors.block_focus()
    } else {
        colors.block()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(title)
        .title_style(colors.text_primary())
}

fn field_item(
    colors: &ThemeColors,
    label: &str,
    value: &FieldValue,
    is_selected: bool,
    is_editing: bool,
    width: usize,
) -> ListItem<'static> {
    let cursor = if is_selected { "▸" } else { " " };
    let label = format!("{cursor} {label:<LABEL_WIDTH$}");
    let room = width.saturating_sub(label.width());

    let value_span = match value {
        FieldValue::Text(text) => {
            let shown = text.replace('\n', "⏎");
            if is_editing {
                Span::styled(fit_tail(&format!("{shown}▏"), room), colors.text_primary())
            } else {
                Span::styled(fit(&shown, room), colors.text())
            }
        }
        FieldValue::Flag(flag) => {
            if *flag {
                Span::styled("[x]", colors.text_success())
            } else {
                Span::styled("[ ]", colors.text_dim())
            }
        }
        FieldValue::Theme(current) => {
            let options: Vec<String> = ColorTheme::all()
                .iter()
                .map(|theme| {
                    let mark = if theme == current { "●" } else { "○" };
                    format!("{mark} {}", theme.name())
                })
                .collect();
            Span::styled(fit(&options.join("  "), room), colors.text())
        }
    };

    let line = Line::from(vec![Span::styled(label, colors.text_dim()), value_span]);
    let item = ListItem::new(line);
    if is_selected {
        item.style(colors.selected())
    } else {
        item
    }
}

fn render_preview(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let Some(tree) = state.preview() else {
        let empty = Paragraph::new(Line::styled("  Nothing rendered yet", colors.text_dim()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(colors.block()),
            );
        frame.render_widget(empty, area);
        return;
    };

    let palette = &tree.palette;
    let width = area.width.saturating_sub(4) as usize;
    let lines = tree_lines(tree, width);

    // Never scroll past the last page
    let visible = area.height.saturating_sub(2);
    let max_scroll = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(visible);
    let scroll = state.preview_scroll.min(max_scroll);
    let title = if max_scroll > 0 {
        format!(
            " Preview · {} ({}/{}) ",
            tree.theme.name(),
            scroll + 1,
            max_scroll + 1
        )
    } else {
        format!(" Preview · {} ", tree.theme.name())
    };

    let preview = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(tui(palette.border)))
                .style(Style::default().bg(tui(palette.background)))
                .title(title)
                .title_style(Style::default().fg(tui(palette.muted))),
        )
        .style(Style::default().bg(tui(palette.background)).fg(tui(palette.text)))
        .scroll((scroll, 0));

    frame.render_widget(preview, area);
}

/// Terminal lines for the whole preview
fn tree_lines(tree: &VisualTree, width: usize) -> Vec<Line<'static>> {
    let palette = &tree.palette;
    let mut lines = card_lines(&tree.post, palette, width, 0);

    for comment in &tree.comments {
        lines.push(Line::styled(
            format!("  {}", "─".repeat(width.saturating_sub(2))),
            Style::default().fg(tui(palette.border)),
        ));
        lines.extend(card_lines(comment, palette, width, 2));
    }

    lines
}

fn card_lines(card: &Card, palette: &Palette, width: usize, indent: usize) -> Vec<Line<'static>> {
    let pad = " ".repeat(indent);
    let text = Style::default().fg(tui(palette.text));
    let muted = Style::default().fg(tui(palette.muted));
    let inner = width.saturating_sub(indent).max(1);

    let mut lines = Vec::new();

    // Header
    let mut header = vec![
        Span::raw(pad.clone()),
        Span::styled(format!("({}) ", card.avatar.initial), muted),
        Span::styled(card.header.display_name.clone(), text.add_modifier(Modifier::BOLD)),
    ];
    if card.header.verified {
        header.push(Span::styled(" ✔", Style::default().fg(tui(palette.verified))));
    }
    header.push(Span::styled(format!(" {}", card.header.handle), muted));
    if let Some(time) = &card.header.relative_time {
        header.push(Span::styled(format!(" · {time}"), muted));
    }
    lines.push(Line::from(header));

    for row in textwrap::wrap(&card.body, inner) {
        lines.push(Line::styled(format!("{pad}{row}"), text));
    }

    if let Some(url) = &card.media {
        lines.push(Line::styled(
            format!("{pad}🖼  {}", fit(url, inner.saturating_sub(3))),
            Style::default().fg(tui(palette.border)),
        ));
    }

    if let Some(meta) = &card.meta {
        lines.push(Line::styled(format!("{pad}{}", fit(&meta.text(), inner)), muted));
    }

    if let Some(banner) = &card.fact_check {
        let panel = Style::default().bg(tui(palette.fact_check_background));
        lines.push(Line::from(vec![
            Span::raw(pad.clone()),
            Span::styled(
                format!(" {} ", banner.label),
                text.bg(tui(palette.badge_background))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        for row in textwrap::wrap(banner.text, inner.saturating_sub(1).max(1)) {
            lines.push(Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(format!(" {row}"), panel.fg(tui(palette.text))),
            ]));
        }
    }

    // Engagement row, four equal cells
    let cell = (inner / card.actions.len()).max(1);
    let mut actions = vec![Span::raw(pad)];
    for button in &card.actions {
        let color = match button.highlight {
            Highlight::None => palette.muted,
            Highlight::Liked => palette.liked,
            Highlight::Reposted => palette.reposted,
        };
        let label = match &button.label {
            Some(label) => format!("{} {label}", button.action.symbol()),
            None => button.action.symbol().to_string(),
        };
        let gap = cell.saturating_sub(label.width());
        actions.push(Span::styled(
            format!("{label}{}", " ".repeat(gap)),
            Style::default().fg(tui(color)),
        ));
    }
    lines.push(Line::from(actions));
    lines.push(Line::from(""));

    lines
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    // Spinner animation frames
    const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    let busy = if state.exports_in_flight > 0 {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!("{} ", SPINNER[frame_idx])
    } else {
        String::new()
    };

    let content = if state.mode == Mode::Editing {
        vec![
            Span::styled(" ✎ editing  ", colors.text_primary()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(": done  ", colors.text_dim()),
            Span::styled("Enter", colors.key_hint()),
            Span::styled(": done / newline in text", colors.text_dim()),
        ]
    } else if !state.status.is_empty() {
        vec![
            Span::raw(" "),
            Span::styled(busy, colors.text_primary()),
            Span::styled(
                state.status.clone(),
                if state.status_is_error {
                    colors.text_error()
                } else {
                    colors.text_primary()
                },
            ),
        ]
    } else {
        vec![
            Span::raw(" "),
            Span::styled(busy, colors.text_primary()),
            Span::styled("Tab", colors.key_hint()),
            Span::styled(": tweet/comments  ", colors.text_dim()),
            Span::styled("Enter", colors.key_hint()),
            Span::styled(": edit  ", colors.text_dim()),
            Span::styled("e", colors.key_hint()),
            Span::styled(": export  ", colors.text_dim()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_dim()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_dim()),
        ]
    };

    let status = Paragraph::new(Line::from(content)).style(Style::default().bg(colors.selection));
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("  {title}"),
            colors.text_primary().add_modifier(Modifier::BOLD),
        ))
    };
    let key = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<17}"), colors.key_hint()),
            Span::styled(what, colors.text()),
        ])
    };

    let help_content = vec![
        Line::from(""),
        section("Editing"),
        key("Tab", "Switch Tweet/Comments"),
        key("j/k or ↑/↓", "Move between fields"),
        key("Enter / Space", "Edit text, toggle switch, next theme"),
        key("h/l or ←/→", "Change theme"),
        key("Esc", "Finish editing"),
        Line::from(""),
        section("Comments"),
        key("a", "Add the drafted comment"),
        key("J/K", "Select comment"),
        key("d / Delete", "Remove selected comment"),
        Line::from(""),
        section("General"),
        key("e / Ctrl+S", "Export tweet.png"),
        key("o", "Open last export"),
        key("PgDn / Ctrl+D", "Scroll preview down"),
        key("PgUp / Ctrl+U", "Scroll preview up"),
        key("t", "Cycle editor theme"),
        key("?", "Toggle help"),
        key("q / Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", colors.text_dim()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(" or ", colors.text_dim()),
            Span::styled("?", colors.key_hint()),
            Span::styled(" to close", colors.text_dim()),
        ]),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block_focus())
                .style(Style::default().bg(colors.bg))
                .title(" ⌨ Keyboard Shortcuts ")
                .title_style(colors.text_primary()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

const fn tui(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Cut `text` to `max` columns, ending with `…` when shortened
fn fit(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Keep the last `max` columns of `text`, so the edit cursor stays visible
fn fit_tail(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut kept = Vec::new();
    let mut used = 1;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        kept.push(c);
        used += w;
    }
    let mut out = String::from("…");
    out.extend(kept.into_iter().rev());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Comment, Post};
    use crate::preview::render as render_tree;
    use ratatui::{Terminal, backend::TestBackend};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello world", 6), "hello…");
        assert_eq!(fit_tail("hello world", 6), "…world");
    }

    #[test]
    fn test_preview_lines_follow_tree() {
        let mut post = Post::default();
        post.show_fact_check_banner = true;
        post.comments.push(Comment::new("Ann", "ann", "reply"));
        let lines: Vec<String> = tree_lines(&render_tree(&post), 60)
            .iter()
            .map(line_text)
            .collect();

        assert!(lines[0].contains("Zeoob"));
        assert!(lines[0].contains("@zeooboffical"));
        assert!(lines.iter().any(|l| l.contains("Fact-check warning")));
        assert!(lines.iter().any(|l| l.contains("4:17 PM · Jan 08, 2024")));
        assert!(lines.iter().any(|l| l.starts_with("  (A) Ann")));
    }

    fn screen(state: &AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn with_many_comments(count: usize) -> AppState {
        let mut state = AppState::new(Config::default());
        state.next_tab();
        for i in 0..count {
            for (field, text) in [
                (CommentField::DisplayName, format!("Name{i}")),
                (CommentField::Handle, format!("h{i}")),
                (CommentField::BodyText, format!("reply {i}")),
            ] {
                state.store.set_draft_field(field, text.into()).unwrap();
            }
            state.commit_draft();
        }
        state
    }

    #[test]
    fn test_selected_comment_stays_visible() {
        let mut state = with_many_comments(40);
        assert_eq!(state.selected_comment, 39);

        let rows = screen(&state, 120, 30);
        assert!(rows.iter().any(|row| row.contains("▸ Name39 @h39: reply 39")));
        assert!(!rows.iter().any(|row| row.contains("Name0 @h0:")));

        for _ in 0..39 {
            state.select_prev_comment();
        }
        let rows = screen(&state, 120, 30);
        assert!(rows.iter().any(|row| row.contains("▸ Name0 @h0: reply 0")));
    }

    #[test]
    fn test_preview_scrolls_to_last_comment() {
        let mut state = with_many_comments(40);
        let rows = screen(&state, 120, 30);
        assert!(rows.iter().any(|row| row.contains("Zeoob")));
        assert!(!rows.iter().any(|row| row.contains("@h39 · 4h")));

        state.scroll_preview_down(u16::MAX);
        let rows = screen(&state, 120, 30);
        assert!(rows.iter().any(|row| row.contains("@h39 · 4h")));
        assert!(rows.iter().any(|row| row.contains("reply 39")));
    }

    #[test]
    fn test_error_status_is_shown() {
        let mut state = AppState::new(Config::default());
        state.set_error("❌ Export failed: disk full");
        let rows = screen(&state, 120, 30);
        assert!(rows[29].contains("Export failed: disk full"));
    }

    #[test]
    fn test_render_whole_frame() {
        let state = AppState::new(Config::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Username"));
        assert!(text.contains("Zeoob"));
    }
}
