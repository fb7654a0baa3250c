//! # chirpmock 🐦
//!
//! A terminal editor for mocking up a tweet and exporting it as a PNG.
//!
//! ## Overview
//!
//! chirpmock holds one post in memory: author, text, timestamps, engagement
//! counts, badges and a list of comments. Every edit re-renders a live
//! preview in the chosen color theme (light, dim or dark), and the preview can
//! be written to `tweet.png` at any time.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Form, key handling and the main event loop                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Store       │ │    Preview      │ │     Export      │
//! │                 │ │                 │ │                 │
//! │ • Post          │ │ • VisualTree    │ │ • Layout        │
//! │ • Draft comment │ │ • Palettes      │ │ • Rasterize     │
//! │ • Observer      │ │ • PreviewCache  │ │ • tweet.png     │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │     Theme       │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • Editor chrome │ │ • Post          │
//! │ • Export opts   │ │ • ratatui-themes│ │ • Comment       │
//! │ • Paths         │ │                 │ │ • Fields        │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`app`] - TUI application state and event loop
//! - [`config`] - Configuration management
//! - [`export`] - Rasterizing the preview and writing `tweet.png`
//! - [`models`] - Post, comment and editable field definitions
//! - [`preview`] - Projection of a post into a drawable tree
//! - [`store`] - The edited post, the draft comment and change notification
//! - [`theme`] - Editor chrome themes via ratatui-themes
//!
//! ## Example
//!
//! ```no_run
//! use chirpmock::export::{Exporter, PngSerializer};
//! use chirpmock::{ColorTheme, EditorStore, FieldValue, Post, PostField, PreviewCache};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut store = EditorStore::with_observer(Post::default(), PreviewCache::default());
//!     store.set_post_field(PostField::ColorTheme, FieldValue::Theme(ColorTheme::Dark))?;
//!
//!     let exporter = Exporter::new(PngSerializer::default(), ".");
//!     exporter.export(store.observer().current())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::return_self_not_must_use)]

pub mod app;
pub mod config;
pub mod export;
pub mod models;
pub mod paths;
pub mod preview;
pub mod store;
pub mod theme;

// Re-export main types for convenience
pub use app::AppState;
pub use config::Config;
pub use export::{EXPORT_FILE_NAME, ExportError, Exporter, PngSerializer, PreviewSerializer};
pub use models::{
    ColorTheme, Comment, CommentField, FieldError, FieldKind, FieldValue, Post, PostField,
};
pub use preview::{PreviewCache, VisualTree, render};
pub use store::{EditorStore, PostObserver};
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
       __    _                              __
  ____/ /_  (_)________ ___  ____  _____/ /__
 / ___/ __ \/ / ___/ __ `__ \/ __ \/ ___/ //_/
/ /__/ / / / / /  / / / / / / /_/ / /__/ ,<
\___/_/ /_/_/_/  /_/ /_/ /_/\____/\___/_/|_|
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
