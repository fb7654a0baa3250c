//! chirpmock - mock up a tweet in the terminal and export it as a PNG
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chirpmock::export::{Exporter, PngSerializer};
use chirpmock::{ColorTheme, Config, Post};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Run => chirpmock::app::run(),
        Command::Export { theme, out } => export_cli(theme, out),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    Export {
        theme: Option<ColorTheme>,
        out: Option<PathBuf>,
    },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "export" => {
            let mut theme = None;
            let mut out = None;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--theme" | "-t" => {
                        let name = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing theme (light, dim or dark)"))?;
                        theme = Some(name.parse::<ColorTheme>()?);
                        i += 2;
                    }
                    "--out" | "-o" => {
                        let dir = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing output directory"))?;
                        out = Some(PathBuf::from(dir));
                        i += 2;
                    }
                    other => {
                        return Err(anyhow::anyhow!(
                            "Unknown export option: {other}\nRun 'chirpmock --help' for usage"
                        ));
                    }
                }
            }
            Ok(Command::Export { theme, out })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'chirpmock --help' for usage"
        )),
    }
}

fn export_cli(theme: Option<ColorTheme>, out: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let post = Post::with_theme(theme.unwrap_or(config.initial_theme));
    let tree = chirpmock::preview::render(&post);

    let dir = match out {
        Some(dir) => dir,
        None => config.resolved_export_dir()?,
    };
    let exporter = Exporter::new(PngSerializer::from_config(&config), dir);
    let path = exporter
        .export(Some(&tree))
        .context("Failed to export preview")?;

    println!("✓ Saved {}", path.display());
    Ok(())
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🐦 chirpmock - mock up a tweet and export it as an image

USAGE:
    chirpmock                          Launch the editor
    chirpmock [COMMAND]

COMMANDS:
    export [OPTIONS]                   Render the default tweet to tweet.png
      Options:
        -t, --theme <light|dim|dark>   Color theme (default: from config)
        -o, --out <dir>                Output directory (default: from config)
      Examples:
        chirpmock export
        chirpmock export --theme dark --out ~/Pictures

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    Editing
      Tab           Switch Tweet/Comments
      j/↓ k/↑       Move between fields
      Enter         Edit text / toggle / next theme
      ←/→           Change theme
      Esc           Finish editing

    Comments
      a             Add drafted comment
      J/K           Select comment
      d             Remove selected comment

    General
      e, Ctrl+S     Export tweet.png
      o             Open last export
      PgDn, Ctrl+D  Scroll preview down
      PgUp, Ctrl+U  Scroll preview up
      t             Change editor theme
      ?             Help
      q, Ctrl+C     Quit

CONFIG:
    {}
"#,
        chirpmock::LOGO,
        config_path
    );
}

fn print_version() {
    println!("chirpmock {}", chirpmock::VERSION);
}
