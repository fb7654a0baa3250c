//! Box layout of the preview for raster export.
//!
//! Coordinates are logical pixels; text uses 8×8 glyphs on a 12px line.
//! The rasterizer multiplies everything by the export scale.

use std::sync::Arc;

use image::RgbaImage;

use super::images;
use crate::preview::{
    ActionButton, Avatar, Card, FactCheck, Header, Highlight, Palette, Rgb, VisualTree,
};

/// Glyph width
pub const CHAR_WIDTH: u32 = 8;
/// Line height
pub const LINE_HEIGHT: u32 = 12;
/// Outer padding
pub const PADDING: u32 = 16;
/// Gap between avatar and content, and between blocks
pub const GAP: u32 = 12;
/// Height of the attached image region
pub const MEDIA_HEIGHT: u32 = 180;
/// Narrowest layout width
pub const MIN_WIDTH: u32 = 240;

/// Small built-in icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Speech bubble
    Reply,
    /// Two arrows
    Repost,
    /// Heart
    Like,
    /// Arrow out of a tray
    Share,
    /// Check mark (verification badge)
    Check,
}

impl Icon {
    /// 8×8 bitmap, one byte per row, least significant bit leftmost
    pub const fn bitmap(&self) -> [u8; 8] {
        match self {
            Self::Reply => [0x7E, 0x81, 0x81, 0x81, 0x7E, 0x04, 0x02, 0x00],
            Self::Repost => [0x02, 0x3F, 0x22, 0x20, 0x04, 0x44, 0xFC, 0x40],
            Self::Like => [0x66, 0xFF, 0xFF, 0xFF, 0x7E, 0x3C, 0x18, 0x00],
            Self::Share => [0x18, 0x3C, 0x5A, 0x18, 0x18, 0x81, 0x81, 0xFF],
            Self::Check => [0x00, 0x80, 0x40, 0x21, 0x12, 0x0C, 0x00, 0x00],
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Filled rectangle
    FillRect {
        /// Left edge
        x: u32,
        /// Top edge
        y: u32,
        /// Width
        width: u32,
        /// Height
        height: u32,
        /// Fill
        color: Rgb,
    },
    /// Filled circle
    FillCircle {
        /// Center x
        cx: u32,
        /// Center y
        cy: u32,
        /// Radius
        radius: u32,
        /// Fill
        color: Rgb,
    },
    /// Single line of text, `y` is the glyph top
    Text {
        /// Left edge
        x: u32,
        /// Glyph top
        y: u32,
        /// The run
        text: String,
        /// Glyph color
        color: Rgb,
        /// Drawn twice, one pixel apart
        bold: bool,
    },
    /// 8×8 icon
    Icon {
        /// Left edge
        x: u32,
        /// Top edge
        y: u32,
        /// Which bitmap
        icon: Icon,
        /// Ink color
        color: Rgb,
    },
    /// Decoded image, cover-fitted into the box
    Image {
        /// Left edge
        x: u32,
        /// Top edge
        y: u32,
        /// Box width
        width: u32,
        /// Box height
        height: u32,
        /// Source pixels
        pixels: Arc<RgbaImage>,
        /// Clip to the inscribed circle
        round: bool,
    },
}

/// A laid out preview
#[derive(Debug, Clone)]
pub struct Scene {
    /// Width in logical pixels
    pub width: u32,
    /// Height in logical pixels
    pub height: u32,
    /// Canvas fill
    pub background: Rgb,
    /// Outer border
    pub border: Rgb,
    /// Drawing operations, in paint order
    pub commands: Vec<PaintCommand>,
}

impl Scene {
    /// All text runs, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            PaintCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Layout settings
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Canvas width in logical pixels
    pub width: u32,
    /// Whether local image files are decoded
    pub load_images: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 600,
            load_images: true,
        }
    }
}

/// Lay out a preview tree
pub fn layout(tree: &VisualTree, options: LayoutOptions) -> Scene {
    let mut builder = Builder {
        width: options.width.max(MIN_WIDTH),
        load_images: options.load_images,
        palette: tree.palette,
        commands: Vec::new(),
    };

    let mut y = builder.card(&tree.post, PADDING, PADDING);
    let column = PADDING + tree.post.avatar.size + GAP;
    for comment in &tree.comments {
        y += PADDING;
        builder.push(PaintCommand::FillRect {
            x: column,
            y,
            width: builder.right_edge().saturating_sub(column),
            height: 1,
            color: builder.palette.border,
        });
        y += PADDING;
        y = builder.card(comment, column, y);
    }

    Scene {
        width: builder.width,
        height: y + PADDING,
        background: tree.palette.background,
        border: tree.palette.border,
        commands: builder.commands,
    }
}

struct Builder {
    width: u32,
    load_images: bool,
    palette: Palette,
    commands: Vec<PaintCommand>,
}

impl Builder {
    fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    fn right_edge(&self) -> u32 {
        self.width - PADDING
    }

    fn text(&mut self, x: u32, y: u32, text: impl Into<String>, color: Rgb, bold: bool) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.push(PaintCommand::Text {
            x,
            y,
            text,
            color,
            bold,
        });
    }

    /// Lay out one card with its avatar at `(x, y)`; returns the bottom edge
    fn card(&mut self, card: &Card, x: u32, y: u32) -> u32 {
        self.avatar(&card.avatar, x, y);

        let cx = x + card.avatar.size + GAP;
        let cw = self.right_edge().saturating_sub(cx);
        let mut cy = y;

        self.header(&card.header, cx, cy, cw);
        cy += LINE_HEIGHT;

        if !card.body.is_empty() {
            cy += 4;
            for line in wrap(&card.body, cw) {
                self.text(cx, cy + 2, line, self.palette.text, false);
                cy += LINE_HEIGHT;
            }
        }

        if let Some(source) = &card.media {
            cy += GAP;
            self.media(source, cx, cy, cw);
            cy += MEDIA_HEIGHT;
        }

        if let Some(meta) = &card.meta {
            cy += 8;
            for line in wrap(&meta.text(), cw) {
                self.text(cx, cy + 2, line, self.palette.muted, false);
                cy += LINE_HEIGHT;
            }
        }

        if let Some(fact_check) = &card.fact_check {
            cy += GAP;
            cy = self.fact_check(fact_check, cx, cy, cw);
        }

        cy += GAP;
        self.actions(&card.actions, cx, cy, cw);
        cy += LINE_HEIGHT;

        cy.max(y + card.avatar.size)
    }

    fn avatar(&mut self, avatar: &Avatar, x: u32, y: u32) {
        let loaded = if self.load_images {
            images::load_local(&avatar.source)
        } else {
            None
        };
        if let Some(pixels) = loaded {
            self.push(PaintCommand::Image {
                x,
                y,
                width: avatar.size,
                height: avatar.size,
                pixels,
                round: true,
            });
            return;
        }

        let radius = avatar.size / 2;
        self.push(PaintCommand::FillCircle {
            cx: x + radius,
            cy: y + radius,
            radius,
            color: initial_color(avatar.initial),
        });
        self.text(
            x + radius - CHAR_WIDTH / 2,
            y + radius - CHAR_WIDTH / 2,
            avatar.initial.to_string(),
            Rgb(0xff, 0xff, 0xff),
            true,
        );
    }

    fn header(&mut self, header: &Header, x: u32, y: u32, width: u32) {
        let name = fit(&header.display_name, columns(width));
        let mut used = char_count(&name) * CHAR_WIDTH + 4;
        self.text(x, y + 2, name, self.palette.text, true);

        if header.verified && used + 16 <= width {
            self.push(PaintCommand::FillCircle {
                cx: x + used + 6,
                cy: y + 6,
                radius: 6,
                color: self.palette.verified,
            });
            self.push(PaintCommand::Icon {
                x: x + used + 2,
                y: y + 2,
                icon: Icon::Check,
                color: Rgb(0xff, 0xff, 0xff),
            });
            used += 16;
        }

        let mut rest = header.handle.clone();
        if let Some(time) = &header.relative_time {
            rest.push_str(" · ");
            rest.push_str(time);
        }
        let rest_columns = columns(width.saturating_sub(used));
        if rest_columns > 0 {
            self.text(x + used, y + 2, fit(&rest, rest_columns), self.palette.muted, false);
        }
    }

    fn media(&mut self, source: &str, x: u32, y: u32, width: u32) {
        let loaded = if self.load_images {
            images::load_local(source)
        } else {
            None
        };
        if let Some(pixels) = loaded {
            self.push(PaintCommand::Image {
                x,
                y,
                width,
                height: MEDIA_HEIGHT,
                pixels,
                round: false,
            });
            return;
        }

        self.framed_box(x, y, width, MEDIA_HEIGHT, self.palette.fact_check_background);
        let cols = columns(width.saturating_sub(24));
        self.text(x + 12, y + 12, "[image]", self.palette.muted, true);
        self.text(x + 12, y + 28, fit(source, cols), self.palette.muted, false);
    }

    fn fact_check(&mut self, fact_check: &FactCheck, x: u32, y: u32, width: u32) -> u32 {
        let inner = width.saturating_sub(24);
        let lines = wrap(fact_check.text, inner);
        let chip = 16;
        let height = 12 + chip + 8 + lines.len() as u32 * LINE_HEIGHT + 12;

        self.framed_box(x, y, width, height, self.palette.fact_check_background);
        self.push(PaintCommand::FillRect {
            x: x + 12,
            y: y + 12,
            width: char_count(fact_check.label) * CHAR_WIDTH + 12,
            height: chip,
            color: self.palette.badge_background,
        });
        self.text(x + 18, y + 16, fact_check.label, self.palette.text, true);

        let mut cy = y + 12 + chip + 8;
        for line in lines {
            self.text(x + 12, cy + 2, line, self.palette.text, false);
            cy += LINE_HEIGHT;
        }
        y + height
    }

    fn actions(&mut self, actions: &[ActionButton; 4], x: u32, y: u32, width: u32) {
        let slot = width / 4;
        for (i, button) in actions.iter().enumerate() {
            let bx = x + slot * i as u32;
            let color = match button.highlight {
                Highlight::None => self.palette.muted,
                Highlight::Liked => self.palette.liked,
                Highlight::Reposted => self.palette.reposted,
            };
            self.push(PaintCommand::Icon {
                x: bx,
                y: y + 2,
                icon: icon_for(button),
                color,
            });
            if let Some(label) = &button.label {
                let cols = columns(slot.saturating_sub(16));
                self.text(bx + 12, y + 2, fit(label, cols), color, false);
            }
        }
    }

    fn framed_box(&mut self, x: u32, y: u32, width: u32, height: u32, fill: Rgb) {
        self.push(PaintCommand::FillRect {
            x,
            y,
            width,
            height,
            color: self.palette.border,
        });
        self.push(PaintCommand::FillRect {
            x: x + 1,
            y: y + 1,
            width: width.saturating_sub(2),
            height: height.saturating_sub(2),
            color: fill,
        });
    }
}

const fn icon_for(button: &ActionButton) -> Icon {
    match button.action {
        crate::preview::Action::Reply => Icon::Reply,
        crate::preview::Action::Repost => Icon::Repost,
        crate::preview::Action::Like => Icon::Like,
        crate::preview::Action::Share => Icon::Share,
    }
}

/// Stable fallback avatar color for an initial
fn initial_color(initial: char) -> Rgb {
    const COLORS: [Rgb; 6] = [
        Rgb(0x1d, 0x9b, 0xf0),
        Rgb(0x79, 0x4b, 0xc4),
        Rgb(0xf9, 0x18, 0x80),
        Rgb(0x00, 0xba, 0x7c),
        Rgb(0xff, 0x7a, 0x00),
        Rgb(0x53, 0x64, 0x71),
    ];
    COLORS[initial as usize % COLORS.len()]
}

fn columns(width: u32) -> usize {
    (width / CHAR_WIDTH) as usize
}

fn char_count(text: &str) -> u32 {
    text.chars().count() as u32
}

/// Wrap text to the number of glyph columns that fit in `width`
fn wrap(text: &str, width: u32) -> Vec<String> {
    textwrap::wrap(text, columns(width).max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Truncate to `max` characters, ending in "..." when cut
fn fit(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}
