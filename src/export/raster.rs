//! Rasterizer: paints a [`Scene`] onto an RGBA canvas and encodes PNG.

use std::io::Cursor;

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use super::layout::{CHAR_WIDTH, PaintCommand, Scene};
use crate::preview::Rgb;

/// Paint a scene at the given pixel scale
pub fn paint(scene: &Scene, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let mut canvas = Canvas {
        image: RgbaImage::from_pixel(
            scene.width * scale,
            scene.height * scale,
            Rgba(scene.background.rgba()),
        ),
        scale,
    };

    canvas.outline(scene.width, scene.height, scene.border);

    for command in &scene.commands {
        match command {
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => canvas.fill_rect(*x, *y, *width, *height, *color),
            PaintCommand::FillCircle {
                cx,
                cy,
                radius,
                color,
            } => canvas.fill_circle(*cx, *cy, *radius, *color),
            PaintCommand::Text {
                x,
                y,
                text,
                color,
                bold,
            } => canvas.text(*x, *y, text, *color, *bold),
            PaintCommand::Icon { x, y, icon, color } => {
                canvas.bitmap(*x * scale, *y * scale, icon.bitmap(), *color);
            }
            PaintCommand::Image {
                x,
                y,
                width,
                height,
                pixels,
                round,
            } => canvas.image(*x, *y, *width, *height, pixels, *round),
        }
    }

    canvas.image
}

/// Encode as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Glyph for a character, `?` when the font has none
fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

struct Canvas {
    image: RgbaImage,
    scale: u32,
}

impl Canvas {
    /// Fill a physical-pixel rectangle, clipped to the canvas
    fn fill_physical(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let x_end = (x + width).min(self.image.width());
        let y_end = (y + height).min(self.image.height());
        let pixel = Rgba(color.rgba());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let s = self.scale;
        self.fill_physical(x * s, y * s, width * s, height * s, color);
    }

    fn outline(&mut self, width: u32, height: u32, color: Rgb) {
        self.fill_rect(0, 0, width, 1, color);
        self.fill_rect(0, height.saturating_sub(1), width, 1, color);
        self.fill_rect(0, 0, 1, height, color);
        self.fill_rect(width.saturating_sub(1), 0, 1, height, color);
    }

    fn fill_circle(&mut self, cx: u32, cy: u32, radius: u32, color: Rgb) {
        let s = self.scale;
        let (cx, cy, r) = (i64::from(cx * s), i64::from(cy * s), i64::from(radius * s));
        let pixel = Rgba(color.rgba());
        for py in (cy - r).max(0)..(cy + r).min(i64::from(self.image.height())) {
            for px in (cx - r).max(0)..(cx + r).min(i64::from(self.image.width())) {
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= r * r {
                    self.image.put_pixel(px as u32, py as u32, pixel);
                }
            }
        }
    }

    /// Draw an 8×8 bitmap with its top-left at a physical position
    fn bitmap(&mut self, x: u32, y: u32, rows: [u8; 8], color: Rgb) {
        let s = self.scale;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..8u32 {
                if bits & (1 << col) != 0 {
                    self.fill_physical(x + col * s, y + row as u32 * s, s, s, color);
                }
            }
        }
    }

    fn text(&mut self, x: u32, y: u32, text: &str, color: Rgb, bold: bool) {
        let s = self.scale;
        for (i, c) in text.chars().enumerate() {
            let gx = (x + i as u32 * CHAR_WIDTH) * s;
            if gx >= self.image.width() {
                break;
            }
            let rows = glyph(c);
            self.bitmap(gx, y * s, rows, color);
            if bold {
                self.bitmap(gx + 1, y * s, rows, color);
            }
        }
    }

    /// Cover-fit an image into a logical box, optionally clipped to a circle
    fn image(&mut self, x: u32, y: u32, width: u32, height: u32, pixels: &RgbaImage, round: bool) {
        let s = self.scale;
        let (tw, th) = (width * s, height * s);
        let (iw, ih) = pixels.dimensions();
        if tw == 0 || th == 0 || iw == 0 || ih == 0 {
            return;
        }

        let factor = (f64::from(tw) / f64::from(iw)).max(f64::from(th) / f64::from(ih));
        let nw = ((f64::from(iw) * factor).ceil() as u32).max(tw);
        let nh = ((f64::from(ih) * factor).ceil() as u32).max(th);
        let resized = imageops::resize(pixels, nw, nh, FilterType::Triangle);
        let fitted = imageops::crop_imm(&resized, (nw - tw) / 2, (nh - th) / 2, tw, th).to_image();

        let (ox, oy) = (x * s, y * s);
        let radius = f64::from(tw.min(th)) / 2.0;
        for (px, py, src) in fitted.enumerate_pixels() {
            if round {
                let dx = f64::from(px) + 0.5 - f64::from(tw) / 2.0;
                let dy = f64::from(py) + 0.5 - f64::from(th) / 2.0;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
            }
            let (dx, dy) = (ox + px, oy + py);
            if dx >= self.image.width() || dy >= self.image.height() {
                continue;
            }
            let dst = self.image.get_pixel(dx, dy);
            self.image.put_pixel(dx, dy, blend(*dst, *src));
        }
    }
}

/// Source-over blend of `src` onto an opaque `dst`
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let alpha = u32::from(src[3]);
    let mix = |d: u8, s: u8| ((u32::from(s) * alpha + u32::from(d) * (255 - alpha)) / 255) as u8;
    Rgba([mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2]), 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::layout::Icon;
    use std::sync::Arc;

    const RED: Rgb = Rgb(255, 0, 0);
    const WHITE: Rgb = Rgb(255, 255, 255);

    fn scene(commands: Vec<PaintCommand>) -> Scene {
        Scene {
            width: 40,
            height: 20,
            background: WHITE,
            border: WHITE,
            commands,
        }
    }

    #[test]
    fn test_canvas_size_follows_scale() {
        let image = paint(&scene(Vec::new()), 3);
        assert_eq!(image.dimensions(), (120, 60));
        assert_eq!(image.get_pixel(60, 30), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let image = paint(
            &scene(vec![PaintCommand::FillRect {
                x: 30,
                y: 10,
                width: 100,
                height: 100,
                color: RED,
            }]),
            1,
        );
        assert_eq!(image.get_pixel(39, 19), &Rgba(RED.rgba()));
        assert_eq!(image.get_pixel(29, 9), &Rgba(WHITE.rgba()));
    }

    #[test]
    fn test_circle_leaves_corners() {
        let image = paint(
            &scene(vec![PaintCommand::FillCircle {
                cx: 10,
                cy: 10,
                radius: 8,
                color: RED,
            }]),
            1,
        );
        assert_eq!(image.get_pixel(10, 10), &Rgba(RED.rgba()));
        assert_eq!(image.get_pixel(3, 3), &Rgba(WHITE.rgba()));
    }

    #[test]
    fn test_text_sets_pixels() {
        let image = paint(
            &scene(vec![PaintCommand::Text {
                x: 0,
                y: 0,
                text: "H".to_string(),
                color: RED,
                bold: false,
            }]),
            1,
        );
        let red = image.pixels().filter(|p| **p == Rgba(RED.rgba())).count();
        assert!(red > 0);
    }

    #[test]
    fn test_icon_matches_bitmap() {
        let image = paint(
            &scene(vec![PaintCommand::Icon {
                x: 0,
                y: 0,
                icon: Icon::Like,
                color: RED,
            }]),
            1,
        );
        let expected: u32 = Icon::Like.bitmap().iter().map(|row| row.count_ones()).sum();
        let red = image.pixels().filter(|p| **p == Rgba(RED.rgba())).count();
        assert_eq!(red as u32, expected);
    }

    #[test]
    fn test_round_image_is_clipped() {
        let pixels = Arc::new(RgbaImage::from_pixel(4, 4, Rgba(RED.rgba())));
        let image = paint(
            &scene(vec![PaintCommand::Image {
                x: 0,
                y: 0,
                width: 20,
                height: 20,
                pixels,
                round: true,
            }]),
            1,
        );
        assert_eq!(image.get_pixel(10, 10), &Rgba(RED.rgba()));
        assert_eq!(image.get_pixel(1, 1), &Rgba(WHITE.rgba()));
    }

    #[test]
    fn test_blend_respects_alpha() {
        let out = blend(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 0]));
        assert_eq!(out, Rgba([0, 0, 0, 255]));
        let out = blend(Rgba([0, 0, 0, 255]), Rgba([200, 100, 50, 255]));
        assert_eq!(out, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_unknown_chars_fall_back() {
        assert_eq!(glyph('🐦'), glyph('?'));
        assert_ne!(glyph('·'), glyph('?'));
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_png(&paint(&scene(Vec::new()), 1)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
