//! Local image loading for avatars and attachments.
//!
//! Only files on disk are read. Remote URLs are never fetched; the layout
//! draws a placeholder for them instead.

use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};

/// Largest side kept after decoding
const MAX_DIMENSION: u32 = 1600;

/// Resolve a source string to an existing local file.
///
/// Accepts plain paths and `file://` URLs.
pub fn local_path(source: &str) -> Option<PathBuf> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }
    let path = if let Some(rest) = source.strip_prefix("file://") {
        rest
    } else if source.contains("://") || source.starts_with("data:") {
        return None;
    } else {
        source
    };
    let path = PathBuf::from(path);
    path.is_file().then_some(path)
}

/// Decode a local image, or `None` if the source is not a readable image file
pub fn load_local(source: &str) -> Option<Arc<RgbaImage>> {
    let path = local_path(source)?;
    match image::open(&path) {
        Ok(image) => {
            tracing::debug!("Loaded image {}", path.display());
            Some(Arc::new(resize_if_needed(image).to_rgba8()))
        }
        Err(e) => {
            tracing::warn!("Failed to load image {}: {e}", path.display());
            None
        }
    }
}

/// Shrink very large images before they are composed
fn resize_if_needed(image: DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return image;
    }

    let ratio = f64::from(width) / f64::from(height);
    let (new_width, new_height) = if width > height {
        (MAX_DIMENSION, (f64::from(MAX_DIMENSION) / ratio) as u32)
    } else {
        ((f64::from(MAX_DIMENSION) * ratio) as u32, MAX_DIMENSION)
    };

    image.resize(new_width, new_height, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_remote_urls_are_not_local() {
        assert!(local_path("https://example.com/a.png").is_none());
        assert!(local_path("http://example.com/a.png").is_none());
        assert!(local_path("data:image/png;base64,AAAA").is_none());
        assert!(local_path("").is_none());
    }

    #[test]
    fn test_missing_file_is_not_local() {
        assert!(local_path("/definitely/not/here.png").is_none());
    }

    #[test]
    fn test_load_plain_path_and_file_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let plain = load_local(path.to_str().unwrap()).unwrap();
        assert_eq!(plain.dimensions(), (4, 2));

        let url = format!("file://{}", path.display());
        assert!(load_local(&url).is_some());
    }

    #[test]
    fn test_non_image_file_fails_softly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(load_local(path.to_str().unwrap()).is_none());
    }

    #[test]
    fn test_large_image_is_shrunk() {
        let image = DynamicImage::new_rgba8(3200, 800);
        let resized = resize_if_needed(image);
        assert_eq!(resized.width(), MAX_DIMENSION);
        assert_eq!(resized.height(), 400);
    }
}
