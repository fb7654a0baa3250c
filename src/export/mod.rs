//! PNG export of the preview
//!
//! The exporter takes the already rendered [`VisualTree`], hands it to a
//! [`PreviewSerializer`] and writes the bytes to [`EXPORT_FILE_NAME`] in the
//! export directory. Nothing here touches the post being edited.

mod images;
pub mod layout;
pub mod raster;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::preview::VisualTree;

use layout::LayoutOptions;

/// Name of the exported file
pub const EXPORT_FILE_NAME: &str = "tweet.png";

/// Export failures
#[derive(Error, Debug)]
pub enum ExportError {
    /// Export was requested before anything was rendered
    #[error("Nothing to export: the preview has not been rendered")]
    NoPreview,

    /// PNG encoding failed
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing the file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A serializer implementation failed for its own reasons
    #[error("Serialization failed: {0}")]
    Serializer(String),
}

/// Turns a rendered preview into image bytes
pub trait PreviewSerializer: Send + Sync {
    /// Serialize the preview
    fn serialize(&self, tree: &VisualTree) -> Result<Vec<u8>, ExportError>;
}

/// Rasterizes the preview locally and encodes it as PNG
#[derive(Debug, Clone, Copy)]
pub struct PngSerializer {
    layout: LayoutOptions,
    scale: u32,
}

impl Default for PngSerializer {
    fn default() -> Self {
        Self::new(LayoutOptions::default().width, 2)
    }
}

impl PngSerializer {
    /// Largest accepted pixel scale
    pub const MAX_SCALE: u32 = 4;

    /// Widest accepted logical width
    pub const MAX_WIDTH: u32 = 2000;

    /// Create a serializer for a logical width and pixel scale.
    ///
    /// The width is clamped to `MIN_WIDTH..=MAX_WIDTH` and the scale to 1..=4.
    pub fn new(width: u32, scale: u32) -> Self {
        Self {
            layout: LayoutOptions {
                width: width.clamp(layout::MIN_WIDTH, Self::MAX_WIDTH),
                load_images: true,
            },
            scale: scale.clamp(1, Self::MAX_SCALE),
        }
    }

    /// Create a serializer from the export settings in the config
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.export_width, config.export_scale)
    }

    /// Never decode local image files; always draw placeholders
    pub fn without_images(mut self) -> Self {
        self.layout.load_images = false;
        self
    }

    /// Pixel scale in use
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Logical width in use
    pub fn width(&self) -> u32 {
        self.layout.width
    }
}

impl PreviewSerializer for PngSerializer {
    fn serialize(&self, tree: &VisualTree) -> Result<Vec<u8>, ExportError> {
        let scene = layout::layout(tree, self.layout);
        let image = raster::paint(&scene, self.scale);
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "rasterized preview"
        );
        Ok(raster::encode_png(&image)?)
    }
}

/// Writes serialized previews to the export directory
#[derive(Debug, Clone)]
pub struct Exporter<S: PreviewSerializer = PngSerializer> {
    serializer: S,
    dir: PathBuf,
}

impl<S: PreviewSerializer> Exporter<S> {
    /// Create an exporter writing into `dir`
    pub fn new(serializer: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            serializer,
            dir: dir.into(),
        }
    }

    /// Export directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the exported file
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(EXPORT_FILE_NAME)
    }

    /// Serialize the preview and write it to [`Self::output_path`].
    ///
    /// `tree` is `None` when nothing has been rendered yet.
    pub fn export(&self, tree: Option<&VisualTree>) -> Result<PathBuf, ExportError> {
        let tree = tree.ok_or(ExportError::NoPreview)?;
        let bytes = self.serializer.serialize(tree)?;

        let path = self.output_path();
        std::fs::create_dir_all(&self.dir)
            .and_then(|()| std::fs::write(&path, &bytes))
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
