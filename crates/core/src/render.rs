//! Word-cloud rendering.
//!
//! The pipeline talks to rendering through the narrow [`CloudRenderer`]
//! trait so the backend is swappable without touching the driver. The
//! default backend is the `wcloud` crate. Generation and saving are one
//! call; the backend's image representation never crosses the trait.

use std::path::Path;

use wcloud::{WordCloud, WordCloudSize};

use crate::{OrdskyError, Result};

/// Frequency-based text-to-image renderer.
///
/// Implementations turn a non-empty text into an image whose word sizes
/// reflect word frequency, written to `path` as PNG. The caller guarantees
/// `text` is non-empty and that the parent directory exists.
pub trait CloudRenderer {
    /// Renders `text` onto a canvas of the given dimensions and writes it
    /// to `path`.
    fn render_to_file(&self, text: &str, width: u32, height: u32, path: &Path) -> Result<()>;
}

/// Default renderer backed by the `wcloud` crate.
#[derive(Debug, Clone, Default)]
pub struct WcloudRenderer;

impl CloudRenderer for WcloudRenderer {
    fn render_to_file(&self, text: &str, width: u32, height: u32, path: &Path) -> Result<()> {
        let size = WordCloudSize::FromDimensions { width, height };
        let image = WordCloud::default().generate_from_text(text, size, 1.0);

        image
            .save(path)
            .map_err(|e| OrdskyError::RenderError(format!("cannot save {}: {}", path.display(), e)))
    }
}
