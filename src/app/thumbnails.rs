// thumbnails.rs
use crate::app::selection::Selection;
use crate::utils::Logger;
use egui::{ColorImage, TextureHandle, Vec2};
use image::ImageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Longest edge of a decoded preview, in pixels.
pub const THUMBNAIL_SIZE: u32 = 256;

pub enum Thumbnail {
    Ready(TextureHandle),
    Failed(String),
}

/// Preview textures keyed by path, pruned whenever the selection changes.
pub struct ThumbnailCache {
    entries: HashMap<PathBuf, Thumbnail>,
    generation: Option<u64>,
    logger: Logger,
}

impl ThumbnailCache {
    pub fn new(logger: Logger) -> Self {
        Self { entries: HashMap::new(), generation: None, logger }
    }

    /// Drops previews of files that are no longer selected. Returns true
    /// when the grid had to be rebuilt.
    pub fn sync(&mut self, selection: &Selection) -> bool {
        if self.generation == Some(selection.generation()) {
            return false;
        }
        self.entries.retain(|path, _| selection.contains(path));
        self.generation = Some(selection.generation());
        true
    }

    pub fn get_or_load(&mut self, ctx: &egui::Context, path: &Path) -> &Thumbnail {
        let logger = &self.logger;
        self.entries.entry(path.to_path_buf()).or_insert_with(|| {
            match load_preview(path, THUMBNAIL_SIZE) {
                Ok(image) => Thumbnail::Ready(ctx.load_texture(
                    path.to_string_lossy(),
                    image,
                    egui::TextureFilter::Linear,
                )),
                Err(e) => {
                    logger.warn(format!("No preview for {}: {}", path.display(), e));
                    Thumbnail::Failed(e.to_string())
                }
            }
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Decodes `path` and downsizes it so neither edge exceeds `max_edge`.
pub fn load_preview(path: &Path, max_edge: u32) -> Result<ColorImage, ImageError> {
    let img = image::open(path)?;
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };
    let size = [img.width() as usize, img.height() as usize];
    let rgba = img.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Largest size with the aspect ratio of `image` that fits in a
/// `max_edge` square. Images are never scaled up.
pub fn fit_within(image: Vec2, max_edge: f32) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 || max_edge <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (max_edge / image.x).min(max_edge / image.y).min(1.0);
    image * scale
}
