// image_processing.rs
use crate::utils::{Logger, measure_time};
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageError};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PNG_SUFFIX: &str = ".png";
pub const WEBP_SUFFIX: &str = ".webp";

/// Any failure while turning one PNG into a WebP file.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to open image: {0}")]
    Open(#[from] ImageError),

    #[error("WebP encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// The external codec used by the conversion runner.
pub trait WebpEncoder {
    /// Converts `input` into a WebP file at `output` and returns the number
    /// of bytes written.
    fn convert(&self, input: &Path, output: &Path, quality: u8) -> Result<u64, ConvertError>;
}

/// Decodes with `image` and encodes lossy WebP with libwebp.
pub struct LibWebpEncoder {
    logger: Logger,
}

impl LibWebpEncoder {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl WebpEncoder for LibWebpEncoder {
    fn convert(&self, input: &Path, output: &Path, quality: u8) -> Result<u64, ConvertError> {
        let (img, load_duration) = measure_time(|| load_image(input));
        let img = img?;
        self.logger.log(format!("Loading image {} took {:?}", input.display(), load_duration));

        let (webp_data, encode_duration) = measure_time(|| encode_to_webp(img, quality));
        let webp_data = webp_data?;
        self.logger.log(format!("Encoding to WebP at quality {} took {:?}", quality, encode_duration));

        let (save_result, save_duration) = measure_time(|| save_webp(&webp_data, output));
        save_result?;
        self.logger.log(format!("Saving {} took {:?}", output.display(), save_duration));

        Ok(webp_data.len() as u64)
    }
}

/// Sibling path with the trailing `.png` of the file name swapped for `.webp`.
pub fn webp_output_path(input: &Path) -> PathBuf {
    let renamed = input
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(PNG_SUFFIX))
        .map(|stem| format!("{}{}", stem, WEBP_SUFFIX));

    match renamed {
        Some(name) => input.with_file_name(name),
        None => input.with_extension("webp"),
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    ImageReader::open(path)?.decode()
}

// libwebp only accepts 8-bit RGB or RGBA buffers.
fn normalize_for_webp(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    }
}

fn encode_to_webp(img: DynamicImage, quality: u8) -> Result<Vec<u8>, ConvertError> {
    let img = normalize_for_webp(img);
    let encoder = webp::Encoder::from_image(&img)
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    let webp = encoder.encode(f32::from(quality));
    Ok(webp.to_vec())
}

fn save_webp(webp_data: &[u8], output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(webp_data)?;
    file.flush()
}
