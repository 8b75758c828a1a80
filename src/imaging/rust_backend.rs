//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, BMP) | `image` crate (pure Rust decoders) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder`, quality 90 |
//! | Encode → PNG | `DynamicImage::write_to` |
//! | Encode → BMP | `DynamicImage::write_to` |

use super::backend::{BackendError, Dimensions, ImageBackend, OutputFormat};
use image::{DynamicImage, ImageEncoder, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Quality for JPEG re-encodes. Crops are written once and kept, so this
/// stays on the high side.
const JPEG_QUALITY: u8 = 90;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::decode(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| BackendError::decode(path, e))
    }

    fn encode(&self, image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, BackendError> {
        let mut buf = Vec::new();
        match format {
            OutputFormat::Jpeg => {
                // The JPEG encoder rejects alpha; flatten to RGB first
                let rgb = image.to_rgb8();
                image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut Cursor::new(&mut buf),
                    JPEG_QUALITY,
                )
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| BackendError::encode(format, e))?;
            }
            OutputFormat::Png => {
                image
                    .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                    .map_err(|e| BackendError::encode(format, e))?;
            }
            OutputFormat::Bmp => {
                image
                    .write_to(&mut Cursor::new(&mut buf), ImageFormat::Bmp)
                    .map_err(|e| BackendError::encode(format, e))?;
            }
        }
        Ok(buf)
    }
}
