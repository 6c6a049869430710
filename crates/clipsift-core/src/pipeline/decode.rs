//! Image decoding with format detection and validation.

use image::{DynamicImage, GenericImageView};
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder with configurable limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Original file size in bytes
    pub file_size: u64,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read and decode an image file, validating size limits.
    ///
    /// The format is detected from file content rather than trusted from the
    /// extension, so a PNG saved as `.jpg` still decodes.
    pub fn decode_file(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot stat file: {e}"),
        })?;
        let size_mb = metadata.len() / 1_000_000;
        if size_mb > self.limits.max_file_size_mb {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb,
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {e}"),
        })?;

        let decoded = Self::decode_bytes(bytes, path)?;
        if decoded.width > self.limits.max_image_dimension
            || decoded.height > self.limits.max_image_dimension
        {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width: decoded.width,
                height: decoded.height,
                max_dim: self.limits.max_image_dimension,
            });
        }
        Ok(decoded)
    }

    /// Decode an image from an in-memory byte buffer.
    fn decode_bytes(bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, PipelineError> {
        use std::io::Cursor;

        let file_size = bytes.len() as u64;
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {e}"),
            })?;
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            width,
            height,
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::new(width, height);
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_decode_valid_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        write_png(&path, 32, 16);

        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder.decode_file(&path).unwrap();
        assert_eq!(decoded.width, 32);
        assert_eq!(decoded.height, 16);
        assert!(decoded.file_size > 0);
    }

    #[test]
    fn test_decode_misnamed_extension() {
        // A PNG saved as .jpg must still decode (content-based detection)
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("misnamed.jpg");
        write_png(&path, 8, 8);

        let decoder = ImageDecoder::new(LimitsConfig::default());
        assert!(decoder.decode_file(&path).is_ok());
    }

    #[test]
    fn test_decode_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.jpg");
        std::fs::write(&path, b"this is not an image").unwrap();

        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder.decode_file(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_decode_missing_file() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder
            .decode_file(Path::new("/nonexistent/image.png"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn test_decode_rejects_oversized_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 64, 4);

        let decoder = ImageDecoder::new(LimitsConfig {
            max_file_size_mb: 100,
            max_image_dimension: 32,
        });
        let err = decoder.decode_file(&path).unwrap_err();
        assert!(matches!(err, PipelineError::ImageTooLarge { .. }));
    }
}
