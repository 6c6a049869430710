//! Image preprocessing for CLIP inference.
//!
//! CLIP ViT-B/32 expects:
//! - Input size: 224×224 pixels, shortest edge resized then center cropped
//! - Normalization: per-channel (pixel/255 - mean) / std with CLIP constants
//! - Channel order: RGB
//! - Tensor layout: NCHW [batch, channels, height, width]

use image::{DynamicImage, GenericImageView};
use ndarray::Array4;

/// Number of color channels (RGB).
const CHANNELS: usize = 3;

/// CLIP normalization mean (R, G, B).
const NORM_MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];

/// CLIP normalization std (R, G, B).
const NORM_STD: [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_1];

/// Preprocess an image for CLIP inference.
///
/// Resizes so the shortest edge equals `image_size`, center-crops to a
/// square, converts to RGB, normalizes per channel, and returns an NCHW
/// tensor suitable for ONNX Runtime.
pub fn preprocess(image: &DynamicImage, image_size: u32) -> Array4<f32> {
    let (w, h) = image.dimensions();
    let (w, h) = (w.max(1), h.max(1));
    let scale = image_size as f32 / w.min(h) as f32;
    let new_w = ((w as f32 * scale).round() as u32).max(image_size);
    let new_h = ((h as f32 * scale).round() as u32).max(image_size);

    let resized = image.resize_exact(new_w, new_h, image::imageops::FilterType::CatmullRom);
    let cropped = resized.crop_imm(
        (new_w - image_size) / 2,
        (new_h - image_size) / 2,
        image_size,
        image_size,
    );
    let rgb = cropped.to_rgb8();

    let size = image_size as usize;
    let mut tensor = Array4::<f32>::zeros((1, CHANNELS, size, size));

    // Access raw RGB bytes and tensor slice directly to avoid per-pixel
    // bounds-checking overhead from get_pixel() and 4D ndarray indexing.
    let raw = rgb.as_raw();
    let tensor_data = tensor.as_slice_mut().unwrap();
    for (i, pixel) in raw.chunks_exact(3).enumerate() {
        let y = i / size;
        let x = i % size;
        for (c, &val) in pixel.iter().enumerate() {
            // NCHW layout: offset = c * size * size + y * size + x
            let idx = c * size * size + y * size + x;
            tensor_data[idx] = (val as f32 / 255.0 - NORM_MEAN[c]) / NORM_STD[c];
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn test_preprocess_shape() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let tensor = preprocess(&img, 224);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_shape_portrait() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(300, 900));
        let tensor = preprocess(&img, 224);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_shape_smaller_than_target() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(50, 70));
        let tensor = preprocess(&img, 224);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_normalization_range() {
        // White image: (1.0 - mean) / std per channel, all well above zero
        let img =
            DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, image::Rgb([255, 255, 255])));
        let tensor = preprocess(&img, 224);
        let expected_r = (1.0 - NORM_MEAN[0]) / NORM_STD[0];
        let max_val = tensor.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((max_val - expected_r).abs() < 0.01);

        // Black image: (0.0 - mean) / std, all below zero
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, image::Rgb([0, 0, 0])));
        let tensor = preprocess(&img, 224);
        assert!(tensor.iter().all(|&v| v < 0.0));
    }
}
