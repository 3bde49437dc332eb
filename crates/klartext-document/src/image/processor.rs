// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: upscale, grayscale, contrast/brightness enhancement and
// padding. Operates on in-memory images using the `image` and `imageproc`
// crates.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, imageops};
use imageproc::map::map_colors;
use klartext_core::error::{KlartextError, Result};
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor` wrapping the
/// transformed image, enabling method chaining.
///
/// ```ignore
/// let png = ImageProcessor::open("capture.png")?
///     .scale(3)
///     .grayscale()
///     .adjust_contrast(3.0)
///     .adjust_brightness(1.1)
///     .pad(20, 255)
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            KlartextError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (PNG, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data).map_err(|err| {
            KlartextError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    /// Mean luminance of the image, rounded to the nearest integer.
    pub fn mean_luma(&self) -> u8 {
        let gray = self.image.to_luma8();
        let count = u64::from(gray.width()) * u64::from(gray.height());
        if count == 0 {
            return 0;
        }
        let sum: u64 = gray.pixels().map(|Luma([p])| u64::from(*p)).sum();
        ((sum + count / 2) / count) as u8
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Drop any alpha channel, keeping RGB.
    pub fn to_rgb(self) -> Self {
        Self {
            image: DynamicImage::ImageRgb8(self.image.to_rgb8()),
        }
    }

    /// Multiply both dimensions by `factor` using Lanczos3 filtering.
    #[instrument(skip(self), fields(factor))]
    pub fn scale(self, factor: u32) -> Self {
        if factor <= 1 {
            return self;
        }
        let width = self.image.width().saturating_mul(factor);
        let height = self.image.height().saturating_mul(factor);
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Upscaling image"
        );
        self.resize_exact(width, height)
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized = self
            .image
            .resize_exact(width, height, imageops::FilterType::Lanczos3);
        Self { image: resized }
    }

    /// Convert the image to 8-bit grayscale.
    #[instrument(skip(self))]
    pub fn grayscale(self) -> Self {
        debug!("Converting to grayscale");
        Self {
            image: DynamicImage::ImageLuma8(self.image.to_luma8()),
        }
    }

    /// Push every channel away from the image's mean luminance by `factor`.
    /// Values > 1.0 increase contrast; 1.0 is a no-op.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_contrast(self, factor: f32) -> Self {
        let mean = f32::from(self.mean_luma());
        debug!(mean, "Adjusting contrast");
        self.map_channels(|channel| clamp_channel(mean + factor * (f32::from(channel) - mean)))
    }

    /// Scale every channel by `factor`. Values > 1.0 brighten.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_brightness(self, factor: f32) -> Self {
        debug!("Adjusting brightness");
        self.map_channels(|channel| clamp_channel(f32::from(channel) * factor))
    }

    /// Surround the image with a `border`-pixel frame of gray level `fill`.
    /// The result is grayscale.
    #[instrument(skip(self), fields(border, fill))]
    pub fn pad(self, border: u32, fill: u8) -> Self {
        if border == 0 {
            return self;
        }
        let gray = self.image.to_luma8();
        let mut canvas = GrayImage::from_pixel(
            gray.width() + 2 * border,
            gray.height() + 2 * border,
            Luma([fill]),
        );
        imageops::overlay(&mut canvas, &gray, i64::from(border), i64::from(border));
        Self {
            image: DynamicImage::ImageLuma8(canvas),
        }
    }

    /// Apply `f` to every colour channel, leaving alpha untouched. Grayscale
    /// images stay grayscale; everything else is processed as RGBA.
    fn map_channels(self, f: impl Fn(u8) -> u8) -> Self {
        let image = match self.image {
            DynamicImage::ImageLuma8(gray) => {
                DynamicImage::ImageLuma8(map_colors(&gray, |Luma([p])| Luma([f(p)])))
            }
            other => {
                let rgba = other.to_rgba8();
                DynamicImage::ImageRgba8(map_colors(&rgba, |Rgba([r, g, b, a])| {
                    Rgba([f(r), f(g), f(b), a])
                }))
            }
        };
        Self { image }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            KlartextError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| KlartextError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> ImageProcessor {
        ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(GrayImage::from_fn(
            width,
            height,
            |x, y| Luma([f(x, y)]),
        )))
    }

    fn luma_at(processor: &ImageProcessor, x: u32, y: u32) -> u8 {
        processor.as_dynamic().to_luma8().get_pixel(x, y)[0]
    }

    #[test]
    fn scale_multiplies_dimensions() {
        let scaled = gray(10, 4, |_, _| 0).scale(3);
        assert_eq!((scaled.width(), scaled.height()), (30, 12));
    }

    #[test]
    fn scale_by_one_is_identity() {
        let scaled = gray(7, 5, |_, _| 9).scale(1);
        assert_eq!((scaled.width(), scaled.height()), (7, 5));
    }

    #[test]
    fn grayscale_produces_luma8() {
        let rgb = RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]));
        let out = ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(rgb)).grayscale();
        assert!(matches!(out.as_dynamic(), DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn mean_luma_rounds() {
        // Half 0, half 255: mean 127.5 rounds up.
        let img = gray(2, 1, |x, _| if x == 0 { 0 } else { 255 });
        assert_eq!(img.mean_luma(), 128);
        assert_eq!(gray(3, 3, |_, _| 42).mean_luma(), 42);
    }

    #[test]
    fn contrast_pivots_on_mean() {
        // Mean is 100; 90 -> 100 + 3 * -10 = 70, 110 -> 130.
        let img = gray(2, 1, |x, _| if x == 0 { 90 } else { 110 }).adjust_contrast(3.0);
        assert_eq!(luma_at(&img, 0, 0), 70);
        assert_eq!(luma_at(&img, 1, 0), 130);
    }

    #[test]
    fn contrast_clamps() {
        let img = gray(2, 1, |x, _| if x == 0 { 0 } else { 255 }).adjust_contrast(3.0);
        assert_eq!(luma_at(&img, 0, 0), 0);
        assert_eq!(luma_at(&img, 1, 0), 255);
    }

    #[test]
    fn brightness_is_multiplicative() {
        let img = gray(1, 1, |_, _| 100).adjust_brightness(1.1);
        assert_eq!(luma_at(&img, 0, 0), 110);
        let img = gray(1, 1, |_, _| 250).adjust_brightness(1.1);
        assert_eq!(luma_at(&img, 0, 0), 255);
        let img = gray(1, 1, |_, _| 0).adjust_brightness(1.1);
        assert_eq!(luma_at(&img, 0, 0), 0);
    }

    #[test]
    fn colour_adjustments_keep_alpha() {
        let rgba = image::RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 7]));
        let out = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(rgba)).adjust_brightness(2.0);
        assert_eq!(out.as_dynamic().to_rgba8().get_pixel(0, 0).0, [200, 200, 200, 7]);
    }

    #[test]
    fn pad_adds_white_border() {
        let padded = gray(4, 2, |_, _| 0).pad(20, 255);
        assert_eq!((padded.width(), padded.height()), (44, 42));
        assert_eq!(luma_at(&padded, 0, 0), 255);
        assert_eq!(luma_at(&padded, 19, 20), 255);
        assert_eq!(luma_at(&padded, 20, 20), 0);
        assert_eq!(luma_at(&padded, 23, 21), 0);
        assert_eq!(luma_at(&padded, 24, 21), 255);
    }

    #[test]
    fn png_round_trip_through_bytes() {
        let bytes = gray(3, 2, |x, y| (x * 10 + y) as u8).to_png_bytes().unwrap();
        let decoded = ImageProcessor::from_bytes(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
        assert_eq!(luma_at(&decoded, 2, 1), 21);
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = ImageProcessor::from_bytes(b"not an image").err().unwrap();
        assert!(matches!(err, KlartextError::ImageError(_)));
    }

    #[test]
    fn save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        gray(5, 5, |_, _| 77).save(&path).unwrap();
        let reopened = ImageProcessor::open(&path).unwrap();
        assert_eq!(luma_at(&reopened, 4, 4), 77);
    }

    #[test]
    fn open_missing_file_fails() {
        let err = ImageProcessor::open("/nonexistent/capture.png").err().unwrap();
        assert!(err.to_string().contains("failed to open"));
    }
}
