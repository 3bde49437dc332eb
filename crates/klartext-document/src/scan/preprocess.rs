// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR preprocessing for screen captures: upscale, flatten to gray, push
// contrast, then frame the result in white.

use std::path::PathBuf;

use image::DynamicImage;
use klartext_core::config::PreprocessSettings;
use klartext_core::error::Result;
use tracing::{info, instrument};

use crate::image::ImageProcessor;

const PAD_FILL: u8 = 255;

/// Turns a raw capture into the image handed to the OCR engine.
#[derive(Debug, Clone)]
pub struct OcrPreprocessor {
    settings: PreprocessSettings,
    debug_image_path: Option<PathBuf>,
}

impl OcrPreprocessor {
    pub fn new(settings: PreprocessSettings) -> Self {
        Self {
            settings,
            debug_image_path: None,
        }
    }

    /// Also write every preprocessed image to `path` as PNG.
    pub fn with_debug_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_image_path = Some(path.into());
        self
    }

    pub fn settings(&self) -> &PreprocessSettings {
        &self.settings
    }

    /// RGB, upscale, grayscale, contrast, brightness, white padding.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn preprocess(&self, image: &DynamicImage) -> Result<DynamicImage> {
        let s = &self.settings;
        let processed = ImageProcessor::from_dynamic(image.clone())
            .to_rgb()
            .scale(s.scale_factor)
            .grayscale()
            .adjust_contrast(s.contrast_factor)
            .adjust_brightness(s.brightness_factor)
            .pad(s.padding, PAD_FILL);

        if let Some(path) = &self.debug_image_path {
            processed.save(path)?;
            info!(path = %path.display(), "Saved preprocessed debug image");
        }

        info!(
            width = processed.width(),
            height = processed.height(),
            "Image preprocessed for OCR"
        );
        Ok(processed.into_dynamic())
    }
}

impl Default for OcrPreprocessor {
    fn default() -> Self {
        Self::new(PreprocessSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn capture(width: u32, height: u32) -> DynamicImage {
        // Dark text-like stripe on a light background.
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, y| {
            if y == height / 2 {
                Rgb([20, 20, 20])
            } else {
                Rgb([230, 230, 230])
            }
        }))
    }

    #[test]
    fn default_pipeline_dimensions() {
        let out = OcrPreprocessor::default().preprocess(&capture(120, 40)).unwrap();
        // 120 * 3 + 2 * 20, 40 * 3 + 2 * 20
        assert_eq!((out.width(), out.height()), (400, 160));
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn border_is_white() {
        let out = OcrPreprocessor::default().preprocess(&capture(10, 10)).unwrap();
        let gray = out.to_luma8();
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert_eq!(gray.get_pixel(gray.width() - 1, gray.height() - 1)[0], 255);
    }

    #[test]
    fn contrast_separates_text_from_background() {
        let settings = PreprocessSettings {
            scale_factor: 1,
            padding: 0,
            ..PreprocessSettings::default()
        };
        let out = OcrPreprocessor::new(settings).preprocess(&capture(8, 9)).unwrap();
        let gray = out.to_luma8();
        assert_eq!(gray.get_pixel(0, 4)[0], 0);
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn writes_debug_image_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug_ocr.png");
        let pre = OcrPreprocessor::default().with_debug_image(&path);
        pre.preprocess(&capture(6, 6)).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!((saved.width(), saved.height()), (58, 58));
    }
}
