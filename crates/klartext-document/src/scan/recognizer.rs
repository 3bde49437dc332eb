// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The seam between preprocessing and whichever OCR backend is configured.

use image::DynamicImage;
use klartext_core::config::{OcrBackend, OcrSettings};
use klartext_core::error::{KlartextError, Result};

use super::tesseract::TesseractCli;

/// Turns a preprocessed image into raw OCR text.
pub trait TextRecognizer {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Recognise all text in `image`, lines separated by `'\n'`.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        (**self).recognize(image)
    }
}

/// Build the backend selected in `settings`.
pub fn recognizer_from_settings(settings: &OcrSettings) -> Result<Box<dyn TextRecognizer>> {
    match settings.backend {
        OcrBackend::Tesseract => Ok(Box::new(TesseractCli::new(settings))),
        OcrBackend::Ocrs => ocrs_recognizer(settings),
    }
}

#[cfg(feature = "ocr")]
fn ocrs_recognizer(settings: &OcrSettings) -> Result<Box<dyn TextRecognizer>> {
    let config = super::ocr::OcrConfig::from_settings(settings);
    Ok(Box::new(super::ocr::OcrEngine::new(config)?))
}

#[cfg(not(feature = "ocr"))]
fn ocrs_recognizer(_settings: &OcrSettings) -> Result<Box<dyn TextRecognizer>> {
    tracing::warn!("ocrs backend requested but the `ocr` feature is not compiled in");
    Err(KlartextError::OcrError(
        "the ocrs backend is not available in this build (enable the `ocr` feature)".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tesseract_is_the_default_backend() {
        let recognizer = recognizer_from_settings(&OcrSettings::default()).unwrap();
        assert_eq!(recognizer.name(), "tesseract");
    }

    #[cfg(not(feature = "ocr"))]
    #[test]
    fn ocrs_backend_needs_feature() {
        let settings = OcrSettings {
            backend: OcrBackend::Ocrs,
            ..OcrSettings::default()
        };
        let err = recognizer_from_settings(&settings).err().unwrap();
        assert!(matches!(err, KlartextError::OcrError(_)));
    }
}
