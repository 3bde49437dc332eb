// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// klartext-document: image side of Klartext.
//
// Prepares screen captures for OCR (upscale, grayscale, contrast, brightness,
// padding) and runs them through an OCR backend: the external tesseract CLI,
// or the in-process `ocrs` engine behind the `ocr` feature.

pub mod image;
pub mod scan;

pub use image::processor::ImageProcessor;
pub use scan::preprocess::OcrPreprocessor;
pub use scan::recognizer::{TextRecognizer, recognizer_from_settings};
pub use scan::tesseract::TesseractCli;

#[cfg(feature = "ocr")]
pub use scan::ocr::{OcrConfig, OcrEngine};
