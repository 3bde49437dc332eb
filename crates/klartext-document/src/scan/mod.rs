// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline: preprocessing and optical character recognition.

pub mod preprocess;
pub mod recognizer;
pub mod tesseract;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use preprocess::OcrPreprocessor;
pub use recognizer::{TextRecognizer, recognizer_from_settings};
pub use tesseract::TesseractCli;

#[cfg(feature = "ocr")]
pub use ocr::{OcrConfig, OcrEngine};
