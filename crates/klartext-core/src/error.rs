// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Klartext.
//
// Text normalization itself never fails; these variants belong to the
// collaborators around it (capture, preprocessing, OCR, clipboard, config).

use thiserror::Error;

/// Top-level error type for all Klartext operations.
#[derive(Debug, Error)]
pub enum KlartextError {
    // -- Capture errors --
    #[error("screen capture failed: {0}")]
    Capture(String),

    #[error("invalid capture region: {width}x{height} (must be positive and within pixel range)")]
    InvalidRegion { width: i64, height: i64 },

    // -- Recognition errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    // -- Sink errors --
    #[error("clipboard error: {0}")]
    Clipboard(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KlartextError>;
