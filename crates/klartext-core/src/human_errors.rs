// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for clinical staff at the capture desk.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the CLI reports the failure and whether a retry is
// worth offering.

use crate::error::KlartextError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Try the same capture again.
    Transient,
    /// User must do something (reselect, install tesseract, fix config).
    ActionRequired,
    /// Retrying will not help on this machine.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether repeating the operation unchanged can succeed.
    pub retriable: bool,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `KlartextError` into a `HumanError`.
pub fn humanize_error(err: &KlartextError) -> HumanError {
    match err {
        // -- Capture errors --
        KlartextError::Capture(_) => HumanError {
            message: "The screen couldn't be captured.".into(),
            suggestion: "Make sure the record is visible on screen, then select the area again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        KlartextError::InvalidRegion { .. } => HumanError {
            message: "The selected area is empty or lies outside the screen.".into(),
            suggestion: "Drag out a rectangle that covers the lines you want to copy.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Recognition errors --
        KlartextError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        KlartextError::OcrError(detail) => humanize_ocr_error(detail),

        // -- Sink errors --
        KlartextError::Clipboard(_) => HumanError {
            message: "The text couldn't be copied to the clipboard.".into(),
            suggestion: "Another program may be holding the clipboard. Close it and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Configuration / persistence --
        KlartextError::Config(detail) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: format!("Fix or delete the settings file to go back to the defaults. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        KlartextError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Klartext doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or pick a different location.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        KlartextError::Serialization(_) => HumanError {
            message: "Klartext had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Platform --
        KlartextError::PlatformUnavailable => HumanError {
            message: "This feature isn't available in this build.".into(),
            suggestion: "Screen capture and clipboard need a desktop build (the `desktop` feature).".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

/// Parse OCR-engine failure details into human-readable messages.
fn humanize_ocr_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("model") {
        HumanError {
            message: "The text recognition models are missing.".into(),
            suggestion: "Download the ocrs models, or switch `ocr.backend` to \"tesseract\".".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("failed to launch") || lower.contains("not found") {
        HumanError {
            message: "The text recognition engine isn't installed.".into(),
            suggestion: "Install Tesseract OCR, or set `ocr.tesseract_path` in the settings file to where it lives.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: "Text recognition didn't work on this capture.".into(),
            suggestion: format!("Try selecting the area again, keeping the text sharp and fully inside the box. (Detail: {detail})"),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}
