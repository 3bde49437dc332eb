// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract backend: runs the external `tesseract` executable on a temporary
// PNG and reads the recognised text from its stdout.
//
// Invocation: `<tesseract_path> <image.png> stdout <args...>`, where the
// default args are `--oem 3 --psm 6 -c preserve_interword_spaces=1`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;
use klartext_core::config::OcrSettings;
use klartext_core::error::{KlartextError, Result};
use tracing::{debug, info, instrument};

use super::recognizer::TextRecognizer;
use crate::image::ImageProcessor;

/// Handle on a tesseract executable plus its mode arguments.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
    args: Vec<String>,
}

impl TesseractCli {
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            binary: settings.tesseract_path.clone(),
            args: settings
                .tesseract_args
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run tesseract on an image already on disk.
    #[instrument(skip(self), fields(binary = %self.binary.display()))]
    pub fn recognize_file(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .args(&self.args)
            .output()
            .map_err(|err| {
                KlartextError::OcrError(format!(
                    "failed to launch {}: {}",
                    self.binary.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KlartextError::OcrError(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "Tesseract recognition complete"
        );
        Ok(text)
    }
}

impl TextRecognizer for TesseractCli {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let png = ImageProcessor::from_dynamic(image.clone()).to_png_bytes()?;

        let mut file = tempfile::Builder::new()
            .prefix("klartext-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(&png)?;
        file.flush()?;
        // Close our handle before tesseract opens the file; removed on drop.
        let path = file.into_temp_path();

        info!(bytes = png.len(), "Running tesseract");
        self.recognize_file(&path)
    }
}
