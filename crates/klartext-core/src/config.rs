// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Every collaborator receives its settings explicitly at construction; nothing
// here is process-global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Tesseract arguments: LSTM engine, "uniform block of text" segmentation,
/// and preserved inter-word spacing.
pub const DEFAULT_TESSERACT_ARGS: &str = "--oem 3 --psm 6 -c preserve_interword_spaces=1";

/// Which OCR backend turns a preprocessed image into raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackend {
    /// External `tesseract` executable.
    Tesseract,
    /// In-process `ocrs` engine (requires the `ocr` feature).
    Ocrs,
}

/// OCR engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    pub backend: OcrBackend,
    /// Path to the tesseract executable. A bare name is resolved via `PATH`.
    pub tesseract_path: PathBuf,
    /// Mode string passed to tesseract after `stdout`.
    pub tesseract_args: String,
    /// Directory holding `text-detection.rten` / `text-recognition.rten`.
    /// `None` uses the ocrs cache directory.
    pub ocrs_model_dir: Option<PathBuf>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Tesseract,
            tesseract_path: PathBuf::from(default_tesseract_binary()),
            tesseract_args: DEFAULT_TESSERACT_ARGS.to_string(),
            ocrs_model_dir: None,
        }
    }
}

fn default_tesseract_binary() -> &'static str {
    if cfg!(windows) {
        "tesseract.exe"
    } else {
        "tesseract"
    }
}

/// Image preprocessing applied before OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessSettings {
    /// Integer upscale factor applied to both dimensions.
    pub scale_factor: u32,
    /// Contrast enhancement factor (1.0 = unchanged).
    pub contrast_factor: f32,
    /// Brightness enhancement factor (1.0 = unchanged).
    pub brightness_factor: f32,
    /// White border added on every side, in pixels.
    pub padding: u32,
}

impl Default for PreprocessSettings {
    fn default() -> Self {
        Self {
            scale_factor: 3,
            contrast_factor: 3.0,
            brightness_factor: 1.1,
            padding: 20,
        }
    }
}

/// Debug output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Persist the preprocessed image that was handed to the OCR engine.
    pub save_debug_image: bool,
    pub debug_image_path: PathBuf,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            save_debug_image: false,
            debug_image_path: PathBuf::from("debug_ocr.png"),
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrSettings,
    pub preprocess: PreprocessSettings,
    pub debug: DebugSettings,
    /// Copy normalized text to the clipboard after a screen capture.
    pub copy_to_clipboard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ocr: OcrSettings::default(),
            preprocess: PreprocessSettings::default(),
            debug: DebugSettings::default(),
            copy_to_clipboard: true,
        }
    }
}

impl AppConfig {
    /// Load a config file, falling back to the defaults when the file is
    /// missing. A file that exists but cannot be parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data).map_err(|err| {
            warn!(path = %path.display(), error = %err, "config file is malformed");
            crate::KlartextError::Config(format!("{}: {}", path.display(), err))
        })?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Path the debug image is written to, if enabled.
    pub fn debug_image_path(&self) -> Option<PathBuf> {
        self.debug
            .save_debug_image
            .then(|| self.debug.debug_image_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KlartextError;

    #[test]
    fn defaults_match_capture_profile() {
        let config = AppConfig::default();
        assert_eq!(config.preprocess.scale_factor, 3);
        assert_eq!(config.preprocess.padding, 20);
        assert!((config.preprocess.contrast_factor - 3.0).abs() < f32::EPSILON);
        assert!((config.preprocess.brightness_factor - 1.1).abs() < f32::EPSILON);
        assert_eq!(config.ocr.tesseract_args, DEFAULT_TESSERACT_ARGS);
        assert_eq!(config.ocr.backend, OcrBackend::Tesseract);
        assert!(config.copy_to_clipboard);
        assert!(config.debug_image_path().is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.preprocess.scale_factor = 4;
        config.debug.save_debug_image = true;
        config.save(&path).unwrap();

        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.debug_image_path(), Some(PathBuf::from("debug_ocr.png")));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "ocr": { "backend": "ocrs" } }"#).unwrap();

        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.ocr.backend, OcrBackend::Ocrs);
        assert_eq!(loaded.ocr.tesseract_args, DEFAULT_TESSERACT_ARGS);
        assert_eq!(loaded.preprocess, PreprocessSettings::default());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, KlartextError::Config(_)));
    }
}
