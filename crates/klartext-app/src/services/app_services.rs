// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: loads the configuration and assembles the capture
// controller from it.

use std::path::{Path, PathBuf};

use klartext_bridge::{ScreenCapture, TextSink};
use klartext_core::AppConfig;
use klartext_core::error::Result;
use klartext_document::{OcrPreprocessor, recognizer_from_settings};
use tracing::info;

use super::controller::CaptureController;
use super::data_dir;

pub struct AppServices {
    config: AppConfig,
    config_path: PathBuf,
}

impl AppServices {
    /// Load the config from `config_path`, or from the data directory when
    /// `None`. A missing file yields the defaults.
    pub fn init(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(data_dir::config_path);
        let config = AppConfig::load_or_default(&config_path)?;
        info!(path = %config_path.display(), "app services initialised");
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Default configuration bound to `config_path`, ignoring any file there.
    pub fn with_defaults(config_path: Option<PathBuf>) -> Self {
        Self {
            config: AppConfig::default(),
            config_path: config_path.unwrap_or_else(data_dir::config_path),
        }
    }

    // -- Config --------------------------------------------------------------

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Write the current configuration back to its file.
    pub fn persist_config(&self) -> Result<()> {
        self.config.save(&self.config_path)
    }

    // -- Pipeline ------------------------------------------------------------

    pub fn preprocessor(&self) -> OcrPreprocessor {
        let preprocessor = OcrPreprocessor::new(self.config.preprocess.clone());
        match self.config.debug_image_path() {
            Some(path) => preprocessor.with_debug_image(path),
            None => preprocessor,
        }
    }

    /// Build a controller for the configured OCR backend.
    pub fn controller(
        &self,
        capture: Box<dyn ScreenCapture>,
        sink: Option<Box<dyn TextSink>>,
    ) -> Result<CaptureController> {
        let recognizer = recognizer_from_settings(&self.config.ocr)?;
        let controller = CaptureController::new(capture, self.preprocessor(), recognizer);
        Ok(match sink {
            Some(sink) => controller.with_sink(sink),
            None => controller,
        })
    }
}
