// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One capture, end to end: grab the selected region, preprocess it, OCR it,
// normalize the text and hand it to the sink.
//
// A failure aborts only the capture in progress. The controller keeps no
// per-capture state, so the next call starts clean.

use chrono::Utc;
use image::DynamicImage;
use klartext_bridge::{ScreenCapture, TextSink};
use klartext_core::error::Result;
use klartext_core::types::{CaptureId, CaptureOutcome, CaptureRegion};
use klartext_document::{OcrPreprocessor, TextRecognizer};
use klartext_text::TextNormalizer;
use tracing::{error, info, instrument, warn};

pub struct CaptureController {
    capture: Box<dyn ScreenCapture>,
    preprocessor: OcrPreprocessor,
    recognizer: Box<dyn TextRecognizer>,
    normalizer: TextNormalizer,
    sink: Option<Box<dyn TextSink>>,
}

impl CaptureController {
    pub fn new(
        capture: Box<dyn ScreenCapture>,
        preprocessor: OcrPreprocessor,
        recognizer: Box<dyn TextRecognizer>,
    ) -> Self {
        Self {
            capture,
            preprocessor,
            recognizer,
            normalizer: TextNormalizer::new(),
            sink: None,
        }
    }

    /// Deliver every non-empty result to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn TextSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Capture `region` from the screen and run the full pipeline on it.
    #[instrument(skip_all, fields(region = %region))]
    pub fn handle_selection(&self, region: CaptureRegion) -> Result<CaptureOutcome> {
        info!("Capturing area");
        let result = region
            .to_pixel_rect()
            .and_then(|rect| self.capture.capture(rect))
            .and_then(|image| self.process(Some(region), &image));
        if let Err(err) = &result {
            error!(error = %err, "Capture failed");
        }
        result
    }

    /// Run the pipeline on an image that did not come from the screen.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn handle_image(&self, image: &DynamicImage) -> Result<CaptureOutcome> {
        let result = self.process(None, image);
        if let Err(err) = &result {
            error!(error = %err, "Image processing failed");
        }
        result
    }

    fn process(&self, region: Option<CaptureRegion>, image: &DynamicImage) -> Result<CaptureOutcome> {
        let id = CaptureId::new();

        let prepared = self.preprocessor.preprocess(image)?;
        let raw = self.recognizer.recognize(&prepared)?;
        let text = self.normalizer.process_text(&raw).trim().to_string();
        let entry_count = text.lines().count();

        info!(
            %id,
            backend = self.recognizer.name(),
            raw_bytes = raw.len(),
            entries = entry_count,
            "Capture processed"
        );

        match &self.sink {
            Some(_) if text.is_empty() => warn!(%id, "No text recognised; sink left untouched"),
            Some(sink) => sink.deliver(&text)?,
            None => {}
        }

        Ok(CaptureOutcome {
            id,
            region,
            captured_at: Utc::now(),
            text,
            entry_count,
        })
    }
}
