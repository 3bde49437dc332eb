// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native desktop bridges: screen capture through `xcap`, clipboard through
// `arboard`. Only compiled with the `desktop` feature.

use std::sync::Mutex;

use arboard::Clipboard;
use image::{DynamicImage, RgbaImage};
use klartext_core::error::{KlartextError, Result};
use klartext_core::types::{MonitorGeometry, PixelRect, ScreenBounds};
use tracing::{debug, info, instrument};
use xcap::Monitor;

use crate::composite::{MonitorShot, composite_region};
use crate::traits::{ScreenCapture, TextSink};

// ---------------------------------------------------------------------------
// Screen capture
// ---------------------------------------------------------------------------

/// Captures regions of the virtual desktop, stitching across monitors.
#[derive(Debug, Clone, Copy, Default)]
pub struct XcapCapture;

impl XcapCapture {
    pub fn new() -> Self {
        Self
    }
}

fn capture_err(err: xcap::XCapError) -> KlartextError {
    KlartextError::Capture(err.to_string())
}

fn all_monitors() -> Result<Vec<Monitor>> {
    let monitors = Monitor::all().map_err(capture_err)?;
    if monitors.is_empty() {
        return Err(KlartextError::Capture("no monitors detected".into()));
    }
    Ok(monitors)
}

fn geometry(monitor: &Monitor) -> Result<MonitorGeometry> {
    Ok(MonitorGeometry {
        left: monitor.x().map_err(capture_err)?,
        top: monitor.y().map_err(capture_err)?,
        width: monitor.width().map_err(capture_err)?,
        height: monitor.height().map_err(capture_err)?,
    })
}

impl ScreenCapture for XcapCapture {
    #[instrument(skip(self))]
    fn screen_bounds(&self) -> Result<ScreenBounds> {
        let monitors = all_monitors()?;
        let mut geometries = Vec::with_capacity(monitors.len());
        let mut primary = None;
        for monitor in &monitors {
            let g = geometry(monitor)?;
            if monitor.is_primary().unwrap_or(false) {
                primary = Some(g);
            }
            geometries.push(g);
        }
        let primary = primary.unwrap_or(geometries[0]);
        let bounds = ScreenBounds::from_monitors(&geometries, primary);
        info!(
            monitors = geometries.len(),
            total_width = bounds.total_width,
            total_height = bounds.total_height,
            min_x = bounds.min_x,
            min_y = bounds.min_y,
            "Screen bounds computed"
        );
        Ok(bounds)
    }

    #[instrument(skip(self), fields(left = rect.left, top = rect.top, width = rect.width, height = rect.height))]
    fn capture(&self, rect: PixelRect) -> Result<DynamicImage> {
        let mut shots = Vec::new();
        for monitor in all_monitors()? {
            let geometry = PixelRect::from(geometry(&monitor)?);
            if rect.intersect(&geometry).is_none() {
                continue;
            }
            let shot = monitor.capture_image().map_err(capture_err)?;
            let (width, height) = shot.dimensions();
            if (width, height) != (geometry.width, geometry.height) {
                debug!(
                    width,
                    height,
                    logical_width = geometry.width,
                    logical_height = geometry.height,
                    "Scaled screenshot; resampling to desktop coordinates"
                );
            }
            let image = RgbaImage::from_raw(width, height, shot.into_raw()).ok_or_else(|| {
                KlartextError::Capture("screenshot buffer has unexpected size".into())
            })?;
            shots.push(MonitorShot { geometry, image });
        }
        debug!(monitors = shots.len(), "Monitors captured");
        let region = composite_region(rect, &shots)?;
        Ok(DynamicImage::ImageRgba8(region))
    }
}

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

/// System clipboard. The handle is kept for the sink's lifetime so the
/// contents stay served on platforms where the owner must stay alive.
pub struct ArboardClipboard {
    clipboard: Mutex<Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().map_err(|err| {
            KlartextError::Clipboard(format!("failed to open clipboard: {}", err))
        })?;
        Ok(Self {
            clipboard: Mutex::new(clipboard),
        })
    }
}

impl TextSink for ArboardClipboard {
    fn deliver(&self, text: &str) -> Result<()> {
        let mut clipboard = self
            .clipboard
            .lock()
            .map_err(|_| KlartextError::Clipboard("clipboard lock poisoned".into()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| KlartextError::Clipboard(format!("failed to set text: {}", err)))?;
        info!(chars = text.chars().count(), "Text copied to clipboard");
        Ok(())
    }
}
