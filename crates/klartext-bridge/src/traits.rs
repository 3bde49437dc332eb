// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the capture source and the text sink.

use image::DynamicImage;
use klartext_core::error::Result;
use klartext_core::types::{PixelRect, ScreenBounds};

/// Grabs pixels from the virtual desktop.
///
/// Platforms without screen access return
/// `KlartextError::PlatformUnavailable` from the stub implementation.
pub trait ScreenCapture {
    /// Extent of the desktop across every monitor.
    fn screen_bounds(&self) -> Result<ScreenBounds>;

    /// Capture `rect`, given in virtual-desktop coordinates.
    fn capture(&self, rect: PixelRect) -> Result<DynamicImage>;
}

/// Receives the normalized text of a capture.
pub trait TextSink {
    fn deliver(&self, text: &str) -> Result<()>;
}

impl<T: ScreenCapture + ?Sized> ScreenCapture for Box<T> {
    fn screen_bounds(&self) -> Result<ScreenBounds> {
        (**self).screen_bounds()
    }

    fn capture(&self, rect: PixelRect) -> Result<DynamicImage> {
        (**self).capture(rect)
    }
}

impl<T: TextSink + ?Sized> TextSink for Box<T> {
    fn deliver(&self, text: &str) -> Result<()> {
        (**self).deliver(text)
    }
}
