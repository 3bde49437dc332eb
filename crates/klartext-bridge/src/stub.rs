// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridges for builds without the `desktop` feature (headless servers, CI).
//
// Every method returns `PlatformUnavailable`; the real implementations live in
// the `desktop` module.

use image::DynamicImage;
use klartext_core::error::{KlartextError, Result};
use klartext_core::types::{PixelRect, ScreenBounds};

use crate::traits::{ScreenCapture, TextSink};

/// Screen capture that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubCapture;

impl ScreenCapture for StubCapture {
    fn screen_bounds(&self) -> Result<ScreenBounds> {
        tracing::warn!("ScreenCapture::screen_bounds called on stub bridge");
        Err(KlartextError::PlatformUnavailable)
    }

    fn capture(&self, _rect: PixelRect) -> Result<DynamicImage> {
        tracing::warn!("ScreenCapture::capture called on stub bridge");
        Err(KlartextError::PlatformUnavailable)
    }
}

/// Clipboard that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubClipboard;

impl TextSink for StubClipboard {
    fn deliver(&self, _text: &str) -> Result<()> {
        tracing::warn!("TextSink::deliver called on stub clipboard");
        Err(KlartextError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_capture_is_unavailable() {
        let rect = PixelRect {
            left: 0,
            top: 0,
            width: 10,
            height: 10,
        };
        assert!(matches!(
            StubCapture.capture(rect),
            Err(KlartextError::PlatformUnavailable)
        ));
        assert!(matches!(
            StubCapture.screen_bounds(),
            Err(KlartextError::PlatformUnavailable)
        ));
    }

    #[test]
    fn stub_clipboard_is_unavailable() {
        assert!(matches!(
            StubClipboard.deliver("05 Jan 1999 Asthma"),
            Err(KlartextError::PlatformUnavailable)
        ));
    }
}
