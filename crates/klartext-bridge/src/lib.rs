// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// klartext-bridge: native desktop access for Klartext.
//
// Defines the capture and sink traits and picks an implementation at build
// time: `xcap` + `arboard` with the `desktop` feature, stubs returning
// `PlatformUnavailable` without it.

pub mod composite;
pub mod stdout;
pub mod stub;
pub mod traits;

#[cfg(feature = "desktop")]
pub mod desktop;

pub use stdout::StdoutSink;
pub use traits::{ScreenCapture, TextSink};

use klartext_core::error::Result;

/// Screen capture backend for this build.
pub fn platform_capture() -> Box<dyn ScreenCapture> {
    #[cfg(feature = "desktop")]
    {
        Box::new(desktop::XcapCapture::new())
    }
    #[cfg(not(feature = "desktop"))]
    {
        Box::new(stub::StubCapture)
    }
}

/// Clipboard sink for this build.
pub fn platform_clipboard() -> Result<Box<dyn TextSink>> {
    #[cfg(feature = "desktop")]
    {
        Ok(Box::new(desktop::ArboardClipboard::new()?))
    }
    #[cfg(not(feature = "desktop"))]
    {
        Ok(Box::new(stub::StubClipboard))
    }
}
